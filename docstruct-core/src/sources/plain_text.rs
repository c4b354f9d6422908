use super::PageSource;
use crate::types::EngineError;
use std::path::Path;

/// Reads already-extracted plain text where pages are separated by form
/// feeds — the convention of `pdftotext` and similar extractors. A file
/// without form feeds is treated as a single page.
pub struct PlainTextSource;

impl PlainTextSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSource for PlainTextSource {
    fn extract_pages(&self, input: &Path) -> Result<Vec<String>, EngineError> {
        let content = std::fs::read_to_string(input).map_err(|e| {
            EngineError::InputUnavailable(format!("{}: {}", input.display(), e))
        })?;
        Ok(content.split('\u{0C}').map(str::to_string).collect())
    }

    fn name(&self) -> &str {
        "plain-text"
    }

    fn supports_file_type(&self, path: &Path) -> bool {
        matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("txt") | Some("text")
        )
    }
}
