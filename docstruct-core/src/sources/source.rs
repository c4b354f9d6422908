use crate::types::EngineError;
use std::path::Path;

/// Produces the ordered per-page text of a document.
///
/// This is the engine's input boundary: "given a document, produce an
/// ordered sequence of page texts". Extraction failures are reported as
/// `EngineError::InputUnavailable` and terminate the enclosing
/// invocation — the engine performs no partial processing.
pub trait PageSource {
    /// Extract the document's pages, in order.
    fn extract_pages(&self, input: &Path) -> Result<Vec<String>, EngineError>;

    /// Source name for status output.
    fn name(&self) -> &str;

    /// Whether this source can handle the given file type.
    fn supports_file_type(&self, path: &Path) -> bool;
}
