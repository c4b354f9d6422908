use crate::config::RuleSet;
use once_cell::sync::Lazy;
use regex::Regex;

// Page-number artifacts are not document-family specific.
static PAGE_NUMBER_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\s*$").expect("static pattern"));
static PAGE_WORD_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*page\s+\d+\s*$").expect("static pattern"));

/// Strips running headers/footers and page-number artifacts from raw page
/// text before the merge and classification stages see it.
pub struct TextNormalizer;

impl TextNormalizer {
    /// Concatenate page texts in order (one line break between pages) and
    /// remove header/footer noise line by line.
    ///
    /// There is no lookahead across a page boundary: a structural entry
    /// split exactly at a page break is not repaired here. Pure function;
    /// an empty page sequence yields an empty string.
    pub fn normalize(pages: &[String], rules: &RuleSet) -> String {
        let text = pages.join("\n");
        if !rules.remove_headers {
            return text;
        }

        let kept: Vec<&str> = text
            .lines()
            .filter(|line| !Self::is_header_or_footer(line, rules))
            .collect();
        kept.join("\n")
    }

    fn is_header_or_footer(line: &str, rules: &RuleSet) -> bool {
        if PAGE_NUMBER_LINE.is_match(line) || PAGE_WORD_LINE.is_match(line) {
            return true;
        }
        let trimmed = line.trim();
        rules.header_lines.iter().any(|header| trimmed == header)
    }
}
