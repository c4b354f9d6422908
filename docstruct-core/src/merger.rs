use crate::config::{CompiledRules, RuleSet};

/// Rejoins logically continuous sentences that text extraction split
/// across output lines.
///
/// Uses the same compiled patterns that later identify structure, so
/// "this line starts a new entry" and "this line is a continuation" can
/// never be inconsistent with classification.
pub struct LineMerger;

impl LineMerger {
    /// One-pass, non-backtracking accumulator walk over the lines.
    ///
    /// A line matching the new-entry detector flushes the current
    /// accumulator and starts a new one. Blank lines are skipped entirely
    /// (no-ops, not separators). Any other non-blank line is appended to
    /// the accumulator with a single space, trimmed.
    ///
    /// A document whose first informative line is not an entry start
    /// produces one leading accumulator with no level/symbol match; the
    /// classifier drops it silently, which is the intended behavior —
    /// only recognized structural lines become records.
    pub fn merge(text: &str, rules: &RuleSet, compiled: &CompiledRules) -> String {
        if !rules.merge_lines {
            return text.to_string();
        }

        let mut merged: Vec<String> = Vec::new();
        let mut current: Option<String> = None;

        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            if compiled.starts_new_entry(line) {
                if let Some(entry) = current.take() {
                    merged.push(entry);
                }
                current = Some(line.to_string());
            } else {
                match current.as_mut() {
                    Some(entry) => {
                        entry.push(' ');
                        entry.push_str(line.trim());
                    }
                    None => current = Some(line.to_string()),
                }
            }
        }
        if let Some(entry) = current {
            merged.push(entry);
        }

        merged.join("\n")
    }
}
