use crate::types::{ElementType, EngineError, SymbolShape};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_level_pattern() -> String {
    r"^\s*(\d+)".to_string()
}

fn default_symbol_pattern() -> String {
    r"^\s*([A-Z0-9\.]+)".to_string()
}

fn default_title_word_count() -> usize {
    5
}

/// Recognition rules for one document family.
///
/// A RuleSet is a value object: constructed once (preset, YAML file, or
/// caller-assembled), validated and compiled once, never mutated. Both the
/// line merger and the classifier work from the same compiled patterns, so
/// "starts a new entry" and "becomes a record" can never disagree.
///
/// Invariant: `level_pattern` and `symbol_pattern` are line-start anchored
/// (they are matched against the beginning of each candidate line). An
/// empty `symbol_pattern` makes the rule set invalid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSet {
    /// Matches the hierarchy depth token at line start, e.g. `^\s*(\d+)`.
    #[serde(default = "default_level_pattern")]
    pub level_pattern: String,
    /// Matches the structural identifier (A, B1, C2.1, 4.1, ...).
    #[serde(default = "default_symbol_pattern")]
    pub symbol_pattern: String,
    /// Fallback word count splitting title from body when no colon is found.
    #[serde(default = "default_title_word_count")]
    pub title_word_count: usize,
    /// Symbol shape category → semantic element type. Omitted shapes fall
    /// back to `SymbolShape::default_type`.
    #[serde(default)]
    pub type_mapping: HashMap<SymbolShape, ElementType>,
    /// Strip page numbers and running headers before merging.
    #[serde(default = "default_true")]
    pub remove_headers: bool,
    /// Rejoin wrapped lines before classification.
    #[serde(default = "default_true")]
    pub merge_lines: bool,
    /// Running-header strings removed when a line equals one exactly
    /// (after trimming). Configured per document family.
    #[serde(default)]
    pub header_lines: Vec<String>,
    /// Illustrative sample text shown by `docstruct --show-configs`.
    #[serde(default)]
    pub example: String,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::general()
    }
}

impl RuleSet {
    /// Resolve a named preset. Unknown names deterministically fall back to
    /// the `general` preset rather than failing.
    pub fn preset(name: &str) -> Self {
        match name {
            "palliative_care" => Self::palliative_care(),
            "iso_standard" => Self::iso_standard(),
            _ => Self::general(),
        }
    }

    pub fn preset_names() -> [&'static str; 3] {
        ["palliative_care", "iso_standard", "general"]
    }

    /// Audit criteria for palliative long-term care (qualité palliative).
    /// Symbols are letters with optional dotted numbering: A, B1, C2.1.
    pub fn palliative_care() -> Self {
        Self {
            level_pattern: r"^\s*(\d+)".to_string(),
            symbol_pattern: r"^\s*(?:\d+\s+)?([A-Z](?:\d+(?:\.\d+)*)?)".to_string(),
            title_word_count: 5,
            type_mapping: HashMap::from([
                (SymbolShape::SingleLetter, ElementType::Chapter),
                (SymbolShape::LetterNumber, ElementType::Chapter),
                (SymbolShape::LetterNumberDotNumber, ElementType::Requirement),
            ]),
            remove_headers: true,
            merge_lines: true,
            header_lines: vec![
                "Kriterienliste für die stationäre Langzeitpflege".to_string(),
            ],
            example: "\
1 A Einleitung: Qualitätsrichtlinien für Palliative Care
2 B1 Definition: Palliative Care ist ein Ansatz...
3 C2.1 Anforderung: Systematische Erfassung von Symptomen
"
            .to_string(),
        }
    }

    /// ISO-style standards: level and symbol are the same dotted clause
    /// number (1, 4.1, 5.2, ...).
    pub fn iso_standard() -> Self {
        Self {
            level_pattern: r"^\s*(\d+(?:\.\d+)*)".to_string(),
            symbol_pattern: r"^\s*(\d+(?:\.\d+)*)".to_string(),
            title_word_count: 5,
            type_mapping: HashMap::from([
                (SymbolShape::SingleNumber, ElementType::Chapter),
                (SymbolShape::NumberDotNumber, ElementType::Requirement),
            ]),
            remove_headers: true,
            merge_lines: true,
            header_lines: Vec::new(),
            example: "\
1 Anwendungsbereich
4.1 Verstehen der Organisation: Die Organisation muss...
5.2 Politik: Die oberste Leitung muss...
"
            .to_string(),
        }
    }

    /// Permissive rules accepting letter, number and dotted symbols.
    pub fn general() -> Self {
        Self {
            level_pattern: default_level_pattern(),
            symbol_pattern: default_symbol_pattern(),
            title_word_count: default_title_word_count(),
            type_mapping: HashMap::from([
                (SymbolShape::SingleLetter, ElementType::Chapter),
                (SymbolShape::SingleNumber, ElementType::Chapter),
                (SymbolShape::LetterNumber, ElementType::Chapter),
                (SymbolShape::NumberDotNumber, ElementType::Requirement),
                (SymbolShape::LetterNumberDotNumber, ElementType::Requirement),
            ]),
            remove_headers: true,
            merge_lines: true,
            header_lines: Vec::new(),
            example: "\
1 TEIL1 Einführung in das Thema
2 KAP2 Wichtige Grundlagen zum Verständnis
3 ABS3.1 Unterabschnitt mit Details
"
            .to_string(),
        }
    }

    /// Load a rule set from a YAML file.
    pub fn load_from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let rules: RuleSet = serde_yaml::from_str(&content)?;
        Ok(rules)
    }

    /// Load a rule set with fallback to the `general` preset.
    pub fn load_with_fallback(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|_| {
                eprintln!("⚠️  Failed to load rules from {}, using general preset", p);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Validate fields and compile the recognition patterns. Configuration
    /// errors surface here, before any processing is attempted.
    pub fn compile(&self) -> Result<CompiledRules, EngineError> {
        if self.symbol_pattern.trim().is_empty() {
            return Err(EngineError::Config(
                "symbol_pattern must not be empty".to_string(),
            ));
        }
        let level = compile_pattern(&self.level_pattern)?;
        let symbol = compile_pattern(&self.symbol_pattern)?;
        Ok(CompiledRules { level, symbol })
    }

    /// Element type for a symbol shape, with the shape's conventional
    /// default when the mapping omits the key.
    pub fn mapped_type(&self, shape: SymbolShape) -> ElementType {
        self.type_mapping
            .get(&shape)
            .cloned()
            .unwrap_or_else(|| shape.default_type())
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex, EngineError> {
    Regex::new(pattern).map_err(|source| EngineError::Pattern {
        pattern: pattern.to_string(),
        source: Box::new(source),
    })
}

/// Compiled form of a RuleSet's recognition patterns.
///
/// Also serves as the new-entry detector used by the line merger: a line
/// starts a new structural entry iff the level pattern and the symbol
/// pattern both match it. Both patterns are line-start anchored and the
/// symbol pattern tolerates the leading level token, so the conjunction is
/// exactly "a level token followed eventually by a symbol token on the
/// same line" — and identical to the classifier's match criterion.
#[derive(Debug)]
pub struct CompiledRules {
    pub(crate) level: Regex,
    pub(crate) symbol: Regex,
}

impl CompiledRules {
    pub fn starts_new_entry(&self, line: &str) -> bool {
        self.level.is_match(line) && self.symbol.is_match(line)
    }
}
