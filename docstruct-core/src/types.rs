use serde::{Deserialize, Serialize};
use thiserror::Error;

// ===== OUTPUT RECORD TYPES =====
// The engine's only output is an ordered Vec<Record>. Sequence position
// encodes document order — there is no other ordering field.

/// One recognized structural entry of the source document.
///
/// Serialized field names are the contract with the (external) export
/// layer and must not change: Level, Symbol, Type, Title, Text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Level")]
    pub level: String,
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "Type")]
    pub element_type: ElementType,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Text")]
    pub text: String,
}

/// Semantic kind of a structural entry.
///
/// Chapter and Requirement are the default members. Custom rule sets may
/// map symbol shapes to other kinds; those round-trip through the untagged
/// `Other` variant, so the output schema does not limit document families.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementType {
    Chapter,
    Requirement,
    #[serde(untagged)]
    Other(String),
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementType::Chapter => write!(f, "CHAPTER"),
            ElementType::Requirement => write!(f, "REQUIREMENT"),
            ElementType::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Shape category of a symbol token, the key space of `RuleSet::type_mapping`.
///
/// Categories are evaluated in this declaration order — first match wins
/// (see `classifier::symbol_shape`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolShape {
    /// A, B, C
    SingleLetter,
    /// A1, B2
    LetterNumber,
    /// A1.1, B2.3
    LetterNumberDotNumber,
    /// 1, 2, 3
    SingleNumber,
    /// 1.1, 2.3
    NumberDotNumber,
}

impl SymbolShape {
    /// Conventional element type when a rule set's mapping omits this shape.
    pub fn default_type(&self) -> ElementType {
        match self {
            SymbolShape::SingleLetter
            | SymbolShape::LetterNumber
            | SymbolShape::SingleNumber => ElementType::Chapter,
            SymbolShape::LetterNumberDotNumber | SymbolShape::NumberDotNumber => {
                ElementType::Requirement
            }
        }
    }
}

// ===== PIPELINE STAGE CAPTURE =====

/// Captured intermediate outputs from each pipeline stage.
/// Used for testing and diagnostics — lets you inspect/compare each boundary.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineStages {
    pub raw_text: String,
    pub normalized_text: String,
    pub merged_text: String,
    pub records: Vec<Record>,
}

// ===== ERROR TAXONOMY =====
// Recognition failure is NOT an error: lines that match no pattern are
// silently skipped, and a document yielding zero records is a valid
// outcome. Only the conditions below terminate an invocation.

#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed or missing rule set fields — surfaced before any stage runs.
    #[error("invalid rule set: {0}")]
    Config(String),

    /// A configured pattern failed to compile.
    #[error("invalid pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },

    /// The upstream extraction collaborator could not provide page text.
    #[error("input unavailable: {0}")]
    InputUnavailable(String),
}
