// Docstruct Core Library
//
// Structure-recognition engine for linearized document text: reconstructs
// chapters, requirements and sub-items from raw, page-broken, header-
// polluted text using configurable pattern rules.

pub mod classifier;
pub mod config;
pub mod engine;
pub mod merger;
pub mod normalizer;
pub mod sources;
pub mod types;

// Re-export main types and functions for easy use
pub use classifier::StructureClassifier;
pub use config::{CompiledRules, RuleSet};
pub use engine::StructureEngine;
pub use merger::LineMerger;
pub use normalizer::TextNormalizer;
pub use sources::{PageSource, PlainTextSource};
pub use types::*;
