//! Rule-set and configuration tests: preset resolution, serde defaults,
//! YAML round-trips and the output record's field-name contract.

use std::collections::HashMap;

use docstruct_core::{ElementType, EngineError, Record, RuleSet, SymbolShape};

// ============================================================================
// Preset resolution
// ============================================================================

mod presets {
    use super::*;

    #[test]
    fn known_presets_resolve_by_name() {
        assert!(RuleSet::preset("palliative_care")
            .symbol_pattern
            .contains("[A-Z]"));
        assert_eq!(
            RuleSet::preset("iso_standard").level_pattern,
            RuleSet::preset("iso_standard").symbol_pattern
        );
    }

    #[test]
    fn unknown_preset_falls_back_to_general() {
        let unknown = RuleSet::preset("definitely_not_a_preset");
        let general = RuleSet::general();
        assert_eq!(unknown.level_pattern, general.level_pattern);
        assert_eq!(unknown.symbol_pattern, general.symbol_pattern);
        assert_eq!(unknown.type_mapping, general.type_mapping);
    }

    #[test]
    fn default_rule_set_is_the_general_preset() {
        assert_eq!(RuleSet::default().symbol_pattern, RuleSet::general().symbol_pattern);
    }

    #[test]
    fn every_preset_compiles_and_has_an_example() {
        for name in RuleSet::preset_names() {
            let rules = RuleSet::preset(name);
            assert!(rules.compile().is_ok(), "preset {name} should compile");
            assert!(!rules.example.is_empty(), "preset {name} should carry an example");
        }
    }

    #[test]
    fn palliative_preset_knows_its_running_header() {
        let rules = RuleSet::palliative_care();
        assert!(rules
            .header_lines
            .iter()
            .any(|h| h.contains("Kriterienliste")));
    }
}

// ============================================================================
// Serde: YAML rule files and defaults
// ============================================================================

mod yaml_rules {
    use super::*;

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let rules: RuleSet = serde_yaml::from_str(r"symbol_pattern: '^\s*([A-Z]+)'").unwrap();
        assert_eq!(rules.symbol_pattern, r"^\s*([A-Z]+)");
        assert_eq!(rules.title_word_count, 5);
        assert!(rules.remove_headers);
        assert!(rules.merge_lines);
        assert!(rules.type_mapping.is_empty());
    }

    #[test]
    fn type_mapping_uses_snake_case_shape_keys() {
        let yaml = "
type_mapping:
  single_letter: CHAPTER
  letter_number_dot_number: REQUIREMENT
";
        let rules: RuleSet = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            rules.type_mapping.get(&SymbolShape::SingleLetter),
            Some(&ElementType::Chapter)
        );
        assert_eq!(
            rules.type_mapping.get(&SymbolShape::LetterNumberDotNumber),
            Some(&ElementType::Requirement)
        );
    }

    #[test]
    fn custom_element_kinds_round_trip_as_plain_strings() {
        let yaml = "
type_mapping:
  single_letter: ANNEX
";
        let rules: RuleSet = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            rules.type_mapping.get(&SymbolShape::SingleLetter),
            Some(&ElementType::Other("ANNEX".to_string()))
        );
        let back = serde_yaml::to_string(&rules).unwrap();
        assert!(back.contains("ANNEX"));
    }

    #[test]
    fn load_with_fallback_on_missing_file_returns_general() {
        let rules = RuleSet::load_with_fallback(Some("/nonexistent/rules.yaml"));
        assert_eq!(rules.symbol_pattern, RuleSet::general().symbol_pattern);
    }
}

// ============================================================================
// Validation and compilation
// ============================================================================

mod validation {
    use super::*;

    #[test]
    fn empty_symbol_pattern_is_invalid() {
        let mut rules = RuleSet::general();
        rules.symbol_pattern = String::new();
        assert!(matches!(rules.compile(), Err(EngineError::Config(_))));
    }

    #[test]
    fn whitespace_symbol_pattern_is_invalid() {
        let mut rules = RuleSet::general();
        rules.symbol_pattern = "   ".to_string();
        assert!(matches!(rules.compile(), Err(EngineError::Config(_))));
    }

    #[test]
    fn malformed_level_pattern_reports_the_offending_pattern() {
        let mut rules = RuleSet::general();
        rules.level_pattern = r"^(\d".to_string();
        match rules.compile() {
            Err(EngineError::Pattern { pattern, .. }) => assert_eq!(pattern, r"^(\d"),
            other => panic!("expected pattern error, got {other:?}"),
        }
    }

    #[test]
    fn errors_render_a_human_readable_message() {
        let mut rules = RuleSet::general();
        rules.symbol_pattern = String::new();
        let message = rules.compile().unwrap_err().to_string();
        assert!(message.contains("symbol_pattern"));
    }
}

// ============================================================================
// Type mapping defaults
// ============================================================================

mod mapping_defaults {
    use super::*;

    #[test]
    fn conventional_defaults_per_shape() {
        let rules = RuleSet {
            type_mapping: HashMap::new(),
            ..RuleSet::general()
        };
        assert_eq!(rules.mapped_type(SymbolShape::SingleLetter), ElementType::Chapter);
        assert_eq!(rules.mapped_type(SymbolShape::LetterNumber), ElementType::Chapter);
        assert_eq!(rules.mapped_type(SymbolShape::SingleNumber), ElementType::Chapter);
        assert_eq!(
            rules.mapped_type(SymbolShape::LetterNumberDotNumber),
            ElementType::Requirement
        );
        assert_eq!(
            rules.mapped_type(SymbolShape::NumberDotNumber),
            ElementType::Requirement
        );
    }

    #[test]
    fn explicit_mapping_overrides_the_default() {
        let mut rules = RuleSet::general();
        rules
            .type_mapping
            .insert(SymbolShape::NumberDotNumber, ElementType::Chapter);
        assert_eq!(rules.mapped_type(SymbolShape::NumberDotNumber), ElementType::Chapter);
    }
}

// ============================================================================
// Output record contract
// ============================================================================

mod record_contract {
    use super::*;

    #[test]
    fn records_serialize_with_the_export_field_names() {
        let record = Record {
            level: "1".to_string(),
            symbol: "A".to_string(),
            element_type: ElementType::Chapter,
            title: "Einleitung".to_string(),
            text: "Grundlagen".to_string(),
        };
        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["Level"], "1");
        assert_eq!(json["Symbol"], "A");
        assert_eq!(json["Type"], "CHAPTER");
        assert_eq!(json["Title"], "Einleitung");
        assert_eq!(json["Text"], "Grundlagen");
    }

    #[test]
    fn element_type_display_matches_wire_names() {
        assert_eq!(ElementType::Chapter.to_string(), "CHAPTER");
        assert_eq!(ElementType::Requirement.to_string(), "REQUIREMENT");
        assert_eq!(ElementType::Other("ANNEX".to_string()).to_string(), "ANNEX");
    }
}
