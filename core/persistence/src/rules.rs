//! FILENAME: core/persistence/src/rules.rs

use crate::PersistenceError;
use engine::RuleSpec;
use std::path::Path;

/// Parses a JSON array of rules. Field-level problems (missing columns,
/// blank rows) are left for the engine to report per rule.
pub fn parse_rules(json: &str) -> Result<Vec<RuleSpec>, PersistenceError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_rules(path: &Path) -> Result<Vec<RuleSpec>, PersistenceError> {
    let json = std::fs::read_to_string(path)?;
    let rules = parse_rules(&json)?;
    log::debug!(target: "IO", "loaded {} rules from {}", rules.len(), path.display());
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::RowInput;

    #[test]
    fn test_parse_rules_keeps_loose_fields() {
        let rules = parse_rules(
            r#"[
                {"src_col": "A", "tgt_col": "B", "src_row_start": "1", "src_row_end": "", "tgt_row_start": "1", "is_advanced": false},
                {"src_col": "C", "tgt_col": "D", "src_row_start": 2, "src_row_end": null, "tgt_row_start": 2,
                 "is_advanced": true, "match_src_col": "A", "match_tgt_col": ""}
            ]"#,
        )
        .unwrap();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].src_row_end, Some(RowInput::Text(String::new())));
        assert_eq!(rules[1].src_row_end, None);
        assert_eq!(rules[1].match_tgt_col.as_deref(), Some(""));
        // Structurally incomplete for lookup mode, but parsing still succeeds
        assert!(rules[1].validate(1).is_err());
    }

    #[test]
    fn test_parse_rules_rejects_non_array() {
        let err = parse_rules(r#"{"src_col": "A"}"#).unwrap_err();
        assert!(matches!(err, PersistenceError::RulesJson(_)));
    }

    #[test]
    fn test_load_rules_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(&path, r#"[{"src_col": "A", "tgt_col": "A", "src_row_start": 1, "tgt_row_start": 1}]"#)
            .unwrap();

        let rules = load_rules(&path).unwrap();
        assert_eq!(rules.len(), 1);
        assert!(rules[0].validate(0).is_ok());
    }
}
