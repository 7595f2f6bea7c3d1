//! FILENAME: core/engine/src/coord.rs
//! PURPOSE: Converts user-supplied column labels into 0-based column indices.
//! CONTEXT: Rules name columns the way a spreadsheet user would type them.
//! Two label shapes are accepted:
//! - Letters: "A" = 0, "B" = 1, ..., "Z" = 25, "AA" = 26 (case-insensitive)
//! - Digits: a literal 1-based column number, "1" = 0, "3" = 2
//! Labels mixing the two shapes ("A1", "1A") are rejected rather than
//! silently resolved to whichever shape happens to come first.

use thiserror::Error;

/// Why a column label could not be resolved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColumnRefError {
    #[error("column label is empty")]
    Empty,

    #[error("column label '{0}' mixes letters and digits")]
    MixedLabel(String),

    #[error("column label '{label}' contains invalid character '{ch}'")]
    InvalidCharacter { label: String, ch: char },

    #[error("column number 0 is not valid, columns start at 1")]
    ZeroColumn,

    #[error("column label '{0}' is out of range")]
    Overflow(String),
}

/// A syntactically valid column label, before conversion to an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnLabel {
    /// A literal 1-based column number typed as digits.
    Numeric(u32),
    /// A spreadsheet letter label, stored uppercase.
    Letters(String),
}

impl ColumnLabel {
    /// Classifies a label by its shape.
    pub fn parse(label: &str) -> Result<ColumnLabel, ColumnRefError> {
        if label.is_empty() {
            return Err(ColumnRefError::Empty);
        }

        if let Some(ch) = label.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(ColumnRefError::InvalidCharacter {
                label: label.to_string(),
                ch,
            });
        }

        if label.chars().all(|c| c.is_ascii_digit()) {
            let number: u32 = label
                .parse()
                .map_err(|_| ColumnRefError::Overflow(label.to_string()))?;
            return Ok(ColumnLabel::Numeric(number));
        }

        if label.chars().all(|c| c.is_ascii_alphabetic()) {
            return Ok(ColumnLabel::Letters(label.to_ascii_uppercase()));
        }

        Err(ColumnRefError::MixedLabel(label.to_string()))
    }

    /// Converts the label to a 0-based column index.
    pub fn to_index(&self) -> Result<u32, ColumnRefError> {
        match self {
            ColumnLabel::Numeric(0) => Err(ColumnRefError::ZeroColumn),
            ColumnLabel::Numeric(n) => Ok(n - 1),
            ColumnLabel::Letters(letters) => {
                let mut result: u32 = 0;
                for c in letters.bytes() {
                    let digit = (c - b'A') as u32 + 1;
                    result = result
                        .checked_mul(26)
                        .and_then(|r| r.checked_add(digit))
                        .ok_or_else(|| ColumnRefError::Overflow(letters.clone()))?;
                }
                Ok(result - 1) // Convert to 0-based
            }
        }
    }
}

/// Resolves a column label ("C", "aa", "3") to a 0-based column index.
pub fn resolve_column(label: &str) -> Result<u32, ColumnRefError> {
    ColumnLabel::parse(label)?.to_index()
}

/// Converts a 0-based column index to a column string.
/// 0 -> "A", 1 -> "B", ..., 25 -> "Z", 26 -> "AA", 27 -> "AB", etc.
pub fn index_to_col(mut col_index: u32) -> String {
    let mut result = String::new();
    loop {
        let remainder = col_index % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if col_index < 26 {
            break;
        }
        col_index = col_index / 26 - 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_letters() {
        assert_eq!(resolve_column("A"), Ok(0));
        assert_eq!(resolve_column("B"), Ok(1));
        assert_eq!(resolve_column("Z"), Ok(25));
        assert_eq!(resolve_column("AA"), Ok(26));
        assert_eq!(resolve_column("AZ"), Ok(51));
        assert_eq!(resolve_column("ZZ"), Ok(701));
        assert_eq!(resolve_column("AAA"), Ok(702));
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(resolve_column("aa"), Ok(26));
        assert_eq!(resolve_column("Ab"), Ok(27));
    }

    #[test]
    fn test_resolve_numeric_shortcut() {
        assert_eq!(resolve_column("1"), Ok(0));
        assert_eq!(resolve_column("3"), Ok(2));
        assert_eq!(resolve_column("27"), Ok(26));
        assert_eq!(ColumnLabel::parse("12"), Ok(ColumnLabel::Numeric(12)));
    }

    #[test]
    fn test_resolve_rejects_malformed_labels() {
        assert_eq!(resolve_column(""), Err(ColumnRefError::Empty));
        assert_eq!(resolve_column("0"), Err(ColumnRefError::ZeroColumn));
        assert_eq!(
            resolve_column("A1"),
            Err(ColumnRefError::MixedLabel("A1".to_string()))
        );
        assert_eq!(
            resolve_column("1A"),
            Err(ColumnRefError::MixedLabel("1A".to_string()))
        );
        assert_eq!(
            resolve_column(" B"),
            Err(ColumnRefError::InvalidCharacter {
                label: " B".to_string(),
                ch: ' '
            })
        );
        assert!(matches!(
            resolve_column("ÄB"),
            Err(ColumnRefError::InvalidCharacter { .. })
        ));
    }

    #[test]
    fn test_resolve_overflow() {
        assert!(matches!(
            resolve_column("99999999999"),
            Err(ColumnRefError::Overflow(_))
        ));
        assert!(matches!(
            resolve_column("ZZZZZZZZ"),
            Err(ColumnRefError::Overflow(_))
        ));
    }

    #[test]
    fn test_index_to_col() {
        assert_eq!(index_to_col(0), "A");
        assert_eq!(index_to_col(25), "Z");
        assert_eq!(index_to_col(26), "AA");
        assert_eq!(index_to_col(701), "ZZ");
        assert_eq!(index_to_col(702), "AAA");
    }

    #[test]
    fn test_roundtrip() {
        for i in 0..1000 {
            let col_str = index_to_col(i);
            assert_eq!(resolve_column(&col_str), Ok(i), "Roundtrip failed for index {}", i);
        }
    }
}
