//! FILENAME: core/engine/src/transform/lookup.rs
//! PURPOSE: Lookup-merge mode (VLOOKUP replacement).
//! CONTEXT: A key -> value table is built from two source columns over the
//! rule's row span, then every target row from the rule's start row to the
//! bottom of the target is checked: when its key is in the table, its value
//! cell is overwritten. Keys compare by exact type and value; "1" (text) and
//! 1 (number) are different keys, and nothing is trimmed or case-folded.

use std::collections::HashMap;

use serde::Serialize;

use crate::cell::CellValue;
use crate::grid::Grid;
use crate::transform::range::{select, RowSpan};
use crate::transform::rule::{Rule, RuleDefect, RuleField, RuleMode};

/// Hashable form of a cell value used as a lookup key.
/// Blank cells and NaN never form a key, so they never match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LookupKey {
    /// Bit pattern of the number, with -0.0 folded onto 0.0.
    Number(u64),
    Text(String),
    Boolean(bool),
}

impl LookupKey {
    pub fn from_value(value: &CellValue) -> Option<LookupKey> {
        match value {
            CellValue::Empty => None,
            CellValue::Number(n) if n.is_nan() => None,
            CellValue::Number(n) => {
                let n = if *n == 0.0 { 0.0 } else { *n };
                Some(LookupKey::Number(n.to_bits()))
            }
            CellValue::Text(s) => Some(LookupKey::Text(s.clone())),
            CellValue::Boolean(b) => Some(LookupKey::Boolean(*b)),
        }
    }
}

/// Key -> value mapping built from one row span of the source.
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    entries: HashMap<LookupKey, CellValue>,
}

impl LookupTable {
    /// Pairs `key_column` and `value_column` row by row over `span`.
    /// A key seen more than once keeps the value from its last row.
    pub fn build(source: &Grid, span: RowSpan, key_column: u32, value_column: u32) -> Self {
        let mut entries = HashMap::new();
        for row in span.clamped(source.row_count()) {
            if let Some(key) = LookupKey::from_value(source.value(row, key_column)) {
                entries.insert(key, source.value(row, value_column).clone());
            }
        }
        LookupTable { entries }
    }

    pub fn get(&self, key: &CellValue) -> Option<&CellValue> {
        LookupKey::from_value(key).and_then(|k| self.entries.get(&k))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of one lookup-merge rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MergeOutcome {
    /// Distinct keys in the lookup table.
    pub keys: usize,
    /// Target rows whose key was found and whose value cell was overwritten.
    pub rows_matched: u32,
}

/// Runs a lookup-merge rule. This is the only entry point for lookup mode;
/// a copy-mode rule has no match columns and is rejected.
pub fn merge(source: &Grid, target: &mut Grid, rule: &Rule) -> Result<MergeOutcome, RuleDefect> {
    match rule.mode() {
        RuleMode::LookupMerge {
            match_source_column,
            match_target_column,
        } => Ok(merge_columns(source, target, rule, match_source_column, match_target_column)),
        RuleMode::Copy => Err(RuleDefect::Invalid {
            field: RuleField::MatchSourceColumn,
            message: "rule is not in lookup mode".to_string(),
        }),
    }
}

fn merge_columns(
    source: &Grid,
    target: &mut Grid,
    rule: &Rule,
    match_source_column: u32,
    match_target_column: u32,
) -> MergeOutcome {
    let rows = rule.source_rows();
    let span = select(source, rows.start, rows.end);
    let table = LookupTable::build(source, span, match_source_column, rule.source_column());

    let mut outcome = MergeOutcome {
        keys: table.len(),
        rows_matched: 0,
    };

    // Scan the full remaining height of the target, independent of the span length
    for row in (rule.target_row_start() - 1)..target.row_count() {
        if let Some(value) = table.get(target.value(row, match_target_column)) {
            let value = value.clone();
            target.set_value(row, rule.target_column(), value);
            outcome.rows_matched += 1;
        }
    }

    outcome
}
