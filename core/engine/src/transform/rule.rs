//! FILENAME: core/engine/src/transform/rule.rs
//! PURPOSE: The two shapes of a rule and the validation between them.
//! CONTEXT: `RuleSpec` is what callers send (JSON from a form, a rules file).
//! It is loosely structured: every field may be missing and row numbers may
//! arrive as strings. `Rule` is what the executors accept. It can only be
//! built through validation, so lookup mode always carries both match columns
//! and every column and row is already resolved to an index.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::coord::{resolve_column, ColumnRefError};

// ============================================================================
// FIELDS AND ERRORS
// ============================================================================

/// Identifies a rule field in error reports, by its wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleField {
    #[serde(rename = "src_col")]
    SourceColumn,
    #[serde(rename = "tgt_col")]
    TargetColumn,
    #[serde(rename = "src_row_start")]
    SourceRowStart,
    #[serde(rename = "src_row_end")]
    SourceRowEnd,
    #[serde(rename = "tgt_row_start")]
    TargetRowStart,
    #[serde(rename = "match_src_col")]
    MatchSourceColumn,
    #[serde(rename = "match_tgt_col")]
    MatchTargetColumn,
}

impl RuleField {
    pub fn wire_name(&self) -> &'static str {
        match self {
            RuleField::SourceColumn => "src_col",
            RuleField::TargetColumn => "tgt_col",
            RuleField::SourceRowStart => "src_row_start",
            RuleField::SourceRowEnd => "src_row_end",
            RuleField::TargetRowStart => "tgt_row_start",
            RuleField::MatchSourceColumn => "match_src_col",
            RuleField::MatchTargetColumn => "match_tgt_col",
        }
    }
}

impl fmt::Display for RuleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Error category reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A column label could not be resolved.
    Parse,
    /// A rule is structurally incomplete for its mode.
    Validation,
}

/// What is wrong with a single rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleDefect {
    #[error("{field}: {source}")]
    BadColumn {
        field: RuleField,
        #[source]
        source: ColumnRefError,
    },

    #[error("{field}: {message}")]
    Invalid { field: RuleField, message: String },
}

impl RuleDefect {
    fn invalid(field: RuleField, message: impl Into<String>) -> Self {
        RuleDefect::Invalid {
            field,
            message: message.into(),
        }
    }

    pub fn field(&self) -> RuleField {
        match self {
            RuleDefect::BadColumn { field, .. } | RuleDefect::Invalid { field, .. } => *field,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RuleDefect::BadColumn { .. } => ErrorKind::Parse,
            RuleDefect::Invalid { .. } => ErrorKind::Validation,
        }
    }
}

/// A defective rule together with its 0-based position in the rule list.
/// Displays the position 1-based, the way the rule author numbers rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("rule {} is invalid: {defect}", .index + 1)]
pub struct RuleError {
    pub index: usize,
    #[source]
    pub defect: RuleDefect,
}

impl RuleError {
    pub fn kind(&self) -> ErrorKind {
        self.defect.kind()
    }

    pub fn field(&self) -> RuleField {
        self.defect.field()
    }
}

// ============================================================================
// WIRE FORM
// ============================================================================

/// A row number as it arrives on the wire: a JSON integer, a JSON float
/// (accepted when whole, e.g. `2.0`) or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowInput {
    Number(i64),
    Float(f64),
    Text(String),
}

impl From<i32> for RowInput {
    fn from(n: i32) -> Self {
        RowInput::Number(n as i64)
    }
}

impl From<u32> for RowInput {
    fn from(n: u32) -> Self {
        RowInput::Number(n as i64)
    }
}

impl From<&str> for RowInput {
    fn from(s: &str) -> Self {
        RowInput::Text(s.to_string())
    }
}

/// Mode flag as it arrives on the wire.
#[derive(Deserialize)]
#[serde(untagged)]
enum FlagInput {
    Bool(bool),
    Number(i64),
    Text(String),
}

// null, false, 0 and "", "false", "0", "no", "off" (any case) are false;
// any other value is true.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let flag = Option::<FlagInput>::deserialize(deserializer)?;
    Ok(match flag {
        None => false,
        Some(FlagInput::Bool(b)) => b,
        Some(FlagInput::Number(n)) => n != 0,
        Some(FlagInput::Text(s)) => !matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "" | "false" | "0" | "no" | "off"
        ),
    })
}

/// A rule as submitted by the caller, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    #[serde(default)]
    pub src_col: Option<String>,
    #[serde(default)]
    pub tgt_col: Option<String>,
    #[serde(default)]
    pub src_row_start: Option<RowInput>,
    /// Absent, null or blank means "to the last row of the source".
    #[serde(default)]
    pub src_row_end: Option<RowInput>,
    #[serde(default)]
    pub tgt_row_start: Option<RowInput>,
    /// Selects lookup-merge mode instead of copy mode.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_advanced: bool,
    #[serde(default)]
    pub match_src_col: Option<String>,
    #[serde(default)]
    pub match_tgt_col: Option<String>,
}

impl RuleSpec {
    /// Copy-mode spec with string fields, mostly for tests and programmatic callers.
    pub fn copy(
        src_col: &str,
        tgt_col: &str,
        src_row_start: impl Into<RowInput>,
        src_row_end: Option<RowInput>,
        tgt_row_start: impl Into<RowInput>,
    ) -> Self {
        RuleSpec {
            src_col: Some(src_col.to_string()),
            tgt_col: Some(tgt_col.to_string()),
            src_row_start: Some(src_row_start.into()),
            src_row_end,
            tgt_row_start: Some(tgt_row_start.into()),
            ..RuleSpec::default()
        }
    }

    /// Turns the wire form into a `Rule`. `index` is the rule's position in
    /// its list and is only used to label the error.
    pub fn validate(&self, index: usize) -> Result<Rule, RuleError> {
        self.to_rule().map_err(|defect| RuleError { index, defect })
    }

    fn to_rule(&self) -> Result<Rule, RuleDefect> {
        let source_column = required_column(self.src_col.as_deref(), RuleField::SourceColumn)?;
        let target_column = required_column(self.tgt_col.as_deref(), RuleField::TargetColumn)?;

        let start = required_row(self.src_row_start.as_ref(), RuleField::SourceRowStart)?;
        let end = optional_row(self.src_row_end.as_ref(), RuleField::SourceRowEnd)?;
        let target_row_start = required_row(self.tgt_row_start.as_ref(), RuleField::TargetRowStart)?;

        let mode = if self.is_advanced {
            let match_source = non_blank(self.match_src_col.as_deref());
            let match_target = non_blank(self.match_tgt_col.as_deref());
            match (match_source, match_target) {
                (Some(src), Some(tgt)) => RuleMode::LookupMerge {
                    match_source_column: column(src, RuleField::MatchSourceColumn)?,
                    match_target_column: column(tgt, RuleField::MatchTargetColumn)?,
                },
                (None, _) => {
                    return Err(RuleDefect::invalid(
                        RuleField::MatchSourceColumn,
                        "lookup mode requires both match columns",
                    ))
                }
                (_, None) => {
                    return Err(RuleDefect::invalid(
                        RuleField::MatchTargetColumn,
                        "lookup mode requires both match columns",
                    ))
                }
            }
        } else {
            RuleMode::Copy
        };

        Ok(Rule {
            source_column,
            target_column,
            source_rows: SourceRows { start, end },
            target_row_start,
            mode,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

fn column(label: &str, field: RuleField) -> Result<u32, RuleDefect> {
    resolve_column(label).map_err(|source| RuleDefect::BadColumn { field, source })
}

// A missing column is a structural problem; a present but unreadable one
// (including "") is a parse problem.
fn required_column(label: Option<&str>, field: RuleField) -> Result<u32, RuleDefect> {
    match label {
        Some(label) => column(label, field),
        None => Err(RuleDefect::invalid(field, "column is required")),
    }
}

fn parse_row(input: &RowInput, field: RuleField) -> Result<Option<u32>, RuleDefect> {
    let number = match input {
        RowInput::Number(n) => *n,
        RowInput::Float(f) if f.is_finite() && f.fract() == 0.0 => *f as i64,
        RowInput::Float(f) => {
            return Err(RuleDefect::invalid(field, format!("{} is not a whole row number", f)))
        }
        RowInput::Text(s) if s.trim().is_empty() => return Ok(None),
        RowInput::Text(s) => s.trim().parse::<i64>().map_err(|_| {
            RuleDefect::invalid(field, format!("'{}' is not a row number", s))
        })?,
    };
    match u32::try_from(number) {
        Ok(n) if n >= 1 => Ok(Some(n)),
        _ => Err(RuleDefect::invalid(
            field,
            format!("row {} is out of range, rows start at 1", number),
        )),
    }
}

fn required_row(input: Option<&RowInput>, field: RuleField) -> Result<u32, RuleDefect> {
    match input {
        Some(input) => parse_row(input, field)?
            .ok_or_else(|| RuleDefect::invalid(field, "row is required")),
        None => Err(RuleDefect::invalid(field, "row is required")),
    }
}

fn optional_row(input: Option<&RowInput>, field: RuleField) -> Result<Option<u32>, RuleDefect> {
    match input {
        Some(input) => parse_row(input, field),
        None => Ok(None),
    }
}

// ============================================================================
// VALIDATED FORM
// ============================================================================

/// The source rows a rule reads, 1-based as the user entered them.
/// `end` is inclusive; `None` reads to the last row of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRows {
    pub start: u32,
    pub end: Option<u32>,
}

impl SourceRows {
    pub fn to_end(start: u32) -> Self {
        SourceRows { start, end: None }
    }

    pub fn between(start: u32, end: u32) -> Self {
        SourceRows {
            start,
            end: Some(end),
        }
    }
}

/// How a rule moves values. Column fields are 0-based indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleMode {
    Copy,
    LookupMerge {
        match_source_column: u32,
        match_target_column: u32,
    },
}

/// A validated rule. Obtained from `RuleSpec::validate` or the checked
/// constructors below; never partially valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    source_column: u32,
    target_column: u32,
    source_rows: SourceRows,
    target_row_start: u32,
    mode: RuleMode,
}

impl Rule {
    pub fn copy(
        source_column: &str,
        target_column: &str,
        source_rows: SourceRows,
        target_row_start: u32,
    ) -> Result<Rule, RuleDefect> {
        Rule::build(source_column, target_column, source_rows, target_row_start, RuleMode::Copy)
    }

    pub fn lookup_merge(
        source_column: &str,
        target_column: &str,
        source_rows: SourceRows,
        target_row_start: u32,
        match_source_column: &str,
        match_target_column: &str,
    ) -> Result<Rule, RuleDefect> {
        let mode = RuleMode::LookupMerge {
            match_source_column: column(match_source_column, RuleField::MatchSourceColumn)?,
            match_target_column: column(match_target_column, RuleField::MatchTargetColumn)?,
        };
        Rule::build(source_column, target_column, source_rows, target_row_start, mode)
    }

    fn build(
        source_column: &str,
        target_column: &str,
        source_rows: SourceRows,
        target_row_start: u32,
        mode: RuleMode,
    ) -> Result<Rule, RuleDefect> {
        if source_rows.start == 0 {
            return Err(RuleDefect::invalid(RuleField::SourceRowStart, "rows start at 1"));
        }
        if source_rows.end == Some(0) {
            return Err(RuleDefect::invalid(RuleField::SourceRowEnd, "rows start at 1"));
        }
        if target_row_start == 0 {
            return Err(RuleDefect::invalid(RuleField::TargetRowStart, "rows start at 1"));
        }
        Ok(Rule {
            source_column: column(source_column, RuleField::SourceColumn)?,
            target_column: column(target_column, RuleField::TargetColumn)?,
            source_rows,
            target_row_start,
            mode,
        })
    }

    pub fn source_column(&self) -> u32 {
        self.source_column
    }

    pub fn target_column(&self) -> u32 {
        self.target_column
    }

    pub fn source_rows(&self) -> SourceRows {
        self.source_rows
    }

    /// 1-based first target row.
    pub fn target_row_start(&self) -> u32 {
        self.target_row_start
    }

    pub fn mode(&self) -> RuleMode {
        self.mode
    }
}
