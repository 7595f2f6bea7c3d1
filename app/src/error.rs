//! FILENAME: app/src/error.rs
// PURPOSE: Errors of a sheetmerge job and the report shape they are shown in.

use std::path::PathBuf;

use engine::{RuleError, RuleField};
use persistence::PersistenceError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("{} is {size} bytes, the limit is {limit} bytes", .path.display())]
    InputTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("{count} rules submitted, the limit is {limit}")]
    TooManyRules { count: usize, limit: usize },
}

/// Machine-readable failure, printed with `--error-format json`.
/// `error` carries the same text as the plain-text report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub error: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<RuleField>,
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Persistence(_) => "input",
            AppError::Rule(e) => match e.kind() {
                engine::ErrorKind::Parse => "parse",
                engine::ErrorKind::Validation => "validation",
            },
            AppError::InputTooLarge { .. } | AppError::TooManyRules { .. } => "limit",
        }
    }

    pub fn report(&self) -> ErrorReport {
        let (rule_index, field) = match self {
            AppError::Rule(e) => (Some(e.index), Some(e.field())),
            _ => (None, None),
        };
        ErrorReport {
            error: self.to_string(),
            kind: self.kind(),
            rule_index,
            field,
        }
    }
}
