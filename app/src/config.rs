//! FILENAME: app/src/config.rs
// PURPOSE: Settings for one sheetmerge job.
// CONTEXT: The engine itself has no limits; a caller that wants bounded
//          runs caps the inputs before handing them over. These are those caps.

use std::path::PathBuf;

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "processed_excel.xlsx";

/// Per-file input cap (16 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024;

/// Maximum rules accepted in one rules file.
pub const DEFAULT_MAX_RULES: usize = 1000;

/// Environment variable consulted for the log level when `--verbose` is not given.
pub const LOG_LEVEL_ENV: &str = "SHEETMERGE_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_input_bytes: u64,
    pub max_rules: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            max_rules: DEFAULT_MAX_RULES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Workbook the rules read from.
    pub source: PathBuf,
    /// Workbook the rules write into.
    pub target: PathBuf,
    /// JSON array of rules.
    pub rules: PathBuf,
    /// Where the transformed target is written.
    pub output: PathBuf,
    pub limits: Limits,
}

impl RunConfig {
    pub fn new(source: PathBuf, target: PathBuf, rules: PathBuf) -> Self {
        RunConfig {
            source,
            target,
            rules,
            output: PathBuf::from(DEFAULT_OUTPUT),
            limits: Limits::default(),
        }
    }
}
