//! FILENAME: app/src/cli.rs
// PURPOSE: Command-line surface.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::config::{
    Limits, RunConfig, DEFAULT_MAX_INPUT_BYTES, DEFAULT_MAX_RULES, DEFAULT_OUTPUT, LOG_LEVEL_ENV,
};
use crate::logging::LogConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ErrorFormat {
    Text,
    Json,
}

/// Apply copy and lookup-merge rules from a source workbook to a target workbook.
#[derive(Parser, Debug)]
#[command(name = "sheetmerge", version)]
pub struct Args {
    /// Workbook to read values from (first sheet is used).
    #[arg(long, value_name = "PATH")]
    pub source: PathBuf,

    /// Workbook to write values into (first sheet is used).
    #[arg(long, value_name = "PATH")]
    pub target: PathBuf,

    /// JSON file holding an array of rules.
    #[arg(long, value_name = "PATH")]
    pub rules: PathBuf,

    /// Where to write the transformed target.
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Refuse input files larger than this many bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_INPUT_BYTES)]
    pub max_input_bytes: u64,

    /// Refuse rule files with more rules than this.
    #[arg(long, default_value_t = DEFAULT_MAX_RULES)]
    pub max_rules: usize,

    /// Also append log lines to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    /// How failures are printed on stdout.
    #[arg(long, value_enum, default_value_t = ErrorFormat::Text)]
    pub error_format: ErrorFormat,
}

impl Args {
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            source: self.source.clone(),
            target: self.target.clone(),
            rules: self.rules.clone(),
            output: self.output.clone(),
            limits: Limits {
                max_input_bytes: self.max_input_bytes,
                max_rules: self.max_rules,
            },
        }
    }

    /// `--verbose` wins over the environment variable; the default is info.
    pub fn log_config(&self, env_level: Option<&str>) -> LogConfig {
        let level = if self.verbose {
            LevelFilter::Debug
        } else {
            env_level
                .and_then(|s| s.trim().parse::<LevelFilter>().ok())
                .unwrap_or(LevelFilter::Info)
        };
        LogConfig {
            level,
            file: self.log_file.clone(),
        }
    }

    pub fn log_config_from_env(&self) -> LogConfig {
        self.log_config(std::env::var(LOG_LEVEL_ENV).ok().as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec![
            "sheetmerge", "--source", "s.xlsx", "--target", "t.xlsx", "--rules", "r.json",
        ];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        let config = args.run_config();

        assert_eq!(config.output, PathBuf::from("processed_excel.xlsx"));
        assert_eq!(config.limits.max_input_bytes, 16 * 1024 * 1024);
        assert_eq!(config.limits.max_rules, DEFAULT_MAX_RULES);
        assert_eq!(args.error_format, ErrorFormat::Text);
        assert_eq!(args.log_config(None).level, LevelFilter::Info);
    }

    #[test]
    fn test_overrides() {
        let args = parse(&[
            "-o", "out.xlsx", "--max-rules", "3", "--error-format", "json", "--log-file", "run.log",
        ]);
        let config = args.run_config();

        assert_eq!(config.output, PathBuf::from("out.xlsx"));
        assert_eq!(config.limits.max_rules, 3);
        assert_eq!(args.error_format, ErrorFormat::Json);
        assert_eq!(args.log_config(None).file, Some(PathBuf::from("run.log")));
    }

    #[test]
    fn test_log_level_resolution() {
        assert_eq!(parse(&[]).log_config(Some("trace")).level, LevelFilter::Trace);
        assert_eq!(parse(&[]).log_config(Some("bogus")).level, LevelFilter::Info);
        assert_eq!(parse(&["-v"]).log_config(Some("error")).level, LevelFilter::Debug);
    }

    #[test]
    fn test_missing_required_argument() {
        assert!(Args::try_parse_from(["sheetmerge", "--source", "s.xlsx"]).is_err());
    }
}
