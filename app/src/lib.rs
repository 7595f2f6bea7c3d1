//! FILENAME: app/src/lib.rs
// PURPOSE: Main library entry point for the sheetmerge command.
// CONTEXT: The binary is a thin wrapper over `run`; tests drive `run_job`
//          and `transform` directly.

use std::process::ExitCode;

use clap::Parser;

pub mod cli;
pub mod config;
pub mod error;
pub mod job;
pub mod logging;

pub use cli::{Args, ErrorFormat};
pub use config::{Limits, RunConfig};
pub use error::{AppError, ErrorReport};
pub use job::{run_job, transform, JobReport};
pub use logging::{init_logging, next_seq, write_log, LogConfig};

/// Renders a failure the way `--error-format` asks for.
pub fn render_error(err: &AppError, format: ErrorFormat) -> String {
    match format {
        ErrorFormat::Text => format!("error: {}", err),
        ErrorFormat::Json => serde_json::to_string(&err.report())
            .unwrap_or_else(|_| format!("{{\"error\": {:?}}}", err.to_string())),
    }
}

/// Parses the command line, runs one job, and maps the result to an exit code.
pub fn run() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(&args.log_config_from_env()) {
        eprintln!("[LOG_INIT] {}", e);
    }

    match run_job(&args.run_config()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!(target: "CLI", "{}", err);
            println!("{}", render_error(&err, args.error_format));
            ExitCode::FAILURE
        }
    }
}
