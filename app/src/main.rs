//! FILENAME: app/src/main.rs
// PURPOSE: Command-line entry point.
// LOG FORMAT: seq|level|category|message (stderr, optionally a log file)

use std::process::ExitCode;

fn main() -> ExitCode {
    sheetmerge_lib::run()
}
