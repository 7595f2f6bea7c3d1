//! FILENAME: app/src/job.rs
// PURPOSE: One end-to-end run: load, transform, save.
// CONTEXT: Each job owns its own source/target pair; nothing is shared
//          between jobs. The output file is only written when every rule
//          succeeded.

use std::path::{Path, PathBuf};

use engine::{Grid, RuleSpec, RunSummary};
use serde::Serialize;

use crate::config::{Limits, RunConfig};
use crate::error::AppError;

/// What a successful job produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobReport {
    pub output: PathBuf,
    pub summary: RunSummary,
}

fn check_input_size(path: &Path, limits: &Limits) -> Result<(), AppError> {
    let size = std::fs::metadata(path)
        .map_err(persistence::PersistenceError::from)?
        .len();
    if size > limits.max_input_bytes {
        return Err(AppError::InputTooLarge {
            path: path.to_path_buf(),
            size,
            limit: limits.max_input_bytes,
        });
    }
    Ok(())
}

/// Applies `rules` to `target` after checking them against `limits`.
/// On a rule failure, `target` keeps the effect of the rules that ran.
pub fn transform(
    source: &Grid,
    target: &mut Grid,
    rules: &[RuleSpec],
    limits: &Limits,
) -> Result<RunSummary, AppError> {
    if rules.len() > limits.max_rules {
        return Err(AppError::TooManyRules {
            count: rules.len(),
            limit: limits.max_rules,
        });
    }

    let summary = engine::run(source, target, rules)?;

    for (index, outcome) in summary.outcomes.iter().enumerate() {
        log::debug!(target: "JOB", "rule {} applied: {:?}", index + 1, outcome);
    }
    for notice in summary.bounds_notices() {
        log::info!(
            target: "JOB",
            "rule {} reached the last target row, {} values not copied",
            notice.rule_index + 1,
            notice.dropped_values
        );
    }

    Ok(summary)
}

pub fn run_job(config: &RunConfig) -> Result<JobReport, AppError> {
    log::info!(
        target: "JOB",
        "source={} target={} rules={}",
        config.source.display(),
        config.target.display(),
        config.rules.display()
    );

    check_input_size(&config.source, &config.limits)?;
    check_input_size(&config.target, &config.limits)?;
    check_input_size(&config.rules, &config.limits)?;

    let rules = persistence::load_rules(&config.rules)?;
    let source = persistence::load_grid(&config.source)?;
    let mut target = persistence::load_grid(&config.target)?;

    let summary = transform(&source, &mut target, &rules, &config.limits)?;

    persistence::save_grid(&target, &config.output)?;
    log::info!(
        target: "JOB",
        "{} rules applied, wrote {}",
        summary.rules_applied,
        config.output.display()
    );

    Ok(JobReport {
        output: config.output.clone(),
        summary,
    })
}
