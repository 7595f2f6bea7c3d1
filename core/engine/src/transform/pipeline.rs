//! FILENAME: core/engine/src/transform/pipeline.rs
//! PURPOSE: Applies an ordered rule list to one target grid.
//! CONTEXT: Rules run strictly in order and each one sees the target as the
//! previous rules left it, so when two rules write the same cell the later
//! one wins. Rule k is validated right before it runs; the first invalid rule
//! stops the run and the mutations of rules 0..k stay in the target. There is
//! no rollback.

use serde::Serialize;

use crate::grid::Grid;
use crate::transform::copy::{copy, CopyOutcome};
use crate::transform::lookup::{merge, MergeOutcome};
use crate::transform::rule::{Rule, RuleDefect, RuleError, RuleMode, RuleSpec};

/// What a single rule did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RuleOutcome {
    Copy(CopyOutcome),
    LookupMerge(MergeOutcome),
}

/// A copy rule ran out of target rows before it ran out of values.
/// Expected behavior, reported for information only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundsNotice {
    pub rule_index: usize,
    pub dropped_values: u32,
}

/// Summary of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub rules_applied: usize,
    pub outcomes: Vec<RuleOutcome>,
}

impl RunSummary {
    pub fn bounds_notices(&self) -> impl Iterator<Item = BoundsNotice> + '_ {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(rule_index, outcome)| match outcome {
                RuleOutcome::Copy(c) if c.truncated > 0 => Some(BoundsNotice {
                    rule_index,
                    dropped_values: c.truncated,
                }),
                _ => None,
            })
    }

    fn record(&mut self, outcome: RuleOutcome) {
        self.rules_applied += 1;
        self.outcomes.push(outcome);
    }
}

/// Executes one validated rule against `target`, dispatching on its mode.
pub fn apply_rule(
    source: &Grid,
    target: &mut Grid,
    rule: &Rule,
) -> Result<RuleOutcome, RuleDefect> {
    match rule.mode() {
        RuleMode::Copy => Ok(RuleOutcome::Copy(copy(source, target, rule))),
        RuleMode::LookupMerge { .. } => {
            merge(source, target, rule).map(RuleOutcome::LookupMerge)
        }
    }
}

/// Validates and executes `rules` in order against `target`.
///
/// On error, `target` holds the effect of every rule before the failing one.
pub fn run(source: &Grid, target: &mut Grid, rules: &[RuleSpec]) -> Result<RunSummary, RuleError> {
    let mut summary = RunSummary::default();
    for (index, spec) in rules.iter().enumerate() {
        let rule = spec.validate(index)?;
        let outcome =
            apply_rule(source, target, &rule).map_err(|defect| RuleError { index, defect })?;
        summary.record(outcome);
    }
    Ok(summary)
}

/// Executes already validated rules in order, with the same stop-at-first-error
/// behavior as `run`.
pub fn run_validated(
    source: &Grid,
    target: &mut Grid,
    rules: &[Rule],
) -> Result<RunSummary, RuleError> {
    let mut summary = RunSummary::default();
    for (index, rule) in rules.iter().enumerate() {
        let outcome =
            apply_rule(source, target, rule).map_err(|defect| RuleError { index, defect })?;
        summary.record(outcome);
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;
    use crate::transform::rule::{ErrorKind, RowInput, RuleField, SourceRows};
    use pretty_assertions::assert_eq;

    fn source() -> Grid {
        Grid::from_rows(vec![
            vec![CellValue::from("k1"), CellValue::from("one")],
            vec![CellValue::from("k2"), CellValue::from("two")],
        ])
    }

    fn lookup_missing_match() -> RuleSpec {
        let mut spec = RuleSpec::copy("B", "B", 1, None, 1);
        spec.is_advanced = true;
        spec.match_src_col = Some("A".to_string());
        spec
    }

    #[test]
    fn test_run_empty_rule_list() {
        let mut target = Grid::with_dimensions(2, 2);
        let summary = run(&source(), &mut target, &[]).unwrap();
        assert_eq!(summary, RunSummary::default());
        assert_eq!(target.non_empty_count(), 0);
    }

    #[test]
    fn test_run_aborts_on_invalid_rule_and_keeps_earlier_effects() {
        let mut target = Grid::with_dimensions(2, 3);
        let rules = vec![
            RuleSpec::copy("A", "A", 1, None, 1),
            lookup_missing_match(),
            RuleSpec::copy("B", "C", 1, None, 1),
        ];

        let err = run(&source(), &mut target, &rules).unwrap_err();

        assert_eq!(err.index, 1);
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.field(), RuleField::MatchTargetColumn);
        // First rule applied, third never ran
        assert_eq!(target.value(0, 0), &CellValue::from("k1"));
        assert_eq!(target.value(1, 0), &CellValue::from("k2"));
        assert_eq!(target.value(0, 2), &CellValue::Empty);
        assert_eq!(target.non_empty_count(), 2);
    }

    #[test]
    fn test_run_aborts_on_parse_error() {
        let mut target = Grid::with_dimensions(2, 2);
        let rules = vec![
            RuleSpec::copy("A", "A", 1, None, 1),
            RuleSpec::copy("B", "B9", 1, None, 1),
        ];

        let err = run(&source(), &mut target, &rules).unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.field(), RuleField::TargetColumn);
    }

    #[test]
    fn test_later_rule_wins_on_same_cell() {
        let mut target = Grid::with_dimensions(1, 1);
        let rules = vec![
            RuleSpec::copy("A", "A", 1, Some(RowInput::from(1)), 1),
            RuleSpec::copy("B", "A", 1, Some(RowInput::from(1)), 1),
        ];

        run(&source(), &mut target, &rules).unwrap();
        assert_eq!(target.value(0, 0), &CellValue::from("one"));
    }

    #[test]
    fn test_rules_see_previous_mutations() {
        // Rule 1 writes keys into the target, rule 2 merges on those keys
        let mut target = Grid::with_dimensions(2, 2);
        let mut merge = RuleSpec::copy("B", "B", 1, None, 1);
        merge.is_advanced = true;
        merge.match_src_col = Some("A".to_string());
        merge.match_tgt_col = Some("A".to_string());
        let rules = vec![RuleSpec::copy("A", "A", 1, None, 1), merge];

        let summary = run(&source(), &mut target, &rules).unwrap();

        assert_eq!(summary.rules_applied, 2);
        assert_eq!(target.to_rows(), source().to_rows());
        assert_eq!(
            summary.outcomes[1],
            RuleOutcome::LookupMerge(MergeOutcome { keys: 2, rows_matched: 2 })
        );
    }

    #[test]
    fn test_bounds_notices() {
        let mut target = Grid::with_dimensions(1, 2);
        let rules = vec![
            RuleSpec::copy("A", "A", 1, None, 1),
            RuleSpec::copy("B", "B", 2, None, 1),
        ];

        let summary = run(&source(), &mut target, &rules).unwrap();
        let notices: Vec<_> = summary.bounds_notices().collect();

        assert_eq!(
            notices,
            vec![BoundsNotice { rule_index: 0, dropped_values: 1 }]
        );
    }

    #[test]
    fn test_run_validated() {
        let mut target = Grid::with_dimensions(2, 1);
        let rules = vec![Rule::copy("B", "A", SourceRows::to_end(1), 1).unwrap()];

        let summary = run_validated(&source(), &mut target, &rules).unwrap();

        assert_eq!(summary.rules_applied, 1);
        assert_eq!(target.value(1, 0), &CellValue::from("two"));
    }

    #[test]
    fn test_apply_rule_dispatches_lookup_rules_to_merge() {
        let mut target = Grid::from_rows(vec![
            vec![CellValue::from("k2"), CellValue::Empty],
            vec![CellValue::from("k9"), CellValue::from("keep")],
        ]);
        let rule = Rule::lookup_merge("B", "B", SourceRows::to_end(1), 1, "A", "A").unwrap();

        let outcome = apply_rule(&source(), &mut target, &rule).unwrap();

        assert_eq!(
            outcome,
            RuleOutcome::LookupMerge(MergeOutcome { keys: 2, rows_matched: 1 })
        );
        assert_eq!(target.value(0, 1), &CellValue::from("two"));
        assert_eq!(target.value(1, 1), &CellValue::from("keep"));
    }
}
