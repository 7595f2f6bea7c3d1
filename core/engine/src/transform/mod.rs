//! FILENAME: core/engine/src/transform/mod.rs
//! Rule-driven grid transformation.
//!
//! A rule list is applied in order to a (source, target) pair of grids:
//! - `range`    - turns 1-based user row bounds into 0-based spans
//! - `rule`     - wire form (`RuleSpec`) and validated form (`Rule`) of a rule
//! - `copy`     - positional column copy
//! - `lookup`   - key-based merge (VLOOKUP style)
//! - `pipeline` - validates and executes a rule list against one target

pub mod copy;
pub mod lookup;
pub mod pipeline;
pub mod range;
pub mod rule;

pub use copy::{copy, CopyOutcome};
pub use lookup::{merge, LookupKey, LookupTable, MergeOutcome};
pub use pipeline::{apply_rule, run, run_validated, BoundsNotice, RuleOutcome, RunSummary};
pub use range::{select, RowSpan};
pub use rule::{
    ErrorKind, RowInput, Rule, RuleDefect, RuleError, RuleField, RuleMode, RuleSpec, SourceRows,
};
