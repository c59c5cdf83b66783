//! Evaluation trace: which stages ran, and what each said.
//!
//! The pipeline is a small state machine — `Evaluating(0)` steps through the
//! stages until a terminal accept or reject. The trace materializes that
//! walk as immutable data, which is what makes stage order observable and
//! testable instead of implicit.

use super::outcome::RejectReason;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What a single stage did with the request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StageDisposition {
    /// The stage let the request move on.
    Continued,

    /// The stage halted the pipeline with this reason.
    Rejected(RejectReason),
}

/// Record of one stage's evaluation within an attempt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageRecord {
    /// The stage's reported name.
    pub stage: String,
    /// What the stage decided.
    pub disposition: StageDisposition,
    /// When the stage finished evaluating.
    pub at: DateTime<Utc>,
}

/// Ordered record of an attempt's walk through the pipeline.
///
/// The trace is immutable: [`record`](EvaluationTrace::record) returns a new
/// trace with the entry appended, leaving the original untouched.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{EvaluationTrace, StageDisposition, StageRecord};
/// use chrono::Utc;
///
/// let trace = EvaluationTrace::new();
/// let trace = trace.record(StageRecord {
///     stage: "existence".to_string(),
///     disposition: StageDisposition::Continued,
///     at: Utc::now(),
/// });
///
/// assert_eq!(trace.records().len(), 1);
/// assert!(trace.rejection().is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationTrace {
    records: Vec<StageRecord>,
}

impl EvaluationTrace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record, returning a new trace. The original is unchanged.
    pub fn record(&self, record: StageRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// The per-stage records, in evaluation order.
    pub fn records(&self) -> &[StageRecord] {
        &self.records
    }

    /// Names of the stages that evaluated, in order.
    pub fn visited(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.stage.as_str()).collect()
    }

    /// The rejecting record, if any stage halted the attempt.
    ///
    /// By the short-circuit contract this is always the last record when
    /// present.
    pub fn rejection(&self) -> Option<&StageRecord> {
        self.records
            .iter()
            .find(|r| matches!(r.disposition, StageDisposition::Rejected(_)))
    }

    /// Wall-clock span between the first and last record, if at least two
    /// stages evaluated.
    pub fn duration(&self) -> Option<Duration> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        if self.records.len() < 2 {
            return None;
        }
        last.at.signed_duration_since(first.at).to_std().ok()
    }
}
