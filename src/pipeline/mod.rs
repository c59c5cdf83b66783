//! The stage chain engine.
//!
//! A [`Pipeline`] is an immutable ordered sequence of stages with
//! single-entry, single-exit semantics: stages evaluate strictly in
//! construction order, and the first rejection ends the walk. Later stages
//! never observe rejected requests, which is what lets cheap, coarse checks
//! shield expensive ones.
//!
//! The decision path fails fast. For diagnostics there is also
//! [`Pipeline::inspect`], which runs every stage regardless and accumulates
//! all rejections — don't stop at the first error when an operator is
//! trying to see the whole picture.

pub mod builder;
pub mod error;
pub mod macros;

pub use builder::PipelineBuilder;
pub use error::BuildError;

use crate::core::{
    Decision, EvaluationTrace, Outcome, RejectReason, RequestContext, Stage, StageDisposition,
    StageError, StageRecord,
};
use chrono::Utc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, trace};

/// An immutable, ordered sequence of validation stages.
///
/// Built once via [`PipelineBuilder`], then reused across any number of
/// invocations: the pipeline holds no per-request state, so a shared
/// reference is safe from any number of threads. Each call supplies its own
/// [`RequestContext`].
///
/// A pipeline is itself a [`Stage`], so chains nest: a sub-chain drops into
/// a larger pipeline as one opaque check.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use turnstile::core::{Decision, RequestContext};
/// use turnstile::pipeline::PipelineBuilder;
/// use turnstile::stages::{ExistenceStage, SecretStage};
/// use turnstile::store::MemoryStore;
///
/// let store = Arc::new(MemoryStore::new().with_credential("admin", "1234"));
/// let pipeline = PipelineBuilder::new()
///     .stage(ExistenceStage::new(store.clone()))
///     .stage(SecretStage::new(store))
///     .build()
///     .unwrap();
///
/// let mut ctx = RequestContext::new("admin", "1234");
/// assert_eq!(pipeline.run(&mut ctx).unwrap(), Decision::Accepted);
/// ```
pub struct Pipeline {
    name: String,
    stages: Vec<Box<dyn Stage>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("stages", &self.stages.iter().map(|s| s.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl Pipeline {
    pub(crate) const DEFAULT_NAME: &'static str = "pipeline";

    pub(crate) fn from_parts(name: String, stages: Vec<Box<dyn Stage>>) -> Self {
        Self { name, stages }
    }

    /// The pipeline's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of stages in the chain.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// True when the chain has no stages. An empty pipeline accepts every
    /// request.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// The stage names, in evaluation order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run the chain to a terminal decision.
    ///
    /// Stages evaluate in order until one rejects or all continue. A store
    /// fault interrupts the walk with `Err` — it is neither acceptance nor
    /// rejection.
    pub fn run(&self, ctx: &mut RequestContext) -> Result<Decision, StageError> {
        let decision = match self.evaluate(ctx)? {
            Outcome::Continue => Decision::Accepted,
            Outcome::Reject(reason) => Decision::Rejected { reason },
        };

        match &decision {
            Decision::Accepted => debug!(
                pipeline = %self.name,
                attempt = %ctx.attempt_id(),
                "request accepted"
            ),
            Decision::Rejected { reason } => debug!(
                pipeline = %self.name,
                attempt = %ctx.attempt_id(),
                %reason,
                "request rejected"
            ),
        }

        Ok(decision)
    }

    /// Run the chain and record each stage's disposition.
    ///
    /// The trace is the pipeline's state-machine walk made observable:
    /// one record per evaluated stage, ending at the rejecting stage or at
    /// the last stage of a clean walk.
    pub fn run_traced(
        &self,
        ctx: &mut RequestContext,
    ) -> Result<(Decision, EvaluationTrace), StageError> {
        let mut trace = EvaluationTrace::new();

        for stage in &self.stages {
            let outcome = stage.evaluate(ctx)?;
            let disposition = match &outcome {
                Outcome::Continue => StageDisposition::Continued,
                Outcome::Reject(reason) => StageDisposition::Rejected(reason.clone()),
            };
            trace = trace.record(StageRecord {
                stage: stage.name().to_string(),
                disposition,
                at: Utc::now(),
            });

            if let Outcome::Reject(reason) = outcome {
                return Ok((Decision::Rejected { reason }, trace));
            }
        }

        Ok((Decision::Accepted, trace))
    }

    /// Evaluate every stage and accumulate ALL rejections.
    ///
    /// The diagnostic counterpart to [`run`](Pipeline::run): no
    /// short-circuit, so an operator sees everything a request would
    /// eventually trip over, not just the first gate. Attribute writes
    /// still happen in order. Store faults still propagate as `Err` —
    /// infrastructure problems are never folded into the rejection set.
    pub fn inspect(
        &self,
        ctx: &mut RequestContext,
    ) -> Result<Validation<(), NonEmptyVec<RejectReason>>, StageError> {
        let mut checks: Vec<Validation<(), NonEmptyVec<RejectReason>>> = Vec::new();

        for stage in &self.stages {
            let check = match stage.evaluate(ctx)? {
                Outcome::Continue => Validation::success(()),
                Outcome::Reject(reason) => Validation::fail(reason),
            };
            checks.push(check);
        }

        Ok(Validation::all_vec(checks).map(|_| ()))
    }
}

impl Stage for Pipeline {
    fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate the chain as one aggregate stage: the first rejection wins,
    /// a clean walk continues.
    fn evaluate(&self, ctx: &mut RequestContext) -> Result<Outcome, StageError> {
        for stage in &self.stages {
            trace!(
                pipeline = %self.name,
                stage = stage.name(),
                attempt = %ctx.attempt_id(),
                "evaluating stage"
            );

            match stage.evaluate(ctx)? {
                Outcome::Continue => {}
                reject @ Outcome::Reject(_) => return Ok(reject),
            }
        }

        Ok(Outcome::Continue)
    }
}
