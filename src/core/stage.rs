//! The stage capability: one atomic validation check.

use super::context::RequestContext;
use super::outcome::{Outcome, RejectReason, StageError};

/// One atomic validation check in a pipeline.
///
/// A stage inspects the context and either lets evaluation continue or halts
/// it with a rejection. Implementations must be pure over the context and
/// their own injected collaborators: no hidden global state, and identical
/// inputs always produce the identical outcome.
///
/// Expected business failures (unknown principal, wrong secret) are
/// `Ok(Outcome::Reject(..))`. The `Err` channel is reserved for collaborator
/// faults — infrastructure breaking mid-check — which must interrupt
/// evaluation rather than decide it.
///
/// Stages receive the context mutably so they can append derived facts to
/// its attribute map for later stages; the identity fields are not theirs to
/// touch (and the context's API makes that unrepresentable).
pub trait Stage: Send + Sync {
    /// Short name for traces and logs. Must be non-empty; the pipeline
    /// builder refuses stages that report an empty name.
    fn name(&self) -> &str;

    /// Evaluate the check against this attempt.
    fn evaluate(&self, ctx: &mut RequestContext) -> Result<Outcome, StageError>;
}

/// A stage built from a pure predicate and a caller-supplied reject message.
///
/// The closure-stage escape hatch: anything expressible as
/// `Fn(&RequestContext) -> bool` becomes a pipeline stage without a new
/// type. The predicate must be deterministic and thread-safe.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{Outcome, PredicateStage, RequestContext, Stage};
///
/// let not_root = PredicateStage::new(
///     "not-root",
///     |ctx: &RequestContext| ctx.principal() != "root",
///     "root login disabled",
/// );
///
/// let mut ctx = RequestContext::new("root", "toor");
/// let outcome = not_root.evaluate(&mut ctx).unwrap();
/// assert!(outcome.is_reject());
/// ```
pub struct PredicateStage {
    name: String,
    predicate: Box<dyn Fn(&RequestContext) -> bool + Send + Sync>,
    reason: RejectReason,
}

impl PredicateStage {
    /// Create a stage from a predicate. The message becomes the reject
    /// reason when the predicate returns false.
    pub fn new<F>(name: impl Into<String>, predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&RequestContext) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Box::new(predicate),
            reason: RejectReason::Custom {
                message: message.into(),
            },
        }
    }
}

impl Stage for PredicateStage {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, ctx: &mut RequestContext) -> Result<Outcome, StageError> {
        if (self.predicate)(ctx) {
            Ok(Outcome::Continue)
        } else {
            Ok(Outcome::Reject(self.reason.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_predicate_continues() {
        let stage = PredicateStage::new("always", |_: &RequestContext| true, "never seen");
        let mut ctx = RequestContext::new("admin", "1234");

        assert_eq!(stage.evaluate(&mut ctx), Ok(Outcome::Continue));
    }

    #[test]
    fn failing_predicate_rejects_with_custom_message() {
        let stage = PredicateStage::new("never", |_: &RequestContext| false, "blocked by policy");
        let mut ctx = RequestContext::new("admin", "1234");

        let outcome = stage.evaluate(&mut ctx).unwrap();
        assert_eq!(
            outcome,
            Outcome::Reject(RejectReason::Custom {
                message: "blocked by policy".to_string()
            })
        );
    }

    #[test]
    fn predicate_sees_the_context() {
        let stage = PredicateStage::new(
            "admin-only",
            |ctx: &RequestContext| ctx.principal() == "admin",
            "not admin",
        );

        let mut admin = RequestContext::new("admin", "1234");
        assert_eq!(stage.evaluate(&mut admin), Ok(Outcome::Continue));

        let mut other = RequestContext::new("user", "pass");
        assert!(stage.evaluate(&mut other).unwrap().is_reject());
    }

    #[test]
    fn predicate_is_deterministic() {
        let stage = PredicateStage::new(
            "parity",
            |ctx: &RequestContext| ctx.principal().len() % 2 == 0,
            "odd principal",
        );
        let mut ctx = RequestContext::new("even", "x");

        let first = stage.evaluate(&mut ctx).unwrap();
        let second = stage.evaluate(&mut ctx).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn stage_reports_its_name() {
        let stage = PredicateStage::new("quota", |_: &RequestContext| true, "quota exceeded");

        assert_eq!(stage.name(), "quota");
    }
}
