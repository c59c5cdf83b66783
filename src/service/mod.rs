//! Authentication facade over a pipeline.
//!
//! The pipeline's sole client: turns a `(principal, secret)` pair into a
//! context, runs the chain, and maps the terminal decision to a flat
//! result. Presentation — printing, HTTP mapping, localization — stays
//! outside; the facade hands back data.

use crate::core::{Decision, RequestContext, StageError};
use crate::pipeline::Pipeline;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Flat result of one authentication attempt.
///
/// `reason` is populated only on failure, with the rejecting stage's
/// message. Store faults never produce an `AuthResult` at all — they stay
/// on the error channel so callers cannot mistake an outage for bad
/// credentials.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthResult {
    /// Did every stage let the attempt through?
    pub success: bool,
    /// Why the attempt was refused, when it was.
    pub reason: Option<String>,
}

impl AuthResult {
    /// A successful attempt.
    pub fn accepted() -> Self {
        Self {
            success: true,
            reason: None,
        }
    }

    /// A refused attempt with its reason.
    pub fn rejected(reason: impl ToString) -> Self {
        Self {
            success: false,
            reason: Some(reason.to_string()),
        }
    }
}

/// Facade submitting attempts to a pipeline.
///
/// Holds the immutable pipeline and nothing else, so a shared service is
/// safe from any number of concurrent callers; every call builds its own
/// context.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use turnstile::pipeline::PipelineBuilder;
/// use turnstile::service::AuthService;
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
/// let service = AuthService::new(pipeline);
///
/// let result = service.authenticate("admin", "1234").unwrap();
/// assert!(result.success);
///
/// let result = service.authenticate("admin", "wrong").unwrap();
/// assert_eq!(result.reason.as_deref(), Some("secret mismatch"));
/// ```
pub struct AuthService {
    pipeline: Pipeline,
}

impl AuthService {
    /// Create the service around its pipeline.
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// The underlying pipeline.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Submit one authentication attempt.
    pub fn authenticate(&self, principal: &str, secret: &str) -> Result<AuthResult, StageError> {
        let mut ctx = RequestContext::new(principal, secret);
        debug!(
            pipeline = %self.pipeline.name(),
            attempt = %ctx.attempt_id(),
            principal,
            "authentication attempt"
        );

        match self.pipeline.run(&mut ctx)? {
            Decision::Accepted => Ok(AuthResult::accepted()),
            Decision::Rejected { reason } => Ok(AuthResult::rejected(reason)),
        }
    }
}
