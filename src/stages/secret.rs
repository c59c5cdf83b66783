//! Secret comparison check.

use crate::core::{Outcome, RejectReason, RequestContext, Stage, StageError};
use crate::store::CredentialStore;
use std::sync::Arc;

/// Rejects attempts whose presented secret is not the stored one.
///
/// The store answers equality only; this stage never sees the stored secret
/// itself. An unknown principal also fails the match — run an
/// [`ExistenceStage`](crate::stages::ExistenceStage) earlier if "who are
/// you" and "prove it" should reject differently.
pub struct SecretStage {
    store: Arc<dyn CredentialStore>,
}

impl SecretStage {
    /// Create the stage with its store collaborator.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }
}

impl Stage for SecretStage {
    fn name(&self) -> &str {
        "secret"
    }

    fn evaluate(&self, ctx: &mut RequestContext) -> Result<Outcome, StageError> {
        if self.store.matches(ctx.principal(), ctx.secret())? {
            Ok(Outcome::Continue)
        } else {
            Ok(Outcome::Reject(RejectReason::SecretMismatch))
        }
    }
}
