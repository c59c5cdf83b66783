//! Principal-existence check.

use crate::core::{Outcome, RejectReason, RequestContext, Stage, StageError};
use crate::store::CredentialStore;
use std::sync::Arc;

/// Rejects attempts whose principal the credential store has never heard of.
///
/// This is the coarse, cheap gate that usually runs first: it answers one
/// store query and refuses with [`RejectReason::PrincipalNotFound`] before
/// any secret comparison happens.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use turnstile::core::{Outcome, RequestContext, Stage};
/// use turnstile::stages::ExistenceStage;
/// use turnstile::store::MemoryStore;
///
/// let store = Arc::new(MemoryStore::new().with_credential("admin", "1234"));
/// let stage = ExistenceStage::new(store);
///
/// let mut known = RequestContext::new("admin", "1234");
/// assert_eq!(stage.evaluate(&mut known).unwrap(), Outcome::Continue);
///
/// let mut unknown = RequestContext::new("ghost", "x");
/// assert!(stage.evaluate(&mut unknown).unwrap().is_reject());
/// ```
pub struct ExistenceStage {
    store: Arc<dyn CredentialStore>,
}

impl ExistenceStage {
    /// Create the stage with its store collaborator.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }
}

impl Stage for ExistenceStage {
    fn name(&self) -> &str {
        "existence"
    }

    fn evaluate(&self, ctx: &mut RequestContext) -> Result<Outcome, StageError> {
        if self.store.exists(ctx.principal())? {
            Ok(Outcome::Continue)
        } else {
            Ok(Outcome::Reject(RejectReason::PrincipalNotFound))
        }
    }
}
