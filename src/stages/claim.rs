//! Context-enriching claim stage.

use crate::core::{Outcome, RequestContext, Stage, StageError};
use serde_json::Value;

/// Writes one attribute into the context and continues.
///
/// The writer half of attribute flow: an earlier `ClaimStage` records a
/// derived fact (a resolved role, a tenant id) that a later stage — say a
/// [`RoleStage`](crate::stages::RoleStage) — consumes. It never rejects.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use turnstile::core::{RequestContext, Stage};
/// use turnstile::stages::ClaimStage;
///
/// let stage = ClaimStage::new("role", json!("operator"));
/// let mut ctx = RequestContext::new("admin", "1234");
///
/// stage.evaluate(&mut ctx).unwrap();
/// assert_eq!(ctx.attribute("role"), Some(&json!("operator")));
/// ```
pub struct ClaimStage {
    key: String,
    value: Value,
}

impl ClaimStage {
    /// Create a stage that sets `key` to `value` on every attempt.
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

impl Stage for ClaimStage {
    fn name(&self) -> &str {
        "claim"
    }

    fn evaluate(&self, ctx: &mut RequestContext) -> Result<Outcome, StageError> {
        ctx.set_attribute(self.key.clone(), self.value.clone());
        Ok(Outcome::Continue)
    }
}
