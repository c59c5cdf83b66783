//! Role authorization check.

use crate::core::{Outcome, RejectReason, RequestContext, Stage, StageError};
use serde_json::Value;
use std::collections::HashSet;

/// Attribute key an earlier stage writes the resolved role under.
pub const ROLE_ATTRIBUTE: &str = "role";

/// Role assumed when no earlier stage resolved one.
pub const DEFAULT_ROLE: &str = "guest";

/// Rejects attempts whose resolved role is outside the allowed set.
///
/// The role is read from the context's attribute map (key
/// [`ROLE_ATTRIBUTE`]), where an earlier stage — typically a
/// [`ClaimStage`](crate::stages::ClaimStage) — put it. Attempts with no
/// role attribute are treated as [`DEFAULT_ROLE`]. This is what makes
/// stage order semantic: running this check before the stage that resolves
/// the role evaluates everyone as a guest.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use turnstile::core::{Outcome, RequestContext, Stage};
/// use turnstile::stages::RoleStage;
///
/// let stage = RoleStage::new(["operator", "admin"]);
///
/// let mut ctx = RequestContext::new("admin", "1234");
/// assert!(stage.evaluate(&mut ctx).unwrap().is_reject()); // guest by default
///
/// ctx.set_attribute("role", json!("operator"));
/// assert_eq!(stage.evaluate(&mut ctx).unwrap(), Outcome::Continue);
/// ```
pub struct RoleStage {
    allowed: HashSet<String>,
}

impl RoleStage {
    /// Create the stage with its allowed role set.
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    fn resolved_role<'a>(&self, ctx: &'a RequestContext) -> &'a str {
        ctx.attribute(ROLE_ATTRIBUTE)
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_ROLE)
    }
}

impl Stage for RoleStage {
    fn name(&self) -> &str {
        "role"
    }

    fn evaluate(&self, ctx: &mut RequestContext) -> Result<Outcome, StageError> {
        if self.allowed.contains(self.resolved_role(ctx)) {
            Ok(Outcome::Continue)
        } else {
            Ok(Outcome::Reject(RejectReason::RoleNotAuthorized))
        }
    }
}
