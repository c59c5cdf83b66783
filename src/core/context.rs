//! Per-attempt request context.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// The data a single authentication attempt carries through the pipeline.
///
/// The identity fields (`principal`, `secret`) are fixed at construction and
/// private; stages read them through accessors and cannot rewrite them. The
/// auxiliary attribute map is the open part: an earlier stage may record a
/// derived fact (a resolved role, a tenant id) for a later stage to consume.
///
/// A context belongs to exactly one pipeline invocation. It is created per
/// attempt and discarded when the call returns, so shared pipelines never
/// see cross-talk between callers.
///
/// # Example
///
/// ```rust
/// use turnstile::core::RequestContext;
/// use serde_json::json;
///
/// let mut ctx = RequestContext::new("admin", "1234");
/// ctx.set_attribute("role", json!("operator"));
///
/// assert_eq!(ctx.principal(), "admin");
/// assert_eq!(ctx.attribute("role"), Some(&json!("operator")));
/// assert_eq!(ctx.attribute("tenant"), None);
/// ```
#[derive(Clone)]
pub struct RequestContext {
    principal: String,
    secret: String,
    attributes: HashMap<String, Value>,
    attempt_id: Uuid,
    started_at: DateTime<Utc>,
}

impl RequestContext {
    /// Create a fresh context for one authentication attempt.
    pub fn new(principal: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            secret: secret.into(),
            attributes: HashMap::new(),
            attempt_id: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }

    /// The principal this attempt is for.
    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// The secret presented with this attempt.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Read an auxiliary attribute set by an earlier stage or the caller.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Record a derived fact for later stages. Overwrites any prior value.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: Value) {
        self.attributes.insert(key.into(), value);
    }

    /// Unique id for this attempt, for traces and log correlation.
    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    /// When this attempt began.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Wall-clock time since the attempt began.
    pub fn elapsed(&self) -> Duration {
        Utc::now()
            .signed_duration_since(self.started_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

// The secret never appears in Debug output.
impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("principal", &self.principal)
            .field("secret", &"<redacted>")
            .field("attributes", &self.attributes)
            .field("attempt_id", &self.attempt_id)
            .field("started_at", &self.started_at)
            .finish()
    }
}
