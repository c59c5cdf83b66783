//! Credential storage collaborator.
//!
//! The pipeline never talks to storage directly; stages that need credential
//! data hold a [`CredentialStore`] reference injected at construction. The
//! trait exposes exactly two queries, so implementations can sit in front of
//! anything from a fixture map to a directory service.

use std::collections::HashMap;
use thiserror::Error;

/// Errors raised by a credential store backend.
///
/// A store fault is infrastructure failing, not a caller presenting bad
/// credentials. Stages propagate these instead of mapping them to a
/// rejection, so an unreachable backend never masquerades as "secret
/// mismatch".
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// The backend could not be reached.
    #[error("credential store unavailable: {0}")]
    Unavailable(String),

    /// The backend returned a record it could not interpret.
    #[error("corrupt credential record for principal '{principal}'")]
    CorruptRecord { principal: String },
}

/// Read-only view of principal credentials during evaluation.
///
/// Both queries are fallible: implementations backed by real infrastructure
/// surface outages as [`StoreError`] rather than answering `false`. Mutation
/// (adding or removing principals) is an externally-synchronized concern;
/// the pipeline makes no ordering guarantee relative to in-flight
/// evaluations.
///
/// # Example
///
/// ```rust
/// use turnstile::store::{CredentialStore, MemoryStore};
///
/// let store = MemoryStore::new().with_credential("admin", "1234");
///
/// assert_eq!(store.exists("admin"), Ok(true));
/// assert_eq!(store.matches("admin", "1234"), Ok(true));
/// assert_eq!(store.matches("admin", "wrong"), Ok(false));
/// ```
pub trait CredentialStore: Send + Sync {
    /// Is this principal known to the store?
    fn exists(&self, principal: &str) -> Result<bool, StoreError>;

    /// Is this secret the one stored for the principal?
    ///
    /// Returns `Ok(false)` for unknown principals as well as wrong secrets;
    /// distinguishing the two is the pipeline's job, via stage order.
    fn matches(&self, principal: &str, secret: &str) -> Result<bool, StoreError>;
}

/// In-memory credential store.
///
/// A fixture-grade stand-in for tests and examples: a plain map from
/// principal to secret, populated up front and never failing.
///
/// # Example
///
/// ```rust
/// use turnstile::store::{CredentialStore, MemoryStore};
///
/// let store = MemoryStore::new()
///     .with_credential("admin", "1234")
///     .with_credential("user", "pass");
///
/// assert_eq!(store.exists("user"), Ok(true));
/// assert_eq!(store.exists("ghost"), Ok(false));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    credentials: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            credentials: HashMap::new(),
        }
    }

    /// Add a credential, returning the store for chaining.
    pub fn with_credential(mut self, principal: impl Into<String>, secret: impl Into<String>) -> Self {
        self.credentials.insert(principal.into(), secret.into());
        self
    }

    /// Number of stored principals.
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// True when no principals are stored.
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

impl CredentialStore for MemoryStore {
    fn exists(&self, principal: &str) -> Result<bool, StoreError> {
        Ok(self.credentials.contains_key(principal))
    }

    fn matches(&self, principal: &str, secret: &str) -> Result<bool, StoreError> {
        Ok(self
            .credentials
            .get(principal)
            .is_some_and(|stored| stored == secret))
    }
}
