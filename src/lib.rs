//! Turnstile: a short-circuiting validation pipeline library
//!
//! Turnstile models request authorization as an ordered chain of independent
//! validation stages evaluated against a single per-attempt context. Stages
//! evaluate strictly in construction order; the first rejection ends the
//! walk with a structured reason, and a clean walk through every stage is
//! acceptance. The chain itself is immutable and stateless, so one pipeline
//! serves any number of concurrent callers.
//!
//! # Core Concepts
//!
//! - **Stage**: one atomic check via the [`Stage`](core::Stage) trait
//! - **Pipeline**: the immutable ordered stage sequence, built once and
//!   reused
//! - **RequestContext**: per-attempt data, with an open attribute map for
//!   stages to pass derived facts forward
//! - **Outcome**: per-stage `Continue`/`Reject(reason)`; collaborator
//!   faults travel a separate error channel and never decide a request
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use turnstile::pipeline::PipelineBuilder;
//! use turnstile::service::AuthService;
//! use turnstile::stages::{ExistenceStage, SecretStage};
//! use turnstile::store::MemoryStore;
//!
//! let store = Arc::new(
//!     MemoryStore::new()
//!         .with_credential("admin", "1234")
//!         .with_credential("user", "pass"),
//! );
//!
//! let pipeline = PipelineBuilder::new()
//!     .name("login")
//!     .stage(ExistenceStage::new(store.clone()))
//!     .stage(SecretStage::new(store))
//!     .build()
//!     .unwrap();
//!
//! let auth = AuthService::new(pipeline);
//!
//! assert!(auth.authenticate("admin", "1234").unwrap().success);
//! assert_eq!(
//!     auth.authenticate("ghost", "x").unwrap().reason.as_deref(),
//!     Some("principal not found"),
//! );
//! ```

pub mod core;
pub mod pipeline;
pub mod service;
pub mod stages;
pub mod store;

// Re-export commonly used types
pub use crate::core::{Decision, Outcome, RejectReason, RequestContext, Stage, StageError};
pub use crate::pipeline::{BuildError, Pipeline, PipelineBuilder};
pub use crate::service::{AuthResult, AuthService};
pub use crate::store::{CredentialStore, MemoryStore, StoreError};
