//! Concrete validation stages.
//!
//! The built-in checks an authentication pipeline is usually assembled from.
//! Each stage is a small value: stateless across invocations, holding at
//! most an immutable reference to its collaborator, injected at
//! construction. Cheaper, coarser checks are meant to run first — existence
//! before secret, secret before role — and the pipeline preserves whatever
//! order the caller picked.

mod claim;
mod existence;
mod role;
mod secret;

pub use claim::ClaimStage;
pub use existence::ExistenceStage;
pub use role::{RoleStage, DEFAULT_ROLE, ROLE_ATTRIBUTE};
pub use secret::SecretStage;
