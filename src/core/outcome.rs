//! Per-stage outcomes and terminal decisions.

use crate::store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a stage refused a request.
///
/// Reasons are data, not presentation: the library never prints them. The
/// `Display` strings are the contract callers may match on or surface to
/// users, so they stay short and free of internal detail.
#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
pub enum RejectReason {
    /// The principal is not known to the credential store.
    #[error("principal not found")]
    PrincipalNotFound,

    /// The presented secret is not the stored one.
    #[error("secret mismatch")]
    SecretMismatch,

    /// The resolved role is outside the allowed set.
    #[error("role not authorized")]
    RoleNotAuthorized,

    /// A caller-defined stage refused with its own message.
    #[error("{message}")]
    Custom { message: String },
}

/// Result of evaluating a single stage.
///
/// There is no mid-chain `Accept`: a stage either lets the request move on
/// or halts the whole pipeline with a definitive rejection. Reaching the end
/// of the chain with every stage continuing *is* acceptance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Hand the request to the next stage.
    Continue,

    /// Halt the pipeline; the request is definitively refused.
    Reject(RejectReason),
}

impl Outcome {
    /// True when this outcome lets evaluation proceed.
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }

    /// True when this outcome halts the pipeline.
    pub fn is_reject(&self) -> bool {
        matches!(self, Self::Reject(_))
    }
}

/// Terminal result of running a whole pipeline.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{Decision, RejectReason};
///
/// let decision = Decision::Rejected {
///     reason: RejectReason::SecretMismatch,
/// };
/// assert!(!decision.is_accepted());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Decision {
    /// Every stage continued; the request is accepted.
    Accepted,

    /// Some stage rejected; later stages never saw the request.
    Rejected { reason: RejectReason },
}

impl Decision {
    /// True when the pipeline accepted the request.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// The reject reason, if the request was refused.
    pub fn reason(&self) -> Option<&RejectReason> {
        match self {
            Self::Accepted => None,
            Self::Rejected { reason } => Some(reason),
        }
    }
}

/// Faults that interrupt evaluation without deciding it.
///
/// Distinct from [`RejectReason`] on purpose: "the store is down" must never
/// be reported as "secret mismatch". Stages propagate these with `?` and the
/// caller sees them as errors, not as authentication decisions.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StageError {
    /// The credential store collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
