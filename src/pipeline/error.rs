//! Build errors for pipeline construction.

use thiserror::Error;

/// Errors that can occur when assembling a pipeline.
///
/// These are configuration mistakes, caught at build time before any
/// request is evaluated. A stage reference itself can never be absent —
/// the builder takes owned stage values, so there is no unset slot to
/// validate at runtime.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Stage at position {index} reports an empty name. Give every stage a non-empty name()")]
    UnnamedStage { index: usize },
}
