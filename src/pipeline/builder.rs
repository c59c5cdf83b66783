//! Builder API for assembling pipelines.

use crate::core::Stage;
use crate::pipeline::error::BuildError;
use crate::pipeline::Pipeline;

/// Builder for assembling a [`Pipeline`] from an ordered stage list.
///
/// The builder replaces manual successor-wiring: stages are appended in the
/// order they should evaluate, and ownership of the whole sequence moves
/// into the immutable pipeline at [`build`](PipelineBuilder::build).
/// Construction is where configuration mistakes surface; evaluation never
/// revalidates.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use turnstile::pipeline::PipelineBuilder;
/// use turnstile::stages::{ExistenceStage, SecretStage};
/// use turnstile::store::MemoryStore;
///
/// let store = Arc::new(MemoryStore::new().with_credential("admin", "1234"));
///
/// let pipeline = PipelineBuilder::new()
///     .name("login")
///     .stage(ExistenceStage::new(store.clone()))
///     .stage(SecretStage::new(store))
///     .build()
///     .unwrap();
///
/// assert_eq!(pipeline.len(), 2);
/// ```
pub struct PipelineBuilder {
    name: String,
    stages: Vec<Box<dyn Stage>>,
}

impl PipelineBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            name: Pipeline::DEFAULT_NAME.to_string(),
            stages: Vec::new(),
        }
    }

    /// Set the pipeline's display name (used in traces and logs, and as the
    /// stage name when this pipeline nests inside another).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Append one stage. Order of calls is evaluation order.
    pub fn stage(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Append an already-boxed stage.
    pub fn boxed_stage(mut self, stage: Box<dyn Stage>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Append multiple stages at once, preserving their order.
    pub fn stages(mut self, stages: Vec<Box<dyn Stage>>) -> Self {
        self.stages.extend(stages);
        self
    }

    /// Build the pipeline.
    ///
    /// Fails if any stage reports an empty name — names key traces and
    /// logs, so an anonymous stage is a configuration mistake. An empty
    /// stage list is legal: a pipeline with zero stages accepts every
    /// request.
    pub fn build(self) -> Result<Pipeline, BuildError> {
        for (index, stage) in self.stages.iter().enumerate() {
            if stage.name().is_empty() {
                return Err(BuildError::UnnamedStage { index });
            }
        }

        Ok(Pipeline::from_parts(self.name, self.stages))
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
