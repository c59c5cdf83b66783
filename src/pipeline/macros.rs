//! Macros for ergonomic pipeline assembly.

/// Assemble a pipeline from stage expressions, in evaluation order.
///
/// Expands to a [`PipelineBuilder`](crate::pipeline::PipelineBuilder)
/// call chain, so the result is the builder's `Result` — configuration
/// mistakes still surface at build time.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use turnstile::chain;
/// use turnstile::stages::{ExistenceStage, SecretStage};
/// use turnstile::store::MemoryStore;
///
/// let store = Arc::new(MemoryStore::new().with_credential("admin", "1234"));
///
/// let pipeline = chain![
///     ExistenceStage::new(store.clone()),
///     SecretStage::new(store),
/// ]
/// .unwrap();
///
/// assert_eq!(pipeline.len(), 2);
/// ```
#[macro_export]
macro_rules! chain {
    ($($stage:expr),* $(,)?) => {
        $crate::pipeline::PipelineBuilder::new()
            $(.stage($stage))*
            .build()
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Decision, PredicateStage, RequestContext};

    #[test]
    fn chain_macro_preserves_order() {
        let pipeline = chain![
            PredicateStage::new("first", |_: &RequestContext| true, "x"),
            PredicateStage::new("second", |_: &RequestContext| true, "x"),
        ]
        .unwrap();

        assert_eq!(pipeline.stage_names(), vec!["first", "second"]);
    }

    #[test]
    fn empty_chain_builds_an_accepting_pipeline() {
        let pipeline = chain![].unwrap();

        let mut ctx = RequestContext::new("anyone", "anything");
        assert_eq!(pipeline.run(&mut ctx).unwrap(), Decision::Accepted);
    }

    #[test]
    fn chain_short_circuits_like_the_builder_form() {
        let pipeline = chain![
            PredicateStage::new("gate", |_: &RequestContext| false, "halted"),
            PredicateStage::new("unreached", |_: &RequestContext| true, "x"),
        ]
        .unwrap();

        let mut ctx = RequestContext::new("admin", "1234");
        let decision = pipeline.run(&mut ctx).unwrap();
        assert_eq!(decision.reason().unwrap().to_string(), "halted");
    }
}
