//! Composition pipeline: folds instances over a prompt in invocation order.
//!
//! The accumulator is kept as a list of segments joined by the engine's
//! separator. For `accumulate` steps this is exactly the nested
//! `engine.apply(instance, accumulator)` fold; the segment boundaries let an
//! `override` step find and swap the block an earlier same-named instance
//! contributed without touching the rest of the prompt.

use tracing::debug;

use super::compatibility::check_compatibility;
use super::definition::{CompositionBehavior, Placement};
use super::engine::TransformationEngine;
use super::error::DecoratorError;
use super::instance::Instance;

/// Output of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineRun<'r> {
    pub prompt: String,
    /// Instances whose contribution was applied and not superseded by a
    /// later override, in invocation order.
    pub applied: Vec<Instance<'r>>,
}

#[derive(Debug, Clone, Default)]
pub struct CompositionPipeline {
    engine: TransformationEngine,
}

struct Segment {
    /// Index of the contributing instance; `None` for the body.
    owner: Option<usize>,
    text: String,
}

impl CompositionPipeline {
    pub fn new(engine: TransformationEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &TransformationEngine {
        &self.engine
    }

    /// Check compatibility of the whole set, then apply every instance to
    /// `body` in order.
    pub fn run<'r>(
        &self,
        instances: Vec<Instance<'r>>,
        body: &str,
    ) -> Result<PipelineRun<'r>, DecoratorError> {
        check_compatibility(&instances)?;

        let mut segments = vec![Segment { owner: None, text: body.to_string() }];
        let mut superseded = vec![false; instances.len()];

        for (index, instance) in instances.iter().enumerate() {
            let definition = instance.definition();
            let (Some(directive), Some(placement)) =
                (self.engine.render_directive(instance)?, definition.placement())
            else {
                debug!(decorator = %instance.name(), "no transformation template; skipping");
                continue;
            };

            if definition.composition_behavior() == CompositionBehavior::Override {
                let earlier = segments.iter().rposition(|segment| {
                    segment.owner.is_some_and(|owner| {
                        instances[owner].name().eq_ignore_ascii_case(instance.name())
                    })
                });
                if let Some(position) = earlier {
                    if let Some(owner) = segments[position].owner {
                        superseded[owner] = true;
                    }
                    debug!(decorator = %instance.name(), "overriding earlier directive block");
                    if directive.is_empty() {
                        segments.remove(position);
                    } else {
                        segments[position] = Segment { owner: Some(index), text: directive };
                    }
                    continue;
                }
            }

            debug!(decorator = %instance.name(), %placement, "applying directive block");
            let segment = Segment { owner: Some(index), text: directive };
            match placement {
                Placement::Prepend => segments.insert(0, segment),
                Placement::Append => segments.push(segment),
                Placement::Replace => segments = vec![segment],
            }
        }

        let prompt = segments
            .iter()
            .map(|segment| segment.text.as_str())
            .collect::<Vec<_>>()
            .join(self.engine.separator());
        let applied = instances
            .into_iter()
            .zip(superseded)
            .filter_map(|(instance, superseded)| (!superseded).then_some(instance))
            .collect();

        Ok(PipelineRun { prompt, applied })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::definition::{
        Compatibility, Definition, ParameterKind, ParameterMapping, ParameterSpec,
        TransformationTemplate,
    };
    use crate::domain::error::CompatibilityError;
    use crate::domain::instance::BoundParameter;
    use crate::domain::value::ParamValue;

    fn definition(
        name: &str,
        instruction: &str,
        placement: Placement,
        behavior: CompositionBehavior,
    ) -> Definition {
        Definition {
            name: name.into(),
            category: "test".into(),
            version: "1.0.0".into(),
            description: None,
            parameters: vec![],
            transformation_template: Some(TransformationTemplate {
                instruction: instruction.into(),
                parameter_mapping: Default::default(),
                placement,
                composition_behavior: behavior,
            }),
            compatibility: Compatibility::default(),
            origin: "test".into(),
        }
    }

    fn tone() -> Definition {
        let mut def =
            definition("Tone", "Use a", Placement::Prepend, CompositionBehavior::Override);
        def.parameters.push(ParameterSpec {
            name: "style".into(),
            kind: ParameterKind::String,
            required: true,
            default: None,
            description: None,
        });
        if let Some(template) = def.transformation_template.as_mut() {
            template.parameter_mapping.insert(
                "style".into(),
                ParameterMapping { format: Some("{value} tone.".into()), ..Default::default() },
            );
        }
        def
    }

    fn plain(def: &Definition) -> Instance<'_> {
        Instance::new(def, vec![])
    }

    fn styled<'a>(def: &'a Definition, style: &str) -> Instance<'a> {
        Instance::new(
            def,
            vec![BoundParameter {
                name: "style".into(),
                value: Some(ParamValue::String(style.into())),
            }],
        )
    }

    fn names(run: &PipelineRun<'_>) -> Vec<String> {
        run.applied.iter().map(|i| i.name().to_string()).collect()
    }

    #[test]
    fn empty_run_returns_body() {
        let run = CompositionPipeline::default().run(vec![], "Explain X.").unwrap();
        assert_eq!(run.prompt, "Explain X.");
        assert!(run.applied.is_empty());
    }

    #[test]
    fn accumulate_matches_nested_engine_fold() {
        let reasoning =
            definition("Reasoning", "Reason it through.", Placement::Prepend, CompositionBehavior::Accumulate);
        let steps =
            definition("StepByStep", "Use steps.", Placement::Prepend, CompositionBehavior::Accumulate);
        let cite = definition("Cite", "Cite sources.", Placement::Append, CompositionBehavior::Accumulate);
        let pipeline = CompositionPipeline::default();
        let engine = pipeline.engine().clone();

        let run = pipeline
            .run(vec![plain(&reasoning), plain(&cite), plain(&steps)], "Explain X.")
            .unwrap();

        let mut expected = "Explain X.".to_string();
        for def in [&reasoning, &cite, &steps] {
            expected = engine.apply(&plain(def), &expected).unwrap();
        }
        assert_eq!(run.prompt, expected);
        assert_eq!(run.prompt, "Use steps.\n\nReason it through.\n\nExplain X.\n\nCite sources.");
        assert_eq!(names(&run), ["Reasoning", "Cite", "StepByStep"]);
    }

    #[test]
    fn replace_discards_everything_before_it() {
        let steps =
            definition("StepByStep", "Use steps.", Placement::Prepend, CompositionBehavior::Accumulate);
        let rewrite =
            definition("Rewrite", "Write a poem.", Placement::Replace, CompositionBehavior::Accumulate);
        let cite = definition("Cite", "Cite sources.", Placement::Append, CompositionBehavior::Accumulate);

        let run = CompositionPipeline::default()
            .run(vec![plain(&steps), plain(&rewrite), plain(&cite)], "Explain X.")
            .unwrap();

        assert_eq!(run.prompt, "Write a poem.\n\nCite sources.");
        assert_eq!(names(&run), ["StepByStep", "Rewrite", "Cite"]);
    }

    #[test]
    fn override_replaces_earlier_block_of_same_name_in_place() {
        let tone = tone();
        let cite = definition("Cite", "Cite sources.", Placement::Prepend, CompositionBehavior::Accumulate);

        let run = CompositionPipeline::default()
            .run(vec![styled(&tone, "formal"), plain(&cite), styled(&tone, "casual")], "Q")
            .unwrap();

        assert_eq!(run.prompt, "Cite sources.\n\nUse a casual tone.\n\nQ");
        assert_eq!(names(&run), ["Cite", "Tone"]);
        assert_eq!(
            run.applied[1].get("style"),
            Some(&ParamValue::String("casual".into()))
        );
    }

    #[test]
    fn override_without_earlier_block_applies_normally() {
        let tone = tone();
        let run = CompositionPipeline::default().run(vec![styled(&tone, "warm")], "Q").unwrap();
        assert_eq!(run.prompt, "Use a warm tone.\n\nQ");
    }

    #[test]
    fn empty_override_directive_removes_earlier_block() {
        let mut def = definition("Mute", "", Placement::Prepend, CompositionBehavior::Override);
        let first = definition("Mute", "Stay quiet.", Placement::Prepend, CompositionBehavior::Accumulate);
        def.name = "mute".into();

        let run = CompositionPipeline::default().run(vec![plain(&first), plain(&def)], "Q").unwrap();
        assert_eq!(run.prompt, "Q");
        assert_eq!(names(&run), ["mute"]);
    }

    #[test]
    fn noop_instances_leave_prompt_unchanged() {
        let mut noop = definition("Noop", "", Placement::Prepend, CompositionBehavior::Accumulate);
        noop.transformation_template = None;

        let run = CompositionPipeline::default().run(vec![plain(&noop)], "Explain X.").unwrap();
        assert_eq!(run.prompt, "Explain X.");
        assert_eq!(names(&run), ["Noop"]);
    }

    #[test]
    fn incompatible_set_aborts_before_any_application() {
        let mut concise =
            definition("Concise", "Be brief.", Placement::Prepend, CompositionBehavior::Accumulate);
        concise.compatibility.conflicts.push("Detailed".into());
        let detailed =
            definition("Detailed", "Be thorough.", Placement::Prepend, CompositionBehavior::Accumulate);

        let err = CompositionPipeline::default()
            .run(vec![plain(&concise), plain(&detailed)], "Q")
            .unwrap_err();

        assert_eq!(
            err,
            DecoratorError::Compatibility(CompatibilityError::Conflict {
                first: "Concise".into(),
                second: "Detailed".into(),
            })
        );
    }
}
