//! End-to-end decoration of annotated text.
//!
//! Parses the text, builds every invocation, checks the resulting set and
//! runs the pipeline. Unknown decorators and invalid parameters are skipped
//! and reported unless the session is strict.

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{
    CompositionPipeline, DecoratorError, InvocationParser, ParseWarning, TransformationEngine,
};
use crate::ports::DecoratorCatalog;
use crate::services::{BuildFailure, BuildReport, DecoratorFactory};

/// An invocation left out of the prompt because it failed to build.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedInvocation {
    pub name: String,
    pub line: usize,
    pub column: usize,
    pub error: String,
}

/// Outcome of one decoration request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decoration {
    pub prompt: String,
    /// Names of applied decorators, in invocation order.
    pub applied: Vec<String>,
    pub skipped: Vec<SkippedInvocation>,
    pub warnings: Vec<ParseWarning>,
}

/// A configured decoration session over a catalog.
#[derive(Debug, Clone)]
pub struct Decorator<'r, C: DecoratorCatalog> {
    factory: DecoratorFactory<'r, C>,
    parser: InvocationParser,
    pipeline: CompositionPipeline,
    strict: bool,
}

impl<'r, C: DecoratorCatalog> Decorator<'r, C> {
    pub fn new(catalog: &'r C) -> Self {
        Self {
            factory: DecoratorFactory::new(catalog),
            parser: InvocationParser::default(),
            pipeline: CompositionPipeline::default(),
            strict: false,
        }
    }

    pub fn with_parser(mut self, parser: InvocationParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_engine(mut self, engine: TransformationEngine) -> Self {
        self.pipeline = CompositionPipeline::new(engine);
        self
    }

    /// Abort on the first unknown decorator or invalid parameter.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn decorate(&self, text: &str) -> Result<Decoration, DecoratorError> {
        let parsed = self.parser.parse(text);
        for warning in &parsed.warnings {
            warn!(line = warning.line, column = warning.column, "ignored malformed invocation: {}", warning.reason);
        }

        let BuildReport { instances, failures } = self.factory.build_all(&parsed.invocations);
        let mut skipped = Vec::with_capacity(failures.len());
        for BuildFailure { invocation, error } in failures {
            if self.strict || !error.is_recoverable() {
                return Err(error);
            }
            warn!(decorator = %invocation.name, line = invocation.line, "skipping invocation: {}", error);
            skipped.push(SkippedInvocation {
                name: invocation.name,
                line: invocation.line,
                column: invocation.column,
                error: error.to_string(),
            });
        }

        let run = self.pipeline.run(instances, &parsed.body)?;
        let applied: Vec<String> = run.applied.iter().map(|i| i.name().to_string()).collect();
        info!(applied = applied.len(), skipped = skipped.len(), "decorated prompt");

        Ok(Decoration { prompt: run.prompt, applied, skipped, warnings: parsed.warnings })
    }
}
