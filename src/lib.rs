//! prompt-decorators: expand `+++Decorator(param=value)` annotations into
//! prompt directives.
//!
//! ```no_run
//! use prompt_decorators::{Decorator, builtin_store};
//!
//! let store = builtin_store()?;
//! let outcome = Decorator::new(&store).decorate("+++StepByStep\nExplain X.")?;
//! println!("{}", outcome.prompt);
//! # Ok::<(), prompt_decorators::DecoratorError>(())
//! ```

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

use adapters::EmbeddedDefinitionSource;
use ports::DecoratorCatalog;

pub use adapters::{FilesystemDefinitionSource, MemoryDefinitionSource};
pub use domain::{
    AppError, CompatibilityError, CompositionPipeline, Definition, DecoratorError, Instance,
    Invocation, InvocationParser, ParamValue, ParseWarning, ParsedText, PipelineRun, RawValue,
    Severity, TransformationEngine, ValidationError, ValidationRule,
};
pub use services::{Decoration, Decorator, DecoratorFactory, SchemaStore, SkippedInvocation};

/// Load the catalog compiled into the crate.
pub fn builtin_store() -> Result<SchemaStore, DecoratorError> {
    SchemaStore::load(&EmbeddedDefinitionSource::new())
}

/// Split annotated text into invocations and body using the default marker.
pub fn parse(text: &str) -> ParsedText {
    InvocationParser::new().parse(text)
}

/// Resolve and validate one invocation against `catalog`.
pub fn build<'r, C: DecoratorCatalog>(
    catalog: &'r C,
    invocation: &Invocation,
) -> Result<Instance<'r>, DecoratorError> {
    DecoratorFactory::new(catalog).build(invocation)
}

/// Reject conflicting decorators and unmet requirements.
pub fn check_compatibility(instances: &[Instance<'_>]) -> Result<(), CompatibilityError> {
    domain::check_compatibility(instances)
}

/// Apply `instances` in order over `body` with the default separator.
pub fn run<'r>(instances: Vec<Instance<'r>>, body: &str) -> Result<PipelineRun<'r>, DecoratorError> {
    CompositionPipeline::default().run(instances, body)
}
