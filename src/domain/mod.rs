pub mod compatibility;
pub mod definition;
pub mod engine;
pub mod error;
pub mod instance;
pub mod invocation;
pub mod parameters;
pub mod parser;
pub mod pipeline;
pub mod schema_document;
pub mod validation;
pub mod value;

pub use compatibility::check_compatibility;
pub use definition::{
    Compatibility, CompositionBehavior, Definition, ParameterKind, ParameterMapping, ParameterSpec,
    Placement, TransformationTemplate,
};
pub use engine::{DEFAULT_SEPARATOR, TransformationEngine};
pub use error::{
    AppError, CompatibilityError, DecoratorError, Severity, ValidationError, ValidationRule,
};
pub use instance::{BoundParameter, Instance};
pub use invocation::{Invocation, ParseWarning};
pub use parser::{DEFAULT_MARKER, InvocationParser, ParsedText};
pub use pipeline::{CompositionPipeline, PipelineRun};
pub use value::{ParamValue, RawValue};
