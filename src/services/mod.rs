mod decoration_session;
mod decorator_factory;
mod schema_store;

pub use decoration_session::{Decoration, Decorator, SkippedInvocation};
pub use decorator_factory::{BuildFailure, BuildReport, DecoratorFactory};
pub use schema_store::SchemaStore;
