//! Decorator catalog port definition.

use crate::domain::{Definition, DecoratorError};

/// Trait for read-only access to loaded decorator definitions.
pub trait DecoratorCatalog {
    /// Case-insensitive lookup. Fails with `NotFound` if absent.
    fn get(&self, name: &str) -> Result<&Definition, DecoratorError>;

    /// Definitions of one category, in load order.
    fn list_by_category(&self, category: &str) -> Vec<&Definition>;

    /// All definitions in load order.
    fn list_all(&self) -> Vec<&Definition>;

    /// Canonical names in load order.
    fn names(&self) -> Vec<&str>;
}
