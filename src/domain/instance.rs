use serde::Serialize;

use super::definition::Definition;
use super::value::ParamValue;

/// A validated parameter binding. `value` is `None` only for an optional
/// parameter that was omitted and declares no default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundParameter {
    pub name: String,
    pub value: Option<ParamValue>,
}

/// A validated, parameter-bound realization of a definition.
///
/// Borrows its definition from the schema store, so an instance can never
/// outlive the store it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance<'r> {
    definition: &'r Definition,
    params: Vec<BoundParameter>,
}

impl<'r> Instance<'r> {
    /// Bind validated parameters. `params` must hold exactly one entry per
    /// parameter spec, in declaration order.
    pub(crate) fn new(definition: &'r Definition, params: Vec<BoundParameter>) -> Self {
        debug_assert_eq!(definition.parameters.len(), params.len());
        Self { definition, params }
    }

    pub fn definition(&self) -> &'r Definition {
        self.definition
    }

    pub fn name(&self) -> &'r str {
        &self.definition.name
    }

    /// Bindings in parameter declaration order.
    pub fn params(&self) -> &[BoundParameter] {
        &self.params
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.params.iter().find(|p| p.name == name).and_then(|p| p.value.as_ref())
    }
}

impl Serialize for Instance<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Instance", 2)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("parameters", &self.params)?;
        state.end()
    }
}
