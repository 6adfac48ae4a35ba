//! Builds validated instances from parsed invocations.

use tracing::debug;

use crate::domain::parameters::bind_parameters;
use crate::domain::{DecoratorError, Instance, Invocation};
use crate::ports::DecoratorCatalog;

/// An invocation that could not be turned into an instance.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildFailure {
    pub invocation: Invocation,
    pub error: DecoratorError,
}

/// Result of building a batch of invocations.
#[derive(Debug, Clone, Default)]
pub struct BuildReport<'r> {
    /// Instances in invocation order.
    pub instances: Vec<Instance<'r>>,
    pub failures: Vec<BuildFailure>,
}

/// Resolves invocations against a catalog and binds their parameters.
#[derive(Debug)]
pub struct DecoratorFactory<'r, C: DecoratorCatalog> {
    catalog: &'r C,
}

impl<C: DecoratorCatalog> Clone for DecoratorFactory<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: DecoratorCatalog> Copy for DecoratorFactory<'_, C> {}

impl<'r, C: DecoratorCatalog> DecoratorFactory<'r, C> {
    pub fn new(catalog: &'r C) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'r C {
        self.catalog
    }

    /// Build one instance. All-or-nothing: the first failing parameter, in
    /// declaration order, is reported and no instance is returned.
    pub fn build(&self, invocation: &Invocation) -> Result<Instance<'r>, DecoratorError> {
        let catalog: &'r C = self.catalog;
        let definition = catalog.get(&invocation.name)?;
        let params = bind_parameters(definition, &invocation.params)?;
        debug!(decorator = %definition.name, line = invocation.line, "built instance");
        Ok(Instance::new(definition, params))
    }

    /// Build every invocation, collecting failures instead of stopping.
    pub fn build_all(&self, invocations: &[Invocation]) -> BuildReport<'r> {
        let mut report = BuildReport::default();
        for invocation in invocations {
            match self.build(invocation) {
                Ok(instance) => report.instances.push(instance),
                Err(error) => {
                    report.failures.push(BuildFailure { invocation: invocation.clone(), error })
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryDefinitionSource;
    use crate::domain::{ParamValue, RawValue, ValidationError, ValidationRule};
    use crate::services::SchemaStore;

    const EXPERT: &str = r#"
name: Expert
category: expertise
parameters:
  - name: domain
    type: string
    required: true
  - name: level
    type: enum
    enum: [novice, expert]
    default: expert
  - name: years
    type: number
    min: 1
    max: 50
transformationTemplate:
  instruction: "Answer as an expert in {{ domain }}."
"#;

    fn store() -> SchemaStore {
        let source = MemoryDefinitionSource::new().with_yaml("expert.yml", EXPERT);
        SchemaStore::load(&source).unwrap()
    }

    #[test]
    fn build_binds_defaults_and_unset_optionals() {
        let store = store();
        let factory = DecoratorFactory::new(&store);

        let invocation = Invocation::new("expert").with_param("domain", RawValue::scalar("biology"));
        let instance = factory.build(&invocation).unwrap();

        assert_eq!(instance.name(), "Expert");
        assert_eq!(instance.get("domain"), Some(&ParamValue::String("biology".into())));
        assert_eq!(instance.get("level"), Some(&ParamValue::Enum("expert".into())));
        assert_eq!(instance.get("years"), None);
        assert_eq!(instance.params().len(), 3);
    }

    #[test]
    fn missing_required_parameter_names_it() {
        let store = store();
        let err = DecoratorFactory::new(&store).build(&Invocation::new("Expert")).unwrap_err();

        assert_eq!(
            err,
            DecoratorError::Validation(ValidationError {
                decorator: "Expert".into(),
                parameter: "domain".into(),
                rule: ValidationRule::Missing,
            })
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn first_failure_in_declaration_order_is_reported() {
        let store = store();
        let invocation = Invocation::new("Expert")
            .with_param("years", RawValue::scalar("99"))
            .with_param("level", RawValue::scalar("guru"))
            .with_param("domain", RawValue::scalar("law"));

        let factory = DecoratorFactory::new(&store);
        let first = factory.build(&invocation).unwrap_err();
        let second = factory.build(&invocation).unwrap_err();

        assert_eq!(first, second);
        match first {
            DecoratorError::Validation(err) => assert_eq!(err.parameter, "level"),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn unknown_decorator_is_not_found() {
        let store = store();
        let err = DecoratorFactory::new(&store).build(&Invocation::new("Missing")).unwrap_err();
        assert!(matches!(err, DecoratorError::NotFound { ref name, .. } if name == "Missing"));
    }

    #[test]
    fn build_all_keeps_order_and_collects_failures() {
        let store = store();
        let invocations = vec![
            Invocation::new("Expert").with_param("domain", RawValue::scalar("a")).at(1, 1),
            Invocation::new("Nope").at(2, 1),
            Invocation::new("Expert").at(3, 1),
            Invocation::new("Expert").with_param("domain", RawValue::scalar("b")).at(4, 1),
        ];

        let report = DecoratorFactory::new(&store).build_all(&invocations);

        let domains: Vec<_> = report.instances.iter().map(|i| i.get("domain").cloned()).collect();
        assert_eq!(
            domains,
            [Some(ParamValue::String("a".into())), Some(ParamValue::String("b".into()))]
        );
        let lines: Vec<_> = report.failures.iter().map(|f| f.invocation.line).collect();
        assert_eq!(lines, [2, 3]);
    }
}
