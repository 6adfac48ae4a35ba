//! Up-front conflict and requirement checks over a set of instances.

use super::error::CompatibilityError;
use super::instance::Instance;

/// Verify that no two instances conflict and every requirement is present.
///
/// A conflict declared by either side is enough. Conflicts are reported
/// before requirements, each in invocation order.
pub fn check_compatibility(instances: &[Instance<'_>]) -> Result<(), CompatibilityError> {
    for (i, first) in instances.iter().enumerate() {
        for second in &instances[i + 1..] {
            let first_def = first.definition();
            let second_def = second.definition();
            if first_def.conflicts_with(&second_def.name) || second_def.conflicts_with(&first_def.name)
            {
                return Err(CompatibilityError::Conflict {
                    first: first_def.name.clone(),
                    second: second_def.name.clone(),
                });
            }
        }
    }

    for instance in instances {
        for required in &instance.definition().compatibility.requires {
            let present = instances.iter().any(|other| other.name().eq_ignore_ascii_case(required));
            if !present {
                return Err(CompatibilityError::MissingRequirement {
                    decorator: instance.name().to_string(),
                    requires: required.clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::definition::{Compatibility, Definition};

    fn definition(name: &str, conflicts: &[&str], requires: &[&str]) -> Definition {
        Definition {
            name: name.into(),
            category: "test".into(),
            version: "1.0.0".into(),
            description: None,
            parameters: vec![],
            transformation_template: None,
            compatibility: Compatibility {
                conflicts: conflicts.iter().map(|s| s.to_string()).collect(),
                requires: requires.iter().map(|s| s.to_string()).collect(),
            },
            origin: "test".into(),
        }
    }

    fn instance(def: &Definition) -> Instance<'_> {
        Instance::new(def, vec![])
    }

    #[test]
    fn conflict_is_rejected_in_either_order() {
        let a = definition("A", &["B"], &[]);
        let b = definition("B", &[], &[]);

        let forward = check_compatibility(&[instance(&a), instance(&b)]);
        let backward = check_compatibility(&[instance(&b), instance(&a)]);

        assert_eq!(
            forward,
            Err(CompatibilityError::Conflict { first: "A".into(), second: "B".into() })
        );
        assert_eq!(
            backward,
            Err(CompatibilityError::Conflict { first: "B".into(), second: "A".into() })
        );
    }

    #[test]
    fn conflicting_decorators_are_fine_alone() {
        let a = definition("A", &["B"], &[]);
        let b = definition("B", &[], &[]);

        assert!(check_compatibility(&[instance(&a)]).is_ok());
        assert!(check_compatibility(&[instance(&b)]).is_ok());
        assert!(check_compatibility(&[]).is_ok());
    }

    #[test]
    fn conflict_names_match_case_insensitively() {
        let a = definition("Concise", &["detailed"], &[]);
        let b = definition("Detailed", &[], &[]);
        assert!(check_compatibility(&[instance(&a), instance(&b)]).is_err());
    }

    #[test]
    fn missing_requirement_is_named() {
        let a = definition("Refine", &[], &["Draft"]);

        assert_eq!(
            check_compatibility(&[instance(&a)]),
            Err(CompatibilityError::MissingRequirement {
                decorator: "Refine".into(),
                requires: "Draft".into(),
            })
        );
    }

    #[test]
    fn requirement_satisfied_regardless_of_position() {
        let refine = definition("Refine", &[], &["Draft"]);
        let draft = definition("Draft", &[], &[]);

        assert!(check_compatibility(&[instance(&refine), instance(&draft)]).is_ok());
        assert!(check_compatibility(&[instance(&draft), instance(&refine)]).is_ok());
    }

    #[test]
    fn conflicts_reported_before_requirements() {
        let a = definition("A", &["B"], &["Missing"]);
        let b = definition("B", &[], &[]);

        let err = check_compatibility(&[instance(&a), instance(&b)]).unwrap_err();
        assert!(matches!(err, CompatibilityError::Conflict { .. }));
    }
}
