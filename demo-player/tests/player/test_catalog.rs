//! Catalog construction and validation

use super::common::*;
use demo_player::catalog::{CatalogEntry, WorkflowSource};
use demo_player::{Catalog, CatalogError};
use demo_player_sdk::{Actor, StepDefinition, WorkflowDefinition};
use std::io::Write;

#[test]
fn test_builtin_catalog_contents() {
    let catalog = Catalog::builtin();
    assert_eq!(
        catalog.ids(),
        vec!["customer-onboarding", "ecom-order", "data-sync"]
    );
    assert_eq!(catalog.default_id(), "ecom-order");
    assert_eq!(catalog.position("ecom-order"), Some(1));

    let onboarding = catalog.get("customer-onboarding").unwrap();
    assert_eq!(onboarding.steps.len(), 6);
    assert_eq!(onboarding.steps[2].actor, Actor::Coordinator);

    let ecom = catalog.get("ecom-order").unwrap();
    assert_eq!(ecom.name, "E-commerce Order Processing");
    let ordinals: Vec<u32> = ecom.steps.iter().map(|s| s.id).collect();
    assert_eq!(ordinals, vec![1, 2, 3, 4]);

    assert!(catalog.iter().all(|e| e.source == WorkflowSource::BuiltIn));
}

#[test]
fn test_user_catalog_from_yaml() {
    let catalog = Catalog::from_yaml_str(SAMPLE_CATALOG_YAML).unwrap();
    assert_eq!(catalog.len(), 1);

    let refund = catalog.get("refund-request").unwrap();
    assert_eq!(refund.steps.len(), 3);
    assert_eq!(refund.steps[1].actor, Actor::Coordinator);
    assert_eq!(catalog.entry(0).unwrap().source, WorkflowSource::UserDefined);
}

#[test]
fn test_load_with_builtin_merges_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE_CATALOG_YAML.as_bytes()).unwrap();

    let catalog = Catalog::load_with_builtin(Some(file.path())).unwrap();
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.position("refund-request"), Some(3));
    assert_eq!(catalog.default_id(), "ecom-order");

    let builtin_only = Catalog::load_with_builtin(None).unwrap();
    assert_eq!(builtin_only.len(), 3);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Catalog::load(std::path::Path::new("/nonexistent/catalog.yaml")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn test_duplicate_id_with_builtin_rejected() {
    let clash = WorkflowDefinition {
        id: "ecom-order".to_string(),
        name: "Shadow".to_string(),
        description: "Same id as a built-in".to_string(),
        steps: vec![StepDefinition::new(1, "Only", Actor::WebActor, "x")],
    };
    let err = Catalog::builtin().with_extra(vec![clash]).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateWorkflow(ref id) if id == "ecom-order"));
}

#[test]
fn test_validation_errors() {
    assert!(matches!(Catalog::new(vec![]), Err(CatalogError::Empty)));
    assert!(matches!(Catalog::from_yaml_str("[]"), Err(CatalogError::Empty)));

    let no_steps = CatalogEntry {
        definition: WorkflowDefinition {
            id: "hollow".to_string(),
            name: "Hollow".to_string(),
            description: String::new(),
            steps: vec![],
        },
        source: WorkflowSource::UserDefined,
    };
    assert!(matches!(Catalog::new(vec![no_steps]), Err(CatalogError::NoSteps(_))));

    let unnamed = CatalogEntry {
        definition: WorkflowDefinition {
            id: "unnamed".to_string(),
            name: "  ".to_string(),
            description: String::new(),
            steps: vec![StepDefinition::new(1, "A", Actor::ApiActor, "a")],
        },
        source: WorkflowSource::UserDefined,
    };
    assert!(matches!(Catalog::new(vec![unnamed]), Err(CatalogError::MissingField(_))));
}

#[test]
fn test_unknown_actor_is_parse_error() {
    let yaml = r#"
- id: bad
  name: Bad
  description: Unknown actor
  steps:
    - { id: 1, name: A, description: a, actor: orchestrator }
"#;
    assert!(matches!(Catalog::from_yaml_str(yaml), Err(CatalogError::Parse(_))));
}
