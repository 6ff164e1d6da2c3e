//! Unit tests for core tehai functionality.
mod common;
use tehai::prelude::*;

#[test]
fn test_role_display() {
    assert_eq!(format!("{}", AssetRole::Checkpoint), "checkpoint");
    assert_eq!(format!("{}", AssetRole::ClipVision), "clip-vision");
    assert_eq!(format!("{}", AssetRole::Unknown), "unknown");
}

#[test]
fn test_origin_kind_display() {
    assert_eq!(format!("{}", OriginKind::FixedCatalog), "catalog");
    assert_eq!(format!("{}", OriginKind::PatternInferred), "inferred");
    assert_eq!(format!("{}", OriginKind::Unclassified), "unclassified");
}

#[test]
fn test_error_display() {
    let err = GraphError::DanglingLink {
        link_id: 12,
        endpoint: "target",
        node_id: 99,
    };
    assert!(err.to_string().contains("12"));
    assert!(err.to_string().contains("target"));
    assert!(err.to_string().contains("99"));

    let conflict = TranslateError::ConflictingBinding {
        node_id: 10,
        slot: 2,
        first_source: 4,
        second_source: 7,
    };
    assert!(conflict.to_string().contains("slot 2"));
    assert!(conflict.to_string().contains("node 10"));
}

#[test]
fn test_warning_display() {
    let warning = TranslateWarning::SchemaMismatch {
        node_id: 3,
        declared: 1,
        supplied: 4,
    };
    let text = warning.to_string();
    assert!(text.contains("Node 3"));
    assert!(text.contains('1'));
    assert!(text.contains('4'));
}

#[test]
fn test_schema_registry_registration() {
    let mut schemas = SchemaRegistry::empty();
    assert!(schemas.is_empty());
    schemas.register("MyNode", &["first", "second"]);
    let params = schemas.get("MyNode").unwrap();
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].name, "first");
    assert_eq!(params[0].widget, 0);
    assert_eq!(params[1].widget, 1);
    assert!(schemas.get("OtherNode").is_none());
}

#[test]
fn test_schema_registry_sparse_registration() {
    let mut schemas = SchemaRegistry::empty();
    schemas.register_sparse(
        "SeedOnly",
        vec![ParamSpec {
            name: "seed".to_string(),
            widget: 2,
        }],
    );
    assert_eq!(schemas.get("SeedOnly").unwrap()[0].widget, 2);
}

#[test]
fn test_default_tables_are_populated() {
    assert!(!SchemaRegistry::with_defaults().is_empty());
    assert!(!LoaderRegistry::with_defaults().is_empty());
    assert!(!Catalog::with_defaults().is_empty());
    assert!(
        SchemaRegistry::with_defaults()
            .get("VHS_VideoCombine")
            .unwrap()
            .len()
            == 10
    );
}
