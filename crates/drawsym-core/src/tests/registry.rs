use crate::error::Error;
use crate::registry::{DEFAULT_VALUE_KEY, ModifierCatalog, SymbolRegistry};
use crate::template::TemplateSet;
use serde_json::{Value, json};

#[test]
fn flag_modifiers_are_stored_under_default() {
    let mut catalog = ModifierCatalog::new();
    catalog.record("dashed", None, "dashed".to_string());
    assert_eq!(catalog.fragment("dashed", DEFAULT_VALUE_KEY), Some("dashed"));
    assert_eq!(catalog.fragment("dashed", "1"), None);
}

#[test]
fn template_properties_serialize_in_priority_order() {
    let registry = SymbolRegistry::from_templates(&TemplateSet::bpmn());
    let value: Value = serde_json::from_str(&registry.to_json_pretty().unwrap()).unwrap();

    let keys: Vec<_> = value["templates"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(
        keys,
        vec!["task", "event", "gateway", "data_object", "sub_process", "pool", "lane"]
    );
    assert_eq!(value["templates"]["task"]["vertex"], json!("1"));
    assert_eq!(value["templates"]["task"]["width"], json!(120.0));
    assert!(value["templates"]["sub_process"].get("width").is_none());
    assert_eq!(value["modifiers"], json!({}));
}

#[test]
fn registry_json_round_trips() {
    let mut registry = SymbolRegistry::from_templates(&TemplateSet::bpmn());
    registry
        .modifiers
        .record("symbol", Some("terminate"), "symbol=terminate".to_string());
    let text = registry.to_json_pretty().unwrap();
    let loaded = SymbolRegistry::from_json_str(&text).unwrap();
    assert_eq!(loaded, registry);
    assert!(loaded.templates["lane"].is_vertex());
}

#[test]
fn registry_accepts_minimal_templates() {
    let registry = SymbolRegistry::from_json_str(
        r#"{"templates": {"task": {"style_base": "shape=task;"}}}"#,
    )
    .unwrap();
    assert_eq!(registry.templates["task"].vertex, "1");
    assert!(registry.modifiers.is_empty());
}

#[test]
fn loading_missing_registry_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = SymbolRegistry::load(&dir.path().join("symbols.json")).unwrap_err();
    assert!(matches!(err, Error::MissingRegistry { .. }));
    assert!(err.to_string().contains("not found"));
}

#[test]
fn save_then_load_preserves_registry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("symbols.json");
    let mut registry = SymbolRegistry::from_templates(&TemplateSet::bpmn());
    registry
        .modifiers
        .record("taskMarker", Some("user"), "taskMarker=user".to_string());
    registry.save(&path).unwrap();
    assert_eq!(SymbolRegistry::load(&path).unwrap(), registry);
}
