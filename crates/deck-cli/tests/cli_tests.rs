use deck_cli::{run_apply, ApplyArgs, RegistryFile};
use deck_model::{CardId, CategoryId};
use deck_test_utils::{card_ids, two_category_snapshot};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const REGISTRY: &str = r#"{
    "cards": [
        { "id": "a", "defaultTitle": "Alpha" },
        { "id": "b", "defaultTitle": "Beta", "defaultCategory": "news" },
        { "id": "c", "defaultTitle": "Gamma" }
    ],
    "systemCategories": [
        { "id": "news", "name": "News", "icon": "News" }
    ]
}"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_registry_file_decodes() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "registry.json", REGISTRY);
    let (cards, categories) = RegistryFile::load(&path).unwrap().into_registries();

    assert_eq!(cards.len(), 3);
    assert_eq!(cards.default_title(&CardId::from("b")), Some("Beta"));
    assert!(categories.is_system(&CategoryId::from("news")));
}

#[test]
fn test_apply_script_and_save() {
    let dir = TempDir::new().unwrap();
    let registry = write(&dir, "registry.json", REGISTRY);
    let snapshot = write(
        &dir,
        "snapshot.json",
        r#"{
            "cardOrder": ["c", "a"],
            "categoryOrder": ["news"],
            "cardCategoryAssignment": { "a": "news" }
        }"#,
    );
    let script = write(
        &dir,
        "script.json",
        r#"[
            { "op": "create_category" },
            { "op": "move_card", "card": "c", "to": "custom-1", "index": 0 },
            { "op": "rename_category", "category": "custom-1", "name": "Picks" },
            { "op": "delete_category", "category": "news" }
        ]"#,
    );

    let outcome = run_apply(&ApplyArgs {
        registry,
        snapshot: Some(snapshot),
        script: Some(script),
        config: None,
    })
    .unwrap();

    assert_eq!(outcome.applied, 3);
    assert_eq!(outcome.rejected, 1);
    let saved = &outcome.saved;
    assert_eq!(
        saved.category_order.as_slice(),
        &[CategoryId::from("custom-1"), CategoryId::from("news")]
    );
    assert_eq!(saved.category_names[&CategoryId::from("custom-1")], "Picks");
    assert_eq!(
        saved.cards_in(&CategoryId::from("custom-1")),
        vec![CardId::from("c")]
    );
    // b was missing from the stored order and is appended
    assert_eq!(saved.card_order.len(), 3);
    assert_eq!(outcome.view.categories[0].name, "Picks");
}

#[test]
fn test_config_file_changes_defaults() {
    let dir = TempDir::new().unwrap();
    let registry = write(&dir, "registry.json", REGISTRY);
    let config = write(
        &dir,
        "deck.toml",
        "new_category_name = \"Group\"\ncustom_id_prefix = \"group-\"\n",
    );
    let script = write(&dir, "script.json", r#"[{ "op": "create_category" }]"#);

    let outcome = run_apply(&ApplyArgs {
        registry,
        snapshot: None,
        script: Some(script),
        config: Some(config),
    })
    .unwrap();

    let id = CategoryId::from("group-1");
    assert_eq!(outcome.saved.category_names[&id], "Group");
}

#[test]
fn test_malformed_script_is_reported() {
    let dir = TempDir::new().unwrap();
    let registry = write(&dir, "registry.json", REGISTRY);
    let script = write(&dir, "script.json", r#"[{ "op": "explode" }]"#);

    let err = run_apply(&ApplyArgs {
        registry,
        snapshot: None,
        script: Some(script),
        config: None,
    })
    .unwrap_err();
    assert!(format!("{err:#}").contains("parsing script"));
}

#[test]
fn test_apply_without_script_keeps_snapshot() {
    let dir = TempDir::new().unwrap();
    let registry = write(&dir, "registry.json", REGISTRY);
    let snapshot = write(
        &dir,
        "snapshot.json",
        &two_category_snapshot().to_json_pretty().unwrap(),
    );

    let outcome = run_apply(&ApplyArgs {
        registry: registry.clone(),
        snapshot: Some(snapshot),
        script: None,
        config: None,
    })
    .unwrap();

    assert_eq!(outcome.applied, 0);
    assert_eq!(
        outcome.saved.cards_in(&CategoryId::from("cat1")),
        card_ids(&["a", "b"])
    );
    let (cards, _) = RegistryFile::load(&registry).unwrap().into_registries();
    assert!(outcome.saved.check_invariants(&cards).is_ok());
}
