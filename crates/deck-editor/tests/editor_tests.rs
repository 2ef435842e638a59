use deck_editor::{DialogEditor, LiveHost, PropertyPaneEditor, SaveHost};
use deck_engine::{DropZone, MutationOp};
use deck_model::{
    AssignmentMap, CardId, CategoryConfigStore, CategoryId, CategoryOrder, EngineConfig,
    OrderStore, Snapshot,
};
use deck_test_utils::{card_ids, card_registry, system_categories, two_category_snapshot};
use pretty_assertions::assert_eq;

/// Records every callback as a short line
#[derive(Debug, Default)]
struct RecordingHost {
    events: Vec<String>,
    saved: Vec<Snapshot>,
}

impl RecordingHost {
    fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.events)
    }
}

impl SaveHost for RecordingHost {
    fn on_save(&mut self, snapshot: Snapshot) {
        self.events.push("save".to_string());
        self.saved.push(snapshot);
    }
}

impl LiveHost for RecordingHost {
    fn on_order_changed(&mut self, order: &OrderStore) {
        let ids: Vec<&str> = order.iter().map(CardId::as_str).collect();
        self.events.push(format!("order {}", ids.join(",")));
    }

    fn on_category_name_changed(&mut self, category: &CategoryId, name: &str) {
        self.events.push(format!("name {category}={name}"));
    }

    fn on_category_order_changed(&mut self, order: &CategoryOrder) {
        let ids: Vec<&str> = order.iter().map(CategoryId::as_str).collect();
        self.events.push(format!("categories {}", ids.join(",")));
    }

    fn on_category_config_changed(&mut self, _config: &CategoryConfigStore) {
        self.events.push("config".to_string());
    }

    fn on_card_category_changed(&mut self, _assignment: &AssignmentMap) {
        self.events.push("assignment".to_string());
    }

    fn on_category_added(&mut self, category: &CategoryId) {
        self.events.push(format!("added {category}"));
    }

    fn on_category_deleted(&mut self, category: &CategoryId) {
        self.events.push(format!("deleted {category}"));
    }
}

fn pane() -> PropertyPaneEditor<RecordingHost> {
    PropertyPaneEditor::open(
        two_category_snapshot(),
        card_registry(&["a", "b", "c"]),
        system_categories(),
        EngineConfig::default(),
        RecordingHost::default(),
    )
}

#[test]
fn test_pane_reports_card_move() {
    let mut pane = pane();

    pane.begin_card_drag(&CardId::from("b")).unwrap();
    pane.drop_on(&DropZone::CardSlot {
        category: CategoryId::from("cat2"),
        index: 1,
    })
    .unwrap();

    let mut host = pane.close();
    assert_eq!(host.take(), vec!["order a,c,b", "assignment"]);
}

#[test]
fn test_pane_reports_create_then_rename() {
    let mut pane = pane();
    pane.apply(MutationOp::CreateCategory).unwrap();
    pane.apply(MutationOp::RenameCategory {
        category: CategoryId::from("custom-1"),
        name: "Reports".to_string(),
    })
    .unwrap();

    let mut host = pane.close();
    assert_eq!(
        host.take(),
        vec![
            "added custom-1",
            "categories custom-1,cat1,cat2",
            "config",
            "name custom-1=New Category",
            "name custom-1=Reports",
        ]
    );
}

#[test]
fn test_pane_reports_delete() {
    let mut pane = pane();
    pane.apply(MutationOp::DeleteCategory {
        category: CategoryId::from("cat1"),
    })
    .unwrap();

    let mut host = pane.close();
    let events = host.take();
    assert_eq!(events[0], "deleted cat1");
    assert!(events.contains(&"assignment".to_string()));
    assert!(events.contains(&"categories cat2".to_string()));
}

#[test]
fn test_pane_is_silent_on_noop_and_rejection() {
    let mut pane = pane();
    pane.apply(MutationOp::MoveCard {
        card: CardId::from("a"),
        to: CategoryId::from("cat1"),
        index: 0,
    })
    .unwrap();
    assert!(pane
        .apply(MutationOp::DeleteCategory {
            category: CategoryId::available(),
        })
        .is_err());
    pane.apply(MutationOp::ToggleCollapsed {
        category: CategoryId::from("cat1"),
    })
    .unwrap();

    assert!(pane.host().events.is_empty());
}

#[test]
fn test_dialog_batches_until_save() {
    let mut dialog = DialogEditor::open(
        two_category_snapshot(),
        card_registry(&["a", "b", "c"]),
        system_categories(),
        EngineConfig::default(),
        RecordingHost::default(),
    );
    dialog
        .apply(MutationOp::MoveCard {
            card: CardId::from("c"),
            to: CategoryId::from("cat1"),
            index: 0,
        })
        .unwrap();
    dialog
        .apply(MutationOp::MoveCategory {
            category: CategoryId::from("cat2"),
            to_index: 0,
        })
        .unwrap();

    let host = dialog.save().unwrap();
    assert_eq!(host.events, vec!["save"]);
    let saved = &host.saved[0];
    assert_eq!(
        saved.cards_in(&CategoryId::from("cat1")),
        card_ids(&["c", "a", "b"])
    );
    assert_eq!(
        saved.category_order.as_slice(),
        &[CategoryId::from("cat2"), CategoryId::from("cat1")]
    );
}

#[test]
fn test_dialog_renders_from_projection() {
    let dialog = DialogEditor::open(
        Snapshot::new(),
        card_registry(&["a", "b"]),
        system_categories(),
        EngineConfig::default(),
        RecordingHost::default(),
    );
    let view = dialog.view();
    let names: Vec<&str> = view.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["News", "Tools"]);
    assert_eq!(view.available.cards.len(), 2);
    assert!(dialog.cancel().events.is_empty());
}
