use deck_engine::prelude::*;
use deck_test_utils::{card_ids, card_registry, system_categories, SnapshotBuilder};
use pretty_assertions::assert_eq;

fn load(snapshot: Snapshot, cards: &[&str]) -> OrderingEngine {
    OrderingEngine::load(
        snapshot,
        card_registry(cards),
        system_categories(),
        EngineConfig::default(),
    )
}

fn cat(id: &str) -> CategoryId {
    CategoryId::from(id)
}

fn visible(engine: &OrderingEngine, id: &str) -> bool {
    engine.snapshot().category_config.get(&cat(id)).visible
}

#[test]
fn test_drop_card_after_last_card_of_other_category() {
    let snap = SnapshotBuilder::new()
        .cards(&["a", "b", "c"])
        .categories(&["cat1", "cat2"])
        .assign("a", "cat1")
        .assign("b", "cat1")
        .assign("c", "cat2")
        .build();
    let mut engine = load(snap, &["a", "b", "c"]);

    engine.begin_card_drag(&CardId::from("b")).unwrap();
    let slot = DropZone::CardSlot {
        category: cat("cat2"),
        index: 1,
    };
    assert!(engine.drag_over(&slot));
    let changes = engine.drop_on(&slot).unwrap();

    assert_eq!(
        engine.snapshot().card_order.as_slice(),
        card_ids(&["a", "c", "b"]).as_slice()
    );
    assert_eq!(
        engine.snapshot().assignment.category_of(&CardId::from("b")),
        &cat("cat2")
    );
    assert!(changes.touches(Collection::CardOrder));
    assert!(changes.touches(Collection::Assignment));
    assert!(engine.altered().contains(&cat("cat1")));
    assert!(engine.altered().contains(&cat("cat2")));
    assert!(matches!(engine.drag_state(), DragState::Idle));
}

#[test]
fn test_drag_category_before_first() {
    let snap = SnapshotBuilder::new()
        .cards(&["a", "b"])
        .categories(&["cat1", "cat2"])
        .assign("a", "cat1")
        .assign("b", "cat2")
        .build();
    let mut engine = load(snap, &["a", "b"]);
    let order_before = engine.snapshot().card_order.clone();

    engine.begin_category_drag(&cat("cat2")).unwrap();
    let changes = engine
        .drop_on(&DropZone::CategoryHeader {
            category: cat("cat1"),
        })
        .unwrap();

    assert_eq!(
        engine.snapshot().category_order.as_slice(),
        &[cat("cat2"), cat("cat1")]
    );
    assert_eq!(engine.snapshot().card_order, order_before);
    assert!(changes.touches(Collection::CategoryOrder));
    assert!(!changes.touches(Collection::CardOrder));
}

#[test]
fn test_delete_category_releases_cards() {
    let snap = SnapshotBuilder::new()
        .cards(&["a", "b", "c"])
        .categories(&["cat1", "cat2"])
        .assign("a", "cat1")
        .assign("b", "cat1")
        .assign("c", "cat2")
        .build();
    let mut engine = load(snap, &["a", "b", "c"]);

    engine
        .apply(MutationOp::DeleteCategory {
            category: cat("cat1"),
        })
        .unwrap();

    let snap = engine.snapshot();
    assert_eq!(snap.category_order.as_slice(), &[cat("cat2")]);
    for card in ["a", "b"] {
        assert!(snap.assignment.category_of(&CardId::from(card)).is_available());
    }
    assert_eq!(
        snap.cards_in(&CategoryId::available()),
        card_ids(&["a", "b"])
    );
}

#[test]
fn test_created_category_is_not_auto_hidden() {
    let mut engine = load(SnapshotBuilder::new().cards(&["a"]).build(), &["a"]);

    let id = engine
        .apply(MutationOp::CreateCategory)
        .unwrap()
        .added
        .unwrap();
    assert_eq!(id, cat("custom-1"));
    assert!(engine.snapshot().cards_in(&id).is_empty());
    assert!(visible(&engine, "custom-1"));

    // later passes still leave it alone
    engine
        .apply(MutationOp::ToggleCardVisible {
            card: CardId::from("a"),
        })
        .unwrap();
    assert!(visible(&engine, "custom-1"));
    assert!(engine.save().unwrap().category_order.contains(&id));
}

#[test]
fn test_category_emptied_by_move_stays_visible() {
    let snap = SnapshotBuilder::new()
        .cards(&["a", "b"])
        .categories(&["cat3"])
        .assign("a", "cat3")
        .build();
    let mut engine = load(snap, &["a", "b"]);
    assert!(visible(&engine, "cat3"));

    engine
        .apply(MutationOp::MoveCard {
            card: CardId::from("a"),
            to: CategoryId::available(),
            index: 0,
        })
        .unwrap();

    assert!(engine.snapshot().cards_in(&cat("cat3")).is_empty());
    assert!(visible(&engine, "cat3"));
    assert!(engine.save().unwrap().category_order.contains(&cat("cat3")));
}

#[test]
fn test_created_populated_emptied_category_stays() {
    let mut engine = load(SnapshotBuilder::new().cards(&["a"]).build(), &["a"]);
    let id = engine
        .apply(MutationOp::CreateCategory)
        .unwrap()
        .added
        .unwrap();

    let card = CardId::from("a");
    engine
        .apply(MutationOp::MoveCard {
            card: card.clone(),
            to: id.clone(),
            index: 0,
        })
        .unwrap();
    engine
        .apply(MutationOp::MoveCard {
            card,
            to: CategoryId::available(),
            index: 0,
        })
        .unwrap();

    assert!(engine.snapshot().cards_in(&id).is_empty());
    assert!(engine.snapshot().category_config.get(&id).visible);
    assert!(engine.save().unwrap().category_order.contains(&id));
}

#[test]
fn test_untouched_empty_category_is_hidden_then_pruned() {
    let snap = SnapshotBuilder::new()
        .cards(&["a", "b"])
        .categories(&["cat1", "idle"])
        .name("idle", "Idle")
        .assign("a", "cat1")
        .build();
    let mut engine = load(snap, &["a", "b"]);
    assert!(!visible(&engine, "idle"));
    assert!(visible(&engine, "cat1"));

    // cards routed elsewhere do not count as touching it
    engine
        .apply(MutationOp::MoveCard {
            card: CardId::from("b"),
            to: cat("cat1"),
            index: 0,
        })
        .unwrap();
    assert!(!engine.altered().contains(&cat("idle")));

    let saved = engine.save().unwrap();
    assert!(!saved.category_order.contains(&cat("idle")));
    assert!(!saved.category_names.contains_key(&cat("idle")));
    assert!(!saved.category_config.contains(&cat("idle")));
    // the working copy keeps it until the session ends
    assert!(engine.snapshot().category_order.contains(&cat("idle")));
}

#[test]
fn test_empty_category_saved_in_one_session_is_pruned_by_the_next() {
    // first session: create a category and save it while still empty
    let mut first = load(SnapshotBuilder::new().cards(&["a"]).build(), &["a"]);
    let id = first
        .apply(MutationOp::CreateCategory)
        .unwrap()
        .added
        .unwrap();
    let saved = first.save().unwrap();
    assert!(saved.category_order.contains(&id));
    assert!(saved.category_config.get(&id).visible);

    // altered does not persist: the next session sees an untouched empty category
    let mut second = load(saved, &["a"]);
    assert!(!second.altered().contains(&id));
    assert!(!second.snapshot().category_config.get(&id).visible);

    let resaved = second.save().unwrap();
    assert!(!resaved.category_order.contains(&id));
    assert!(!resaved.category_names.contains_key(&id));
}

#[test]
fn test_moved_in_then_out_stays_altered() {
    let snap = SnapshotBuilder::new()
        .cards(&["a"])
        .categories(&["idle"])
        .build();
    let mut engine = load(snap, &["a"]);
    assert!(!visible(&engine, "idle"));

    let card = CardId::from("a");
    engine
        .apply(MutationOp::MoveCard {
            card: card.clone(),
            to: cat("idle"),
            index: 0,
        })
        .unwrap();
    engine
        .apply(MutationOp::MoveCard {
            card,
            to: CategoryId::available(),
            index: 0,
        })
        .unwrap();

    // the hidden flag set at load is not reverted, but the category is kept
    assert!(engine.altered().contains(&cat("idle")));
    assert!(engine.save().unwrap().category_order.contains(&cat("idle")));
}

#[test]
fn test_system_category_tolerates_emptiness() {
    let snap = SnapshotBuilder::new()
        .cards(&["a"])
        .categories(&["news", "tools"])
        .build();
    let engine = load(snap, &["a"]);
    assert!(visible(&engine, "news"));
    assert!(visible(&engine, "tools"));
    let saved = engine.save().unwrap();
    assert_eq!(
        saved.category_order.as_slice(),
        &[cat("news"), cat("tools")]
    );
}

#[test]
fn test_card_dropped_on_header_appends() {
    let snap = SnapshotBuilder::new()
        .cards(&["a", "b", "c"])
        .categories(&["cat1"])
        .assign("a", "cat1")
        .assign("b", "cat1")
        .build();
    let mut engine = load(snap, &["a", "b", "c"]);

    engine.begin_card_drag(&CardId::from("c")).unwrap();
    engine
        .drop_on(&DropZone::CategoryHeader {
            category: cat("cat1"),
        })
        .unwrap();
    assert_eq!(engine.cards_in(&cat("cat1")), card_ids(&["a", "b", "c"]));

    engine.begin_card_drag(&CardId::from("a")).unwrap();
    engine.drop_on(&DropZone::AvailableArea).unwrap();
    assert_eq!(engine.cards_in(&CategoryId::available()), card_ids(&["a"]));
}

#[test]
fn test_missing_cards_appended_on_load() {
    let snap = SnapshotBuilder::new().cards(&["b"]).build();
    let engine = load(snap, &["a", "b", "c"]);
    assert_eq!(
        engine.snapshot().card_order.as_slice(),
        card_ids(&["b", "a", "c"]).as_slice()
    );
    assert!(engine
        .snapshot()
        .check_invariants(engine.cards())
        .is_ok());
}
