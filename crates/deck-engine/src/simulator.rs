//! Randomised session simulator
//!
//! Drives many editing sessions with seeded random operations, checking
//! every invariant after each step. Operations come in three flavours:
//! valid ones built from the current state, edge cases (out-of-range
//! indices, drops in place, hidden targets) and invalid ones that must be
//! rejected without touching the session.

use crate::drag::{DragState, DropZone};
use crate::op::MutationOp;
use crate::session::OrderingEngine;
use crate::visibility;
use deck_model::{
    CardDefinition, CardId, CardRegistry, CategoryDefinition, CategoryId, CategoryRegistry,
    EngineConfig, Snapshot,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Simulator configuration
#[derive(Debug, Clone, Serialize)]
pub struct SimulatorConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Independent editing sessions
    pub sessions: u32,
    /// Steps per session
    pub ops_per_session: u32,
    /// Cards in the registry
    pub cards: usize,
    /// System categories in the registry
    pub system_categories: usize,
    /// Distribution of operation kinds
    pub operation_distribution: OperationDistribution,
    /// Stop at the first violation
    pub stop_on_first_violation: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            sessions: 20,
            ops_per_session: 200,
            cards: 12,
            system_categories: 3,
            operation_distribution: OperationDistribution::default(),
            stop_on_first_violation: true,
        }
    }
}

/// Probability distribution for operation generation
#[derive(Debug, Clone, Serialize)]
pub struct OperationDistribution {
    /// Valid operations
    pub valid_ops: f64,
    /// Boundary values and drops in place
    pub edge_cases: f64,
    /// Operations that must be rejected
    pub invalid_ops: f64,
}

impl Default for OperationDistribution {
    fn default() -> Self {
        Self {
            valid_ops: 0.70,
            edge_cases: 0.20,
            invalid_ops: 0.10,
        }
    }
}

/// How a simulated drag ends
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DragEnd {
    /// Drop on a zone
    Drop(DropZone),
    /// Escape or pointer left the editor
    Cancel,
}

/// What is picked up at the start of a simulated drag
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DragSubject {
    /// A card
    Card(CardId),
    /// A category handle
    Category(CategoryId),
}

/// One simulated step
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulatedOperation {
    /// Apply an operation directly (panel buttons, text fields)
    Apply(MutationOp),
    /// Full pointer sequence: pick up, hover, finish
    Drag {
        /// Picked-up item
        subject: DragSubject,
        /// Zones hovered before the end
        hovers: Vec<DropZone>,
        /// How the drag ends
        end: DragEnd,
    },
}

impl SimulatedOperation {
    fn name(&self) -> &'static str {
        match self {
            Self::Apply(op) => op.name(),
            Self::Drag {
                subject: DragSubject::Card(_),
                ..
            } => "drag_card",
            Self::Drag {
                subject: DragSubject::Category(_),
                ..
            } => "drag_category",
        }
    }
}

/// Expected result classification for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedResult {
    /// Must be accepted
    ShouldSucceed,
    /// Must be rejected with state untouched
    ShouldFail,
}

/// A violation detected during simulation
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Operation outcome didn't match expectation
    UnexpectedOutcome {
        /// Session number
        session: u32,
        /// Step within the session
        step: u32,
        /// Offending operation
        operation: SimulatedOperation,
        /// Expected outcome
        expected: ExpectedResult,
        /// Observed outcome
        actual: Result<String, String>,
    },
    /// A rejected operation changed the snapshot
    RejectedButChanged {
        /// Session number
        session: u32,
        /// Step within the session
        step: u32,
        /// Offending operation
        operation: SimulatedOperation,
    },
    /// Snapshot invariants broke
    Invariant {
        /// Session number
        session: u32,
        /// Step within the session
        step: u32,
        /// Rendered violations
        details: Vec<String>,
    },
    /// Drag sequence ended with the coordinator not idle
    DragLeftActive {
        /// Session number
        session: u32,
        /// Step within the session
        step: u32,
        /// State left behind
        state: String,
    },
    /// Reloading a saved snapshot changed it
    RoundTrip {
        /// Session number
        session: u32,
        /// What differed
        details: String,
    },
}

/// Statistics collected during simulation
#[derive(Debug, Clone, Default, Serialize)]
pub struct OperationStats {
    /// Steps executed
    pub total_operations: u64,
    /// Accepted steps
    pub successful_operations: u64,
    /// Rejected steps
    pub failed_operations: u64,
    /// Steps per operation name
    pub operations_by_type: BTreeMap<String, u64>,
}

impl OperationStats {
    fn record(&mut self, operation: &SimulatedOperation, result: &Result<String, String>) {
        self.total_operations += 1;
        *self
            .operations_by_type
            .entry(operation.name().to_string())
            .or_insert(0) += 1;
        match result {
            Ok(_) => self.successful_operations += 1,
            Err(_) => self.failed_operations += 1,
        }
    }
}

/// Final report from the simulator
#[derive(Debug, Clone, Serialize)]
pub struct SimulatorReport {
    /// Configuration that produced the run
    pub config: SimulatorConfig,
    /// Operation statistics
    pub stats: OperationStats,
    /// Detected violations
    pub violations: Vec<Violation>,
    /// Sessions completed
    pub sessions_run: u32,
}

impl SimulatorReport {
    /// Check if simulation passed all criteria
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Generate a text report
    #[must_use]
    pub fn generate_text(&self) -> String {
        let mut report = String::new();

        let _ = writeln!(report, "=== Deck Simulator Report ===\n");
        let _ = writeln!(report, "Seed: {}", self.config.seed);
        let _ = writeln!(report, "Sessions: {}", self.sessions_run);
        let _ = writeln!(report, "Total Operations: {}", self.stats.total_operations);
        let _ = writeln!(report, "Successful: {}", self.stats.successful_operations);
        let _ = writeln!(report, "Rejected: {}", self.stats.failed_operations);
        let _ = writeln!(report, "Violations: {}", self.violations.len());

        if !self.stats.operations_by_type.is_empty() {
            let _ = writeln!(report, "\n=== Operations ===");
            for (name, count) in &self.stats.operations_by_type {
                let _ = writeln!(report, "{name}: {count}");
            }
        }

        if !self.violations.is_empty() {
            let _ = writeln!(report, "\n=== Violations ===");
            for (i, v) in self.violations.iter().enumerate() {
                let _ = writeln!(report, "{}. {:?}", i + 1, v);
            }
        }

        let _ = writeln!(
            report,
            "\n=== Result: {} ===",
            if self.passed() { "PASS" } else { "FAIL" }
        );
        report
    }
}

/// Card registry used by simulated sessions
#[must_use]
pub fn simulated_cards(count: usize) -> CardRegistry {
    (0..count)
        .map(|i| CardDefinition::new(format!("card-{i}"), format!("Card {i}")))
        .collect()
}

/// Category registry used by simulated sessions
#[must_use]
pub fn simulated_categories(count: usize) -> CategoryRegistry {
    CategoryRegistry::with_system((0..count).map(|i| {
        CategoryDefinition::system(format!("system-{i}"), format!("System {i}"), "Folder")
    }))
}

/// Run the simulator
#[must_use]
pub fn run_simulator(config: SimulatorConfig) -> SimulatorReport {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut stats = OperationStats::default();
    let mut violations = Vec::new();
    let mut sessions_run = 0;

    'sessions: for session in 0..config.sessions {
        let cards = simulated_cards(config.cards);
        let categories = simulated_categories(config.system_categories);
        let start = random_snapshot(&mut rng, &cards, &categories);
        let mut engine =
            OrderingEngine::load(start, cards, categories.clone(), EngineConfig::default());
        sessions_run += 1;

        for step in 0..config.ops_per_session {
            let (operation, expected) =
                generate_operation(&mut rng, &config.operation_distribution, &engine);
            let before = engine.snapshot().clone();
            let actual = execute_operation(&mut engine, &operation);

            let outcome_matches = matches!(
                (expected, &actual),
                (ExpectedResult::ShouldSucceed, Ok(_)) | (ExpectedResult::ShouldFail, Err(_))
            );
            let mut failed = false;
            if !outcome_matches {
                violations.push(Violation::UnexpectedOutcome {
                    session,
                    step,
                    operation: operation.clone(),
                    expected,
                    actual: actual.clone(),
                });
                failed = true;
            }
            if actual.is_err() && *engine.snapshot() != before {
                violations.push(Violation::RejectedButChanged {
                    session,
                    step,
                    operation: operation.clone(),
                });
                failed = true;
            }
            let broken = engine.snapshot().violations(engine.cards());
            if !broken.is_empty() {
                violations.push(Violation::Invariant {
                    session,
                    step,
                    details: broken.iter().map(ToString::to_string).collect(),
                });
                failed = true;
            }
            if matches!(operation, SimulatedOperation::Drag { .. })
                && !matches!(engine.drag_state(), DragState::Idle)
            {
                violations.push(Violation::DragLeftActive {
                    session,
                    step,
                    state: engine.drag_state().name().to_string(),
                });
                failed = true;
            }

            stats.record(&operation, &actual);
            if failed && config.stop_on_first_violation {
                break 'sessions;
            }
        }

        if let Some(details) = check_round_trip(&engine, &categories) {
            violations.push(Violation::RoundTrip { session, details });
            if config.stop_on_first_violation {
                break;
            }
        }
    }

    tracing::info!(
        "Simulated {} sessions, {} operations, {} violations",
        sessions_run,
        stats.total_operations,
        violations.len()
    );

    SimulatorReport {
        config,
        stats,
        violations,
        sessions_run,
    }
}

/// Save, reload with fresh session state, and compare
fn check_round_trip(engine: &OrderingEngine, system: &CategoryRegistry) -> Option<String> {
    let saved = match engine.save() {
        Ok(saved) => saved,
        Err(e) => return Some(format!("save failed: {e}")),
    };
    let reloaded = OrderingEngine::load(
        saved.clone(),
        engine.cards().clone(),
        system.clone(),
        engine.config().clone(),
    );
    let again = reloaded.snapshot();

    if again.card_order != saved.card_order {
        return Some("card order changed".to_string());
    }
    if again.assignment != saved.assignment {
        return Some("assignment changed".to_string());
    }
    if again.category_order != saved.category_order {
        return Some("category order changed".to_string());
    }
    // Empty custom categories kept because they were touched get hidden on
    // reload, since the fresh session has no record of the touch.
    let has_hideable = saved.category_order.iter().any(|c| {
        visibility::is_eligible(&saved, reloaded.altered(), reloaded.categories(), c)
    });
    if !has_hideable && *again != saved {
        return Some("display metadata changed".to_string());
    }
    None
}

fn random_snapshot(
    rng: &mut StdRng,
    cards: &CardRegistry,
    categories: &CategoryRegistry,
) -> Snapshot {
    let mut snap = Snapshot::new();
    let mut ordered: Vec<CategoryId> = categories.system_ids().cloned().collect();
    for i in 0..rng.random_range(0..3) {
        let id = CategoryId::new(format!("custom-{}", i + 1));
        snap.category_names
            .insert(id.clone(), format!("Custom {}", i + 1));
        ordered.push(id);
    }
    shuffle(rng, &mut ordered);
    snap.category_order = ordered.iter().cloned().collect();

    let mut order: Vec<CardId> = cards.ids().cloned().collect();
    shuffle(rng, &mut order);
    for card in &order {
        if !ordered.is_empty() && rng.random_bool(0.7) {
            let category = ordered[rng.random_range(0..ordered.len())].clone();
            snap.assignment.assign(card.clone(), category);
        } else {
            snap.assignment
                .assign(card.clone(), CategoryId::available());
        }
    }
    snap.card_order = order.into_iter().collect();
    snap
}

fn shuffle<T>(rng: &mut StdRng, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

fn pick<'a, T>(rng: &mut StdRng, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        Some(&items[rng.random_range(0..items.len())])
    }
}

/// Uniform pick from a non-empty slice
fn choose<T: Clone>(rng: &mut StdRng, items: &[T]) -> T {
    items[rng.random_range(0..items.len())].clone()
}

/// Targets a card may be dropped into: ordered categories plus `available`
fn card_targets(engine: &OrderingEngine) -> Vec<CategoryId> {
    engine
        .snapshot()
        .category_order
        .iter()
        .cloned()
        .chain(std::iter::once(CategoryId::available()))
        .collect()
}

fn custom_categories(engine: &OrderingEngine) -> Vec<CategoryId> {
    engine
        .snapshot()
        .category_order
        .iter()
        .filter(|c| !engine.categories().is_system(c))
        .cloned()
        .collect()
}

fn zone_for(category: CategoryId, index: Option<usize>) -> DropZone {
    match (category.is_available(), index) {
        (_, Some(index)) => DropZone::CardSlot { category, index },
        (true, None) => DropZone::AvailableArea,
        (false, None) => DropZone::CategoryHeader { category },
    }
}

fn generate_operation(
    rng: &mut StdRng,
    distribution: &OperationDistribution,
    engine: &OrderingEngine,
) -> (SimulatedOperation, ExpectedResult) {
    let r: f64 = rng.random();

    if r < distribution.valid_ops {
        (generate_valid_operation(rng, engine), ExpectedResult::ShouldSucceed)
    } else if r < distribution.valid_ops + distribution.edge_cases {
        generate_edge_case_operation(rng, engine)
    } else {
        (generate_invalid_operation(rng, engine), ExpectedResult::ShouldFail)
    }
}

fn generate_valid_operation(rng: &mut StdRng, engine: &OrderingEngine) -> SimulatedOperation {
    let snap = engine.snapshot();
    let cards: Vec<CardId> = snap.card_order.iter().cloned().collect();
    let targets = card_targets(engine);
    let ordered: Vec<CategoryId> = snap.category_order.iter().cloned().collect();
    let customs = custom_categories(engine);

    match rng.random_range(0..10) {
        0..=2 => {
            let Some(card) = pick(rng, &cards).cloned() else {
                return SimulatedOperation::Apply(MutationOp::CreateCategory);
            };
            let category = pick(rng, &targets)
                .cloned()
                .unwrap_or_else(CategoryId::available);
            let len = snap.cards_in(&category).len();
            let index = rng.random_range(0..=len);
            let hovers = (0..rng.random_range(0..3))
                .filter_map(|_| pick(rng, &targets).cloned())
                .map(|c| zone_for(c, None))
                .collect();
            let end = if rng.random_bool(0.9) {
                let zone = if rng.random_bool(0.5) {
                    zone_for(category, Some(index))
                } else {
                    zone_for(category, None)
                };
                DragEnd::Drop(zone)
            } else {
                DragEnd::Cancel
            };
            SimulatedOperation::Drag {
                subject: DragSubject::Card(card),
                hovers,
                end,
            }
        }
        3 if !ordered.is_empty() => {
            let category = choose(rng, &ordered);
            let target = if rng.random_bool(0.2) {
                DropZone::AvailableArea
            } else {
                zone_for(choose(rng, &ordered), None)
            };
            SimulatedOperation::Drag {
                subject: DragSubject::Category(category),
                hovers: vec![target.clone()],
                end: DragEnd::Drop(target),
            }
        }
        4 => SimulatedOperation::Apply(MutationOp::CreateCategory),
        5 if !customs.is_empty() => {
            let category = choose(rng, &customs);
            if rng.random_bool(0.5) {
                SimulatedOperation::Apply(MutationOp::DeleteCategory { category })
            } else {
                SimulatedOperation::Apply(MutationOp::RenameCategory {
                    category,
                    name: format!("Renamed {}", rng.random_range(0..100)),
                })
            }
        }
        6 => {
            let category = pick(rng, &targets)
                .cloned()
                .unwrap_or_else(CategoryId::available);
            if rng.random_bool(0.5) {
                SimulatedOperation::Apply(MutationOp::ToggleCategoryVisible { category })
            } else {
                SimulatedOperation::Apply(MutationOp::ToggleCategoryTitle { category })
            }
        }
        7 if !cards.is_empty() => {
            let card = choose(rng, &cards);
            SimulatedOperation::Apply(MutationOp::ToggleCardVisible { card })
        }
        8 if !cards.is_empty() => {
            let card = choose(rng, &cards);
            let title = rng
                .random_bool(0.7)
                .then(|| format!("Title {}", rng.random_range(0..100)));
            SimulatedOperation::Apply(MutationOp::SetCardTitle { card, title })
        }
        _ => {
            let category = pick(rng, &targets)
                .cloned()
                .unwrap_or_else(CategoryId::available);
            SimulatedOperation::Apply(MutationOp::ToggleCollapsed { category })
        }
    }
}

fn generate_edge_case_operation(
    rng: &mut StdRng,
    engine: &OrderingEngine,
) -> (SimulatedOperation, ExpectedResult) {
    let snap = engine.snapshot();
    let cards: Vec<CardId> = snap.card_order.iter().cloned().collect();
    let targets = card_targets(engine);

    let op = match rng.random_range(0..4) {
        // far past the end of the target
        0 if !cards.is_empty() => {
            let card = choose(rng, &cards);
            let to = pick(rng, &targets)
                .cloned()
                .unwrap_or_else(CategoryId::available);
            SimulatedOperation::Apply(MutationOp::MoveCard {
                card,
                to,
                index: rng.random_range(50..usize::from(u16::MAX)),
            })
        }
        // drop exactly where the card already is
        1 if !cards.is_empty() => {
            let card = choose(rng, &cards);
            let category = snap.assignment.category_of(&card).clone();
            let index = crate::partition::local_index(&snap.card_order, &snap.assignment, &card)
                .unwrap_or_default();
            SimulatedOperation::Drag {
                subject: DragSubject::Card(card),
                hovers: Vec::new(),
                end: DragEnd::Drop(zone_for(category, Some(index))),
            }
        }
        // category dropped on itself
        2 if !snap.category_order.is_empty() => {
            let ordered: Vec<CategoryId> = snap.category_order.iter().cloned().collect();
            let category = choose(rng, &ordered);
            SimulatedOperation::Drag {
                subject: DragSubject::Category(category.clone()),
                hovers: vec![zone_for(category.clone(), None)],
                end: DragEnd::Drop(zone_for(category, None)),
            }
        }
        _ => SimulatedOperation::Apply(MutationOp::MoveCategory {
            category: snap
                .category_order
                .iter()
                .next()
                .cloned()
                .unwrap_or_else(|| CategoryId::new("missing")),
            to_index: usize::MAX,
        }),
    };

    let expected = match &op {
        SimulatedOperation::Apply(MutationOp::MoveCategory { category, .. })
            if !snap.category_order.contains(category) =>
        {
            ExpectedResult::ShouldFail
        }
        _ => ExpectedResult::ShouldSucceed,
    };
    (op, expected)
}

fn generate_invalid_operation(rng: &mut StdRng, engine: &OrderingEngine) -> SimulatedOperation {
    let ghost_card = CardId::new(format!("ghost-{}", rng.random_range(0..1000)));
    let ghost_category = CategoryId::new(format!("ghost-{}", rng.random_range(0..1000)));
    let system: Vec<CategoryId> = engine.categories().system_ids().cloned().collect();

    match rng.random_range(0..7) {
        0 => SimulatedOperation::Apply(MutationOp::MoveCard {
            card: ghost_card,
            to: CategoryId::available(),
            index: 0,
        }),
        1 => {
            let card = engine
                .snapshot()
                .card_order
                .iter()
                .next()
                .cloned()
                .unwrap_or(ghost_card);
            SimulatedOperation::Apply(MutationOp::MoveCard {
                card,
                to: ghost_category,
                index: 0,
            })
        }
        2 => SimulatedOperation::Apply(MutationOp::DeleteCategory {
            category: CategoryId::available(),
        }),
        3 if !system.is_empty() => SimulatedOperation::Apply(MutationOp::DeleteCategory {
            category: choose(rng, &system),
        }),
        4 if !system.is_empty() => SimulatedOperation::Apply(MutationOp::RenameCategory {
            category: choose(rng, &system),
            name: "Hijacked".to_string(),
        }),
        5 => SimulatedOperation::Drag {
            subject: DragSubject::Card(ghost_card),
            hovers: Vec::new(),
            end: DragEnd::Drop(DropZone::AvailableArea),
        },
        _ => SimulatedOperation::Apply(MutationOp::ToggleCategoryVisible {
            category: ghost_category,
        }),
    }
}

fn execute_operation(
    engine: &mut OrderingEngine,
    operation: &SimulatedOperation,
) -> Result<String, String> {
    match operation {
        SimulatedOperation::Apply(op) => engine
            .apply(op.clone())
            .map(|changes| format!("{:?}", changes.collections().collect::<Vec<_>>()))
            .map_err(|e| e.to_string()),
        SimulatedOperation::Drag {
            subject,
            hovers,
            end,
        } => {
            let started = match subject {
                DragSubject::Card(card) => engine.begin_card_drag(card),
                DragSubject::Category(category) => engine.begin_category_drag(category),
            };
            started.map_err(|e| e.to_string())?;
            for zone in hovers {
                engine.drag_over(zone);
            }
            match end {
                DragEnd::Drop(zone) => engine
                    .drop_on(zone)
                    .map(|changes| format!("{:?}", changes.collections().collect::<Vec<_>>()))
                    .map_err(|e| e.to_string()),
                DragEnd::Cancel => {
                    engine.end_drag();
                    Ok("cancelled".to_string())
                }
            }
        }
    }
}
