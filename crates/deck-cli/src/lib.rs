//! Deck CLI - scripted sessions and the simulator from the command line

#![warn(unreachable_pub)]
#![allow(missing_docs)]

use anyhow::{Context, Result};
use deck_engine::{EditorView, MutationOp, OrderingEngine};
use deck_model::{
    CardDefinition, CardRegistry, CategoryDefinition, CategoryId, CategoryRegistry, EngineConfig,
    Snapshot,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Registry file: known cards and system categories
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryFile {
    pub cards: Vec<CardDefinition>,
    #[serde(default)]
    pub system_categories: Vec<SystemCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SystemCategory {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub icon: String,
}

impl RegistryFile {
    /// Read and decode a registry file
    ///
    /// # Errors
    /// Fails when the file is unreadable or not valid JSON
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading registry {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing registry {}", path.display()))
    }

    #[must_use]
    pub fn into_registries(self) -> (CardRegistry, CategoryRegistry) {
        let cards = self.cards.into_iter().collect();
        let categories = CategoryRegistry::with_system(
            self.system_categories
                .into_iter()
                .map(|c| CategoryDefinition::system(c.id, c.name, c.icon)),
        );
        (cards, categories)
    }
}

/// Inputs of one scripted session
#[derive(Debug, Clone)]
pub struct ApplyArgs {
    pub registry: PathBuf,
    pub snapshot: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Result of a scripted session
#[derive(Debug, Clone)]
pub struct ApplyOutcome {
    pub saved: Snapshot,
    pub view: EditorView,
    pub applied: usize,
    pub rejected: usize,
}

/// Load a snapshot, run a script of operations, and save
///
/// Rejected operations are logged and skipped, the way an editor ignores
/// an invalid drop.
///
/// # Errors
/// Fails on unreadable or malformed input files and on a save that breaks
/// an invariant.
pub fn run_apply(args: &ApplyArgs) -> Result<ApplyOutcome> {
    let (cards, categories) = RegistryFile::load(&args.registry)?.into_registries();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let snapshot = match &args.snapshot {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading snapshot {}", path.display()))?;
            Snapshot::from_json(&raw)
                .with_context(|| format!("parsing snapshot {}", path.display()))?
        }
        None => Snapshot::new(),
    };

    let ops: Vec<MutationOp> = match &args.script {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading script {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing script {}", path.display()))?
        }
        None => Vec::new(),
    };

    let mut engine = OrderingEngine::load(snapshot, cards, categories, config);
    let mut applied = 0;
    let mut rejected = 0;
    for (step, op) in ops.into_iter().enumerate() {
        let name = op.name();
        match engine.apply(op) {
            Ok(_) => applied += 1,
            Err(e) if e.is_noop() => {
                tracing::warn!("Step {} ({}) rejected: {}", step, name, e);
                rejected += 1;
            }
            Err(e) => return Err(e).with_context(|| format!("step {step} ({name})")),
        }
    }

    let saved = engine.save().context("saving session")?;
    Ok(ApplyOutcome {
        saved,
        view: engine.project(),
        applied,
        rejected,
    })
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `default_level`.
pub fn init_tracing(default_level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("tracing already initialised: {e}");
    }
}
