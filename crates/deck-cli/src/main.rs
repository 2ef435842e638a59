//! `deck` binary

use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, Command};
use deck_cli::{init_tracing, run_apply, ApplyArgs};
use deck_engine::{run_simulator, SimulatorConfig};
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("deck")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Card & category ordering engine for dashboard editors")
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("simulate")
                .about("Run randomised editing sessions and check every invariant")
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .default_value("42")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for reproducibility"),
                )
                .arg(
                    Arg::new("sessions")
                        .long("sessions")
                        .default_value("20")
                        .value_parser(value_parser!(u32))
                        .help("Number of editing sessions"),
                )
                .arg(
                    Arg::new("ops")
                        .long("ops")
                        .default_value("200")
                        .value_parser(value_parser!(u32))
                        .help("Operations per session"),
                )
                .arg(
                    Arg::new("cards")
                        .long("cards")
                        .default_value("12")
                        .value_parser(value_parser!(usize))
                        .help("Cards in the simulated registry"),
                )
                .arg(
                    Arg::new("keep-going")
                        .long("keep-going")
                        .action(ArgAction::SetTrue)
                        .help("Continue after the first violation"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the report as JSON"),
                ),
        )
        .subcommand(
            Command::new("apply")
                .about("Load a snapshot, apply a script of operations, print the saved snapshot")
                .arg(
                    Arg::new("registry")
                        .long("registry")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON file with cards and system categories"),
                )
                .arg(
                    Arg::new("snapshot")
                        .long("snapshot")
                        .value_parser(value_parser!(PathBuf))
                        .help("Snapshot JSON to start from (empty when omitted)"),
                )
                .arg(
                    Arg::new("script")
                        .long("script")
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON array of operations"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("Engine configuration TOML"),
                )
                .arg(
                    Arg::new("view")
                        .long("view")
                        .action(ArgAction::SetTrue)
                        .help("Print the render projection instead of the snapshot"),
                ),
        )
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing("info", matches.get_flag("log-json"));

    match matches.subcommand() {
        Some(("simulate", args)) => {
            let config = SimulatorConfig {
                seed: args.get_one::<u64>("seed").copied().unwrap_or(42),
                sessions: args.get_one::<u32>("sessions").copied().unwrap_or(20),
                ops_per_session: args.get_one::<u32>("ops").copied().unwrap_or(200),
                cards: args.get_one::<usize>("cards").copied().unwrap_or(12),
                stop_on_first_violation: !args.get_flag("keep-going"),
                ..SimulatorConfig::default()
            };

            let report = run_simulator(config);
            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.generate_text());
            }
            std::process::exit(if report.passed() { 0 } else { 1 });
        }
        Some(("apply", args)) => {
            let apply = ApplyArgs {
                registry: args
                    .get_one::<PathBuf>("registry")
                    .cloned()
                    .unwrap_or_default(),
                snapshot: args.get_one::<PathBuf>("snapshot").cloned(),
                script: args.get_one::<PathBuf>("script").cloned(),
                config: args.get_one::<PathBuf>("config").cloned(),
            };
            let outcome = run_apply(&apply)?;
            tracing::info!(
                "Applied {} operation(s), rejected {}",
                outcome.applied,
                outcome.rejected
            );
            if args.get_flag("view") {
                println!("{}", serde_json::to_string_pretty(&outcome.view)?);
            } else {
                println!("{}", outcome.saved.to_json_pretty()?);
            }
        }
        _ => {}
    }
    Ok(())
}
