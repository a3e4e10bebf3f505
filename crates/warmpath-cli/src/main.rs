//! Warmpath CLI - Command-line interface for the relationship graph.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use warmpath_cli::{commands, Cli, Command, Formatter};
use warmpath_engine::{Engine, EngineConfig};
use warmpath_store::SqliteStore;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> warmpath_cli::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let color_enabled = !cli.no_color;
    let formatter = Formatter::new(cli.format, color_enabled);

    let mut store = SqliteStore::new(&cli.db)?;
    let mut engine = Engine::new(EngineConfig::default());

    match cli.command {
        Command::Person(args) => {
            commands::execute_person(args, &mut store, &mut engine, &formatter)?;
        }
        Command::Import(args) => {
            commands::execute_import(args, &mut store, &mut engine, &formatter)?;
        }
        Command::Reconcile(args) => {
            commands::execute_reconcile(args, &mut store, &mut engine, &formatter)?;
        }
        Command::Paths(args) => {
            commands::execute_paths(args, &mut store, &mut engine, &formatter)?;
        }
        Command::Strength(args) => {
            commands::execute_strength(args, &mut store, &mut engine, &formatter, cli.format)?;
        }
    }

    Ok(())
}
