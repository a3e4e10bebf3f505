//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Warmpath CLI - Explore the relationship graph and find warm
/// introduction paths.
#[derive(Debug, Parser)]
#[command(name = "warmpath")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, global = true, env = "WARMPATH_DB", default_value = "warmpath.db")]
    pub db: String,

    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "table")]
    pub format: CliFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage person records
    Person(PersonArgs),

    /// Import person records from a JSON file
    Import(ImportArgs),

    /// Recompute derived relationships for a person
    Reconcile(ReconcileArgs),

    /// Find warm introduction paths to a target
    Paths(PathsArgs),

    /// Compute the connection strength between two persons
    Strength(StrengthArgs),
}

/// Arguments for person management.
#[derive(Debug, Parser)]
pub struct PersonArgs {
    #[command(subcommand)]
    pub action: PersonAction,
}

/// Person management actions.
#[derive(Debug, Subcommand)]
pub enum PersonAction {
    /// Add or replace a person
    Add {
        /// Display name
        name: String,

        /// Person id (generated when omitted)
        #[arg(short, long)]
        id: Option<String>,

        /// Current employer
        #[arg(short, long)]
        employer: Option<String>,

        /// Job title
        #[arg(short, long)]
        title: Option<String>,

        /// Reconcile relationships immediately after saving
        #[arg(short, long)]
        reconcile: bool,
    },

    /// Show one person by id
    Show {
        /// Person id
        id: String,
    },

    /// List persons
    List {
        /// Case-insensitive substring match on the name
        #[arg(short, long)]
        name: Option<String>,

        /// Match on the current employer
        #[arg(short, long)]
        employer: Option<String>,

        /// Include tombstoned records
        #[arg(long)]
        deleted: bool,

        /// Maximum results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Tombstone a person (soft delete)
    Remove {
        /// Person id
        id: String,

        /// Reconcile immediately so derived edges are retracted
        #[arg(short, long)]
        reconcile: bool,
    },
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// JSON file containing an array of person records
    #[arg(long)]
    pub file: Option<String>,

    /// Read the JSON array from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Reconcile every imported person after the load
    #[arg(short, long)]
    pub reconcile: bool,
}

/// Arguments for the reconcile command.
#[derive(Debug, Parser)]
pub struct ReconcileArgs {
    /// Person ids to reconcile; with --all, reconciles everyone
    pub ids: Vec<String>,

    /// Reconcile every person in the store
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the paths command.
#[derive(Debug, Parser)]
pub struct PathsArgs {
    /// Source person id
    pub source: String,

    /// Target name (full or partial)
    pub target: String,

    /// Target's company, to disambiguate common names
    #[arg(short, long)]
    pub company: Option<String>,

    /// Maximum hops to search
    #[arg(long)]
    pub max_hops: Option<usize>,

    /// Maximum paths to return
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Only traverse these relationship kinds (comma-separated, e.g.
    /// coworker,family)
    #[arg(long, value_delimiter = ',')]
    pub kinds: Vec<String>,

    /// Abandon the search after this many milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

/// Arguments for the strength command.
#[derive(Debug, Parser)]
pub struct StrengthArgs {
    /// First person id
    pub a: String,

    /// Second person id
    pub b: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_command_parsing() {
        let cli = Cli::parse_from([
            "warmpath",
            "paths",
            "alice",
            "Jane Doe",
            "--company",
            "Acme",
            "-k",
            "3",
            "--kinds",
            "coworker,family",
        ]);
        match cli.command {
            Command::Paths(args) => {
                assert_eq!(args.source, "alice");
                assert_eq!(args.target, "Jane Doe");
                assert_eq!(args.company.as_deref(), Some("Acme"));
                assert_eq!(args.top_k, Some(3));
                assert_eq!(args.kinds, vec!["coworker", "family"]);
            }
            _ => panic!("Expected Paths command"),
        }
    }

    #[test]
    fn test_person_add_parsing() {
        let cli = Cli::parse_from([
            "warmpath",
            "person",
            "add",
            "Jane Doe",
            "--employer",
            "Acme",
            "--reconcile",
        ]);
        match cli.command {
            Command::Person(PersonArgs {
                action:
                    PersonAction::Add {
                        name,
                        employer,
                        reconcile,
                        ..
                    },
            }) => {
                assert_eq!(name, "Jane Doe");
                assert_eq!(employer.as_deref(), Some("Acme"));
                assert!(reconcile);
            }
            _ => panic!("Expected person add"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["warmpath", "--db", "/tmp/g.db", "strength", "a", "b"]);
        assert_eq!(cli.db, "/tmp/g.db");
        assert_eq!(cli.format, CliFormat::Table);
    }
}
