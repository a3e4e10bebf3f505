//! Paths command implementation.

use crate::cli::PathsArgs;
use crate::error::Result;
use crate::output::Formatter;
use std::time::{Duration, Instant};
use warmpath_domain::PersonId;
use warmpath_engine::{Engine, SearchOptions, TargetQuery};
use warmpath_store::SqliteStore;

/// Execute the paths command.
pub fn execute_paths(
    args: PathsArgs,
    store: &mut SqliteStore,
    engine: &mut Engine,
    formatter: &Formatter,
) -> Result<()> {
    let source = PersonId::new(args.source);
    let query = TargetQuery {
        name: args.target,
        company: args.company,
    };
    let kinds = if args.kinds.is_empty() {
        None
    } else {
        Some(SearchOptions::parse_kind_filter(&args.kinds)?)
    };
    let options = SearchOptions {
        max_hops: args.max_hops,
        top_k: args.top_k,
        kinds,
        deadline: args
            .timeout_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms)),
    };

    let result = engine.find_introduction_paths(store, &source, &query, &options)?;

    if result.self_target {
        println!(
            "{}",
            formatter.info("The target resolved to the source person; no introduction needed.")
        );
    }
    if result.truncated {
        println!(
            "{}",
            formatter.warning("Search stopped at its deadline; results may be incomplete.")
        );
    }
    if !result.found && !result.self_target {
        if result.targets_considered == 0 {
            println!("{}", formatter.warning("No person matched the target query."));
        } else {
            println!(
                "{}",
                formatter.warning(&format!(
                    "No path found to any of {} candidate(s) within the hop limit.",
                    result.targets_considered
                ))
            );
        }
    }

    if result.total_found > result.paths.len() {
        println!(
            "{}",
            formatter.info(&format!(
                "Showing {} of {} path(s).",
                result.paths.len(),
                result.total_found
            ))
        );
    }

    println!("{}", formatter.format_paths(&result.paths)?);

    Ok(())
}
