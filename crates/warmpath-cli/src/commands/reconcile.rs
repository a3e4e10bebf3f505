//! Reconcile command implementation.

use crate::cli::ReconcileArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use warmpath_domain::{GraphStore, PersonId, PersonQuery};
use warmpath_engine::Engine;
use warmpath_store::SqliteStore;

/// Execute the reconcile command.
pub fn execute_reconcile(
    args: ReconcileArgs,
    store: &mut SqliteStore,
    engine: &mut Engine,
    formatter: &Formatter,
) -> Result<()> {
    let ids: Vec<PersonId> = if args.all {
        store
            .find_persons(&PersonQuery {
                include_deleted: true,
                ..Default::default()
            })?
            .into_iter()
            .map(|p| p.id)
            .collect()
    } else if args.ids.is_empty() {
        return Err(CliError::InvalidInput(
            "Provide person ids or --all".to_string(),
        ));
    } else {
        args.ids.into_iter().map(PersonId::new).collect()
    };

    let mut added = 0;
    let mut removed = 0;
    for id in &ids {
        let outcome = engine.reconcile_relationships(store, id)?;
        added += outcome.added.len();
        removed += outcome.removed.len();
    }

    println!(
        "{}",
        formatter.success(&format!(
            "Reconciled {} person(s): {} edge(s) added, {} removed",
            ids.len(),
            added,
            removed
        ))
    );

    Ok(())
}
