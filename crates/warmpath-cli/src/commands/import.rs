//! Import command implementation.

use crate::cli::ImportArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::record::PersonRecord;
use std::fs;
use std::io::{self, Read};
use warmpath_engine::Engine;
use warmpath_store::SqliteStore;

/// Execute the import command.
///
/// Loads every record before reconciling anything, so records that
/// reference each other (family ids, shared employers) derive edges in a
/// single pass regardless of file order.
pub fn execute_import(
    args: ImportArgs,
    store: &mut SqliteStore,
    engine: &mut Engine,
    formatter: &Formatter,
) -> Result<()> {
    let json_data = if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else if let Some(file_path) = args.file {
        fs::read_to_string(file_path)?
    } else {
        return Err(CliError::InvalidInput(
            "Must specify either --file or --stdin".to_string(),
        ));
    };

    let records: Vec<PersonRecord> = serde_json::from_str(&json_data)?;
    if records.is_empty() {
        return Err(CliError::InvalidInput("No persons provided".to_string()));
    }

    let mut ids = Vec::with_capacity(records.len());
    for record in records {
        let saved = engine.upsert_person(store, record.into_person())?;
        ids.push(saved.id);
    }
    println!(
        "{}",
        formatter.success(&format!("Imported {} person(s)", ids.len()))
    );

    if args.reconcile {
        let mut added = 0;
        let mut removed = 0;
        for id in &ids {
            let outcome = engine.reconcile_relationships(store, id)?;
            added += outcome.added.len();
            removed += outcome.removed.len();
        }
        println!(
            "{}",
            formatter.info(&format!(
                "Reconciled {} person(s): {} edge(s) added, {} removed",
                ids.len(),
                added,
                removed
            ))
        );
    }

    Ok(())
}
