//! Person command implementation.

use crate::cli::{PersonAction, PersonArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use warmpath_domain::{GraphStore, Person, PersonId, PersonQuery};
use warmpath_engine::Engine;
use warmpath_store::SqliteStore;

/// Execute the person command.
pub fn execute_person(
    args: PersonArgs,
    store: &mut SqliteStore,
    engine: &mut Engine,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        PersonAction::Add {
            name,
            id,
            employer,
            title,
            reconcile,
        } => {
            let mut person = Person::new(PersonId::new(id.unwrap_or_default()), name);
            person.employer = employer;
            person.title = title;

            let saved = engine.upsert_person(store, person)?;
            println!("{}", formatter.success(&format!("Saved person {}", saved.id)));

            if reconcile {
                let outcome = engine.reconcile_relationships(store, &saved.id)?;
                println!(
                    "{}",
                    formatter.info(&format!(
                        "Reconciled: {} edge(s) added, {} removed",
                        outcome.added.len(),
                        outcome.removed.len()
                    ))
                );
            }
        }

        PersonAction::Show { id } => {
            let person = store
                .get_person(&PersonId::new(id.as_str()))?
                .ok_or(CliError::NotFound(id))?;
            println!("{}", formatter.format_person(&person)?);
        }

        PersonAction::List {
            name,
            employer,
            deleted,
            limit,
        } => {
            let persons = store.find_persons(&PersonQuery {
                name_contains: name,
                employer,
                include_deleted: deleted,
                limit,
            })?;
            println!("{}", formatter.format_persons(&persons)?);
        }

        PersonAction::Remove { id, reconcile } => {
            let id = PersonId::new(id);
            engine.tombstone_person(store, &id)?;
            println!("{}", formatter.success(&format!("Tombstoned person {}", id)));

            if reconcile {
                let outcome = engine.reconcile_relationships(store, &id)?;
                println!(
                    "{}",
                    formatter.info(&format!("Retracted {} edge(s)", outcome.removed.len()))
                );
            }
        }
    }

    Ok(())
}
