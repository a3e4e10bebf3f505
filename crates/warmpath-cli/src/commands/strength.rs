//! Strength command implementation.

use crate::cli::{CliFormat, StrengthArgs};
use crate::error::Result;
use crate::output::Formatter;
use warmpath_domain::PersonId;
use warmpath_engine::Engine;
use warmpath_store::SqliteStore;

/// Execute the strength command.
pub fn execute_strength(
    args: StrengthArgs,
    store: &mut SqliteStore,
    engine: &mut Engine,
    formatter: &Formatter,
    format: CliFormat,
) -> Result<()> {
    let a = PersonId::new(args.a);
    let b = PersonId::new(args.b);

    let strength = engine.connection_strength(store, &a, &b)?;

    match format {
        CliFormat::Json => {
            let value = serde_json::json!({
                "a": a.to_string(),
                "b": b.to_string(),
                "strength": strength,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        CliFormat::Quiet => println!("{}", strength),
        CliFormat::Table => {
            println!(
                "{}",
                formatter.info(&format!(
                    "Connection strength between {} and {}: {}/100",
                    a, b, strength
                ))
            );
        }
    }

    Ok(())
}
