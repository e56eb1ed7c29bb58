//! # Check Subcommand
//!
//! Hydrates every entry of a data file into a record of one type and
//! reports, per entry, whether construction succeeded. A data file holds
//! either a list of objects or a single object.

use std::path::PathBuf;

use anyhow::{anyhow, bail};
use clap::Args;
use recstruct_core::Registry;
use recstruct_schema::{hydrate, read_file, SchemaLoader};

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema document (YAML or JSON).
    #[arg(long)]
    pub schema: PathBuf,

    /// Record type the entries must conform to.
    #[arg(long = "type")]
    pub type_name: String,

    /// Data file (YAML or JSON).
    pub data: PathBuf,
}

/// Result of checking one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Ok,
    Failed(String),
}

/// Check every entry of `data` against `type_name`.
pub fn check_entries(
    registry: &Registry,
    type_name: &str,
    data: &serde_json::Value,
) -> anyhow::Result<Vec<EntryOutcome>> {
    let record_type = registry
        .get(type_name)
        .ok_or_else(|| anyhow!("record type '{type_name}' is not defined by the schema"))?;

    let entries = match data {
        serde_json::Value::Array(items) => items.iter().collect::<Vec<_>>(),
        single => vec![single],
    };

    Ok(entries
        .into_iter()
        .map(|entry| match hydrate(record_type, registry, entry) {
            Ok(_) => EntryOutcome::Ok,
            Err(e) => EntryOutcome::Failed(e.to_string()),
        })
        .collect())
}

/// Load schema and data, print one line per entry, fail if any entry failed.
pub fn run(args: &CheckArgs) -> anyhow::Result<()> {
    let registry = SchemaLoader::new().load_file(&args.schema)?;
    let data: serde_json::Value = read_file(&args.data)?;
    let outcomes = check_entries(&registry, &args.type_name, &data)?;

    let mut failed = 0usize;
    for (i, outcome) in outcomes.iter().enumerate() {
        match outcome {
            EntryOutcome::Ok => println!("[{i}] ok"),
            EntryOutcome::Failed(reason) => {
                failed += 1;
                println!("[{i}] FAILED: {reason}");
            }
        }
    }
    tracing::info!(entries = outcomes.len(), failed, "check complete");

    if failed > 0 {
        bail!("{failed} of {} entries failed", outcomes.len());
    }
    Ok(())
}
