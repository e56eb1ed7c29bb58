//! # Describe Subcommand
//!
//! Prints every record type of a schema document with its fields.

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::Args;
use recstruct_core::{RecordType, Registry};
use recstruct_schema::SchemaLoader;

/// Arguments for the describe subcommand.
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Schema document (YAML or JSON).
    #[arg(long)]
    pub schema: PathBuf,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Load the schema and print its types to stdout.
pub fn run(args: &DescribeArgs) -> anyhow::Result<()> {
    let registry = SchemaLoader::new().load_file(&args.schema)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&to_json(&registry))?);
    } else {
        print!("{}", render(&registry));
    }
    Ok(())
}

fn field_lines(ty: &RecordType) -> Vec<String> {
    ty.accessors()
        .iter()
        .map(|accessor| {
            let d = accessor.descriptor();
            let mut line = format!("{}: {}", d.name(), d.guard());
            if d.is_nullable() {
                line.push_str(", nullable");
            }
            if let Some(nested) = d.nested_type() {
                let _ = write!(line, ", struct {nested}");
            }
            if !d.default_value().is_nil() {
                let _ = write!(line, ", default {}", d.default_value().to_json());
            }
            line
        })
        .collect()
}

/// Text rendering: one header line per type, one indented line per field.
pub fn render(registry: &Registry) -> String {
    let mut out = String::new();
    for ty in registry.iter() {
        let _ = writeln!(out, "{}", ty.name());
        for line in field_lines(ty) {
            let _ = writeln!(out, "  {line}");
        }
    }
    out
}

/// JSON rendering, using the schema document's key names.
pub fn to_json(registry: &Registry) -> serde_json::Value {
    let types = registry
        .iter()
        .map(|ty| {
            let fields = ty
                .accessors()
                .iter()
                .map(|accessor| {
                    let d = accessor.descriptor();
                    serde_json::json!({
                        "field": d.name().as_str(),
                        "type_guard": d.guard().name(),
                        "default_value": d.default_value().to_json(),
                        "nullable": d.is_nullable(),
                        "struct": d.nested_type().map(|n| n.as_str()),
                    })
                })
                .collect::<Vec<_>>();
            serde_json::json!({ "name": ty.name().as_str(), "fields": fields })
        })
        .collect::<Vec<_>>();
    serde_json::json!({ "types": types })
}
