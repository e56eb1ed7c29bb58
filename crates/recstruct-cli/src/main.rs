//! # recstruct CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Schema-driven record types: inspect schema documents and check data.
#[derive(Parser, Debug)]
#[command(name = "recstruct", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print the record types declared by a schema document.
    Describe(recstruct_cli::describe::DescribeArgs),
    /// Construct records of one type from a data file.
    Check(recstruct_cli::check::CheckArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Describe(args) => recstruct_cli::describe::run(&args),
        Commands::Check(args) => recstruct_cli::check::run(&args),
    }
}
