mod classify;
mod commands;
mod config;
mod diagnostics;
mod docblock;
mod error;
mod index;
mod links;
mod ownership;
mod render;
mod sink;
mod summary;
mod types;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "classdoc",
    about = "Generate markdown API documentation from PHP class trees"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index the source tree and write one markdown page per entity
    Generate {
        /// Output directory for generated pages (overrides config)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Source directory to scan (overrides config)
        #[arg(long)]
        source: Option<PathBuf>,
    },
    /// List every indexed class, interface, and trait
    List {
        /// Source directory to scan (overrides config)
        #[arg(long)]
        source: Option<PathBuf>,
    },
    /// Print one entity's rendered page, or its summary as JSON
    Show {
        /// Qualified or short entity name
        name: String,
        /// Emit the structured summary as JSON
        #[arg(long)]
        json: bool,
        /// Source directory to scan (overrides config)
        #[arg(long)]
        source: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { out, source } => match commands::generate(source, out) {
            Ok(code) => code,
            Err(e) => {
                diagnostics::print_error(&e);
                ExitCode::FAILURE
            },
        },
        Commands::List { source } => report(commands::list(source)),
        Commands::Show { name, json, source } => report(commands::show(&name, json, source)),
    }
}

/// Map a command result to an exit code, printing diagnostics on failure.
fn report(result: Result<(), error::Error>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        },
    }
}
