//! ffiz CLI - Bun FFI packaging for Zig libraries

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ffiz::util::diagnostic::{emit, Diagnostic};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli) {
        emit(&Diagnostic::from_error(&e), color);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("ffiz=debug")
        } else {
            EnvFilter::new("ffiz=info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let root = project_root(cli.cwd)?;

    match cli.command {
        Commands::Build(args) => commands::build::execute(&root, args),
        Commands::Prepublish(args) => commands::prepublish::execute(&root, args),
        Commands::Publish(args) => commands::publish::execute(&root, args),
        Commands::Symbols(args) => commands::symbols::execute(&root, args),
        Commands::Locate(args) => commands::locate::execute(&root, args),
        Commands::Targets => commands::targets::execute(),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

fn project_root(cwd: Option<PathBuf>) -> Result<PathBuf> {
    let current = std::env::current_dir().context("failed to read the current directory")?;
    Ok(match cwd {
        Some(dir) => current.join(dir),
        None => current,
    })
}
