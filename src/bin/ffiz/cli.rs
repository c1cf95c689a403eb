//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use ffiz::bindings::EmitFormat;
use ffiz::core::target::{Optimize, Target};

/// ffiz - Build, package and bind Zig libraries for Bun FFI
#[derive(Parser)]
#[command(name = "ffiz")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Package root containing package.json (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile the Zig library for one target
    Build(BuildArgs),

    /// Generate per-target packages from build artifacts
    Prepublish(PrepublishArgs),

    /// Publish the target packages, then the root package
    Publish(PublishArgs),

    /// Generate the bun:ffi symbol table from Zig sources
    Symbols(SymbolsArgs),

    /// Print the path of the library for the host
    Locate(LocateArgs),

    /// List supported targets
    Targets,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Target to build for (defaults to the host target)
    #[arg(long)]
    pub target: Option<Target>,

    /// Optimization mode (Debug, ReleaseSmall, ReleaseFast, ReleaseSafe)
    #[arg(long)]
    pub optimize: Option<Optimize>,

    /// Directory containing build.zig (defaults to zigCwd from package.json)
    #[arg(long)]
    pub zig_cwd: Option<PathBuf>,

    /// Path to the zig executable
    #[arg(long, env = "ZIG")]
    pub zig: Option<PathBuf>,
}

#[derive(Args)]
pub struct PrepublishArgs {
    /// Directory with one <zig triple>/ subdirectory per target
    #[arg(long)]
    pub artifacts: PathBuf,
}

#[derive(Args)]
pub struct PublishArgs {
    /// Path to the bun executable
    #[arg(long, env = "BUN")]
    pub bun: Option<PathBuf>,

    /// Extra arguments passed to `bun publish`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct SymbolsArgs {
    /// Zig files, directories or glob patterns (defaults to <zigCwd>/src)
    pub sources: Vec<String>,

    /// Write the table to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Output format: json or typescript (defaults to the --out extension)
    #[arg(long)]
    pub format: Option<EmitFormat>,
}

#[derive(Args)]
pub struct LocateArgs {
    /// Target to locate the library for (defaults to the host target)
    #[arg(long)]
    pub target: Option<Target>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
