//! Implementation of `ffiz build`.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::target::{Optimize, Target};
use crate::util::process::{resolve_tool, ProcessBuilder};

/// Options for the build command.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Target to build for (defaults to the host target)
    pub target: Option<Target>,

    /// Optimization mode passed as `-Doptimize=`
    pub optimize: Option<Optimize>,

    /// Directory containing `build.zig`
    pub zig_cwd: PathBuf,

    /// Explicit path to the `zig` executable
    pub zig: Option<PathBuf>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            target: None,
            optimize: None,
            zig_cwd: PathBuf::from("."),
            zig: None,
        }
    }
}

/// Assemble the `zig build` invocation for a target.
pub fn zig_build_command(opts: &BuildOptions, target: Target) -> Result<ProcessBuilder> {
    let zig = resolve_tool(opts.zig.as_deref(), "zig")?;

    let mut cmd = ProcessBuilder::new(zig)
        .arg("build")
        .arg(format!("-Dtarget={}", target.zig_triple()))
        .cwd(&opts.zig_cwd);

    if let Some(optimize) = opts.optimize {
        cmd = cmd.arg(format!("-Doptimize={}", optimize));
    }

    Ok(cmd)
}

/// Compile the Zig library for one target.
///
/// Returns the target that was built.
pub fn build(opts: &BuildOptions) -> Result<Target> {
    let target = match opts.target {
        Some(target) => target,
        None => Target::host().context("cannot determine the host target")?,
    };

    tracing::info!(
        "Building {} ({}) in {}",
        target,
        target.zig_triple(),
        opts.zig_cwd.display()
    );

    let cmd = zig_build_command(opts, target)?;
    cmd.run()
        .with_context(|| format!("zig build failed for target {}", target))?;

    Ok(target)
}
