//! Implementation of `ffiz publish`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::core::config::PackageJson;
use crate::ops::prepublish::target_package_dir;
use crate::util::process::{resolve_tool, ProcessBuilder};

/// Options for the publish command.
#[derive(Debug, Clone)]
pub struct PublishOptions {
    /// Package root containing `package.json`
    pub root: PathBuf,

    /// Explicit path to the `bun` executable
    pub bun: Option<PathBuf>,

    /// Extra arguments forwarded to `bun publish`
    pub args: Vec<String>,
}

/// Plan the `bun publish` invocations: one per target package, then the
/// root package last.
pub fn publish_commands(opts: &PublishOptions) -> Result<Vec<ProcessBuilder>> {
    let pkg = PackageJson::load(&opts.root)?;
    let config = pkg.ffi_config()?;
    let bun = resolve_tool(opts.bun.as_deref(), "bun")?;

    let mut dirs = Vec::with_capacity(config.targets.len() + 1);
    for target in &config.targets {
        let dir = target_package_dir(&opts.root, *target);
        if !dir.join("package.json").is_file() {
            bail!(
                "target package {} has not been generated (run `ffiz prepublish` first)",
                dir.display()
            );
        }
        dirs.push(dir);
    }
    dirs.push(opts.root.clone());

    Ok(dirs
        .into_iter()
        .map(|dir| {
            ProcessBuilder::new(&bun)
                .arg("publish")
                .args(&opts.args)
                .cwd(dir)
        })
        .collect())
}

/// Publish every target package, then the root package.
///
/// Stops at the first failing `bun publish`.
pub fn publish(opts: &PublishOptions) -> Result<()> {
    for cmd in publish_commands(opts)? {
        let dir = cmd.get_cwd().unwrap_or(opts.root.as_path()).display().to_string();
        tracing::info!("Publishing {}", dir);
        cmd.run().with_context(|| format!("failed to publish {}", dir))?;
    }
    Ok(())
}
