//! Implementation of `ffiz locate`.
//!
//! A library is looked up in two places, in order:
//! - a local build in `<zigCwd>/zig-out/lib`
//! - the published target package, `node_modules/<package>-<target>/`,
//!   searched from the project directory upwards like Node module resolution

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::config::PackageJson;
use crate::core::target::{local_library_path, Target};
use crate::ops::prepublish::target_package_name;
use crate::util::diagnostic::LibraryNotFoundError;

/// Options for the locate command.
#[derive(Debug, Clone)]
pub struct LocateOptions {
    /// Package root containing `package.json`
    pub root: PathBuf,

    /// Target to locate the library for (defaults to the host target)
    pub target: Option<Target>,
}

/// Candidate paths for the library, in search order.
pub fn library_search_paths(
    root: &Path,
    package_name: &str,
    library: &str,
    zig_cwd: &Path,
    target: Target,
) -> Vec<PathBuf> {
    let mut paths = vec![local_library_path(
        &root.join(zig_cwd),
        library,
        target.platform(),
    )];

    let package = target_package_name(package_name, target);
    let file = target.library_name(library);
    for dir in root.ancestors() {
        paths.push(dir.join("node_modules").join(&package).join(&file));
    }

    paths
}

/// Find the compiled library for a target.
pub fn locate_library(opts: &LocateOptions) -> Result<PathBuf> {
    let pkg = PackageJson::load(&opts.root)?;
    let config = pkg.ffi_config()?;
    let target = match opts.target {
        Some(target) => target,
        None => Target::host()?,
    };

    let searched = library_search_paths(
        &opts.root,
        pkg.name()?,
        &config.name,
        &config.zig_cwd,
        target,
    );

    if let Some(found) = searched.iter().find(|p| p.is_file()) {
        tracing::debug!("found {} for {}", found.display(), target);
        return Ok(found.clone());
    }

    for path in &searched {
        tracing::debug!("not found: {}", path.display());
    }

    Err(LibraryNotFoundError {
        library: config.name,
        platform: target.platform().to_string(),
        arch: target.arch().to_string(),
        searched,
    }
    .into())
}
