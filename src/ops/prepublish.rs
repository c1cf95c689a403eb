//! Implementation of `ffiz prepublish`.
//!
//! Turns a directory of cross-compiled libraries into one npm package per
//! target under `targetPackages/`, and points the root package at them via
//! `optionalDependencies`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde_json::{json, Map, Value};

use crate::core::config::{FfiConfig, PackageJson};
use crate::core::target::Target;
use crate::util::fs::{copy_file, write_json, write_string};

/// Directory, relative to the package root, holding the target packages.
pub const TARGET_PACKAGES_DIR: &str = "targetPackages";

/// Options for the prepublish command.
#[derive(Debug, Clone)]
pub struct PrepublishOptions {
    /// Package root containing `package.json`
    pub root: PathBuf,

    /// Directory with one `<zig triple>/` subdirectory per target
    pub artifacts: PathBuf,
}

/// Result of a prepublish run.
#[derive(Debug, Clone)]
pub struct PrepublishResult {
    /// Directory of each generated target package, in config order
    pub packages: Vec<PathBuf>,

    /// Root package version the target packages were stamped with
    pub version: semver::Version,
}

/// Name of the npm package carrying the library for `target`.
pub fn target_package_name(root_name: &str, target: Target) -> String {
    format!("{}-{}", root_name, target)
}

/// Directory of the package for `target`.
pub fn target_package_dir(root: &Path, target: Target) -> PathBuf {
    root.join(TARGET_PACKAGES_DIR).join(target.as_str())
}

/// Build the `package.json` of a target package from the root manifest.
pub fn target_package_json(
    root_pkg: &PackageJson,
    config: &FfiConfig,
    target: Target,
) -> Result<Map<String, Value>> {
    let parts = target.parts();
    let library = config.library_name(target);

    let mut pkg = Map::new();
    pkg.insert(
        "name".into(),
        json!(target_package_name(root_pkg.name()?, target)),
    );
    pkg.insert("version".into(), json!(root_pkg.version()?));
    for key in ["license", "repository"] {
        if let Some(value) = root_pkg.fields.get(key) {
            pkg.insert(key.into(), value.clone());
        }
    }
    pkg.insert("main".into(), json!(library));
    pkg.insert("files".into(), json!([library]));
    pkg.insert(
        "engines".into(),
        root_pkg
            .fields
            .get("engines")
            .cloned()
            .unwrap_or_else(|| json!({ "bun": "*" })),
    );
    pkg.insert("os".into(), json!([parts.platform.as_str()]));
    pkg.insert("cpu".into(), json!([parts.arch.as_str()]));
    if let Some(libc) = target.libc() {
        pkg.insert("libc".into(), json!([libc]));
    }

    Ok(pkg)
}

/// Write `package.json` and `README.md` for a target package.
pub fn write_target_package(
    root_pkg: &PackageJson,
    config: &FfiConfig,
    target: Target,
) -> Result<PathBuf> {
    let dir = target_package_dir(root_pkg.root(), target);
    let pkg = target_package_json(root_pkg, config, target)?;

    write_json(&dir.join("package.json"), &pkg)?;

    let readme = format!(
        "# `{}`\n\nThis is the {} target package for {}.\n",
        target_package_name(root_pkg.name()?, target),
        target,
        root_pkg.name()?
    );
    write_string(&dir.join("README.md"), &readme)?;

    tracing::debug!("wrote target package {}", dir.display());
    Ok(dir)
}

/// Copy `<artifacts>/<zig triple>/<library>` into the target package.
pub fn copy_target_library(
    root: &Path,
    config: &FfiConfig,
    target: Target,
    artifacts: &Path,
) -> Result<PathBuf> {
    let library = config.library_name(target);
    let src = artifacts.join(target.zig_triple()).join(&library);
    let dst = target_package_dir(root, target).join(&library);

    if !src.is_file() {
        bail!(
            "missing build artifact for {}: {}",
            target,
            src.display()
        );
    }

    copy_file(&src, &dst)?;
    tracing::debug!("copied {} -> {}", src.display(), dst.display());
    Ok(dst)
}

/// Point `optionalDependencies` of the root package at every target package.
///
/// Existing entries for other packages are kept.
pub fn update_optional_dependencies(pkg: &mut PackageJson, config: &FfiConfig) -> Result<()> {
    let name = pkg.name()?.to_string();
    let version = pkg.version()?.to_string();

    let deps = pkg
        .fields
        .entry("optionalDependencies")
        .or_insert_with(|| Value::Object(Map::new()));
    let Value::Object(deps) = deps else {
        bail!("\"optionalDependencies\" in package.json is not an object");
    };

    for target in &config.targets {
        deps.insert(target_package_name(&name, *target), json!(version));
    }

    Ok(())
}

/// Generate every target package and update the root `package.json`.
pub fn prepublish(opts: &PrepublishOptions) -> Result<PrepublishResult> {
    let mut pkg = PackageJson::load(&opts.root)?;
    let config = pkg.ffi_config()?;

    let raw_version = pkg.version()?;
    let version = semver::Version::parse(raw_version)
        .with_context(|| format!("invalid package version `{}`", raw_version))?;

    let artifacts = opts.root.join(&opts.artifacts);
    if !artifacts.is_dir() {
        bail!("artifacts directory `{}` does not exist", artifacts.display());
    }

    let mut packages = Vec::with_capacity(config.targets.len());
    for target in &config.targets {
        let dir = write_target_package(&pkg, &config, *target)?;
        copy_target_library(pkg.root(), &config, *target, &artifacts)?;
        tracing::info!("Prepared {}", target_package_name(pkg.name()?, *target));
        packages.push(dir);
    }

    update_optional_dependencies(&mut pkg, &config)?;
    pkg.save()?;

    Ok(PrepublishResult { packages, version })
}
