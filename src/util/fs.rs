//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;
use serde::Serialize;
use walkdir::WalkDir;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write file: {}", path.display()))
}

/// Write a value as two-space indented JSON with a trailing newline.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value)
        .with_context(|| format!("failed to serialize {}", path.display()))?;
    json.push('\n');
    write_string(path, &json)
}

/// Copy a file, creating the destination's parent directories.
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64> {
    if let Some(parent) = dst.parent() {
        ensure_dir(parent)?;
    }
    fs::copy(src, dst)
        .with_context(|| format!("failed to copy {} to {}", src.display(), dst.display()))
}

/// Whether a path names a Zig source file.
pub fn is_zig_source(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "zig")
}

/// Recursively find Zig sources under a directory, in sorted order.
///
/// `zig-out` and `.zig-cache`/`zig-cache` build directories are skipped.
pub fn find_zig_sources(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            !(entry.depth() > 0
                && entry.file_type().is_dir()
                && matches!(name.as_ref(), "zig-out" | "zig-cache" | ".zig-cache"))
        });

    for entry in walker {
        let entry =
            entry.with_context(|| format!("failed to walk directory: {}", dir.display()))?;
        if entry.file_type().is_file() && is_zig_source(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Find files matching a glob pattern relative to a base directory, sorted.
pub fn glob_files(base: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = base.join(pattern);
    let pattern_str = full_pattern.to_string_lossy();
    let mut results = Vec::new();

    for entry in glob(&pattern_str).with_context(|| format!("invalid glob pattern: {}", pattern))? {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    results.push(path);
                }
            }
            Err(e) => {
                tracing::warn!("glob error: {}", e);
            }
        }
    }

    results.sort();
    Ok(results)
}

/// Expand source arguments into Zig files.
///
/// Each argument may be a file, a directory (searched recursively) or a glob
/// pattern. Files keep the order of their arguments; duplicates keep their
/// first position.
pub fn expand_sources(base: &Path, inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for input in inputs {
        let path = base.join(input);
        let found = if path.is_dir() {
            find_zig_sources(&path)?
        } else if path.is_file() {
            vec![path]
        } else if input.contains(['*', '?', '[']) {
            glob_files(base, input)?
        } else {
            anyhow::bail!("source not found: {}", path.display());
        };

        if found.is_empty() {
            tracing::warn!("no Zig sources matched `{}`", input);
        }
        for file in found {
            if !files.contains(&file) {
                files.push(file);
            }
        }
    }

    Ok(files)
}
