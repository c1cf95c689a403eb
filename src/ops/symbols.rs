//! Implementation of `ffiz symbols`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::bindings::emit::{render, EmitFormat};
use crate::bindings::BindingTable;
use crate::core::config::{PackageJson, PACKAGE_JSON};
use crate::util::fs::{expand_sources, write_string};

/// Options for the symbols command.
#[derive(Debug, Clone, Default)]
pub struct SymbolsOptions {
    /// Directory relative source arguments are resolved against
    pub root: PathBuf,

    /// Files, directories or glob patterns (empty = `<zigCwd>/src`)
    pub sources: Vec<String>,

    /// Output file (None = return the rendering to the caller)
    pub output: Option<PathBuf>,

    /// Output format (None = from the output extension, else JSON)
    pub format: Option<EmitFormat>,
}

/// Result of a symbols run.
#[derive(Debug)]
pub struct SymbolsOutput {
    /// The extracted table
    pub table: BindingTable,

    /// Zig files that were scanned, in precedence order
    pub files: Vec<PathBuf>,

    /// Rendered table
    pub rendered: String,

    /// Format the table was rendered in
    pub format: EmitFormat,
}

/// Source arguments used when none are given.
///
/// With a `"bun-ffi-z"` section this is the `src` directory of the Zig
/// project, otherwise `src` of the current directory.
fn default_sources(root: &Path) -> Result<Vec<String>> {
    if !root.join(PACKAGE_JSON).is_file() {
        return Ok(vec!["src".to_string()]);
    }

    let pkg = PackageJson::load(root)?;
    let zig_cwd = match pkg.ffi_config() {
        Ok(config) => config.zig_cwd,
        Err(e) => {
            tracing::debug!("ignoring package.json config: {}", e);
            PathBuf::from(".")
        }
    };

    Ok(vec![zig_cwd.join("src").to_string_lossy().into_owned()])
}

/// Extract the binding table from Zig sources and render it.
pub fn generate_symbols(opts: &SymbolsOptions) -> Result<SymbolsOutput> {
    let sources = if opts.sources.is_empty() {
        default_sources(&opts.root)?
    } else {
        opts.sources.clone()
    };

    let files = expand_sources(&opts.root, &sources)?;
    if files.is_empty() {
        bail!("no Zig sources found in {}", sources.join(", "));
    }
    tracing::debug!("scanning {} Zig files", files.len());

    let table = BindingTable::build_from_paths(&files)?;

    let format = opts
        .format
        .or_else(|| opts.output.as_deref().and_then(EmitFormat::from_path))
        .unwrap_or_default();
    let rendered = render(&table, format)?;

    if let Some(ref output) = opts.output {
        write_string(output, &rendered)
            .with_context(|| format!("failed to write bindings to {}", output.display()))?;
        tracing::info!(
            "Wrote {} symbols to {}",
            table.len(),
            output.display()
        );
    }

    Ok(SymbolsOutput {
        table,
        files,
        rendered,
        format,
    })
}
