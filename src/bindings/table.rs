//! Binding table construction from one or many Zig sources.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use super::error::BindingError;
use super::scanner::scan_source;
use super::types::{BindingTable, FunctionDescriptor};

/// The text of one Zig source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// Where the text came from, if it was read from disk
    pub path: Option<PathBuf>,

    /// File contents
    pub text: String,
}

impl SourceUnit {
    /// Create a unit from in-memory text.
    pub fn new(text: impl Into<String>) -> Self {
        SourceUnit {
            path: None,
            text: text.into(),
        }
    }

    /// Read a unit from disk.
    pub fn read(path: &Path) -> Result<Self, BindingError> {
        let text = std::fs::read_to_string(path).map_err(|source| BindingError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(SourceUnit {
            path: Some(path.to_path_buf()),
            text,
        })
    }

    /// Scan this unit into its descriptors, in file order.
    pub fn scan(&self) -> Result<Vec<FunctionDescriptor>, BindingError> {
        let entries = scan_source(&self.text).map_err(|e| match &self.path {
            Some(path) => e.in_file(path),
            None => e,
        })?;

        tracing::debug!(
            "{}: {} binding(s)",
            self.path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<memory>".to_string()),
            entries.len()
        );

        Ok(entries)
    }
}

impl BindingTable {
    /// Build a table from source units.
    ///
    /// Each unit is scanned into its own ordered entry list and the lists are
    /// folded in unit order, so a later file (or a later entry in the same
    /// file) replaces an earlier one with the same name. The first error
    /// aborts the whole build.
    pub fn build<'a>(units: impl IntoIterator<Item = &'a SourceUnit>) -> Result<Self, BindingError> {
        let mut table = BindingTable::new();
        for unit in units {
            table.extend_entries(unit.scan()?);
        }
        Ok(table)
    }

    /// Build a table from Zig files on disk.
    ///
    /// Files are read on the rayon pool but collected in input order before
    /// the fold, so precedence follows `paths`, not completion order.
    pub fn build_from_paths<P>(paths: &[P]) -> Result<Self, BindingError>
    where
        P: AsRef<Path> + Sync,
    {
        let units = paths
            .par_iter()
            .map(|path| SourceUnit::read(path.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Self::build(&units)
    }
}
