//! `ffiz prepublish` command

use std::path::Path;

use anyhow::Result;

use crate::cli::PrepublishArgs;
use ffiz::ops::prepublish::{prepublish, PrepublishOptions};

pub fn execute(root: &Path, args: PrepublishArgs) -> Result<()> {
    let result = prepublish(&PrepublishOptions {
        root: root.to_path_buf(),
        artifacts: args.artifacts,
    })?;

    println!(
        "Generated {} target packages for version {}",
        result.packages.len(),
        result.version
    );
    for dir in &result.packages {
        let shown = dir.strip_prefix(root).unwrap_or(dir);
        println!("  {}", shown.display());
    }

    Ok(())
}
