//! `ffiz locate` command

use std::path::Path;

use anyhow::Result;

use crate::cli::LocateArgs;
use ffiz::ops::locate::{locate_library, LocateOptions};

pub fn execute(root: &Path, args: LocateArgs) -> Result<()> {
    let path = locate_library(&LocateOptions {
        root: root.to_path_buf(),
        target: args.target,
    })?;

    println!("{}", path.display());
    Ok(())
}
