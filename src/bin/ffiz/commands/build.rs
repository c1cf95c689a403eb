//! `ffiz build` command

use std::path::Path;

use anyhow::Result;

use crate::cli::BuildArgs;
use ffiz::core::config::{PackageJson, PACKAGE_JSON};
use ffiz::ops::zig_build::{build, BuildOptions};

pub fn execute(root: &Path, args: BuildArgs) -> Result<()> {
    // package.json is optional here; flags fill in whatever it doesn't give.
    let config = if root.join(PACKAGE_JSON).is_file() {
        Some(PackageJson::load(root)?.ffi_config()?)
    } else {
        None
    };

    let zig_cwd = args
        .zig_cwd
        .or_else(|| config.as_ref().map(|c| c.zig_cwd.clone()))
        .map(|dir| root.join(dir))
        .unwrap_or_else(|| root.to_path_buf());
    let optimize = args
        .optimize
        .or_else(|| config.as_ref().and_then(|c| c.optimize));

    let target = build(&BuildOptions {
        target: args.target,
        optimize,
        zig_cwd,
        zig: args.zig,
    })?;

    println!("Finished {} ({})", target, target.zig_triple());
    Ok(())
}
