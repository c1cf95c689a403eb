//! `ffiz publish` command

use std::path::Path;

use anyhow::Result;

use crate::cli::PublishArgs;
use ffiz::ops::publish::{publish, PublishOptions};

pub fn execute(root: &Path, args: PublishArgs) -> Result<()> {
    publish(&PublishOptions {
        root: root.to_path_buf(),
        bun: args.bun,
        args: args.args,
    })
}
