//! `ffiz symbols` command
//!
//! Extracts the `bun:ffi` symbol table from Zig sources.

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::cli::SymbolsArgs;
use ffiz::ops::symbols::{generate_symbols, SymbolsOptions};

pub fn execute(root: &Path, args: SymbolsArgs) -> Result<()> {
    let output = args.out.map(|out| root.join(out));
    let to_stdout = output.is_none();

    let result = generate_symbols(&SymbolsOptions {
        root: root.to_path_buf(),
        sources: args.sources,
        output,
        format: args.format,
    })?;

    if to_stdout {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(result.rendered.as_bytes())?;
        stdout.flush()?;
    }

    Ok(())
}
