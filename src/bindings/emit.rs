//! Rendering binding tables for consumers.
//!
//! The JSON form is the plain `{ name: { args, returns } }` object. The
//! TypeScript form is a module that can be passed straight to `dlopen` from
//! `bun:ffi`.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use super::types::BindingTable;

/// Output format for a binding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitFormat {
    #[default]
    Json,
    TypeScript,
}

impl std::fmt::Display for EmitFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmitFormat::Json => write!(f, "json"),
            EmitFormat::TypeScript => write!(f, "typescript"),
        }
    }
}

impl std::str::FromStr for EmitFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(EmitFormat::Json),
            "typescript" | "ts" => Ok(EmitFormat::TypeScript),
            _ => Err(format!(
                "invalid format '{}'; expected 'json' or 'typescript'",
                s
            )),
        }
    }
}

impl EmitFormat {
    /// Guess the format from an output file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(EmitFormat::Json),
            "ts" | "mts" => Some(EmitFormat::TypeScript),
            _ => None,
        }
    }
}

/// Render a table as pretty-printed JSON.
pub fn to_json(table: &BindingTable) -> Result<String> {
    let mut json =
        serde_json::to_string_pretty(table).context("failed to serialize binding table")?;
    json.push('\n');
    Ok(json)
}

/// Object key for a symbol name, quoted unless it is a plain identifier.
fn ts_key(name: &str) -> String {
    let mut chars = name.chars();
    let is_ident = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if is_ident {
        name.to_string()
    } else {
        serde_json::Value::String(name.to_string()).to_string()
    }
}

/// Render a table as a TypeScript module for `bun:ffi`.
pub fn to_typescript(table: &BindingTable) -> String {
    let mut out = String::new();
    out.push_str("// Generated by ffiz from Zig sources. Do not edit.\n");
    out.push_str("import type { FFIFunction } from \"bun:ffi\";\n\n");
    out.push_str("export const symbols = {\n");

    for desc in table {
        let args = desc
            .args
            .iter()
            .map(|a| format!("\"{}\"", a))
            .collect::<Vec<_>>()
            .join(", ");
        // Writing to a String cannot fail.
        let _ = writeln!(out, "  {}: {{", ts_key(&desc.name));
        let _ = writeln!(out, "    args: [{}],", args);
        let _ = writeln!(out, "    returns: \"{}\",", desc.returns);
        out.push_str("  },\n");
    }

    out.push_str("} as const satisfies Record<string, FFIFunction>;\n");
    out
}

/// Render a table in the requested format.
pub fn render(table: &BindingTable, format: EmitFormat) -> Result<String> {
    match format {
        EmitFormat::Json => to_json(table),
        EmitFormat::TypeScript => Ok(to_typescript(table)),
    }
}
