//! Test fixtures for common test scenarios.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::target::Target;

/// Fixture for a complete Zig project published through `ffiz`.
#[derive(Debug, Clone)]
pub struct ProjectFixture {
    /// Directory name of the project.
    pub name: String,
    /// package.json content (not written when empty).
    pub package_json: String,
    /// Zig sources (path relative to project root -> content).
    pub sources: BTreeMap<PathBuf, String>,
}

impl ProjectFixture {
    /// Create a new empty project fixture.
    pub fn new(name: impl Into<String>) -> Self {
        ProjectFixture {
            name: name.into(),
            package_json: String::new(),
            sources: BTreeMap::new(),
        }
    }

    /// A library project exporting the functions of [`zig::math_lib`].
    pub fn library(name: &str, library: &str, targets: &[&str]) -> Self {
        ProjectFixture::new(name)
            .with_package_json(package_json(name, "1.0.0", library, targets))
            .with_source("src/root.zig", zig::math_lib())
    }

    /// Set the package.json content.
    pub fn with_package_json(mut self, contents: impl Into<String>) -> Self {
        self.package_json = contents.into();
        self
    }

    /// Add a Zig source file.
    pub fn with_source(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.sources.insert(path.into(), content.into());
        self
    }

    /// Write this fixture to a real directory.
    pub fn write_to(&self, base_path: &Path) -> std::io::Result<PathBuf> {
        let project_path = base_path.join(&self.name);
        std::fs::create_dir_all(&project_path)?;

        if !self.package_json.is_empty() {
            std::fs::write(project_path.join("package.json"), &self.package_json)?;
        }

        for (rel_path, content) in &self.sources {
            let full_path = project_path.join(rel_path);
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&full_path, content)?;
        }

        Ok(project_path)
    }
}

/// A package.json with a `"bun-ffi-z"` section.
pub fn package_json(name: &str, version: &str, library: &str, targets: &[&str]) -> String {
    let targets = targets
        .iter()
        .map(|t| format!("\"{}\"", t))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"{{
  "name": "{name}",
  "version": "{version}",
  "license": "MIT",
  "bun-ffi-z": {{
    "name": "{library}",
    "targets": [{targets}]
  }}
}}
"#
    )
}

/// [`package_json`] for a library called `math`.
pub fn package_json_text(name: &str, version: &str, targets: &[&str]) -> String {
    package_json(name, version, "math", targets)
}

/// Create an empty build artifact at `<root>/<dir>/<zig triple>/<library>`.
pub fn write_artifact(root: &Path, dir: &str, target: Target, library: &str) -> PathBuf {
    let path = root.join(dir).join(target.zig_triple()).join(library);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, b"\x7fELF").unwrap();
    path
}

/// Common Zig sources.
pub mod zig {
    /// Exports `add`, `negate` and `version`, one of them over two lines.
    pub fn math_lib() -> &'static str {
        r#"const std = @import("std");

pub export fn add(a: i32, b: i32) i32 {
    return a + b;
}

export fn negate(
    value: i64,
) i64 {
    return -value;
}

fn helper() void {}

pub export fn version() u32 {
    return 1;
}
"#
    }

    /// Exports `sum` through `@export`, declared by hand with a directive.
    pub fn with_override() -> &'static str {
        r#"fn sumImpl(values: [*]const u64, len: usize) callconv(.C) u64 {
    var total: u64 = 0;
    for (values[0..len]) |v| total += v;
    return total;
}

comptime {
    @export(&sumImpl, .{ .name = "sum" });
}

// bun-ffi-z: sum (ptr, usize) u64
"#
    }

    /// Exports a function whose parameter type has no FFI mapping.
    pub fn unsupported() -> &'static str {
        r#"pub export fn concat(a: []const u8, b: []const u8) void {
    _ = a;
    _ = b;
}
"#
    }

    /// A declaration that never reaches its body.
    pub fn truncated() -> &'static str {
        "pub export fn broken(a: i32) i32\n"
    }
}
