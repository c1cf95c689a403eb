//! Project configuration read from `package.json`.
//!
//! The tool is configured through a `"bun-ffi-z"` object in the project's
//! `package.json`:
//!
//! ```json
//! {
//!   "name": "my-lib",
//!   "version": "1.0.0",
//!   "bun-ffi-z": {
//!     "name": "mylib",
//!     "targets": ["linux-x64-gnu", "darwin-arm64"],
//!     "optimize": "ReleaseFast",
//!     "zigCwd": "zig"
//!   }
//! }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use thiserror::Error;

use super::target::{Optimize, Target};

/// Key of the tool's section in `package.json`.
pub const CONFIG_KEY: &str = "bun-ffi-z";

/// Name of the package manifest file.
pub const PACKAGE_JSON: &str = "package.json";

/// Invalid or missing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("bun-ffi-z config not found in package.json")]
    MissingConfig,

    #[error("Invalid config: expected an object")]
    NotAnObject,

    #[error("Invalid config: expected string \"{0}\"")]
    ExpectedString(&'static str),

    #[error("Invalid config: expected array \"targets\"")]
    ExpectedTargetArray,

    #[error("Invalid config: expected non-empty array \"targets\"")]
    EmptyTargets,

    #[error("Invalid config: expected string \"targets[{0}]\"")]
    ExpectedTargetString(usize),

    #[error("Invalid config: unknown target \"{0}\"")]
    UnknownTarget(String),

    #[error("Invalid config: expected unique \"targets\"")]
    DuplicateTargets,

    #[error("Invalid config: unknown optimize \"{0}\"")]
    UnknownOptimize(String),

    #[error("package.json has no string \"{0}\" field")]
    MissingPackageField(&'static str),
}

/// The `"bun-ffi-z"` section, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfiConfig {
    /// Library name, without platform prefix or suffix
    pub name: String,

    /// Targets to package, unique and non-empty
    pub targets: Vec<Target>,

    /// Default optimization mode for `zig build`
    pub optimize: Option<Optimize>,

    /// Zig project directory, relative to the package root
    pub zig_cwd: PathBuf,
}

impl FfiConfig {
    /// Validate a raw config value.
    pub fn parse(input: &Value) -> Result<Self, ConfigError> {
        let obj = input.as_object().ok_or(ConfigError::NotAnObject)?;

        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .ok_or(ConfigError::ExpectedString("name"))?
            .to_string();

        let raw_targets = obj
            .get("targets")
            .and_then(Value::as_array)
            .ok_or(ConfigError::ExpectedTargetArray)?;
        if raw_targets.is_empty() {
            return Err(ConfigError::EmptyTargets);
        }

        let mut targets = Vec::with_capacity(raw_targets.len());
        for (i, raw) in raw_targets.iter().enumerate() {
            let raw = raw.as_str().ok_or(ConfigError::ExpectedTargetString(i))?;
            let target = raw
                .parse::<Target>()
                .map_err(|_| ConfigError::UnknownTarget(raw.to_string()))?;
            targets.push(target);
        }
        let unique: HashSet<_> = targets.iter().collect();
        if unique.len() != targets.len() {
            return Err(ConfigError::DuplicateTargets);
        }

        let optimize = match obj.get("optimize") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(
                s.parse::<Optimize>()
                    .map_err(|_| ConfigError::UnknownOptimize(s.clone()))?,
            ),
            Some(_) => return Err(ConfigError::ExpectedString("optimize")),
        };

        let zig_cwd = match obj.get("zigCwd") {
            None | Some(Value::Null) => PathBuf::from("."),
            Some(Value::String(s)) => PathBuf::from(s),
            Some(_) => return Err(ConfigError::ExpectedString("zigCwd")),
        };

        Ok(FfiConfig {
            name,
            targets,
            optimize,
            zig_cwd,
        })
    }

    /// Library file name for a target.
    pub fn library_name(&self, target: Target) -> String {
        target.library_name(&self.name)
    }
}

/// A `package.json` document.
///
/// Unknown fields are kept, in their original order, so the file can be
/// rewritten without reshuffling it.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageJson {
    /// Path the document was loaded from
    pub path: PathBuf,

    /// Top-level object
    pub fields: Map<String, Value>,
}

impl PackageJson {
    /// Load `package.json` from a package root directory.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(PACKAGE_JSON);
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        Self::parse(&contents, path)
    }

    /// Parse a document from text.
    pub fn parse(contents: &str, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let value: Value = serde_json::from_str(contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        let Value::Object(fields) = value else {
            anyhow::bail!("{} is not a JSON object", path.display());
        };

        Ok(PackageJson { path, fields })
    }

    /// Write the document back with two-space indentation.
    pub fn save(&self) -> Result<()> {
        crate::util::fs::write_json(&self.path, &self.fields)
    }

    /// Get a top-level string field.
    pub fn str_field(&self, key: &'static str) -> Result<&str, ConfigError> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .ok_or(ConfigError::MissingPackageField(key))
    }

    /// The package `name`.
    pub fn name(&self) -> Result<&str, ConfigError> {
        self.str_field("name")
    }

    /// The package `version`.
    pub fn version(&self) -> Result<&str, ConfigError> {
        self.str_field("version")
    }

    /// The validated `"bun-ffi-z"` section.
    pub fn ffi_config(&self) -> Result<FfiConfig, ConfigError> {
        let raw = self.fields.get(CONFIG_KEY).ok_or(ConfigError::MissingConfig)?;
        FfiConfig::parse(raw)
    }

    /// Directory containing this `package.json`.
    pub fn root(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_config() {
        let config = FfiConfig::parse(&json!({
            "name": "example",
            "targets": ["linux-x64-gnu", "darwin-arm64"],
            "optimize": "ReleaseSmall",
            "zigCwd": "zig",
        }))
        .unwrap();

        assert_eq!(config.name, "example");
        assert_eq!(config.targets, vec![Target::LinuxX64Gnu, Target::DarwinArm64]);
        assert_eq!(config.optimize, Some(Optimize::ReleaseSmall));
        assert_eq!(config.zig_cwd, PathBuf::from("zig"));
        assert_eq!(config.library_name(Target::DarwinArm64), "libexample.dylib");
    }

    #[test]
    fn test_defaults() {
        let config =
            FfiConfig::parse(&json!({ "name": "example", "targets": ["win32-x64-msvc"] })).unwrap();
        assert_eq!(config.optimize, None);
        assert_eq!(config.zig_cwd, PathBuf::from("."));
    }

    #[test]
    fn test_validation_errors() {
        let cases = [
            (json!([]), ConfigError::NotAnObject),
            (json!({ "targets": ["darwin-x64"] }), ConfigError::ExpectedString("name")),
            (json!({ "name": "x" }), ConfigError::ExpectedTargetArray),
            (json!({ "name": "x", "targets": [] }), ConfigError::EmptyTargets),
            (
                json!({ "name": "x", "targets": ["darwin-x64", 3] }),
                ConfigError::ExpectedTargetString(1),
            ),
            (
                json!({ "name": "x", "targets": ["freebsd-x64"] }),
                ConfigError::UnknownTarget("freebsd-x64".to_string()),
            ),
            (
                json!({ "name": "x", "targets": ["darwin-x64", "darwin-x64"] }),
                ConfigError::DuplicateTargets,
            ),
            (
                json!({ "name": "x", "targets": ["darwin-x64"], "optimize": "Fast" }),
                ConfigError::UnknownOptimize("Fast".to_string()),
            ),
            (
                json!({ "name": "x", "targets": ["darwin-x64"], "optimize": 1 }),
                ConfigError::ExpectedString("optimize"),
            ),
            (
                json!({ "name": "x", "targets": ["darwin-x64"], "zigCwd": false }),
                ConfigError::ExpectedString("zigCwd"),
            ),
        ];

        for (input, expected) in cases {
            assert_eq!(FfiConfig::parse(&input).unwrap_err(), expected, "{}", input);
        }
    }

    #[test]
    fn test_missing_section() {
        let pkg = PackageJson::parse(r#"{ "name": "pkg" }"#, "package.json").unwrap();
        assert_eq!(pkg.ffi_config().unwrap_err(), ConfigError::MissingConfig);
        assert_eq!(
            pkg.version().unwrap_err(),
            ConfigError::MissingPackageField("version")
        );
    }

    #[test]
    fn test_round_trip_keeps_field_order() {
        let tmp = tempfile::TempDir::new().unwrap();
        let text = "{\n  \"version\": \"1.0.0\",\n  \"name\": \"pkg\",\n  \"zeta\": 1,\n  \"alpha\": 2\n}\n";
        std::fs::write(tmp.path().join(PACKAGE_JSON), text).unwrap();

        let pkg = PackageJson::load(tmp.path()).unwrap();
        pkg.save().unwrap();

        let written = std::fs::read_to_string(tmp.path().join(PACKAGE_JSON)).unwrap();
        assert_eq!(written, text);
        assert_eq!(pkg.root(), tmp.path());
    }
}
