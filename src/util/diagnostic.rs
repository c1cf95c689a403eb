//! User-facing diagnostic messages.
//!
//! Errors reaching the CLI are turned into a [`Diagnostic`] carrying the
//! error chain as context and, for the failures users can fix themselves,
//! a suggestion.

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::bindings::BindingError;
use crate::core::config::ConfigError;
use crate::core::target::TargetError;

/// Hints printed under errors the user can fix.
pub mod suggestions {
    /// Suggestion when the `"bun-ffi-z"` section is missing or invalid.
    pub const INVALID_CONFIG: &str =
        "help: Add a \"bun-ffi-z\" object with \"name\" and \"targets\" to package.json";

    /// Suggestion when a target name is not recognized.
    pub const UNKNOWN_TARGET: &str = "help: Run `ffiz targets` to see supported targets";

    /// Suggestion when a Zig type has no FFI mapping.
    pub const UNSUPPORTED_TYPE: &str =
        "help: Add a `// bun-ffi-z: name (args) ret` directive on the line above the declaration";

    /// Suggestion when a declaration could not be parsed.
    pub const MALFORMED_DECLARATION: &str =
        "help: Write the declaration as `export fn name(a: T, ...) R {`";

    /// Suggestion when the compiled library cannot be found.
    pub const LIBRARY_NOT_FOUND: &str =
        "help: Run `ffiz build` or install the matching platform package";
}

/// An error as shown to the user: a headline, the chain of causes
/// beneath it, the Zig file involved and at most one hint.
#[derive(Debug, Clone, Default)]
pub struct Diagnostic {
    pub message: String,
    pub causes: Vec<String>,
    pub help: Option<&'static str>,
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Build a diagnostic from an error chain.
    ///
    /// The outermost message becomes the headline. The first cause of a
    /// known kind picks the hint, and a failing Zig file anywhere in the
    /// chain becomes the location.
    pub fn from_error(err: &anyhow::Error) -> Self {
        Diagnostic {
            message: err.to_string(),
            causes: err.chain().skip(1).map(|c| c.to_string()).collect(),
            help: err.chain().find_map(suggestion_for),
            location: err.chain().find_map(|cause| match cause.downcast_ref::<BindingError>() {
                Some(BindingError::InFile { path, .. }) => Some(path.clone()),
                _ => None,
            }),
        }
    }

    /// Render for the terminal, with a red `error` label when `color` is set.
    pub fn format(&self, color: bool) -> String {
        let label = if color { "\x1b[1;31merror\x1b[0m" } else { "error" };
        let mut output = format!("{}: {}\n", label, self.message);

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }
        for cause in &self.causes {
            output.push_str(&format!("  → {}\n", cause));
        }
        if let Some(help) = self.help {
            output.push_str(help);
            output.push('\n');
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

fn suggestion_for(cause: &(dyn std::error::Error + 'static)) -> Option<&'static str> {
    if let Some(err) = cause.downcast_ref::<ConfigError>() {
        return Some(match err {
            ConfigError::UnknownTarget(_) => suggestions::UNKNOWN_TARGET,
            _ => suggestions::INVALID_CONFIG,
        });
    }
    if let Some(err) = cause.downcast_ref::<TargetError>() {
        return match err {
            TargetError::UnknownTarget(_) => Some(suggestions::UNKNOWN_TARGET),
            _ => None,
        };
    }
    if let Some(err) = cause.downcast_ref::<BindingError>() {
        return match err.root() {
            BindingError::UnsupportedType { .. } => Some(suggestions::UNSUPPORTED_TYPE),
            BindingError::MalformedDeclaration { .. } => Some(suggestions::MALFORMED_DECLARATION),
            _ => None,
        };
    }
    if cause.downcast_ref::<LibraryNotFoundError>().is_some() {
        return Some(suggestions::LIBRARY_NOT_FOUND);
    }
    None
}

/// The compiled library could not be found for the host.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("library `{library}` not found for {platform}-{arch}")]
#[diagnostic(
    code(ffiz::locate::not_found),
    help("Run `ffiz build` or install the matching platform package")
)]
pub struct LibraryNotFoundError {
    pub library: String,
    pub platform: String,
    pub arch: String,
    /// Every path that was checked, in search order
    pub searched: Vec<PathBuf>,
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic {
            message: "failed to scan src/root.zig".to_string(),
            causes: vec!["unsupported type `[]u8` in `concat` (line 4)".to_string()],
            help: Some(suggestions::UNSUPPORTED_TYPE),
            location: Some(PathBuf::from("src/root.zig")),
        };

        let output = diag.format(false);
        assert!(output.starts_with("error: failed to scan"));
        assert!(output.contains("  --> src/root.zig"));
        assert!(output.contains("unsupported type `[]u8`"));
        assert!(output.ends_with("above the declaration\n"));
        assert!(diag.format(true).starts_with("\x1b[1;31merror"));
    }

    #[test]
    fn test_from_error_picks_suggestion() {
        let err = anyhow::Error::new(ConfigError::EmptyTargets).context("failed to load config");
        let diag = Diagnostic::from_error(&err);

        assert_eq!(diag.message, "failed to load config");
        assert_eq!(
            diag.causes,
            vec!["Invalid config: expected non-empty array \"targets\"".to_string()]
        );
        assert_eq!(diag.help, Some(suggestions::INVALID_CONFIG));
        assert_eq!(diag.location, None);
    }

    #[test]
    fn test_from_error_binding_location() {
        let err = anyhow::Error::new(
            BindingError::malformed("add", 3, "missing `{`").in_file("src/root.zig"),
        )
        .context("failed to generate symbols");
        let diag = Diagnostic::from_error(&err);

        assert_eq!(diag.location, Some(PathBuf::from("src/root.zig")));
        assert_eq!(diag.help, Some(suggestions::MALFORMED_DECLARATION));
    }

    #[test]
    fn test_library_not_found_message() {
        let err = LibraryNotFoundError {
            library: "libmath.so".to_string(),
            platform: "linux".to_string(),
            arch: "x64".to_string(),
            searched: Vec::new(),
        };
        assert_eq!(err.to_string(), "library `libmath.so` not found for linux-x64");
        assert_eq!(suggestion_for(&err), Some(suggestions::LIBRARY_NOT_FOUND));
    }
}
