//! Errors raised while extracting bindings from Zig sources.
//!
//! None of these are recovered inside the extractor: the first one aborts the
//! whole build and is handed back to the caller.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// A type token that has no ABI mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("unsupported Zig type `{token}`")]
#[diagnostic(
    code(ffiz::bindings::unsupported_type),
    help("supported types are void, bool, u8-u64, i8-i64, c_int, c_uint, usize, size and pointers")
)]
pub struct UnsupportedTypeError {
    pub token: String,
}

impl UnsupportedTypeError {
    pub fn new(token: impl Into<String>) -> Self {
        UnsupportedTypeError {
            token: token.into(),
        }
    }
}

/// Error during binding extraction.
#[derive(Debug, Error, Diagnostic)]
pub enum BindingError {
    #[error("unsupported Zig type `{token}` in `{function}` (line {line})")]
    #[diagnostic(
        code(ffiz::bindings::unsupported_type),
        help("put `// bun-ffi-z: {function} (<args>) <return>` on the line above the declaration")
    )]
    UnsupportedType {
        token: String,
        function: String,
        line: usize,
    },

    #[error("malformed declaration of `{function}` (line {line}): {reason}")]
    #[diagnostic(code(ffiz::bindings::malformed_declaration))]
    MalformedDeclaration {
        function: String,
        line: usize,
        reason: String,
    },

    #[error("failed to read Zig source: {}", path.display())]
    #[diagnostic(code(ffiz::bindings::read))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", path.display())]
    #[diagnostic(code(ffiz::bindings::in_file))]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<BindingError>,
    },
}

impl BindingError {
    pub(crate) fn unsupported(err: UnsupportedTypeError, function: &str, line: usize) -> Self {
        BindingError::UnsupportedType {
            token: err.token,
            function: function.to_string(),
            line,
        }
    }

    pub(crate) fn malformed(function: &str, line: usize, reason: impl Into<String>) -> Self {
        BindingError::MalformedDeclaration {
            function: function.to_string(),
            line,
            reason: reason.into(),
        }
    }

    /// Attach the source file the error came from.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        BindingError::InFile {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// The underlying error, with any file context peeled off.
    pub fn root(&self) -> &BindingError {
        match self {
            BindingError::InFile { source, .. } => source.root(),
            other => other,
        }
    }
}
