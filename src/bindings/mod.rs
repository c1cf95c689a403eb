//! Bun FFI binding generation for Zig libraries.
//!
//! This module scans Zig sources for exported functions and `bun-ffi-z`
//! override directives and builds the binding table that `bun:ffi` needs to
//! open the compiled library.

pub mod annotation;
pub mod emit;
pub mod error;
pub mod mapper;
pub mod scanner;
pub mod table;
pub mod types;

pub use annotation::{OverrideDirective, DIRECTIVE_MARKER};
pub use emit::EmitFormat;
pub use error::{BindingError, UnsupportedTypeError};
pub use mapper::{map_type, TypeMatcher, TYPE_RULES};
pub use scanner::{scan_source, RawDeclaration, ScanItem, Scanner};
pub use table::SourceUnit;
pub use types::{AbiType, BindingTable, FunctionDescriptor};
