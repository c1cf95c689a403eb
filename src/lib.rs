//! ffiz - Bun FFI packaging for Zig libraries
//!
//! This crate scans Zig sources for exported functions and builds the
//! `bun:ffi` binding table for them, and drives the cross-compile,
//! per-target packaging and publishing of the resulting shared libraries.

pub mod bindings;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and fixtures for ffiz unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests.
#[cfg(test)]
pub mod test_support;

pub use crate::bindings::{
    map_type, scan_source, AbiType, BindingError, BindingTable, FunctionDescriptor, SourceUnit,
};
pub use crate::core::{
    config::{FfiConfig, PackageJson},
    target::{Optimize, Target},
};
