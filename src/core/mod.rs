//! Core data structures for ffiz.
//!
//! This module contains the foundational types used throughout the tool:
//! - Packaging targets and their Zig triples
//! - The `"bun-ffi-z"` section of `package.json`

pub mod config;
pub mod target;

pub use config::{ConfigError, FfiConfig, PackageJson, CONFIG_KEY, PACKAGE_JSON};
pub use target::{Arch, Optimize, Platform, Target, TargetError};
