//! Test utilities for ffiz unit tests.
//!
//! Provides fixture generators for Zig projects laid out the way `ffiz`
//! expects: a `package.json` with a `"bun-ffi-z"` section and Zig sources
//! next to it.
//!
//! # Example
//!
//! ```rust,ignore
//! use ffiz::test_support::ProjectFixture;
//!
//! #[test]
//! fn test_example() {
//!     let tmp = tempfile::TempDir::new().unwrap();
//!     let root = ProjectFixture::library("mathlib", "math", &["linux-x64-gnu"])
//!         .write_to(tmp.path())
//!         .unwrap();
//!     // Run operations against `root`...
//! }
//! ```

pub mod fixtures;

pub use fixtures::*;
