//! High-level operations.
//!
//! This module contains the implementation of ffiz commands.

pub mod locate;
pub mod prepublish;
pub mod publish;
pub mod symbols;
pub mod zig_build;

pub use locate::{library_search_paths, locate_library, LocateOptions};
pub use prepublish::{
    copy_target_library, prepublish, target_package_json, update_optional_dependencies,
    write_target_package, PrepublishOptions, PrepublishResult, TARGET_PACKAGES_DIR,
};
pub use publish::{publish, publish_commands, PublishOptions};
pub use symbols::{generate_symbols, SymbolsOptions, SymbolsOutput};
pub use zig_build::{build, zig_build_command, BuildOptions};
