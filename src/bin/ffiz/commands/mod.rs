//! Command implementations

pub mod build;
pub mod completions;
pub mod locate;
pub mod prepublish;
pub mod publish;
pub mod symbols;
pub mod targets;
