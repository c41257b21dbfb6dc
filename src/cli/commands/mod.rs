//! CLI command implementations

pub mod completions;
pub mod get;
pub mod show;
pub mod sync;
pub mod validate;
