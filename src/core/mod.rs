//! Core module - record loading, merging and configuration

pub mod config;
pub mod loader;
pub mod markdown;
pub mod merge;

pub use config::{Config, ConfigError, Settings};
pub use loader::{load_system, parse_system, LoadError};
pub use markdown::{CommonMark, MarkdownRenderer, MARKDOWN_PREFIX};
pub use merge::merge;
