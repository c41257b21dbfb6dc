//! YAML helpers for record files

pub mod diagnostics;

pub use diagnostics::YamlSyntaxError;
