//! Entity type definitions
//!
//! - [`System`] - a runbook record as authored in YAML, with its links and contacts
//! - [`SystemAttributes`] - the flattened record stored on the CMDB system item
//! - [`Relationship`] - a typed edge between a system and a contact

pub mod attributes;
pub mod relationship;
pub mod system;

pub use attributes::SystemAttributes;
pub use relationship::Relationship;
pub use system::{Contact, ContactEntry, ContactRole, Link, System};
