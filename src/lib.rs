//! runbook: CMDB runbook synchronizer
//!
//! Merges a global defaults record with a system's own runbook record and
//! pushes the result to the CMDB: contact relationships as graph edges, the
//! rest as the system's attributes.

pub mod cli;
pub mod cmdb;
pub mod core;
pub mod entities;
pub mod schema;
pub mod yaml;
