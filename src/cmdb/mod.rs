//! CMDB access - the only part of runbook that talks to the network

pub mod client;
pub mod error;
pub mod transport;

#[cfg(test)]
mod testing;

pub use client::{CmdbClient, API_KEY_HEADER};
pub use error::CmdbError;
pub use transport::{HttpTransport, Request, Response, Transport, DEFAULT_TIMEOUT};
