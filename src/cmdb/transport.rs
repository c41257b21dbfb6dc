//! HTTP transport for the CMDB client
//!
//! The client builds requests and interprets responses; a [`Transport`]
//! only moves them over the wire. [`HttpTransport`] is the real one.

use reqwest::{Method, Url};
use std::time::Duration;

use crate::cmdb::error::CmdbError;

/// Idle pooled connections kept per host
pub const MAX_IDLE_CONNECTIONS: usize = 32;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// An outgoing CMDB request
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl Request {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A CMDB response with its body read to completion
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and blocks until the response arrives
pub trait Transport {
    fn send(&self, request: Request) -> Result<Response, CmdbError>;
}

/// Blocking reqwest transport with a bounded timeout and connection pool
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, CmdbError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .tcp_keepalive(Duration::from_secs(30))
            .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS)
            .build()
            .map_err(|e| CmdbError::Transport {
                method: "INIT".to_string(),
                url: String::new(),
                message: e.to_string(),
            })?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: Request) -> Result<Response, CmdbError> {
        let method = request.method.to_string();
        let url = request.url.to_string();
        let transport_error = |e: reqwest::Error| CmdbError::Transport {
            method: method.clone(),
            url: url.clone(),
            message: e.to_string(),
        };

        let mut builder = self.client.request(request.method, request.url);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(transport_error)?;

        Ok(Response { status, body })
    }
}
