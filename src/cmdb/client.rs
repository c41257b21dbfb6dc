//! CMDB REST client
//!
//! All requests carry the API key header. Each request URL is built from the
//! immutable base endpoint plus a path; the endpoint itself is never
//! modified.

use reqwest::{Method, Url};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::cmdb::error::CmdbError;
use crate::cmdb::transport::{HttpTransport, Request, Response, Transport};
use crate::entities::{Contact, ContactRole, Relationship, System, SystemAttributes};
use crate::schema::template::TemplateGenerator;

/// Header carrying the CMDB API key
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Client for one CMDB endpoint
pub struct CmdbClient<T: Transport = HttpTransport> {
    transport: T,
    endpoint: Url,
    api_key: String,
    templates: TemplateGenerator,
}

impl CmdbClient<HttpTransport> {
    /// Connect over HTTP with the given per-request timeout
    pub fn connect(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self, CmdbError> {
        Self::with_transport(HttpTransport::new(timeout)?, endpoint, api_key)
    }
}

impl<T: Transport> CmdbClient<T> {
    /// Create a client over an arbitrary transport
    pub fn with_transport(
        transport: T,
        endpoint: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, CmdbError> {
        Ok(Self {
            transport,
            endpoint: parse_endpoint(endpoint)?,
            api_key: api_key.into(),
            templates: TemplateGenerator::new()?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch a system's attribute record
    pub fn get_system(&self, system_code: &str) -> Result<SystemAttributes, CmdbError> {
        if system_code.is_empty() {
            return Err(CmdbError::MissingSystemCode);
        }

        let url = self.url(&["v2", "items", "system", system_code]);
        let response = self.request(Method::GET, url.clone(), None)?;
        info!("Get system [{}]: {}", url, response.status);

        if response.status == 404 {
            return Err(CmdbError::NotFound {
                system_code: system_code.to_string(),
            });
        }
        let response = check_status(&Method::GET, &url, response)?;
        decode(&url, &response)
    }

    /// Upsert a system's attribute record
    ///
    /// Fails before any request if the system code is empty.
    pub fn upsert_attributes(&self, attrs: &SystemAttributes) -> Result<(), CmdbError> {
        if attrs.system_code.is_empty() {
            return Err(CmdbError::MissingSystemCode);
        }

        let body = serde_json::to_string(attrs).map_err(CmdbError::Encode)?;
        let url = self.url(&["v2", "items", "system", &attrs.system_code]);
        let response = self.request(Method::PUT, url.clone(), Some(body))?;
        info!("Update system [{}]: {}", url, response.status);

        check_status(&Method::PUT, &url, response)?;
        Ok(())
    }

    /// Current edges of one type from a system
    ///
    /// A 404 means the system has no such edges.
    pub fn relationships(
        &self,
        system_code: &str,
        relationship_type: &str,
    ) -> Result<Vec<Relationship>, CmdbError> {
        let url = self.url(&["v2", "relationships", "system", system_code, relationship_type]);
        let response = self.request(Method::GET, url.clone(), None)?;
        info!("Get relationship [{}]: {}", url, response.status);

        if response.status == 404 {
            return Ok(Vec::new());
        }
        let response = check_status(&Method::GET, &url, response)?;
        decode(&url, &response)
    }

    pub fn delete_relationship(&self, relationship: &Relationship) -> Result<(), CmdbError> {
        let url = self.url(&relationship.path_segments());
        let response = self.request(Method::DELETE, url.clone(), None)?;
        info!("Delete relationship {} [{}]: {}", relationship, url, response.status);

        check_status(&Method::DELETE, &url, response)?;
        Ok(())
    }

    pub fn create_relationship(&self, relationship: &Relationship) -> Result<(), CmdbError> {
        let url = self.url(&relationship.path_segments());
        let response = self.request(Method::PUT, url.clone(), None)?;
        info!("Create relationship {} [{}]: {}", relationship, url, response.status);

        check_status(&Method::PUT, &url, response)?;
        Ok(())
    }

    /// Replace every `relationship_type` edge from `system` with one edge per
    /// contact entry
    ///
    /// Existing edges are all deleted before the new ones are created. A
    /// failure part way through leaves whatever has already been deleted
    /// deleted.
    pub fn reconcile_relationship(
        &self,
        relationship_type: &str,
        contact: &Contact,
        system: &System,
    ) -> Result<(), CmdbError> {
        if system.system_code.is_empty() {
            return Err(CmdbError::MissingSystemCode);
        }
        if contact.entries.iter().any(|e| e.data_item_id.is_empty()) {
            return Err(CmdbError::MissingDataItemId {
                relationship_type: relationship_type.to_string(),
            });
        }

        let existing = self.relationships(&system.system_code, relationship_type)?;
        for relationship in &existing {
            self.delete_relationship(relationship)?;
        }

        for entry in &contact.entries {
            debug!("contact: {:?}", entry);
            let relationship = Relationship::system_contact(
                system.system_code.as_str(),
                relationship_type,
                entry.data_item_id.as_str(),
            );
            self.create_relationship(&relationship)?;
        }

        Ok(())
    }

    /// Push a merged system to the CMDB
    ///
    /// Reconciles each contact role in [`ContactRole::ALL`] order, then
    /// upserts the attribute record. Stops at the first failure.
    pub fn update_system(&self, system: &System) -> Result<(), CmdbError> {
        if system.system_code.is_empty() {
            return Err(CmdbError::MissingSystemCode);
        }

        for role in ContactRole::ALL {
            self.reconcile_relationship(role.as_str(), system.contact(role), system)
                .map_err(|e| {
                    error!("Error updating {}, {}", role, e);
                    CmdbError::Step {
                        step: role.as_str(),
                        source: Box::new(e),
                    }
                })?;
        }

        system
            .to_attributes(&self.templates)
            .map_err(CmdbError::from)
            .and_then(|attrs| self.upsert_attributes(&attrs))
            .map_err(|e| {
                error!("Error updating attributes, {}", e);
                CmdbError::Step {
                    step: "attributes",
                    source: Box::new(e),
                }
            })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.endpoint.clone();
        url.set_query(None);
        url.set_fragment(None);
        // parse_endpoint rejects cannot-be-a-base URLs
        if let Ok(mut path) = url.path_segments_mut() {
            path.clear().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url, body: Option<String>) -> Result<Response, CmdbError> {
        let mut headers = vec![(API_KEY_HEADER, self.api_key.clone())];
        if body.is_some() {
            headers.push(("Content-Type", "application/json".to_string()));
        }

        self.transport.send(Request {
            method,
            url,
            headers,
            body,
        })
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, CmdbError> {
    let invalid = |reason: String| CmdbError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("expected an http or https URL".to_string()));
    }
    Ok(url)
}

fn check_status(method: &Method, url: &Url, response: Response) -> Result<Response, CmdbError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(CmdbError::Status {
            method: method.to_string(),
            url: url.to_string(),
            status: response.status,
        })
    }
}

fn decode<D: serde::de::DeserializeOwned>(url: &Url, response: &Response) -> Result<D, CmdbError> {
    serde_json::from_str(&response.body).map_err(|source| CmdbError::Decode {
        url: url.to_string(),
        source,
    })
}
