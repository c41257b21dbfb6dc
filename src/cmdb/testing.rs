//! In-memory CMDB used by the client tests

use reqwest::Method;
use std::cell::RefCell;
use std::collections::HashMap;

use crate::cmdb::error::CmdbError;
use crate::cmdb::transport::{Request, Response, Transport};
use crate::entities::{Relationship, SystemAttributes};

/// Fake CMDB holding items and edges, recording every request it receives
#[derive(Default)]
pub struct FakeCmdb {
    items: RefCell<HashMap<String, SystemAttributes>>,
    edges: RefCell<Vec<Relationship>>,
    requests: RefCell<Vec<Request>>,
    overrides: RefCell<HashMap<(Method, String), Response>>,
}

impl FakeCmdb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_edge(&self, relationship: Relationship) {
        self.edges.borrow_mut().push(relationship);
    }

    pub fn put_attributes(&self, attrs: SystemAttributes) {
        self.items
            .borrow_mut()
            .insert(attrs.system_code.clone(), attrs);
    }

    /// Answer `method path` with an error status instead of handling it
    pub fn fail_on(&self, method: Method, path: &str, status: u16) {
        self.respond_with(method, path, Response::new(status, ""));
    }

    /// Answer `method path` with a canned response instead of handling it
    pub fn respond_with(&self, method: Method, path: &str, response: Response) {
        self.overrides
            .borrow_mut()
            .insert((method, path.to_string()), response);
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    pub fn attributes(&self, system_code: &str) -> Option<SystemAttributes> {
        self.items.borrow().get(system_code).cloned()
    }

    /// Object IDs of the `relationship_type` edges from a system, in insertion order
    pub fn edge_targets(&self, system_code: &str, relationship_type: &str) -> Vec<String> {
        self.edges
            .borrow()
            .iter()
            .filter(|r| r.subject_id == system_code && r.relationship_type == relationship_type)
            .map(|r| r.object_id.clone())
            .collect()
    }

    fn handle(&self, request: &Request) -> Response {
        let segments: Vec<String> = request
            .url
            .path_segments()
            .map(|s| s.map(|p| p.to_string()).collect())
            .unwrap_or_default();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        match (request.method.as_str(), segments.as_slice()) {
            ("GET", ["v2", "items", "system", code]) => match self.items.borrow().get(*code) {
                Some(attrs) => Response::new(200, serde_json::to_string(attrs).unwrap_or_default()),
                None => Response::new(404, ""),
            },
            ("PUT", ["v2", "items", "system", _]) => {
                let body = request.body.as_deref().unwrap_or_default();
                match serde_json::from_str::<SystemAttributes>(body) {
                    Ok(attrs) => {
                        self.put_attributes(attrs);
                        Response::new(200, "")
                    }
                    Err(_) => Response::new(400, ""),
                }
            }
            ("GET", ["v2", "relationships", "system", code, rel_type]) => {
                let edges: Vec<Relationship> = self
                    .edges
                    .borrow()
                    .iter()
                    .filter(|r| r.subject_id == *code && r.relationship_type == *rel_type)
                    .cloned()
                    .collect();
                if edges.is_empty() {
                    Response::new(404, "")
                } else {
                    Response::new(200, serde_json::to_string(&edges).unwrap_or_default())
                }
            }
            (method, ["v2", "relationships", subject_type, subject_id, rel_type, object_type, object_id]) => {
                let edge = Relationship {
                    subject_type: subject_type.to_string(),
                    subject_id: subject_id.to_string(),
                    relationship_type: rel_type.to_string(),
                    object_type: object_type.to_string(),
                    object_id: object_id.to_string(),
                };
                let mut edges = self.edges.borrow_mut();
                if method == "DELETE" {
                    let before = edges.len();
                    edges.retain(|r| *r != edge);
                    if edges.len() == before {
                        Response::new(404, "")
                    } else {
                        Response::new(200, "")
                    }
                } else if method == "PUT" {
                    if !edges.contains(&edge) {
                        edges.push(edge);
                    }
                    Response::new(200, "")
                } else {
                    Response::new(405, "")
                }
            }
            _ => Response::new(404, ""),
        }
    }
}

impl Transport for FakeCmdb {
    fn send(&self, request: Request) -> Result<Response, CmdbError> {
        self.requests.borrow_mut().push(request.clone());

        let key = (request.method.clone(), request.url.path().to_string());
        if let Some(response) = self.overrides.borrow().get(&key) {
            return Ok(response.clone());
        }
        Ok(self.handle(&request))
    }
}
