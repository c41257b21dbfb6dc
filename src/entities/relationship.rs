//! Relationship entity type - a typed edge in the CMDB graph

use serde::{Deserialize, Serialize};

/// Subject type used for system-owned edges
pub const SYSTEM_TYPE: &str = "system";

/// Object type used for contact edges
pub const CONTACT_TYPE: &str = "contact";

/// A directed, typed edge between two CMDB items
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub subject_type: String,

    #[serde(rename = "subjectID")]
    pub subject_id: String,

    pub relationship_type: String,

    pub object_type: String,

    #[serde(rename = "objectID")]
    pub object_id: String,
}

impl Relationship {
    /// Edge from a system to a contact
    pub fn system_contact(
        system_code: impl Into<String>,
        relationship_type: impl Into<String>,
        data_item_id: impl Into<String>,
    ) -> Self {
        Self {
            subject_type: SYSTEM_TYPE.to_string(),
            subject_id: system_code.into(),
            relationship_type: relationship_type.into(),
            object_type: CONTACT_TYPE.to_string(),
            object_id: data_item_id.into(),
        }
    }

    /// Path segments addressing this edge under `/v2/relationships`
    pub fn path_segments(&self) -> [&str; 7] {
        [
            "v2",
            "relationships",
            &self.subject_type,
            &self.subject_id,
            &self.relationship_type,
            &self.object_type,
            &self.object_id,
        ]
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} -[{}]-> {}/{}",
            self.subject_type,
            self.subject_id,
            self.relationship_type,
            self.object_type,
            self.object_id
        )
    }
}
