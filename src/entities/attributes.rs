//! System attributes - the flattened record stored on a CMDB system item

use serde::{Deserialize, Serialize};

use crate::entities::system::System;
use crate::schema::template::{TemplateError, TemplateGenerator};

/// Wire form of a [`System`] for the attribute upsert call
///
/// Link lists are carried as rendered HTML tables. Contacts are not part of
/// the attribute record; they travel as relationship edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemAttributes {
    pub system_code: String,
    pub name: String,
    pub description: String,
    pub service_tier: String,
    pub lifecycle_stage: String,
    pub architecture_diagram: String,
    pub more_information: String,
    pub troubleshooting: String,
    pub monitoring: String,
    pub git_repository: String,
    pub host_platform: String,
}

impl SystemAttributes {
    /// Field name/value pairs in wire order, for tabular display
    pub fn fields(&self) -> [(&'static str, &str); 11] {
        [
            ("systemCode", &self.system_code),
            ("name", &self.name),
            ("description", &self.description),
            ("serviceTier", &self.service_tier),
            ("lifecycleStage", &self.lifecycle_stage),
            ("architectureDiagram", &self.architecture_diagram),
            ("moreInformation", &self.more_information),
            ("troubleshooting", &self.troubleshooting),
            ("monitoring", &self.monitoring),
            ("gitRepository", &self.git_repository),
            ("hostPlatform", &self.host_platform),
        ]
    }
}

impl System {
    /// Project this system onto its CMDB attribute record
    pub fn to_attributes(
        &self,
        templates: &TemplateGenerator,
    ) -> Result<SystemAttributes, TemplateError> {
        Ok(SystemAttributes {
            system_code: self.system_code.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            service_tier: self.service_tier.clone(),
            lifecycle_stage: self.lifecycle_stage.clone(),
            architecture_diagram: self.architecture_diagram.clone(),
            more_information: templates.link_table(&self.more_information)?,
            troubleshooting: self.troubleshooting.clone(),
            monitoring: templates.link_table(&self.monitoring)?,
            git_repository: self.git_repository.clone(),
            host_platform: self.host_platform.clone(),
        })
    }
}
