//! System entity type - the runbook record authored next to a service

use serde::{Deserialize, Serialize};

/// A named hyperlink shown in the runbook (dashboards, docs, etc.)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Display name
    #[serde(default)]
    pub name: String,

    /// Target URL
    #[serde(default)]
    pub link: String,
}

impl Link {
    pub fn new(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
        }
    }
}

/// A single contact or team known to the CMDB
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactEntry {
    /// CMDB item ID - the join key for relationship edges
    #[serde(rename = "dataItemID")]
    pub data_item_id: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,

    /// Preferred contact method
    #[serde(skip_serializing_if = "String::is_empty")]
    pub contact_pref: String,

    /// Person, team, etc.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub contact_type: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub programme: String,

    /// Chat handle or channel
    #[serde(skip_serializing_if = "String::is_empty")]
    pub slack: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub support_rota: String,
}

impl ContactEntry {
    pub fn new(data_item_id: impl Into<String>) -> Self {
        Self {
            data_item_id: data_item_id.into(),
            ..Default::default()
        }
    }
}

/// A set of contacts filling one role on a system
///
/// A contact with no entries is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "contact", default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<ContactEntry>,
}

impl Contact {
    pub fn new(entries: Vec<ContactEntry>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The relationship roles a contact can fill on a system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactRole {
    PrimaryContact,
    SecondaryContact,
    Programme,
    ProductOwner,
    TechnicalLead,
}

impl ContactRole {
    /// All roles, in the order they are synchronized
    pub const ALL: [ContactRole; 5] = [
        ContactRole::PrimaryContact,
        ContactRole::SecondaryContact,
        ContactRole::Programme,
        ContactRole::ProductOwner,
        ContactRole::TechnicalLead,
    ];

    /// The CMDB relationship type name
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactRole::PrimaryContact => "primaryContact",
            ContactRole::SecondaryContact => "secondaryContact",
            ContactRole::Programme => "programme",
            ContactRole::ProductOwner => "productOwner",
            ContactRole::TechnicalLead => "technicalLead",
        }
    }
}

impl std::fmt::Display for ContactRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A system record as authored in YAML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct System {
    /// Unique CMDB key
    #[serde(skip_serializing_if = "String::is_empty")]
    pub system_code: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub service_tier: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub lifecycle_stage: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub architecture_diagram: String,

    /// Literal HTML/text, or an `MD://` reference until resolved
    #[serde(skip_serializing_if = "String::is_empty")]
    pub troubleshooting: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub more_information: Vec<Link>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub monitoring: Vec<Link>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub git_repository: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub host_platform: String,

    #[serde(skip_serializing_if = "Contact::is_empty")]
    pub primary_contact: Contact,

    #[serde(skip_serializing_if = "Contact::is_empty")]
    pub secondary_contact: Contact,

    #[serde(skip_serializing_if = "Contact::is_empty")]
    pub programme: Contact,

    #[serde(skip_serializing_if = "Contact::is_empty")]
    pub product_owner: Contact,

    #[serde(skip_serializing_if = "Contact::is_empty")]
    pub technical_lead: Contact,
}

impl System {
    /// Get the contact filling the given role
    pub fn contact(&self, role: ContactRole) -> &Contact {
        match role {
            ContactRole::PrimaryContact => &self.primary_contact,
            ContactRole::SecondaryContact => &self.secondary_contact,
            ContactRole::Programme => &self.programme,
            ContactRole::ProductOwner => &self.product_owner,
            ContactRole::TechnicalLead => &self.technical_lead,
        }
    }

    /// Mutable access to the contact filling the given role
    pub fn contact_mut(&mut self, role: ContactRole) -> &mut Contact {
        match role {
            ContactRole::PrimaryContact => &mut self.primary_contact,
            ContactRole::SecondaryContact => &mut self.secondary_contact,
            ContactRole::Programme => &mut self.programme,
            ContactRole::ProductOwner => &mut self.product_owner,
            ContactRole::TechnicalLead => &mut self.technical_lead,
        }
    }
}
