//! Product entries and lifecycle status

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::id::ToilId;

/// Lifecycle status of a registered product.
///
/// Entries are never deleted; archival is `Dormant`. Only the current
/// value is validated here, not transition history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Concept,
    Prototype,
    Active,
    Licensed,
    Dormant,
}

impl Status {
    /// All recognized enumerants, in document order.
    pub const ALL: [Status; 5] = [
        Status::Concept,
        Status::Prototype,
        Status::Active,
        Status::Licensed,
        Status::Dormant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Concept => "Concept",
            Status::Prototype => "Prototype",
            Status::Active => "Active",
            Status::Licensed => "Licensed",
            Status::Dormant => "Dormant",
        }
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Concept" => Ok(Status::Concept),
            "Prototype" => Ok(Status::Prototype),
            "Active" => Ok(Status::Active),
            "Licensed" => Ok(Status::Licensed),
            "Dormant" => Ok(Status::Dormant),
            other => Err(Error::InvalidStatus {
                status: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One validated row of the canonical index.
///
/// Serde field order is the serialization order of both export shapes.
/// The optional sequences are always serialized, empty when the source
/// cell was blank, so the entry shape is stable across the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductEntry {
    pub toil_id: ToilId,
    pub product_name: String,
    pub category: String,
    pub lead_creator: String,
    pub status: Status,
    pub license_state: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub legacy_ids: Vec<String>,
}
