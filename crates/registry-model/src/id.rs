//! TOIL registry identifiers

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Pattern every registry identifier must match: `T4L-TOIL-` followed by a
/// three-digit zero-padded sequence and an uppercase alphanumeric slug.
pub static TOIL_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^T4L-TOIL-[0-9]{3}-[A-Z0-9]+$").unwrap());

/// A validated registry identifier, the primary key of a product entry.
///
/// Lexicographic ordering sorts the zero-padded sequence numerically, so
/// `Ord` is the export sort order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToilId(String);

impl ToilId {
    /// Parse an identifier, rejecting anything that does not match the
    /// registry pattern.
    pub fn parse(raw: &str) -> Result<Self> {
        if TOIL_ID_PATTERN.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(Error::InvalidIdFormat {
                id: raw.to_string(),
            })
        }
    }

    /// Check a raw string against the identifier pattern without allocating.
    pub fn is_valid(raw: &str) -> bool {
        TOIL_ID_PATTERN.is_match(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ToilId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ToilId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
