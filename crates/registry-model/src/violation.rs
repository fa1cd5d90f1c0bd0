//! Registry invariant violations
//!
//! The cross-validator collects every violation it finds into a structured
//! list rather than stopping at the first, so one run surfaces the full
//! defect report. Ordering is deterministic: identifier first, then kind.

use serde::{Deserialize, Serialize};

/// One invariant violation, attributed to the identifier it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The identifier (or raw identifier cell) the violation concerns.
    pub toil_id: String,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(toil_id: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            toil_id: toil_id.into(),
            kind,
        }
    }

    /// Sort key: identifier, then the kind's fixed rank.
    pub fn sort_key(&self) -> (String, u8) {
        (self.toil_id.clone(), self.kind.rank())
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.toil_id, self.kind)
    }
}

/// Kinds of cross-validation violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    /// Identifier does not match the registry pattern.
    InvalidIdFormat,
    /// Identifier appears in more than one index row.
    DuplicateId,
    /// Index entry has no record file.
    MissingRecord,
    /// Record file has no index entry.
    OrphanRecord,
    /// A field disagrees between the index and the record.
    FieldMismatch {
        field: String,
        index_value: String,
        record_value: String,
    },
    /// Status is not one of the recognized enumerants.
    InvalidStatus { status: String },
}

impl ViolationKind {
    /// Fixed rank used to order violations of one identifier.
    pub fn rank(&self) -> u8 {
        match self {
            ViolationKind::InvalidIdFormat => 0,
            ViolationKind::DuplicateId => 1,
            ViolationKind::MissingRecord => 2,
            ViolationKind::OrphanRecord => 3,
            ViolationKind::FieldMismatch { .. } => 4,
            ViolationKind::InvalidStatus { .. } => 5,
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolationKind::InvalidIdFormat => {
                write!(f, "identifier does not match the TOIL ID pattern")
            }
            ViolationKind::DuplicateId => write!(f, "duplicate identifier in index"),
            ViolationKind::MissingRecord => write!(f, "no record file for index entry"),
            ViolationKind::OrphanRecord => write!(f, "record file has no index entry"),
            ViolationKind::FieldMismatch {
                field,
                index_value,
                record_value,
            } => write!(
                f,
                "{field} disagrees between index ({index_value:?}) and record ({record_value:?})"
            ),
            ViolationKind::InvalidStatus { status } => {
                write!(f, "unrecognized status {status:?}")
            }
        }
    }
}
