//! Activity Log Model
//!
//! Outbound record of who changed what in the back office.

use serde::{Deserialize, Serialize};

/// Mutation type that produced an activity entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    /// Past-tense verb used in activity messages
    pub fn verb(self) -> &'static str {
        match self {
            MutationKind::Create => "created",
            MutationKind::Update => "updated",
            MutationKind::Delete => "deleted",
        }
    }
}

impl std::fmt::Display for MutationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Activity log entry (write-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    /// Acting user (None when unknown)
    pub user_id: Option<String>,
    /// Human-readable description of the change
    pub message: String,
    /// Admin list page of the affected section
    pub link: String,
    /// Entity type label (e.g. "About")
    pub section: String,
    /// Optional structured payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}
