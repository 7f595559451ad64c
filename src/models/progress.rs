use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Completion state of one checklist instance.
///
/// This is the persisted form, both locally and remotely. `completed_items`
/// has set semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistProgress {
    /// Caller-generated, unique per checklist instance.
    pub checklist_id: String,
    pub completed_items: Vec<String>,
    pub progress_data: ProgressData,
}

/// Derived completion statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressData {
    pub last_updated: DateTime<Utc>,
    /// 0..=100
    pub completion_percentage: u8,
    pub total_items: usize,
    pub completed_count: usize,
}

/// Body of a remote upsert: the progress plus the identity it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProgressInput {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    pub completed_items: Vec<String>,
    pub progress_data: ProgressData,
}

/// Lookup for remotely stored progress. Identity filters are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressQuery {
    pub checklist_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}
