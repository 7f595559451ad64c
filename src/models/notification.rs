use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Offsets used when a notification does not name its own.
pub const DEFAULT_REMINDER_DAYS: [u32; 3] = [7, 1, 0];

fn default_reminder_days() -> Vec<u32> {
    DEFAULT_REMINDER_DAYS.to_vec()
}

/// A dated item the user wants to be reminded about.
///
/// Not persisted by the scheduler; callers re-supply outstanding deadlines
/// after a restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineNotification {
    pub item_id: String,
    pub title: String,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    /// Days before the deadline to remind at. Zero means the deadline day itself.
    #[serde(default = "default_reminder_days")]
    pub reminder_days_before: Vec<u32>,
}

impl DeadlineNotification {
    /// A notification with the default `[7, 1, 0]` offsets.
    pub fn new(item_id: impl Into<String>, title: impl Into<String>, deadline: NaiveDate) -> Self {
        Self {
            item_id: item_id.into(),
            title: title.into(),
            deadline,
            description: None,
            reminder_days_before: default_reminder_days(),
        }
    }
}

/// Display options passed to the notification port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationOptions {
    pub body: String,
    #[serde(default)]
    pub icon: Option<String>,
    /// Replaces an earlier notification with the same tag on hosts that support it.
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub require_interaction: bool,
}
