use std::collections::BTreeSet;

use chrono::Utc;

use crate::models::{ChecklistItem, ChecklistProgress, ProgressData};

/// Completed item ids as callers track them.
pub type CompletionSet = BTreeSet<String>;

/// Build a progress snapshot stamped with the current time.
///
/// The percentage is rounded, clamped to 100, and 0 when there are no items.
pub fn create_progress_data(
    checklist_id: &str,
    completed: &CompletionSet,
    total_items: usize,
) -> ChecklistProgress {
    let completed_count = completed.len();
    let completion_percentage = if total_items == 0 {
        0
    } else {
        let pct = (completed_count as f64 / total_items as f64 * 100.0).round();
        pct.min(100.0) as u8
    };

    ChecklistProgress {
        checklist_id: checklist_id.to_string(),
        completed_items: completed.iter().cloned().collect(),
        progress_data: ProgressData {
            last_updated: Utc::now(),
            completion_percentage,
            total_items,
            completed_count,
        },
    }
}

/// Persisted form of a completion set against a generated item list.
pub fn set_to_progress(
    checklist_id: &str,
    completed: &CompletionSet,
    items: &[ChecklistItem],
) -> ChecklistProgress {
    create_progress_data(checklist_id, completed, items.len())
}

pub fn progress_to_set(progress: &ChecklistProgress) -> CompletionSet {
    progress.completed_items.iter().cloned().collect()
}
