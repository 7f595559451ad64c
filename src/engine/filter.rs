use std::cmp::Ordering;

use crate::catalog::{JOINT_CUSTODY_ITEM_ID, PATERNITY_ITEM_ID};
use crate::models::{ChecklistItem, PlanningStage, UserSituation};

use super::stage::determine_stage;

/// Select the catalog items relevant to a situation, in catalog order.
///
/// Items are included when their stage matches the computed stage, or when
/// they are early-warning items and the relationship is unstable. The
/// paternity and joint-custody items ignore stage matching: they are always
/// listed for unmarried parents still missing them, and never listed for
/// married parents or parents who already have them.
pub fn filter_checklist_items(
    items: &[ChecklistItem],
    situation: &UserSituation,
) -> Vec<ChecklistItem> {
    let stage = determine_stage(situation);

    items
        .iter()
        .filter(|item| is_relevant(item, situation, stage))
        .cloned()
        .collect()
}

fn is_relevant(item: &ChecklistItem, situation: &UserSituation, stage: PlanningStage) -> bool {
    let by_stage = item.stage == stage
        || (item.stage == PlanningStage::EarlyWarning && !situation.relationship_stable);

    match item.id.as_str() {
        PATERNITY_ITEM_ID => {
            if situation.is_unmarried() && !situation.has_paternity_certificate {
                true
            } else if situation.has_paternity_certificate || situation.is_married() {
                false
            } else {
                by_stage
            }
        }
        JOINT_CUSTODY_ITEM_ID => {
            if situation.is_unmarried() && !situation.has_joint_custody {
                true
            } else if situation.has_joint_custody || situation.is_married() {
                false
            } else {
                by_stage
            }
        }
        _ => by_stage,
    }
}

/// Order items by urgency, then current-stage items first, then title.
///
/// The sort is stable, so items equal on all three keys keep their input order.
pub fn prioritize_items(
    mut items: Vec<ChecklistItem>,
    situation: &UserSituation,
) -> Vec<ChecklistItem> {
    let stage = determine_stage(situation);
    items.sort_by(|a, b| compare(a, b, stage));
    items
}

fn compare(a: &ChecklistItem, b: &ChecklistItem, stage: PlanningStage) -> Ordering {
    a.urgency
        .rank()
        .cmp(&b.urgency.rank())
        .then_with(|| (a.stage != stage).cmp(&(b.stage != stage)))
        .then_with(|| a.title.cmp(&b.title))
}
