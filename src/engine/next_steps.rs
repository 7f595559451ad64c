use crate::models::{ChecklistItem, UserSituation};

/// Compose the short narrative shown above the checklist.
pub fn generate_next_steps(
    situation: &UserSituation,
    prioritized_items: &[ChecklistItem],
) -> Vec<String> {
    let mut steps = Vec::new();

    if let Some(first) = prioritized_items.first() {
        steps.push(format!("Start with: {}", first.title));
    }

    if situation.is_unmarried() && !situation.has_paternity_certificate {
        steps.push(
            "Schedule the paternity acknowledgment at the Jugendamt or Standesamt, ideally before the birth"
                .to_string(),
        );
    } else if situation.is_unmarried() && !situation.has_joint_custody {
        steps.push("Complete the joint custody declaration at the Jugendamt".to_string());
    }

    if !situation.relationship_stable {
        steps.push(
            "Document agreements about care, money and contact in writing".to_string(),
        );
        steps.push("Seek legal consultation before making binding decisions".to_string());
    }

    match situation.city() {
        Some(city) => steps.push(format!("Find local resources for {}", city)),
        None => steps.push("Search for the Standesamt and Jugendamt offices near you".to_string()),
    }

    steps
}
