use std::collections::HashSet;

use crate::catalog::{RELATIONSHIP_TROUBLE_GUIDE_SLUG, UNMARRIED_GUIDE_SLUG};
use crate::models::{PlanningGuide, UserSituation};

use super::stage::determine_stage;

pub const MAX_RECOMMENDED_GUIDES: usize = 5;

/// Pick up to five guides for a situation.
///
/// Stage-matching guides come in catalog order. The unmarried-parents guide
/// and then the relationship-trouble guide are prepended when they apply and
/// are not already listed, so the latter ends up first when both are added.
/// Membership is decided by slug.
pub fn get_recommended_guides(
    guides: &[PlanningGuide],
    situation: &UserSituation,
) -> Vec<PlanningGuide> {
    let stage = determine_stage(situation);

    let mut recommended: Vec<&PlanningGuide> =
        guides.iter().filter(|g| g.stage == stage).collect();
    let mut slugs: HashSet<&str> = recommended.iter().map(|g| g.slug.as_str()).collect();

    let mut prepend = |slug: &str| {
        if slugs.contains(slug) {
            return;
        }
        if let Some(guide) = guides.iter().find(|g| g.slug == slug) {
            slugs.insert(guide.slug.as_str());
            recommended.insert(0, guide);
        }
    };

    if situation.is_unmarried() {
        prepend(UNMARRIED_GUIDE_SLUG);
    }
    if !situation.relationship_stable {
        prepend(RELATIONSHIP_TROUBLE_GUIDE_SLUG);
    }

    recommended
        .into_iter()
        .take(MAX_RECOMMENDED_GUIDES)
        .cloned()
        .collect()
}
