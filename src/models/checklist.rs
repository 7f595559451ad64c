use serde::{Deserialize, Serialize};

use super::catalog::{ChecklistItem, CityResource, PlanningGuide};
use super::situation::{PlanningStage, UserSituation};

/// The generated guidance for one situation.
///
/// Built fresh on every generation call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizedChecklist {
    pub situation: UserSituation,
    pub stage: PlanningStage,
    pub priority_items: Vec<ChecklistItem>,
    /// At most five guides.
    pub recommended_guides: Vec<PlanningGuide>,
    pub city_resources: Option<CityResource>,
    pub next_steps: Vec<String>,
}
