use std::sync::Arc;

use crate::catalog::Catalog;
use crate::models::{PersonalizedChecklist, UserSituation};

use super::{
    determine_stage, filter_checklist_items, generate_next_steps, get_city_resources,
    get_recommended_guides, prioritize_items,
};

/// Builds [`PersonalizedChecklist`]s from a shared catalog.
#[derive(Debug, Clone)]
pub struct ChecklistGenerator {
    catalog: Arc<Catalog>,
}

impl ChecklistGenerator {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn generate(&self, situation: &UserSituation) -> PersonalizedChecklist {
        generate_personalized_checklist(&self.catalog, situation)
    }
}

/// Run the whole pipeline: classify, filter, prioritize, recommend, resolve, narrate.
pub fn generate_personalized_checklist(
    catalog: &Catalog,
    situation: &UserSituation,
) -> PersonalizedChecklist {
    let stage = determine_stage(situation);
    let filtered = filter_checklist_items(&catalog.items, situation);
    let priority_items = prioritize_items(filtered, situation);
    let recommended_guides = get_recommended_guides(&catalog.guides, situation);
    let city_resources = get_city_resources(&catalog.resources, situation.city());
    let next_steps = generate_next_steps(situation, &priority_items);

    tracing::debug!(
        stage = %stage,
        items = priority_items.len(),
        guides = recommended_guides.len(),
        has_city = city_resources.is_some(),
        "Generated checklist"
    );

    PersonalizedChecklist {
        situation: situation.clone(),
        stage,
        priority_items,
        recommended_guides,
        city_resources,
        next_steps,
    }
}
