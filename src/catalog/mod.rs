//! Read-only catalog of checklist items, guides and city resources.
//!
//! The catalog is loaded once, before any generation call, and shared as
//! `Arc<Catalog>`. The engine never mutates it.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::{ChecklistItem, CityResource, PlanningGuide};

/// Item with bespoke eligibility for unmarried parents.
pub const PATERNITY_ITEM_ID: &str = "paternity-acknowledgment";
/// Item with bespoke eligibility for unmarried parents.
pub const JOINT_CUSTODY_ITEM_ID: &str = "joint-custody-declaration";

pub const UNMARRIED_GUIDE_SLUG: &str = "unmarried-couples-essential-guide";
pub const RELATIONSHIP_TROUBLE_GUIDE_SLUG: &str = "relationship-trouble-protect-your-rights";

const SEED: &str = include_str!("seed.json");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
    #[serde(default)]
    pub guides: Vec<PlanningGuide>,
    #[serde(default)]
    pub resources: Vec<CityResource>,
}

impl Catalog {
    pub fn new(
        items: Vec<ChecklistItem>,
        guides: Vec<PlanningGuide>,
        resources: Vec<CityResource>,
    ) -> Self {
        Self {
            items,
            guides,
            resources,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json).context("Failed to parse catalog")?;
        tracing::debug!(
            items = catalog.items.len(),
            guides = catalog.guides.len(),
            resources = catalog.resources.len(),
            "Catalog parsed"
        );
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        Self::from_json(&content)
    }

    /// The dataset bundled with the crate.
    pub fn seeded() -> Self {
        Self::from_json(SEED).expect("embedded catalog is valid")
    }

    pub fn item(&self, id: &str) -> Option<&ChecklistItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn guide(&self, slug: &str) -> Option<&PlanningGuide> {
        self.guides.iter().find(|g| g.slug == slug)
    }
}
