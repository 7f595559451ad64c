use serde::{Deserialize, Serialize};

use super::situation::PlanningStage;

/// Priority tier of a catalog entry. Declaration order is sort order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Critical,
    High,
    Medium,
    Low,
}

impl Urgency {
    /// Ordinal used for sorting: critical(0) < high(1) < medium(2) < low(3).
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// A single actionable task from the static catalog.
///
/// Catalog entries are immutable; the engine only filters, orders and clones them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    /// Stable, catalog-assigned identifier. Progress is keyed by it.
    pub id: String,
    pub title: String,
    pub description: String,
    pub stage: PlanningStage,
    pub urgency: Urgency,
    #[serde(default)]
    pub estimated_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub cost: Option<String>,
    /// Human-readable deadline hint, e.g. "within 1 week after birth".
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub help_link: Option<String>,
}

/// A long-form reading recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningGuide {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub stage: PlanningStage,
    pub urgency: Urgency,
    pub published: String,
    pub read_time: String,
    pub content: String,
}

/// Contact details for one office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<String>,
}

/// Registry office (Standesamt) and youth welfare office (Jugendamt) for a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityResource {
    pub city: String,
    pub postcode: String,
    pub standesamt: ContactRecord,
    pub jugendamt: ContactRecord,
    #[serde(default)]
    pub notes: Option<String>,
}
