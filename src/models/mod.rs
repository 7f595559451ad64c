//! Domain models for the planner.
//!
//! # Core Concepts
//!
//! ## Catalog (read-only)
//!
//! - [`ChecklistItem`]: An actionable task tagged with a [`PlanningStage`] and [`Urgency`].
//! - [`PlanningGuide`]: Recommended reading.
//! - [`CityResource`]: Registry and youth welfare office contacts for a city.
//!
//! ## Per-user
//!
//! - [`UserSituation`]: Facts about the family, input to generation.
//! - [`PersonalizedChecklist`]: Generated output, never mutated.
//! - [`ChecklistProgress`]: Completion state, persisted local-first.
//! - [`DeadlineNotification`]: Ephemeral reminder request, lives only as long as its timers.

mod catalog;
mod checklist;
mod notification;
mod progress;
mod situation;

pub use catalog::*;
pub use checklist::*;
pub use notification::*;
pub use progress::*;
pub use situation::*;
