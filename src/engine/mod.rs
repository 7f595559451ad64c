//! Rule-based checklist generation.
//!
//! Every function here is synchronous and side-effect free apart from debug
//! logging. [`ChecklistGenerator`] composes them.

mod filter;
mod generator;
mod guides;
mod next_steps;
mod resources;
mod stage;

pub use filter::{filter_checklist_items, prioritize_items};
pub use generator::{generate_personalized_checklist, ChecklistGenerator};
pub use guides::{get_recommended_guides, MAX_RECOMMENDED_GUIDES};
pub use next_steps::generate_next_steps;
pub use resources::get_city_resources;
pub use stage::determine_stage;
