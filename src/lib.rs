//! Personalized checklist generation and progress tracking for new parents.
//!
//! - [`engine`] turns a [`models::UserSituation`] into a [`models::PersonalizedChecklist`].
//! - [`progress`] persists completion state local-first, with optional remote sync via [`sync`].
//! - [`notify`] arms in-process deadline reminders.
//! - [`api`] exposes generation and the remote progress contract over HTTP.

pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod engine;
pub mod models;
pub mod notify;
pub mod progress;
pub mod sync;
