//! Remote persistence port for checklist progress.

mod client;

pub use client::{ClientError, RemoteProgressClient};

use async_trait::async_trait;

use crate::models::{ChecklistProgress, ProgressQuery, UpsertProgressInput};

/// The save/load contract of the remote progress service.
///
/// `upsert_progress` is idempotent per checklist id. `fetch_progress`
/// returns `Ok(None)` when nothing matches.
#[async_trait]
pub trait RemoteProgress: Send + Sync {
    async fn upsert_progress(
        &self,
        checklist_id: &str,
        input: &UpsertProgressInput,
    ) -> Result<(), ClientError>;

    async fn fetch_progress(
        &self,
        query: &ProgressQuery,
    ) -> Result<Option<ChecklistProgress>, ClientError>;
}
