//! Local-first progress persistence with optional remote sync.
//!
//! Per checklist id the state moves Unsaved → Local → Local+Synced. The local
//! write always happens first and never fails the caller; the remote upsert
//! runs detached and reports through a [`SaveReceipt`] that callers may
//! await or drop. Concurrent writers to one checklist id are not coordinated:
//! last write wins, locally and remotely.

mod convert;

pub use convert::{create_progress_data, progress_to_set, set_to_progress, CompletionSet};

use std::sync::Arc;

use anyhow::Result;
use tokio::task::JoinHandle;

use crate::models::{ChecklistProgress, ProgressQuery, UpsertProgressInput};
use crate::sync::RemoteProgress;

/// Prefix of the local store key for a checklist.
pub const STORAGE_KEY_PREFIX: &str = "planning_progress_";

pub fn storage_key(checklist_id: &str) -> String {
    format!("{}{}", STORAGE_KEY_PREFIX, checklist_id)
}

/// Synchronous key/value storage for serialized progress.
pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveOptions {
    pub sync_remote: bool,
    pub email: Option<String>,
    pub user_id: Option<String>,
}

impl SaveOptions {
    pub fn local_only() -> Self {
        Self::default()
    }

    pub fn synced(email: Option<String>, user_id: Option<String>) -> Self {
        Self {
            sync_remote: true,
            email,
            user_id,
        }
    }

    fn has_identity(&self) -> bool {
        self.email.is_some() || self.user_id.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub load_remote: bool,
    pub email: Option<String>,
    pub user_id: Option<String>,
}

impl LoadOptions {
    pub fn local_only() -> Self {
        Self::default()
    }

    pub fn remote(email: Option<String>, user_id: Option<String>) -> Self {
        Self {
            load_remote: true,
            email,
            user_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalWrite {
    Written,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Synced,
    /// No remote write was attempted.
    Skipped,
    Failed(String),
}

#[derive(Debug)]
pub enum RemoteSync {
    NotRequested,
    /// Sync was requested without an email or user id.
    MissingIdentity,
    /// No remote service configured, or no async runtime to run the upsert on.
    Unavailable,
    Pending(JoinHandle<SyncOutcome>),
}

/// What happened to a save. Dropping it leaves a pending upsert running.
#[derive(Debug)]
pub struct SaveReceipt {
    pub local: LocalWrite,
    pub remote: RemoteSync,
}

impl SaveReceipt {
    /// Wait for the remote upsert, if one was started.
    pub async fn sync_outcome(self) -> SyncOutcome {
        match self.remote {
            RemoteSync::Pending(handle) => match handle.await {
                Ok(outcome) => outcome,
                Err(e) => SyncOutcome::Failed(format!("sync task ended abnormally: {}", e)),
            },
            _ => SyncOutcome::Skipped,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressSource {
    Local,
    Remote,
    /// The remote read failed; the value came from the local store.
    LocalFallback(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedProgress {
    pub progress: Option<ChecklistProgress>,
    pub source: ProgressSource,
}

#[derive(Clone)]
pub struct ProgressStore {
    local: Arc<dyn LocalStore>,
    remote: Option<Arc<dyn RemoteProgress>>,
}

impl ProgressStore {
    pub fn new(local: Arc<dyn LocalStore>) -> Self {
        Self {
            local,
            remote: None,
        }
    }

    pub fn with_remote(mut self, remote: Arc<dyn RemoteProgress>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Persist progress locally, then start a remote upsert if requested.
    ///
    /// Never fails: local errors are logged and reported in the receipt, and
    /// the remote result arrives through [`SaveReceipt::sync_outcome`].
    pub fn save_progress(&self, progress: &ChecklistProgress, opts: &SaveOptions) -> SaveReceipt {
        let local = self.write_local(progress);

        if !opts.sync_remote {
            return SaveReceipt {
                local,
                remote: RemoteSync::NotRequested,
            };
        }
        if !opts.has_identity() {
            tracing::debug!(
                checklist_id = %progress.checklist_id,
                "Remote sync requested without email or user id, skipping"
            );
            return SaveReceipt {
                local,
                remote: RemoteSync::MissingIdentity,
            };
        }
        let Some(remote) = self.remote.clone() else {
            tracing::debug!("No remote progress service configured, skipping sync");
            return SaveReceipt {
                local,
                remote: RemoteSync::Unavailable,
            };
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No async runtime available, remote sync skipped");
            return SaveReceipt {
                local,
                remote: RemoteSync::Unavailable,
            };
        };

        let checklist_id = progress.checklist_id.clone();
        let input = UpsertProgressInput {
            email: opts.email.clone(),
            user_id: opts.user_id.clone(),
            completed_items: progress.completed_items.clone(),
            progress_data: progress.progress_data.clone(),
        };

        let handle = runtime.spawn(async move {
            match remote.upsert_progress(&checklist_id, &input).await {
                Ok(()) => {
                    tracing::debug!(checklist_id = %checklist_id, "Progress synced to remote");
                    SyncOutcome::Synced
                }
                Err(e) => {
                    tracing::warn!(checklist_id = %checklist_id, "Remote progress sync failed: {}", e);
                    SyncOutcome::Failed(e.to_string())
                }
            }
        });

        SaveReceipt {
            local,
            remote: RemoteSync::Pending(handle),
        }
    }

    /// Load progress, preferring the remote copy when `opts.load_remote` is set.
    ///
    /// A remote hit overwrites the local copy. A remote miss or failure falls
    /// back to whatever the local store holds.
    pub async fn load_progress(&self, checklist_id: &str, opts: &LoadOptions) -> LoadedProgress {
        if opts.load_remote {
            match self.fetch_remote(checklist_id, opts).await {
                Ok(Some(progress)) => {
                    if let LocalWrite::Failed(e) = self.write_local(&progress) {
                        tracing::warn!(checklist_id, "Could not cache remote progress locally: {}", e);
                    }
                    return LoadedProgress {
                        progress: Some(progress),
                        source: ProgressSource::Remote,
                    };
                }
                Ok(None) => {
                    tracing::debug!(checklist_id, "No remote progress, using local copy");
                }
                Err(reason) => {
                    tracing::warn!(checklist_id, "Remote progress load failed: {}", reason);
                    return LoadedProgress {
                        progress: self.read_local(checklist_id),
                        source: ProgressSource::LocalFallback(reason),
                    };
                }
            }
        }

        LoadedProgress {
            progress: self.read_local(checklist_id),
            source: ProgressSource::Local,
        }
    }

    /// Pull the remote copy into the local store.
    pub async fn sync_progress(
        &self,
        checklist_id: &str,
        email: Option<String>,
        user_id: Option<String>,
    ) -> LoadedProgress {
        self.load_progress(checklist_id, &LoadOptions::remote(email, user_id))
            .await
    }

    /// Remove the local copy. Returns false if the store rejected the removal.
    pub fn clear_progress(&self, checklist_id: &str) -> bool {
        match self.local.remove(&storage_key(checklist_id)) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(checklist_id, "Failed to clear local progress: {:#}", e);
                false
            }
        }
    }

    async fn fetch_remote(
        &self,
        checklist_id: &str,
        opts: &LoadOptions,
    ) -> std::result::Result<Option<ChecklistProgress>, String> {
        let remote = self
            .remote
            .as_ref()
            .ok_or_else(|| "no remote progress service configured".to_string())?;
        let query = ProgressQuery {
            checklist_id: checklist_id.to_string(),
            email: opts.email.clone(),
            user_id: opts.user_id.clone(),
        };
        remote.fetch_progress(&query).await.map_err(|e| e.to_string())
    }

    fn write_local(&self, progress: &ChecklistProgress) -> LocalWrite {
        let result = serde_json::to_string(progress)
            .map_err(anyhow::Error::from)
            .and_then(|json| self.local.set(&storage_key(&progress.checklist_id), &json));

        match result {
            Ok(()) => LocalWrite::Written,
            Err(e) => {
                tracing::error!(
                    checklist_id = %progress.checklist_id,
                    "Failed to save progress locally: {:#}",
                    e
                );
                LocalWrite::Failed(e.to_string())
            }
        }
    }

    fn read_local(&self, checklist_id: &str) -> Option<ChecklistProgress> {
        let raw = match self.local.get(&storage_key(checklist_id)) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::error!(checklist_id, "Failed to read local progress: {:#}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(progress) => Some(progress),
            Err(e) => {
                tracing::error!(checklist_id, "Stored progress is unreadable: {}", e);
                None
            }
        }
    }
}
