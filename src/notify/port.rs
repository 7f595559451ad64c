use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::NotificationOptions;

/// Notification permission as reported by the host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Granted,
    Denied,
    /// The user has not been asked yet.
    Default,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Default => "default",
        }
    }
}

/// Minimal host capability the scheduler is built on.
#[async_trait]
pub trait NotificationPort: Send + Sync {
    fn is_supported(&self) -> bool;

    /// `None` when the host cannot tell.
    fn permission(&self) -> Option<Permission>;

    async fn request_permission(&self) -> Permission;

    fn show(&self, title: &str, options: &NotificationOptions);
}

/// Port for headless hosts: always granted, every notification becomes a log event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

#[async_trait]
impl NotificationPort for TracingNotifier {
    fn is_supported(&self) -> bool {
        true
    }

    fn permission(&self) -> Option<Permission> {
        Some(Permission::Granted)
    }

    async fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    fn show(&self, title: &str, options: &NotificationOptions) {
        tracing::info!(
            tag = options.tag.as_deref().unwrap_or(""),
            require_interaction = options.require_interaction,
            "{}: {}",
            title,
            options.body
        );
    }
}
