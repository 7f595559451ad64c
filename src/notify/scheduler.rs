use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Days, Local, NaiveDate};
use tokio::task::JoinHandle;

use crate::models::{DeadlineNotification, NotificationOptions};

use super::port::{NotificationPort, Permission};

/// Local hour at which deadline reminders fire.
pub const REMINDER_HOUR: u32 = 9;

/// Source of the current local time.
pub type Clock = Arc<dyn Fn() -> DateTime<Local> + Send + Sync>;

struct ScheduledTimer {
    item_id: String,
    days_before: u32,
    fire_at: DateTime<Local>,
    generation: u64,
    handle: JoinHandle<()>,
}

/// A live reminder timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReminder {
    /// `{item_id}-{days_before}`
    pub key: String,
    pub item_id: String,
    pub days_before: u32,
    pub fire_at: DateTime<Local>,
}

/// In-process deadline reminders.
///
/// Timers run as Tokio tasks and live only as long as the scheduler and the
/// process: after a restart callers must re-arm them with
/// [`restore_deadline_notifications`](Self::restore_deadline_notifications).
/// Dropping the scheduler cancels everything it scheduled. Nothing is
/// scheduled unless the port is supported and permission is granted.
pub struct NotificationScheduler {
    port: Arc<dyn NotificationPort>,
    clock: Clock,
    timers: Arc<Mutex<HashMap<String, ScheduledTimer>>>,
    next_generation: AtomicU64,
}

impl NotificationScheduler {
    pub fn new(port: Arc<dyn NotificationPort>) -> Self {
        Self::with_clock(port, Arc::new(Local::now))
    }

    pub fn with_clock(port: Arc<dyn NotificationPort>, clock: Clock) -> Self {
        Self {
            port,
            clock,
            timers: Arc::new(Mutex::new(HashMap::new())),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Whether notifications may be shown right now.
    pub fn is_permitted(&self) -> bool {
        self.port.is_supported() && self.port.permission() == Some(Permission::Granted)
    }

    pub async fn request_permission(&self) -> Permission {
        if !self.port.is_supported() {
            return Permission::Denied;
        }
        self.port.request_permission().await
    }

    /// Show a notification now. Returns false when not permitted.
    pub fn show_notification(&self, title: &str, options: &NotificationOptions) -> bool {
        if !self.is_permitted() {
            tracing::debug!("Notifications not permitted, dropping '{}'", title);
            return false;
        }
        self.port.show(title, options);
        true
    }

    /// Show a notification at `at`, or immediately if `at` is not in the future.
    ///
    /// The returned handle is not tracked by the scheduler; abort it to cancel.
    pub fn schedule_notification(
        &self,
        title: impl Into<String>,
        options: NotificationOptions,
        at: DateTime<Local>,
    ) -> Option<JoinHandle<()>> {
        let title = title.into();
        if !self.is_permitted() {
            tracing::debug!("Notifications not permitted, not scheduling '{}'", title);
            return None;
        }

        let delay = (at - (self.clock)()).to_std().unwrap_or_default();
        if delay.is_zero() {
            self.port.show(&title, &options);
            return None;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No async runtime available, cannot schedule '{}'", title);
            return None;
        };
        let port = self.port.clone();
        Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            port.show(&title, &options);
        }))
    }

    /// Arm the reminders for one deadline, replacing any earlier ones for the item.
    ///
    /// Each offset fires at 09:00 local time that many days before the
    /// deadline. Offsets whose instant is already past are skipped. Returns
    /// the number of timers armed.
    pub fn schedule_deadline_notifications(
        &self,
        notification: &DeadlineNotification,
        icon_url: Option<&str>,
    ) -> usize {
        if !self.is_permitted() {
            tracing::debug!(
                item_id = %notification.item_id,
                "Notifications not permitted, deadline reminders not scheduled"
            );
            return 0;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No async runtime available, deadline reminders not scheduled");
            return 0;
        };

        self.cancel_deadline_notifications(&notification.item_id);

        let now = (self.clock)();
        let mut timers = self.timers.lock().expect("timer map lock poisoned");
        let mut armed = 0;

        for &days_before in &notification.reminder_days_before {
            let Some(fire_at) = reminder_instant(notification.deadline, days_before) else {
                tracing::warn!(
                    item_id = %notification.item_id,
                    days_before,
                    "Reminder time does not exist in the local time zone, skipping"
                );
                continue;
            };
            if fire_at <= now {
                continue;
            }

            let key = timer_key(&notification.item_id, days_before);
            let delay = (fire_at - now).to_std().unwrap_or_default();
            let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
            let title = format!("Reminder: {}", notification.title);
            let options = NotificationOptions {
                body: reminder_body(notification, days_before),
                icon: icon_url.map(str::to_string),
                tag: Some(key.clone()),
                require_interaction: days_before == 0,
            };

            let port = self.port.clone();
            let map = self.timers.clone();
            let task_key = key.clone();
            let handle = runtime.spawn(async move {
                tokio::time::sleep(delay).await;
                port.show(&title, &options);
                let mut timers = map.lock().expect("timer map lock poisoned");
                if timers.get(&task_key).map(|t| t.generation) == Some(generation) {
                    timers.remove(&task_key);
                }
            });

            if let Some(previous) = timers.insert(
                key,
                ScheduledTimer {
                    item_id: notification.item_id.clone(),
                    days_before,
                    fire_at,
                    generation,
                    handle,
                },
            ) {
                // Duplicate offset in the same list.
                previous.handle.abort();
            } else {
                armed += 1;
            }
        }

        tracing::debug!(item_id = %notification.item_id, armed, "Deadline reminders scheduled");
        armed
    }

    /// Cancel every reminder for `item_id`. Returns how many were cancelled.
    pub fn cancel_deadline_notifications(&self, item_id: &str) -> usize {
        let mut timers = self.timers.lock().expect("timer map lock poisoned");
        let prefix = format!("{}-", item_id);
        let keys: Vec<String> = timers
            .iter()
            .filter(|(key, timer)| key.starts_with(&prefix) && timer.item_id == item_id)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &keys {
            if let Some(timer) = timers.remove(key) {
                timer.handle.abort();
            }
        }
        keys.len()
    }

    pub fn cancel_all_deadline_notifications(&self) -> usize {
        let mut timers = self.timers.lock().expect("timer map lock poisoned");
        let count = timers.len();
        for (_, timer) in timers.drain() {
            timer.handle.abort();
        }
        count
    }

    /// Re-arm reminders after a restart from the caller's source of truth.
    pub fn restore_deadline_notifications(
        &self,
        notifications: &[DeadlineNotification],
        icon_url: Option<&str>,
    ) -> usize {
        let armed = notifications
            .iter()
            .map(|n| self.schedule_deadline_notifications(n, icon_url))
            .sum();
        tracing::info!(
            deadlines = notifications.len(),
            armed,
            "Restored deadline reminders"
        );
        armed
    }

    /// Live timers, soonest first.
    pub fn pending_reminders(&self) -> Vec<PendingReminder> {
        let timers = self.timers.lock().expect("timer map lock poisoned");
        let mut pending: Vec<PendingReminder> = timers
            .iter()
            .map(|(key, timer)| PendingReminder {
                key: key.clone(),
                item_id: timer.item_id.clone(),
                days_before: timer.days_before,
                fire_at: timer.fire_at,
            })
            .collect();
        pending.sort_by(|a, b| a.fire_at.cmp(&b.fire_at).then_with(|| a.key.cmp(&b.key)));
        pending
    }

    pub fn pending_count(&self) -> usize {
        self.timers.lock().expect("timer map lock poisoned").len()
    }
}

impl Drop for NotificationScheduler {
    fn drop(&mut self) {
        if let Ok(mut timers) = self.timers.lock() {
            for (_, timer) in timers.drain() {
                timer.handle.abort();
            }
        }
    }
}

fn timer_key(item_id: &str, days_before: u32) -> String {
    format!("{}-{}", item_id, days_before)
}

/// 09:00 local on the day `days_before` days ahead of `deadline`.
pub fn reminder_instant(deadline: NaiveDate, days_before: u32) -> Option<DateTime<Local>> {
    deadline
        .checked_sub_days(Days::new(u64::from(days_before)))?
        .and_hms_opt(REMINDER_HOUR, 0, 0)?
        .and_local_timezone(Local)
        .earliest()
}

fn reminder_body(notification: &DeadlineNotification, days_before: u32) -> String {
    let when = match days_before {
        0 => "today".to_string(),
        1 => "in 1 day".to_string(),
        n => format!("in {} days", n),
    };
    let mut body = format!("{} is due {}.", notification.title, when);
    if let Some(ref description) = notification.description {
        body.push('\n');
        body.push_str(description);
    }
    body
}
