//! Deadline reminders on top of a host notification capability.

mod port;
mod scheduler;

pub use port::{NotificationPort, Permission, TracingNotifier};
pub use scheduler::{reminder_instant, Clock, NotificationScheduler, PendingReminder, REMINDER_HOUR};
