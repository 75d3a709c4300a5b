//! Transient user notifications (toasts)
//!
//! Only one notification is visible at a time. Each one owns a
//! [`DismissTimer`]; replacing or dismissing the notification drops the
//! timer, which aborts it.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::NotificationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// Visibility of the current notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    Visible,
    /// Exit transition running, removal follows
    Leaving,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub phase: NotificationPhase,
    pub shown_at: DateTime<Utc>,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.kind {
            NotificationKind::Success => "✅",
            NotificationKind::Error => "❌",
            NotificationKind::Info => "ℹ️",
        };
        write!(f, "{icon} {}", self.message)
    }
}

/// Auto-dismiss task scoped to one notification
#[derive(Debug)]
pub struct DismissTimer(JoinHandle<()>);

impl Drop for DismissTimer {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[derive(Debug, Default)]
struct Slot {
    current: Option<Notification>,
    generation: u64,
    timer: Option<DismissTimer>,
}

/// Single-slot notification center
///
/// Must be used from within a tokio runtime, since every notification
/// spawns its dismiss timer.
#[derive(Debug, Clone)]
pub struct Notifier {
    slot: Arc<Mutex<Slot>>,
    dismiss_after: Duration,
    exit_after: Duration,
}

impl Notifier {
    #[must_use]
    pub fn new(config: &NotificationConfig) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            dismiss_after: config.dismiss_after(),
            exit_after: config.exit_after(),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Info, message);
    }

    /// Show a notification, replacing whatever is currently visible
    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) {
        let message = message.into();
        debug!(?kind, "Showing notification: {}", message);

        let mut slot = self.lock();
        slot.generation += 1;
        let generation = slot.generation;

        slot.current = Some(Notification {
            kind,
            message,
            phase: NotificationPhase::Visible,
            shown_at: Utc::now(),
        });
        // Dropping the previous timer aborts it
        slot.timer = Some(self.schedule_dismiss(generation));
    }

    /// Remove the current notification immediately
    pub fn dismiss(&self) {
        let mut slot = self.lock();
        slot.current = None;
        slot.timer = None;
    }

    #[must_use]
    pub fn current(&self) -> Option<Notification> {
        self.lock().current.clone()
    }

    fn schedule_dismiss(&self, generation: u64) -> DismissTimer {
        let slot = Arc::clone(&self.slot);
        let dismiss_after = self.dismiss_after;
        let exit_after = self.exit_after;

        DismissTimer(tokio::spawn(async move {
            tokio::time::sleep(dismiss_after).await;
            if !set_phase(&slot, generation, NotificationPhase::Leaving) {
                return;
            }

            tokio::time::sleep(exit_after).await;
            let mut slot = lock_slot(&slot);
            if slot.generation == generation {
                slot.current = None;
                slot.timer = None;
            }
        }))
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        lock_slot(&self.slot)
    }
}

fn set_phase(slot: &Mutex<Slot>, generation: u64, phase: NotificationPhase) -> bool {
    let mut slot = lock_slot(slot);
    if slot.generation != generation {
        return false;
    }
    match slot.current.as_mut() {
        Some(notification) => {
            notification.phase = phase;
            true
        }
        None => false,
    }
}

fn lock_slot(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
