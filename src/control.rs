//! Trigger controls: the buttons that start an operation
//!
//! A control is disabled for as long as a [`TriggerGuard`] is alive, so
//! every exit path of an operation re-enables it.

use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug)]
struct ControlState {
    enabled: bool,
    label: String,
}

/// Shared handle to one control; clones observe the same state
#[derive(Debug, Clone)]
pub struct TriggerControl {
    state: Arc<Mutex<ControlState>>,
    idle_label: Arc<str>,
    busy_label: Arc<str>,
}

impl TriggerControl {
    pub fn new(idle_label: impl Into<Arc<str>>, busy_label: impl Into<Arc<str>>) -> Self {
        let idle_label = idle_label.into();
        Self {
            state: Arc::new(Mutex::new(ControlState {
                enabled: true,
                label: idle_label.to_string(),
            })),
            idle_label,
            busy_label: busy_label.into(),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.lock().enabled
    }

    #[must_use]
    pub fn label(&self) -> String {
        self.lock().label.clone()
    }

    /// Disable the control for the lifetime of the returned guard.
    ///
    /// Returns `None` if the control is already disabled, i.e. another
    /// operation holds it.
    #[must_use]
    pub fn engage(&self) -> Option<TriggerGuard> {
        let mut state = self.lock();
        if !state.enabled {
            return None;
        }
        state.enabled = false;
        state.label = self.busy_label.to_string();
        Some(TriggerGuard {
            control: self.clone(),
        })
    }

    fn release(&self) {
        let mut state = self.lock();
        state.enabled = true;
        state.label = self.idle_label.to_string();
    }

    fn lock(&self) -> MutexGuard<'_, ControlState> {
        // A panic while holding the lock cannot leave the state half-written
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Keeps a [`TriggerControl`] disabled until dropped
#[derive(Debug)]
pub struct TriggerGuard {
    control: TriggerControl,
}

impl Drop for TriggerGuard {
    fn drop(&mut self) {
        self.control.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engage_disables_and_drop_restores() {
        let control = TriggerControl::new("Send", "Sending...");
        assert!(control.is_enabled());
        assert_eq!(control.label(), "Send");

        {
            let _guard = control.engage().expect("idle control engages");
            assert!(!control.is_enabled());
            assert_eq!(control.label(), "Sending...");
        }

        assert!(control.is_enabled());
        assert_eq!(control.label(), "Send");
    }

    #[test]
    fn test_second_engage_is_refused_while_held() {
        let control = TriggerControl::new("Refresh", "Loading...");
        let observer = control.clone();

        let guard = control.engage();
        assert!(guard.is_some());
        assert!(observer.engage().is_none());

        drop(guard);
        assert!(observer.is_enabled());
        assert!(observer.engage().is_some());
    }

    #[test]
    fn test_guard_restores_on_early_return() {
        fn failing_operation(control: &TriggerControl) -> Result<(), &'static str> {
            let _guard = control.engage().ok_or("busy")?;
            Err("boom")
        }

        let control = TriggerControl::new("Send", "Sending...");
        assert_eq!(failing_operation(&control), Err("boom"));
        assert!(control.is_enabled());
    }
}
