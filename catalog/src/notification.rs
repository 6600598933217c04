//! One-shot user notifications for catalog mutations

use std::sync::Mutex;

use serde::Serialize;

/// Receives the outcome of add/delete for display as a toast
pub trait Notifier {
    fn success(&self, message: &str);
    fn failure(&self, message: &str);
}

/// Emits notifications as tracing events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(notification = "success", "{}", message);
    }

    fn failure(&self, message: &str) {
        tracing::warn!(notification = "failure", "{}", message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum Notification {
    Success(String),
    Failure(String),
}

/// Buffers notifications until the presentation layer drains them
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything recorded so far
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.lock())
    }

    pub fn events(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.lock().push(Notification::Success(message.to_string()));
    }

    fn failure(&self, message: &str) {
        self.lock().push(Notification::Failure(message.to_string()));
    }
}
