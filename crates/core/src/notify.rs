//! Notification delivery seam.
//!
//! Core flows report user-facing events ("Registration Successful!", "Report
//! Analysis Complete", ...) through a sink trait so the caller can route them
//! to a toast UI, an SMS bridge, or logs. Delivery is fire-and-forget; no
//! acknowledgement is expected.

use std::sync::Mutex;

/// Receiver for user-facing notifications emitted by core components.
pub trait NotificationSink: Send + Sync {
    /// Deliver one notification.
    fn notify(&self, title: &str, body: &str);
}

/// Sink that emits notifications as `tracing` events.
#[derive(Debug, Default, Clone)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, title: &str, body: &str) {
        tracing::info!(title, body, "notification");
    }
}

/// Sink that records every notification in memory.
///
/// Used by tests to assert on delivery, and by callers that render
/// notifications after the fact.
#[derive(Debug, Default)]
pub struct RecordingSink {
    delivered: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications delivered so far, in delivery order.
    pub fn delivered(&self) -> Vec<(String, String)> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(String, String)>> {
        match self.delivered.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, title: &str, body: &str) {
        self.lock().push((title.to_owned(), body.to_owned()));
    }
}
