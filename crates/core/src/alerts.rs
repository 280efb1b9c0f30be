//! Personalised health alert feed.
//!
//! Alerts are injected read-only reference data (weather warnings, seasonal
//! advisories, medicine reminders). The feed only orders them for display.

use serde::{Deserialize, Serialize};

/// Display priority of an alert. Ordered so `High` sorts above `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    Low,
    Medium,
    High,
}

/// One alert shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthAlert {
    /// e.g. "Weather Alert", "Seasonal Advisory", "Medicine Reminder".
    pub category: String,
    pub priority: AlertPriority,
    pub message: String,
    pub suggested_action: String,
}

/// Read-only feed of health alerts.
pub struct AlertFeed {
    alerts: Vec<HealthAlert>,
}

impl AlertFeed {
    pub fn new(alerts: Vec<HealthAlert>) -> Self {
        Self { alerts }
    }

    /// Alerts in their injected order.
    pub fn alerts(&self) -> &[HealthAlert] {
        &self.alerts
    }

    /// Alerts ordered highest priority first; ties keep injected order.
    pub fn by_priority(&self) -> Vec<&HealthAlert> {
        let mut ordered: Vec<&HealthAlert> = self.alerts.iter().collect();
        ordered.sort_by_key(|alert| std::cmp::Reverse(alert.priority));
        ordered
    }
}
