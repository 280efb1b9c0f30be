//! Community volunteer help desk.
//!
//! Holds injected volunteer and NGO reference records plus the list of help
//! requests raised in this session. Submitting a request assigns it an id and
//! timestamp, appends it as pending and emits a "Help Request Submitted"
//! notification. Volunteer assignment itself happens outside this system;
//! requests seeded from reference data may already carry an assignee.

use crate::error::HelpError;
use crate::notify::NotificationSink;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Kind of help a villager can ask the community for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HelpCategory {
    Transport,
    Medicine,
    Childcare,
    Food,
    HomeCare,
    Emergency,
}

impl HelpCategory {
    /// Label shown on the help type cards.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Transport => "Transportation",
            Self::Medicine => "Medicine Support",
            Self::Childcare => "Child Care",
            Self::Food => "Food & Nutrition",
            Self::HomeCare => "Home Care",
            Self::Emergency => "Emergency Support",
        }
    }
}

impl std::fmt::Display for HelpCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = match self {
            Self::Transport => "transport",
            Self::Medicine => "medicine",
            Self::Childcare => "childcare",
            Self::Food => "food",
            Self::HomeCare => "homecare",
            Self::Emergency => "emergency",
        };
        write!(f, "{token}")
    }
}

impl std::str::FromStr for HelpCategory {
    type Err = HelpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "transport" => Ok(Self::Transport),
            "medicine" => Ok(Self::Medicine),
            "childcare" => Ok(Self::Childcare),
            "food" => Ok(Self::Food),
            "homecare" => Ok(Self::HomeCare),
            "emergency" => Ok(Self::Emergency),
            other => Err(HelpError::UnknownCategory(other.to_owned())),
        }
    }
}

/// How urgently a request needs a volunteer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl std::str::FromStr for Urgency {
    type Err = HelpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(HelpError::UnknownUrgency(other.to_owned())),
        }
    }
}

/// Where a help request is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    VolunteerAssigned,
    Completed,
}

/// Read-only reference record for one community volunteer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volunteer {
    pub name: String,
    pub role: String,
    pub rating: f32,
    pub completed_requests: u32,
    pub location: String,
    pub availability: String,
    pub specialties: Vec<String>,
    pub phone: String,
}

/// Read-only reference record for one partner NGO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ngo {
    pub name: String,
    pub kind: String,
    pub services: Vec<String>,
    pub contact: String,
    pub location: String,
}

/// One help request, either seeded from reference data or raised this session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpRequest {
    pub id: Uuid,
    pub category: HelpCategory,
    pub description: String,
    pub location: String,
    pub urgency: Urgency,
    pub status: RequestStatus,
    pub requested_at: DateTime<Utc>,
    pub assigned_volunteer: Option<String>,
}

/// Front desk for the community help network.
pub struct HelpDesk {
    volunteers: Vec<Volunteer>,
    ngos: Vec<Ngo>,
    requests: Vec<HelpRequest>,
    sink: Arc<dyn NotificationSink>,
}

impl HelpDesk {
    pub fn new(
        volunteers: Vec<Volunteer>,
        ngos: Vec<Ngo>,
        open_requests: Vec<HelpRequest>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            volunteers,
            ngos,
            requests: open_requests,
            sink,
        }
    }

    pub fn volunteers(&self) -> &[Volunteer] {
        &self.volunteers
    }

    pub fn ngos(&self) -> &[Ngo] {
        &self.ngos
    }

    /// All requests, oldest first.
    pub fn requests(&self) -> &[HelpRequest] {
        &self.requests
    }

    /// Raise a new help request.
    ///
    /// # Errors
    ///
    /// Returns `HelpError::EmptyDescription` if the description is blank; no
    /// request is recorded and nothing is notified.
    pub fn submit_request(
        &mut self,
        category: HelpCategory,
        description: &str,
        location: &str,
        urgency: Urgency,
    ) -> Result<HelpRequest, HelpError> {
        if description.trim().is_empty() {
            return Err(HelpError::EmptyDescription);
        }

        let request = HelpRequest {
            id: Uuid::new_v4(),
            category,
            description: description.trim().to_owned(),
            location: location.trim().to_owned(),
            urgency,
            status: RequestStatus::Pending,
            requested_at: Utc::now(),
            assigned_volunteer: None,
        };

        tracing::info!(
            id = %request.id,
            category = %request.category,
            urgency = ?request.urgency,
            "help request submitted"
        );
        self.sink.notify(
            "Help Request Submitted",
            "A volunteer will be assigned to you within 30 minutes. You'll receive updates via SMS.",
        );

        self.requests.push(request.clone());
        Ok(request)
    }
}
