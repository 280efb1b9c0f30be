//! Doctor directory search and consultation booking.
//!
//! The directory holds injected read-only doctor records and reproduces the
//! prototype's client-side filtering: case-insensitive substring match over
//! name and specialty, with an optional specialty filter. Booking performs no
//! scheduling; it returns a confirmation value and emits a
//! "Consultation Booked!" notification, exactly as the prototype's toast did.

use crate::error::DirectoryError;
use crate::notify::NotificationSink;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Read-only reference record for one doctor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub name: String,
    pub specialty: String,
    pub experience_years: u8,
    pub rating: f32,
    pub reviews: u32,
    pub languages: Vec<String>,
    pub availability: String,
    pub consultation_fee: String,
    pub location: String,
    pub next_slot: String,
}

/// How a consultation is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationType {
    Video,
    Audio,
    Chat,
    Whatsapp,
}

impl ConsultationType {
    /// Label shown in the consultation type picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Video => "Video Call",
            Self::Audio => "Voice Call",
            Self::Chat => "Text Chat",
            Self::Whatsapp => "WhatsApp",
        }
    }
}

impl std::fmt::Display for ConsultationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Chat => "chat",
            Self::Whatsapp => "whatsapp",
        };
        write!(f, "{token}")
    }
}

impl std::str::FromStr for ConsultationType {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "video" => Ok(Self::Video),
            "audio" => Ok(Self::Audio),
            "chat" => Ok(Self::Chat),
            "whatsapp" => Ok(Self::Whatsapp),
            other => Err(DirectoryError::UnknownConsultationType(other.to_owned())),
        }
    }
}

/// Value returned to the caller once a booking notification has been sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub doctor_name: String,
    pub consultation_type: ConsultationType,
    pub slot: String,
    pub booked_at: DateTime<Utc>,
}

/// Searchable collection of doctor reference records.
pub struct DoctorDirectory {
    doctors: Vec<Doctor>,
    sink: Arc<dyn NotificationSink>,
}

impl DoctorDirectory {
    pub fn new(doctors: Vec<Doctor>, sink: Arc<dyn NotificationSink>) -> Self {
        Self { doctors, sink }
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    /// Filter doctors the way the prototype did: an empty query matches
    /// everything, otherwise the query must appear in the name or specialty
    /// (case-insensitive); a specialty filter narrows further by substring.
    pub fn search(&self, query: &str, specialty: Option<&str>) -> Vec<&Doctor> {
        let query = query.to_lowercase();
        let specialty = specialty.map(str::to_lowercase);

        self.doctors
            .iter()
            .filter(|doctor| {
                let matches_query = query.is_empty()
                    || doctor.name.to_lowercase().contains(&query)
                    || doctor.specialty.to_lowercase().contains(&query);
                let matches_specialty = specialty
                    .as_deref()
                    .map_or(true, |s| doctor.specialty.to_lowercase().contains(s));
                matches_query && matches_specialty
            })
            .collect()
    }

    /// Book a consultation with a doctor by name.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::UnknownDoctor` if no record matches the name.
    pub fn book(
        &self,
        doctor_name: &str,
        consultation_type: ConsultationType,
    ) -> Result<BookingConfirmation, DirectoryError> {
        let doctor = self
            .doctors
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(doctor_name))
            .ok_or_else(|| DirectoryError::UnknownDoctor(doctor_name.to_owned()))?;

        tracing::info!(doctor = %doctor.name, kind = %consultation_type, "consultation booked");
        self.sink.notify(
            "Consultation Booked!",
            &format!(
                "Your {} consultation with {} is scheduled for {}",
                consultation_type, doctor.name, doctor.next_slot
            ),
        );

        Ok(BookingConfirmation {
            doctor_name: doctor.name.clone(),
            consultation_type,
            slot: doctor.next_slot.clone(),
            booked_at: Utc::now(),
        })
    }
}
