//! Reference fixtures from the Nabha Health prototype.
//!
//! Components take their reference data at construction so tests can
//! substitute fixtures. These constructors provide the prototype's built-in
//! records for the CLI and for tests that want realistic data.

use crate::alerts::{AlertPriority, HealthAlert};
use crate::directory::Doctor;
use crate::volunteer::{
    HelpCategory, HelpRequest, Ngo, RequestStatus, Urgency, Volunteer,
};
use chrono::{Duration, Utc};
use uuid::Uuid;

/// The prototype's doctor directory.
pub fn doctors() -> Vec<Doctor> {
    vec![
        Doctor {
            name: "Dr. Harpreet Singh".into(),
            specialty: "General Medicine".into(),
            experience_years: 15,
            rating: 4.8,
            reviews: 1_250,
            languages: vec!["Punjabi".into(), "Hindi".into(), "English".into()],
            availability: "Available now".into(),
            consultation_fee: "Free (Ayushman)".into(),
            location: "Nabha Civil Hospital".into(),
            next_slot: "2:30 PM Today".into(),
        },
        Doctor {
            name: "Dr. Simran Kaur".into(),
            specialty: "Pediatrics".into(),
            experience_years: 12,
            rating: 4.9,
            reviews: 890,
            languages: vec!["Punjabi".into(), "Hindi".into(), "English".into()],
            availability: "Available in 30 mins".into(),
            consultation_fee: "₹200".into(),
            location: "Child Care Clinic, Patiala".into(),
            next_slot: "3:00 PM Today".into(),
        },
        Doctor {
            name: "Dr. Rajesh Sharma".into(),
            specialty: "Orthopedics".into(),
            experience_years: 20,
            rating: 4.7,
            reviews: 2_100,
            languages: vec!["Hindi".into(), "English".into()],
            availability: "Available tomorrow".into(),
            consultation_fee: "₹300".into(),
            location: "Bone & Joint Clinic, Rajpura".into(),
            next_slot: "10:00 AM Tomorrow".into(),
        },
    ]
}

/// The prototype's community volunteers.
pub fn volunteers() -> Vec<Volunteer> {
    vec![
        Volunteer {
            name: "Gurpreet Singh".into(),
            role: "Transport Volunteer".into(),
            rating: 4.9,
            completed_requests: 45,
            location: "Nabha City".into(),
            availability: "Available now".into(),
            specialties: vec!["Emergency Transport".into(), "Hospital Rides".into()],
            phone: "+91-98765-43210".into(),
        },
        Volunteer {
            name: "Manjeet Kaur".into(),
            role: "Medicine Support".into(),
            rating: 4.8,
            completed_requests: 32,
            location: "Rajpura Road".into(),
            availability: "Available in 1 hour".into(),
            specialties: vec!["Medicine Delivery".into(), "Pharmacy Assistance".into()],
            phone: "+91-98765-43211".into(),
        },
        Volunteer {
            name: "Raman Sharma".into(),
            role: "Emergency Volunteer".into(),
            rating: 5.0,
            completed_requests: 67,
            location: "Civil Hospital Area".into(),
            availability: "24/7 Emergency".into(),
            specialties: vec!["Medical Emergency".into(), "Ambulance Support".into()],
            phone: "+91-98765-43212".into(),
        },
    ]
}

/// Partner NGOs in the Nabha area.
pub fn ngos() -> Vec<Ngo> {
    vec![
        Ngo {
            name: "Sarbat Da Bhala Foundation".into(),
            kind: "Healthcare NGO".into(),
            services: vec![
                "Free Medicine".into(),
                "Transport".into(),
                "Emergency Care".into(),
            ],
            contact: "+91-98765-00001".into(),
            location: "Nabha, Punjab".into(),
        },
        Ngo {
            name: "Rural Health Initiative".into(),
            kind: "Community Health".into(),
            services: vec![
                "Mobile Clinics".into(),
                "Health Education".into(),
                "Nutrition Support".into(),
            ],
            contact: "+91-98765-00002".into(),
            location: "Patiala District".into(),
        },
    ]
}

/// Help requests already open when the prototype loads.
pub fn open_requests() -> Vec<HelpRequest> {
    let now = Utc::now();
    vec![
        HelpRequest {
            id: Uuid::new_v4(),
            category: HelpCategory::Transport,
            description: "Ride from Village Bhankharpur to Civil Hospital Nabha".into(),
            location: "Village Bhankharpur".into(),
            urgency: Urgency::High,
            status: RequestStatus::VolunteerAssigned,
            requested_at: now - Duration::hours(2),
            assigned_volunteer: Some("Simran Kaur".into()),
        },
        HelpRequest {
            id: Uuid::new_v4(),
            category: HelpCategory::Medicine,
            description: "Need BP medicine, cannot afford full cost".into(),
            location: "Sector 12, Nabha".into(),
            urgency: Urgency::Medium,
            status: RequestStatus::Pending,
            requested_at: now - Duration::hours(5),
            assigned_volunteer: None,
        },
    ]
}

/// The prototype's sidebar health alerts.
pub fn health_alerts() -> Vec<HealthAlert> {
    vec![
        HealthAlert {
            category: "Weather Alert".into(),
            priority: AlertPriority::High,
            message: "Cold wave warning for next 3 days. Asthma patients should take extra precautions.".into(),
            suggested_action: "View Prevention Tips".into(),
        },
        HealthAlert {
            category: "Seasonal Advisory".into(),
            priority: AlertPriority::Medium,
            message: "Flu cases increasing in Nabha area. Consider getting vaccinated.".into(),
            suggested_action: "Book Vaccination".into(),
        },
        HealthAlert {
            category: "Medicine Reminder".into(),
            priority: AlertPriority::Low,
            message: "Your BP medication refill is due in 3 days.".into(),
            suggested_action: "Order Refill".into(),
        },
    ]
}
