//! Response envelopes for the list, search, stats and write endpoints.

use serde::{Deserialize, Serialize};

use super::{Appointment, Patient};

/// Response of `GET /patients?page&limit`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientPage {
    #[serde(default)]
    pub patients: Vec<Patient>,
    #[serde(default)]
    pub count: u64,
    /// Total matching records; newer servers send it alongside the page size
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
}

impl PatientPage {
    /// Record count used for the page arithmetic
    pub fn total_count(&self) -> u64 {
        self.total.unwrap_or(self.count)
    }
}

/// Response of `GET /search?q=`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub results: Vec<Patient>,
    #[serde(default)]
    pub query: Option<String>,
}

/// Response of `GET /patients/{id}/appointments`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentList {
    #[serde(default)]
    pub appointments: Vec<Appointment>,
}

/// One row of the per-doctor appointment statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorCount {
    pub doctor: String,
    pub count: u64,
}

/// `GET /stats/appointments` has been served both bare and wrapped
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AppointmentStats {
    Bare(Vec<DoctorCount>),
    Wrapped { results: Vec<DoctorCount> },
}

impl AppointmentStats {
    /// Rows in server order
    pub fn into_rows(self) -> Vec<DoctorCount> {
        match self {
            AppointmentStats::Bare(rows) => rows,
            AppointmentStats::Wrapped { results } => results,
        }
    }
}

/// Acknowledgement returned by update, delete, logout and verify
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

/// Acknowledgement returned by the create endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Created {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub appointment_id: Option<String>,
}

/// Error payload of a non-2xx response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Server-supplied message, preferring `error` over `message`
    pub fn into_message(self) -> Option<String> {
        self.error
            .or(self.message)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}
