//! Appointment models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lifecycle state of an appointment.
///
/// The form offers only the three known states. Reads accept whatever text
/// the server stored: known states match case-insensitively, anything else is
/// kept verbatim in [`AppointmentStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    Other(String),
}

impl AppointmentStatus {
    /// States offered by the appointment form
    pub const ALL: [AppointmentStatus; 3] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, AppointmentStatus::Other(_))
    }

    /// Lower-cased style class, for display only
    pub fn style_class(&self) -> String {
        format!("status-{}", self.as_str().trim().to_lowercase())
    }

    fn known(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for AppointmentStatus {
    fn from(raw: String) -> Self {
        Self::known(&raw).unwrap_or(AppointmentStatus::Other(raw))
    }
}

/// Strict parse used for form input: only the known states are accepted
impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::known(s).ok_or_else(|| format!("Unknown appointment status '{s}'"))
    }
}

impl Serialize for AppointmentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AppointmentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// An appointment attached to a patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub doctor: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub notes: String,
    pub status: AppointmentStatus,
}

/// Fields submitted when booking an appointment
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppointmentForm {
    pub doctor: String,
    pub date: String,
    pub notes: String,
    pub status: AppointmentStatus,
}

impl AppointmentForm {
    /// Multipart field pairs in submission order
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("doctor", self.doctor.clone()),
            ("date", self.date.clone()),
            ("notes", self.notes.clone()),
            ("status", self.status.to_string()),
        ]
    }
}

/// Fields changed on an existing appointment; unset fields are left alone
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppointmentUpdate {
    pub doctor: Option<String>,
    pub date: Option<String>,
    pub notes: Option<String>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentUpdate {
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Multipart field pairs for the fields being changed
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        [
            ("doctor", self.doctor.clone()),
            ("date", self.date.clone()),
            ("notes", self.notes.clone()),
            ("status", self.status.as_ref().map(ToString::to_string)),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}
