//! Quick-fill and clearing of form fields. No network access here.

use chrono::{Duration, Local};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::handlers::Controller;
use crate::models::AppointmentStatus;
use crate::view::fields;

const SAMPLE_NAMES: &[&str] = &[
    "John Smith",
    "Maria Garcia",
    "David Johnson",
    "Sarah Williams",
    "Michael Brown",
    "Emily Davis",
];

const SAMPLE_CONDITIONS: &[&str] = &[
    "Hypertension",
    "Diabetes Type 2",
    "Asthma",
    "Arthritis",
    "Migraine",
    "Back Pain",
];

const SAMPLE_IMAGE_URL: &str = "https://via.placeholder.com/150/667eea/ffffff?text=Patient";

const SAMPLE_GENDERS: &[&str] = &["male", "female"];

const SAMPLE_DOCTORS: &[&str] = &["Dr. Smith", "Dr. Johnson", "Dr. Williams", "Dr. Brown", "Dr. Lee"];

const SAMPLE_NOTES: &[&str] = &[
    "Regular checkup",
    "Follow-up visit",
    "Blood pressure review",
    "Medication adjustment",
];

/// Format accepted by the appointment date field
pub const APPOINTMENT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

fn pick(options: &[&'static str]) -> &'static str {
    options.choose(&mut rand::rng()).copied().unwrap_or_default()
}

impl Controller {
    /// Fill the add-patient form with plausible sample values
    pub fn quick_fill_patient(&mut self) {
        let age: u32 = rand::rng().random_range(20..90);

        self.inputs.set(fields::PATIENT_NAME, pick(SAMPLE_NAMES));
        self.inputs.set(fields::PATIENT_AGE, age.to_string());
        self.inputs.set(fields::PATIENT_CONDITION, pick(SAMPLE_CONDITIONS));
        self.inputs.set(fields::PATIENT_GENDER, pick(SAMPLE_GENDERS));
        self.inputs.set(fields::PATIENT_IMAGE, SAMPLE_IMAGE_URL);
        self.notifier.success("Patient form filled with sample data");
    }

    /// Fill the appointment form; the date is this time tomorrow
    pub fn quick_fill_appointment(&mut self) {
        let tomorrow = Local::now() + Duration::days(1);

        self.inputs.set(fields::APPOINTMENT_DOCTOR, pick(SAMPLE_DOCTORS));
        self.inputs.set(
            fields::APPOINTMENT_DATE,
            tomorrow.format(APPOINTMENT_DATE_FORMAT).to_string(),
        );
        self.inputs.set(fields::APPOINTMENT_NOTES, pick(SAMPLE_NOTES));
        self.inputs
            .set(fields::APPOINTMENT_STATUS, AppointmentStatus::Scheduled.as_str());
        self.notifier.success("Appointment form filled with sample data");
    }

    pub fn clear_patient_form(&mut self) {
        self.inputs.clear(fields::PATIENT_FORM);
    }

    pub fn clear_appointment_form(&mut self) {
        self.inputs.clear(fields::APPOINTMENT_FORM);
        self.inputs
            .set(fields::APPOINTMENT_STATUS, AppointmentStatus::Scheduled.as_str());
    }

    /// Every form plus the search and lookup fields
    pub fn clear_all_forms(&mut self) {
        self.clear_patient_form();
        self.clear_appointment_form();
        self.inputs
            .clear(&[fields::SEARCH_QUERY, fields::VIEW_PATIENT_ID]);
        self.notifier.success("All forms cleared");
    }
}
