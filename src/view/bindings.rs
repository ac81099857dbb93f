//! Event binding table and form inputs.
//!
//! UI elements are wired to handlers through one table built when the
//! controller starts, instead of handler names embedded in markup. Form
//! fields live in [`Inputs`], keyed by the same element ids.

use std::collections::HashMap;

use crate::view::modal::ModalId;

/// Input field ids
pub mod fields {
    pub const USERNAME: &str = "username";
    pub const PASSWORD: &str = "password";

    pub const PATIENT_NAME: &str = "patient-name";
    pub const PATIENT_AGE: &str = "patient-age";
    pub const PATIENT_CONDITION: &str = "patient-condition";
    pub const PATIENT_IMAGE: &str = "patient-image";
    pub const PATIENT_GENDER: &str = "patient-gender";

    pub const EDIT_NAME: &str = "edit-name";
    pub const EDIT_AGE: &str = "edit-age";
    pub const EDIT_CONDITION: &str = "edit-condition";
    pub const EDIT_IMAGE: &str = "edit-image";
    pub const EDIT_GENDER: &str = "edit-gender";

    pub const SEARCH_QUERY: &str = "search-query";

    pub const APPOINTMENT_PATIENT_ID: &str = "appointment-patient-id";
    pub const APPOINTMENT_DOCTOR: &str = "appointment-doctor";
    pub const APPOINTMENT_DATE: &str = "appointment-date";
    pub const APPOINTMENT_NOTES: &str = "appointment-notes";
    pub const APPOINTMENT_STATUS: &str = "appointment-status";

    pub const EDIT_APPOINTMENT_DOCTOR: &str = "edit-appointment-doctor";
    pub const EDIT_APPOINTMENT_DATE: &str = "edit-appointment-date";
    pub const EDIT_APPOINTMENT_NOTES: &str = "edit-appointment-notes";
    pub const EDIT_APPOINTMENT_STATUS: &str = "edit-appointment-status";

    pub const VIEW_PATIENT_ID: &str = "view-patient-id";

    pub const PATIENT_FORM: &[&str] = &[
        PATIENT_NAME,
        PATIENT_AGE,
        PATIENT_CONDITION,
        PATIENT_IMAGE,
        PATIENT_GENDER,
    ];

    pub const EDIT_FORM: &[&str] = &[EDIT_NAME, EDIT_AGE, EDIT_CONDITION, EDIT_IMAGE, EDIT_GENDER];

    pub const APPOINTMENT_FORM: &[&str] = &[
        APPOINTMENT_PATIENT_ID,
        APPOINTMENT_DOCTOR,
        APPOINTMENT_DATE,
        APPOINTMENT_NOTES,
        APPOINTMENT_STATUS,
    ];

    pub const EDIT_APPOINTMENT_FORM: &[&str] = &[
        EDIT_APPOINTMENT_DOCTOR,
        EDIT_APPOINTMENT_DATE,
        EDIT_APPOINTMENT_NOTES,
        EDIT_APPOINTMENT_STATUS,
    ];
}

/// A handler reachable from a static UI element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    Login,
    Logout,
    VerifySession,
    LoadPatients,
    PreviousPage,
    NextPage,
    AddPatient,
    UpdatePatient,
    ClearPatientForm,
    QuickFillPatient,
    Search,
    ClearSearch,
    AddAppointment,
    UpdateAppointment,
    ViewAppointments,
    ClearAppointmentForm,
    QuickFillAppointment,
    SystemStats,
    AppointmentStats,
    ClearAllForms,
    CloseModal(ModalId),
}

impl Handler {
    pub fn name(&self) -> &'static str {
        match self {
            Handler::Login => "login",
            Handler::Logout => "logout",
            Handler::VerifySession => "verify_session",
            Handler::LoadPatients => "load_patients",
            Handler::PreviousPage => "previous_page",
            Handler::NextPage => "next_page",
            Handler::AddPatient => "add_patient",
            Handler::UpdatePatient => "update_patient",
            Handler::ClearPatientForm => "clear_patient_form",
            Handler::QuickFillPatient => "quick_fill_patient",
            Handler::Search => "search",
            Handler::ClearSearch => "clear_search",
            Handler::AddAppointment => "add_appointment",
            Handler::UpdateAppointment => "update_appointment",
            Handler::ViewAppointments => "view_appointments",
            Handler::ClearAppointmentForm => "clear_appointment_form",
            Handler::QuickFillAppointment => "quick_fill_appointment",
            Handler::SystemStats => "system_stats",
            Handler::AppointmentStats => "appointment_stats",
            Handler::ClearAllForms => "clear_all_forms",
            Handler::CloseModal(_) => "close_modal",
        }
    }
}

/// Element id → handler, plus the fields that submit on Enter
#[derive(Debug, Clone)]
pub struct EventBindings {
    clicks: HashMap<&'static str, Handler>,
    enter_submits: HashMap<&'static str, Handler>,
}

impl EventBindings {
    /// The bindings for the standard screen layout
    pub fn standard() -> Self {
        let clicks = HashMap::from([
            ("login-btn", Handler::Login),
            ("logout-btn", Handler::Logout),
            ("verify-btn", Handler::VerifySession),
            ("refresh-patients", Handler::LoadPatients),
            ("prev-page", Handler::PreviousPage),
            ("next-page", Handler::NextPage),
            ("add-patient-btn", Handler::AddPatient),
            ("update-patient-btn", Handler::UpdatePatient),
            ("clear-patient-form", Handler::ClearPatientForm),
            ("quick-fill-patient", Handler::QuickFillPatient),
            ("search-btn", Handler::Search),
            ("clear-search-btn", Handler::ClearSearch),
            ("add-appointment-btn", Handler::AddAppointment),
            ("update-appointment-btn", Handler::UpdateAppointment),
            ("view-appointments-btn", Handler::ViewAppointments),
            ("clear-appointment-form", Handler::ClearAppointmentForm),
            ("quick-fill-appointment", Handler::QuickFillAppointment),
            ("system-stats-btn", Handler::SystemStats),
            ("appointment-stats-btn", Handler::AppointmentStats),
            ("clear-all-forms", Handler::ClearAllForms),
            ("close-patient-details", Handler::CloseModal(ModalId::PatientDetails)),
            ("close-edit-patient", Handler::CloseModal(ModalId::EditPatient)),
            ("close-edit-appointment", Handler::CloseModal(ModalId::EditAppointment)),
            ("close-stats", Handler::CloseModal(ModalId::Stats)),
        ]);

        let enter_submits = HashMap::from([
            (fields::USERNAME, Handler::Login),
            (fields::PASSWORD, Handler::Login),
            (fields::SEARCH_QUERY, Handler::Search),
        ]);

        Self {
            clicks,
            enter_submits,
        }
    }

    pub fn on_click(&self, element_id: &str) -> Option<Handler> {
        self.clicks.get(element_id).copied()
    }

    pub fn on_enter(&self, field_id: &str) -> Option<Handler> {
        self.enter_submits.get(field_id).copied()
    }

    /// Bound element ids, sorted
    pub fn elements(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.clicks.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// Current values of the form fields
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    values: HashMap<String, String>,
}

impl Inputs {
    /// Trimmed value of a field; unset fields read as empty
    pub fn value(&self, field: &str) -> String {
        self.values
            .get(field)
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    /// Trimmed value, or `None` when blank
    pub fn optional(&self, field: &str) -> Option<String> {
        Some(self.value(field)).filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());
    }

    pub fn clear(&mut self, fields: &[&str]) {
        for field in fields {
            self.values.remove(*field);
        }
    }
}
