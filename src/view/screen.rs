//! The controller's display regions.

use crate::view::render::{
    AppointmentListView, DoctorStatsView, EditAppointmentView, EditPatientView, PaginationView,
    PatientDetailView, PatientListView, SystemStatsView, UserBadge,
};

/// What the patient list region is currently showing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Listing {
    #[default]
    Page,
    Search {
        query: String,
    },
}

/// Latest rendered view per region; a region is `None` until first rendered.
/// Each new response replaces its region wholesale.
#[derive(Debug, Clone, Default)]
pub struct Screen {
    pub user: Option<UserBadge>,
    pub patients: Option<PatientListView>,
    pub listing: Listing,
    pub pagination: Option<PaginationView>,
    pub patient_details: Option<PatientDetailView>,
    pub edit_patient: Option<EditPatientView>,
    pub edit_appointment: Option<EditAppointmentView>,
    pub appointments: Option<AppointmentListView>,
    pub system_stats: Option<SystemStatsView>,
    pub doctor_stats: Option<DoctorStatsView>,
}

impl Screen {
    /// Signed-out screen
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
