//! Pure view rendering.
//!
//! Every function here maps fetched data plus the session onto a description
//! of what to display. Nothing performs I/O or mutates state, so the
//! controller can re-render any region from the latest response.

use crate::models::{Appointment, AppointmentStatus, DoctorCount, Patient, PatientForm};
use crate::services::Session;
use crate::utils::format_date;
use crate::view::modal::ModalId;

pub const NO_PATIENTS: &str = "No patients found.";
pub const NO_APPOINTMENTS_SCHEDULED: &str = "No appointments scheduled.";
pub const NO_APPOINTMENTS_FOUND: &str = "No appointments found.";
pub const NO_STATS: &str = "No appointment statistics available.";

/// An action offered next to a rendered item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Affordance {
    ViewPatient(String),
    EditPatient(String),
    DeletePatient(String),
    EditAppointment {
        patient_id: String,
        appointment_id: String,
    },
    DeleteAppointment {
        patient_id: String,
        appointment_id: String,
    },
    CloseModal(ModalId),
}

impl Affordance {
    pub fn label(&self) -> &'static str {
        match self {
            Affordance::ViewPatient(_) => "View",
            Affordance::EditPatient(_) | Affordance::EditAppointment { .. } => "Edit",
            Affordance::DeletePatient(_) | Affordance::DeleteAppointment { .. } => "Delete",
            Affordance::CloseModal(_) => "Close",
        }
    }

    /// Whether the affordance is only offered to admins
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Affordance::DeletePatient(_)
                | Affordance::EditAppointment { .. }
                | Affordance::DeleteAppointment { .. }
        )
    }
}

/// Signed-in header: username, admin indicator and admin tool section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserBadge {
    pub username: String,
    pub show_admin_indicator: bool,
    pub show_admin_section: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientImage {
    Url(String),
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRow {
    pub id: String,
    pub name: String,
    pub age: String,
    pub gender: Option<String>,
    pub condition: String,
    pub appointment_count: usize,
    pub image: PatientImage,
    pub actions: Vec<Affordance>,
}

/// A patient list, or the distinct empty state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientListView {
    Empty { message: String },
    Rows { count_label: String, rows: Vec<PatientRow> },
}

impl PatientListView {
    pub fn is_empty_state(&self) -> bool {
        matches!(self, PatientListView::Empty { .. })
    }

    pub fn rows(&self) -> &[PatientRow] {
        match self {
            PatientListView::Empty { .. } => &[],
            PatientListView::Rows { rows, .. } => rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub label: String,
    pub current_page: u32,
    pub total_pages: u32,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentDetail {
    pub id: String,
    pub doctor: String,
    pub status: AppointmentStatus,
    /// Lower-cased style hook; comparisons use `status`
    pub style_class: String,
    pub date: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentSection {
    Empty { message: String },
    Items(Vec<AppointmentDetail>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientDetailView {
    pub id: String,
    pub name: String,
    pub age: String,
    pub gender: Option<String>,
    pub condition: String,
    pub image_url: Option<String>,
    pub appointments_heading: String,
    pub appointments: AppointmentSection,
    pub actions: Vec<Affordance>,
}

/// Edit form pre-filled with the patient's current values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPatientView {
    pub patient_id: String,
    pub form: PatientForm,
}

/// Appointment edit form; values are the stored text, not display-formatted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditAppointmentView {
    pub patient_id: String,
    pub appointment_id: String,
    pub doctor: String,
    pub date: String,
    pub notes: String,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentItem {
    pub detail: AppointmentDetail,
    pub actions: Vec<Affordance>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentListView {
    Empty { message: String },
    Items { patient_id: String, items: Vec<AppointmentItem> },
}

impl AppointmentListView {
    pub fn is_empty_state(&self) -> bool {
        matches!(self, AppointmentListView::Empty { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemStatsView {
    pub patients: usize,
    pub total_appointments: usize,
    pub current_user: String,
    pub role: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoctorStatsView {
    Empty { message: String },
    Rows(Vec<DoctorCount>),
}

pub fn render_user_badge(session: &Session) -> Option<UserBadge> {
    let username = session.username()?;
    Some(UserBadge {
        username: username.to_string(),
        show_admin_indicator: session.is_admin(),
        show_admin_section: session.is_admin(),
    })
}

/// One row per patient; delete is offered only to admins
pub fn render_patient_list(patients: &[Patient], session: &Session) -> PatientListView {
    if patients.is_empty() {
        return PatientListView::Empty {
            message: NO_PATIENTS.to_string(),
        };
    }

    let rows = patients
        .iter()
        .map(|p| {
            let mut actions = vec![
                Affordance::ViewPatient(p.id.clone()),
                Affordance::EditPatient(p.id.clone()),
            ];
            if session.is_admin() {
                actions.push(Affordance::DeletePatient(p.id.clone()));
            }

            PatientRow {
                id: p.id.clone(),
                name: display_name(p),
                age: display_age(p),
                gender: p.gender.clone().filter(|g| !g.is_empty()),
                condition: display_condition(p),
                appointment_count: p.appointment_count(),
                image: match p.image_url.as_deref() {
                    Some(url) if !url.trim().is_empty() => PatientImage::Url(url.to_string()),
                    _ => PatientImage::Placeholder,
                },
                actions,
            }
        })
        .collect();

    PatientListView::Rows {
        count_label: format!("{} patients", patients.len()),
        rows,
    }
}

pub fn render_pagination(session: &Session) -> PaginationView {
    PaginationView {
        label: format!("Page {} of {}", session.current_page(), session.total_pages()),
        current_page: session.current_page(),
        total_pages: session.total_pages(),
        previous_enabled: session.can_go_previous(),
        next_enabled: session.can_go_next(),
    }
}

/// Detail panel with appointments in the order the server sent them
pub fn render_patient_details(patient: &Patient) -> PatientDetailView {
    let appointments = if patient.appointments.is_empty() {
        AppointmentSection::Empty {
            message: NO_APPOINTMENTS_SCHEDULED.to_string(),
        }
    } else {
        AppointmentSection::Items(patient.appointments.iter().map(appointment_detail).collect())
    };

    PatientDetailView {
        id: patient.id.clone(),
        name: display_name(patient),
        age: display_age(patient),
        gender: patient.gender.clone().filter(|g| !g.is_empty()),
        condition: display_condition(patient),
        image_url: patient.image_url.clone().filter(|u| !u.trim().is_empty()),
        appointments_heading: format!("Appointments ({}):", patient.appointment_count()),
        appointments,
        actions: vec![
            Affordance::CloseModal(ModalId::PatientDetails),
            Affordance::EditPatient(patient.id.clone()),
        ],
    }
}

pub fn render_edit_form(patient: &Patient) -> EditPatientView {
    EditPatientView {
        patient_id: patient.id.clone(),
        form: patient.to_form(),
    }
}

pub fn render_appointment_list(
    appointments: &[Appointment],
    patient_id: &str,
    session: &Session,
) -> AppointmentListView {
    if appointments.is_empty() {
        return AppointmentListView::Empty {
            message: NO_APPOINTMENTS_FOUND.to_string(),
        };
    }

    let items = appointments
        .iter()
        .map(|a| {
            let actions = if session.is_admin() {
                vec![
                    Affordance::EditAppointment {
                        patient_id: patient_id.to_string(),
                        appointment_id: a.id.clone(),
                    },
                    Affordance::DeleteAppointment {
                        patient_id: patient_id.to_string(),
                        appointment_id: a.id.clone(),
                    },
                ]
            } else {
                Vec::new()
            };
            AppointmentItem {
                detail: appointment_detail(a),
                actions,
            }
        })
        .collect();

    AppointmentListView::Items {
        patient_id: patient_id.to_string(),
        items,
    }
}

pub fn render_edit_appointment(patient_id: &str, appointment: &Appointment) -> EditAppointmentView {
    EditAppointmentView {
        patient_id: patient_id.to_string(),
        appointment_id: appointment.id.clone(),
        doctor: appointment.doctor.clone(),
        date: appointment.date.clone().unwrap_or_default(),
        notes: appointment.notes.clone(),
        status: appointment.status.clone(),
    }
}

/// Client-side reduce over an already fetched patient list
pub fn render_system_stats(patients: &[Patient], session: &Session) -> SystemStatsView {
    SystemStatsView {
        patients: patients.len(),
        total_appointments: patients.iter().map(Patient::appointment_count).sum(),
        current_user: session.username().unwrap_or_default().to_string(),
        role: if session.is_admin() { "Admin" } else { "User" },
    }
}

pub fn render_doctor_stats(rows: &[DoctorCount]) -> DoctorStatsView {
    if rows.is_empty() {
        DoctorStatsView::Empty {
            message: NO_STATS.to_string(),
        }
    } else {
        DoctorStatsView::Rows(rows.to_vec())
    }
}

fn appointment_detail(a: &Appointment) -> AppointmentDetail {
    AppointmentDetail {
        id: a.id.clone(),
        doctor: a.doctor.clone(),
        status: a.status.clone(),
        style_class: a.status.style_class(),
        date: format_date(a.date.as_deref()),
        notes: a.notes.clone(),
    }
}

fn display_name(p: &Patient) -> String {
    p.name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("Unnamed")
        .to_string()
}

fn display_age(p: &Patient) -> String {
    p.age.map(|a| a.to_string()).unwrap_or_else(|| "N/A".to_string())
}

fn display_condition(p: &Patient) -> String {
    p.condition
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or("N/A")
        .to_string()
}
