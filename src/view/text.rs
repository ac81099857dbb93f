//! Plain-text formatting of rendered views for the terminal front-end.

use std::fmt::{self, Write as _};

use crate::services::{BusyIndicator, Notifier};
use crate::view::modal::{ModalId, ModalState};
use crate::view::render::{
    Affordance, AppointmentDetail, AppointmentListView, AppointmentSection, DoctorStatsView,
    EditAppointmentView, EditPatientView, PaginationView, PatientDetailView, PatientImage, PatientListView,
    SystemStatsView, UserBadge,
};
use crate::view::screen::{Listing, Screen};

impl fmt::Display for Affordance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Affordance::ViewPatient(id) => write!(f, "[view {id}]"),
            Affordance::EditPatient(id) => write!(f, "[edit {id}]"),
            Affordance::DeletePatient(id) => write!(f, "[delete {id}]"),
            Affordance::EditAppointment {
                patient_id,
                appointment_id,
            } => write!(f, "[edit-appointment {patient_id} {appointment_id}]"),
            Affordance::DeleteAppointment {
                patient_id,
                appointment_id,
            } => write!(f, "[delete-appointment {patient_id} {appointment_id}]"),
            Affordance::CloseModal(id) => write!(f, "[close {id}]"),
        }
    }
}

fn write_actions(f: &mut fmt::Formatter<'_>, actions: &[Affordance]) -> fmt::Result {
    if actions.is_empty() {
        return Ok(());
    }
    let joined: Vec<String> = actions.iter().map(ToString::to_string).collect();
    write!(f, "  {}", joined.join(" "))
}

impl fmt::Display for UserBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signed in as {}", self.username)?;
        if self.show_admin_indicator {
            f.write_str(" (admin)")?;
        }
        Ok(())
    }
}

impl fmt::Display for PatientListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatientListView::Empty { message } => write!(f, "  -- {message} --"),
            PatientListView::Rows { count_label, rows } => {
                write!(f, "  {count_label}")?;
                for row in rows {
                    let image = match &row.image {
                        PatientImage::Url(_) => "img",
                        PatientImage::Placeholder => "---",
                    };
                    write!(f, "\n  [{image}] {} ({})", row.name, row.age)?;
                    if let Some(gender) = &row.gender {
                        write!(f, " {gender}")?;
                    }
                    write!(
                        f,
                        " | {} | Appointments: {} | ID: {}",
                        row.condition, row.appointment_count, row.id
                    )?;
                    write!(f, "\n     ")?;
                    write_actions(f, &row.actions)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for PaginationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prev = if self.previous_enabled { "[prev-page]" } else { " prev-page " };
        let next = if self.next_enabled { "[next-page]" } else { " next-page " };
        write!(f, "  {prev} {} {next}", self.label)
    }
}

fn write_appointment(f: &mut fmt::Formatter<'_>, a: &AppointmentDetail) -> fmt::Result {
    write!(
        f,
        "    {} - {} <{}>\n      Date: {}\n      Notes: {}\n      Appointment ID: {}",
        a.doctor, a.status, a.style_class, a.date, a.notes, a.id
    )
}

impl fmt::Display for PatientDetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  {}", self.name)?;
        writeln!(f, "  Age: {}", self.age)?;
        if let Some(gender) = &self.gender {
            writeln!(f, "  Gender: {gender}")?;
        }
        writeln!(f, "  Condition: {}", self.condition)?;
        writeln!(f, "  ID: {}", self.id)?;
        if let Some(url) = &self.image_url {
            writeln!(f, "  Image: {url}")?;
        }
        writeln!(f, "  {}", self.appointments_heading)?;
        match &self.appointments {
            AppointmentSection::Empty { message } => writeln!(f, "    {message}")?,
            AppointmentSection::Items(items) => {
                for item in items {
                    write_appointment(f, item)?;
                    writeln!(f)?;
                }
            }
        }
        write_actions(f, &self.actions)
    }
}

impl fmt::Display for EditPatientView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Editing patient {}", self.patient_id)?;
        writeln!(f, "  Name: {}", self.form.name)?;
        writeln!(f, "  Age: {}", self.form.age)?;
        writeln!(f, "  Condition: {}", self.form.condition)?;
        if let Some(gender) = &self.form.gender {
            writeln!(f, "  Gender: {gender}")?;
        }
        writeln!(f, "  Image URL: {}", self.form.image_url.as_deref().unwrap_or(""))?;
        write!(f, "  [update-patient-btn] [close-edit-patient]")
    }
}

impl fmt::Display for EditAppointmentView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  Editing appointment {} of patient {}",
            self.appointment_id, self.patient_id
        )?;
        writeln!(f, "  Doctor: {}", self.doctor)?;
        writeln!(f, "  Date: {}", self.date)?;
        writeln!(f, "  Notes: {}", self.notes)?;
        writeln!(f, "  Status: {}", self.status)?;
        write!(f, "  [update-appointment-btn] [close-edit-appointment]")
    }
}

impl fmt::Display for AppointmentListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentListView::Empty { message } => write!(f, "  -- {message} --"),
            AppointmentListView::Items { patient_id, items } => {
                write!(f, "  Appointments for {patient_id}")?;
                for item in items {
                    writeln!(f)?;
                    write_appointment(f, &item.detail)?;
                    write_actions(f, &item.actions)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for SystemStatsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  System Stats")?;
        writeln!(f, "  Patients: {}", self.patients)?;
        writeln!(f, "  Total Appointments: {}", self.total_appointments)?;
        write!(f, "  Current User: {} ({})", self.current_user, self.role)
    }
}

impl fmt::Display for DoctorStatsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoctorStatsView::Empty { message } => write!(f, "  -- {message} --"),
            DoctorStatsView::Rows(rows) => {
                f.write_str("  Appointments per doctor")?;
                for row in rows {
                    write!(f, "\n    {:<24} {}", row.doctor, row.count)?;
                }
                Ok(())
            }
        }
    }
}

/// Render the whole screen, open modals last
pub fn screen_text(
    screen: &Screen,
    modals: &ModalState,
    notifier: &Notifier,
    busy: &BusyIndicator,
) -> String {
    let mut out = String::new();

    if busy.is_visible() {
        out.push_str("(loading...)\n");
    }
    if let Some(notification) = notifier.visible() {
        let _ = writeln!(out, "{notification}");
    }

    match &screen.user {
        None => out.push_str("Not signed in. Set username/password and click login-btn.\n"),
        Some(badge) => {
            let _ = writeln!(out, "{badge}");
            if let Some(patients) = &screen.patients {
                match &screen.listing {
                    Listing::Page => out.push_str("Patients\n"),
                    Listing::Search { query } => {
                        let _ = writeln!(out, "Search results for '{query}'");
                    }
                }
                let _ = writeln!(out, "{patients}");
            }
            if let (Listing::Page, Some(pagination)) = (&screen.listing, &screen.pagination) {
                let _ = writeln!(out, "{pagination}");
            }
            if let Some(appointments) = &screen.appointments {
                let _ = writeln!(out, "{appointments}");
            }
            if let Some(stats) = &screen.doctor_stats {
                let _ = writeln!(out, "{stats}");
            }
        }
    }

    for id in modals.open_modals() {
        let body = match id {
            ModalId::PatientDetails => screen.patient_details.as_ref().map(ToString::to_string),
            ModalId::EditPatient => screen.edit_patient.as_ref().map(ToString::to_string),
            ModalId::EditAppointment => screen.edit_appointment.as_ref().map(ToString::to_string),
            ModalId::Stats => screen.system_stats.as_ref().map(ToString::to_string),
        };
        if let Some(body) = body {
            let _ = writeln!(out, "== {id} ==\n{body}");
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DoctorCount;

    #[test]
    fn test_empty_list_text_is_distinct() {
        let view = PatientListView::Empty {
            message: "No patients found.".to_string(),
        };
        assert_eq!(view.to_string(), "  -- No patients found. --");
    }

    #[test]
    fn test_disabled_pagination_controls_are_not_bracketed() {
        let view = PaginationView {
            label: "Page 1 of 1".to_string(),
            current_page: 1,
            total_pages: 1,
            previous_enabled: false,
            next_enabled: false,
        };
        let text = view.to_string();
        assert!(!text.contains("[prev-page]"));
        assert!(!text.contains("[next-page]"));
        assert!(text.contains("Page 1 of 1"));
    }

    #[test]
    fn test_doctor_stats_text_keeps_order() {
        let view = DoctorStatsView::Rows(vec![
            DoctorCount { doctor: "Dr. Lee".to_string(), count: 9 },
            DoctorCount { doctor: "Dr. Brown".to_string(), count: 4 },
        ]);
        let text = view.to_string();
        let lee = text.find("Dr. Lee").unwrap();
        let brown = text.find("Dr. Brown").unwrap();
        assert!(lee < brown);
    }

    #[test]
    fn test_signed_out_screen() {
        let text = screen_text(
            &Screen::default(),
            &ModalState::default(),
            &Notifier::new(std::time::Duration::from_secs(5)),
            &BusyIndicator::default(),
        );
        assert!(text.contains("Not signed in"));
    }
}
