//! Booking, listing, editing and deleting appointments.

use crate::error::ClientError;
use crate::handlers::Controller;
use crate::models::{AppointmentForm, AppointmentStatus, AppointmentUpdate};
use crate::view::{ModalId, fields, render_appointment_list, render_edit_appointment};

impl Controller {
    /// Book an appointment from the appointment form, then show that
    /// patient's appointments
    pub async fn add_appointment(&mut self) -> Result<(), ClientError> {
        let patient_id = self.inputs.value(fields::APPOINTMENT_PATIENT_ID);
        let doctor = self.inputs.value(fields::APPOINTMENT_DOCTOR);
        let date = self.inputs.value(fields::APPOINTMENT_DATE);
        let notes = self.inputs.value(fields::APPOINTMENT_NOTES);
        if patient_id.is_empty() || doctor.is_empty() || date.is_empty() || notes.is_empty() {
            return self.missing_fields("Please fill in all appointment fields");
        }

        let status = match self.inputs.optional(fields::APPOINTMENT_STATUS) {
            None => AppointmentStatus::default(),
            Some(raw) => match raw.parse::<AppointmentStatus>() {
                Ok(status) => status,
                Err(message) => return self.missing_fields(&message),
            },
        };

        let form = AppointmentForm {
            doctor,
            date,
            notes,
            status,
        };
        self.api
            .add_appointment(self.session.token(), &patient_id, &form)
            .await?;

        self.notifier.success("Appointment added successfully");
        self.inputs.clear(fields::APPOINTMENT_FORM);
        self.inputs.set(fields::VIEW_PATIENT_ID, patient_id.clone());
        self.load_appointments(&patient_id).await
    }

    /// List appointments for the patient id in the lookup field
    pub async fn view_appointments(&mut self) -> Result<(), ClientError> {
        let patient_id = self.inputs.value(fields::VIEW_PATIENT_ID);
        if patient_id.is_empty() {
            return self.missing_fields("Enter patient ID");
        }
        self.load_appointments(&patient_id).await
    }

    pub async fn load_appointments(&mut self, patient_id: &str) -> Result<(), ClientError> {
        let list = self
            .api
            .list_appointments(self.session.token(), patient_id)
            .await?;
        self.screen.appointments = Some(render_appointment_list(
            &list.appointments,
            patient_id,
            &self.session,
        ));
        Ok(())
    }

    /// Admin only. Open the edit form pre-filled with the stored values.
    pub async fn edit_appointment(
        &mut self,
        patient_id: &str,
        appointment_id: &str,
    ) -> Result<(), ClientError> {
        self.require_admin("edit_appointment")?;

        let appointment = self
            .api
            .get_appointment(self.session.token(), patient_id, appointment_id)
            .await?;
        let view = render_edit_appointment(patient_id, &appointment);

        self.inputs.set(fields::EDIT_APPOINTMENT_DOCTOR, view.doctor.clone());
        self.inputs.set(fields::EDIT_APPOINTMENT_DATE, view.date.clone());
        self.inputs.set(fields::EDIT_APPOINTMENT_NOTES, view.notes.clone());
        self.inputs
            .set(fields::EDIT_APPOINTMENT_STATUS, view.status.as_str());

        self.screen.edit_appointment = Some(view);
        self.modals.open(ModalId::EditAppointment);
        Ok(())
    }

    /// Admin only. Send the fields that differ from the stored appointment,
    /// then show that patient's appointments.
    pub async fn update_appointment(&mut self) -> Result<(), ClientError> {
        self.require_admin("update_appointment")?;

        let Some(editing) = self.screen.edit_appointment.clone() else {
            return self.missing_fields("No appointment is being edited");
        };

        let doctor = self.inputs.value(fields::EDIT_APPOINTMENT_DOCTOR);
        let date = self.inputs.value(fields::EDIT_APPOINTMENT_DATE);
        let notes = self.inputs.value(fields::EDIT_APPOINTMENT_NOTES);
        let status = self.inputs.value(fields::EDIT_APPOINTMENT_STATUS);
        if doctor.is_empty() || date.is_empty() {
            return self.missing_fields("Please fill in all appointment fields");
        }

        // An unlisted stored status may be kept as is, but not typed in
        let status = if status == editing.status.as_str().trim() {
            None
        } else {
            match status.parse::<AppointmentStatus>() {
                Ok(status) => Some(status).filter(|s| *s != editing.status),
                Err(message) => return self.missing_fields(&message),
            }
        };

        let update = AppointmentUpdate {
            doctor: Some(doctor).filter(|d| *d != editing.doctor.trim()),
            date: Some(date).filter(|d| *d != editing.date.trim()),
            notes: Some(notes).filter(|n| *n != editing.notes.trim()),
            status,
        };
        if update.is_empty() {
            self.notifier.warning("No changes to save");
            return Ok(());
        }

        self.api
            .update_appointment(
                self.session.token(),
                &editing.patient_id,
                &editing.appointment_id,
                &update,
            )
            .await?;

        self.notifier.success("Appointment updated successfully");
        self.modals.close(ModalId::EditAppointment);
        self.screen.edit_appointment = None;
        self.inputs.clear(fields::EDIT_APPOINTMENT_FORM);
        self.inputs.set(fields::VIEW_PATIENT_ID, editing.patient_id.clone());
        self.load_appointments(&editing.patient_id).await
    }

    /// Admin only. Confirmation is the front-end's job before this runs.
    pub async fn delete_appointment(
        &mut self,
        patient_id: &str,
        appointment_id: &str,
    ) -> Result<(), ClientError> {
        self.require_admin("delete_appointment")?;

        self.api
            .delete_appointment(self.session.token(), patient_id, appointment_id)
            .await?;

        self.notifier.success("Appointment deleted successfully");
        self.load_appointments(patient_id).await
    }
}
