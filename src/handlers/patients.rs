//! Patient list paging and patient CRUD.

use tracing::debug;

use crate::error::ClientError;
use crate::handlers::Controller;
use crate::models::PatientForm;
use crate::view::{
    Listing, ModalId, fields, render_edit_form, render_pagination, render_patient_details,
    render_patient_list,
};

const REQUIRED_PATIENT_FIELDS: &str = "Please fill in all required fields";

impl Controller {
    /// Fetch one page of patients and re-render the list and pagination
    pub async fn load_patients(&mut self, page: u32) -> Result<(), ClientError> {
        let page = page.max(1);
        let data = self
            .api
            .list_patients(self.session.token(), page, self.session.page_limit())
            .await?;

        self.session.record_page(page, data.total_count());
        self.screen.patients = Some(render_patient_list(&data.patients, &self.session));
        self.screen.pagination = Some(render_pagination(&self.session));
        self.screen.listing = Listing::Page;
        Ok(())
    }

    /// Previous/next. A disabled control issues no request, and neither does
    /// paging while search results are shown.
    pub async fn change_page(&mut self, delta: i32) -> Result<(), ClientError> {
        if let Listing::Search { query } = &self.screen.listing {
            debug!(delta, query = %query, "Page change ignored during search");
            return Ok(());
        }

        match self.session.step_page(delta) {
            Some(page) => self.load_patients(page).await,
            None => {
                debug!(
                    delta,
                    current = self.session.current_page(),
                    total = self.session.total_pages(),
                    "Page change ignored"
                );
                Ok(())
            }
        }
    }

    /// Create a patient from the add form, then reload the current page
    pub async fn add_patient(&mut self) -> Result<(), ClientError> {
        let form = PatientForm {
            name: self.inputs.value(fields::PATIENT_NAME),
            age: self.inputs.value(fields::PATIENT_AGE),
            condition: self.inputs.value(fields::PATIENT_CONDITION),
            image_url: self.inputs.optional(fields::PATIENT_IMAGE),
            gender: self.inputs.optional(fields::PATIENT_GENDER),
        };
        if !has_required(&form) {
            return self.missing_fields(REQUIRED_PATIENT_FIELDS);
        }

        self.api.create_patient(self.session.token(), &form).await?;

        self.notifier.success("Patient added successfully");
        self.inputs.clear(fields::PATIENT_FORM);
        self.load_patients(self.session.current_page()).await
    }

    /// Open the detail view for one patient
    pub async fn view_patient(&mut self, id: &str) -> Result<(), ClientError> {
        let patient = self.api.get_patient(self.session.token(), id).await?;
        self.screen.patient_details = Some(render_patient_details(&patient));
        self.modals.open(ModalId::PatientDetails);
        Ok(())
    }

    /// Open the edit form pre-filled with the patient's current values
    pub async fn edit_patient(&mut self, id: &str) -> Result<(), ClientError> {
        let patient = self.api.get_patient(self.session.token(), id).await?;
        let view = render_edit_form(&patient);

        self.inputs.set(fields::EDIT_NAME, view.form.name.clone());
        self.inputs.set(fields::EDIT_AGE, view.form.age.clone());
        self.inputs.set(fields::EDIT_CONDITION, view.form.condition.clone());
        self.inputs
            .set(fields::EDIT_IMAGE, view.form.image_url.clone().unwrap_or_default());
        self.inputs
            .set(fields::EDIT_GENDER, view.form.gender.clone().unwrap_or_default());

        self.screen.edit_patient = Some(view);
        self.modals.open(ModalId::EditPatient);
        Ok(())
    }

    /// Submit the edit form for the patient currently being edited
    pub async fn update_patient(&mut self) -> Result<(), ClientError> {
        let editing = self.screen.edit_patient.as_ref().map(|view| view.patient_id.clone());
        let Some(id) = editing else {
            return self.missing_fields("No patient is being edited");
        };

        let form = PatientForm {
            name: self.inputs.value(fields::EDIT_NAME),
            age: self.inputs.value(fields::EDIT_AGE),
            condition: self.inputs.value(fields::EDIT_CONDITION),
            image_url: self.inputs.optional(fields::EDIT_IMAGE),
            gender: self.inputs.optional(fields::EDIT_GENDER),
        };
        if !has_required(&form) {
            return self.missing_fields(REQUIRED_PATIENT_FIELDS);
        }

        self.api
            .update_patient(self.session.token(), &id, &form)
            .await?;

        self.notifier.success("Patient updated successfully");
        self.modals.close(ModalId::EditPatient);
        self.screen.edit_patient = None;
        self.inputs.clear(fields::EDIT_FORM);
        self.load_patients(self.session.current_page()).await
    }

    /// Admin only. Confirmation is the front-end's job before this runs.
    pub async fn delete_patient(&mut self, id: &str) -> Result<(), ClientError> {
        self.require_admin("delete_patient")?;

        self.api.delete_patient(self.session.token(), id).await?;

        self.notifier.success("Patient deleted successfully");
        self.load_patients(self.session.current_page()).await
    }
}

fn has_required(form: &PatientForm) -> bool {
    !form.name.is_empty() && !form.age.is_empty() && !form.condition.is_empty()
}
