//! UI event handlers.
//!
//! The [`Controller`] owns the session, the API gateway and every display
//! region. Each user event resolves through the binding table to one handler,
//! which reads form inputs, calls the API, updates the session and re-renders.
//! Failures are caught here and shown as a transient notification.
//!
//! Handlers are split by concern:
//! - `auth` - login, logout, session verification
//! - `patients` - paging, patient CRUD, detail and edit views
//! - `search` - free-text search
//! - `appointments` - booking, listing, editing and deleting appointments
//! - `stats` - admin statistics
//! - `forms` - quick-fill and clearing of form fields

pub mod appointments;
pub mod auth;
pub mod forms;
pub mod patients;
pub mod search;
pub mod stats;

use tracing::{Instrument, debug, info_span, warn};

use crate::error::ClientError;
use crate::models::{SessionAuditEvent, SessionEventOutcome, SessionEventType};
use crate::services::{ApiClient, BusyIndicator, Notifier, Session};
use crate::view::text::screen_text;
use crate::view::{Affordance, EventBindings, Handler, Inputs, ModalState, Screen};

/// Keys with a bound meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
}

/// A user-initiated event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Click on a statically bound element
    Click(String),
    /// Click on an affordance rendered next to an item
    Activate(Affordance),
    /// Key press, optionally inside a form field
    KeyDown { field: Option<String>, key: Key },
}

/// Session and view controller for the patient records client
pub struct Controller {
    api: ApiClient,
    session: Session,
    bindings: EventBindings,
    inputs: Inputs,
    screen: Screen,
    modals: ModalState,
    notifier: Notifier,
    busy: BusyIndicator,
    stats_fetch_limit: u32,
}

impl Controller {
    pub fn new(api: ApiClient) -> Self {
        let config = api.config();
        let session = Session::new(config.page_limit);
        let notifier = Notifier::new(config.notification_ttl());
        let stats_fetch_limit = config.stats_fetch_limit;

        Self {
            api,
            session,
            bindings: EventBindings::standard(),
            inputs: Inputs::default(),
            screen: Screen::default(),
            modals: ModalState::default(),
            notifier,
            busy: BusyIndicator::default(),
            stats_fetch_limit,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn bindings(&self) -> &EventBindings {
        &self.bindings
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut Inputs {
        &mut self.inputs
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn modals(&self) -> &ModalState {
        &self.modals
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn busy(&self) -> &BusyIndicator {
        &self.busy
    }

    pub fn dismiss_notification(&mut self) {
        self.notifier.dismiss();
    }

    /// The whole screen as plain text
    pub fn render_text(&self) -> String {
        screen_text(&self.screen, &self.modals, &self.notifier, &self.busy)
    }

    /// Handle one event. Any error has already been shown as a notification
    /// when this returns; it is passed back for callers that want it.
    pub async fn handle(&mut self, event: UiEvent) -> Result<(), ClientError> {
        match event {
            UiEvent::Click(element) => match self.bindings.on_click(&element) {
                Some(handler) => self.run(handler).await,
                None => {
                    warn!(element = %element, "Click on an element with no binding");
                    Ok(())
                }
            },
            UiEvent::Activate(affordance) => self.activate(affordance).await,
            UiEvent::KeyDown { key: Key::Escape, .. } => {
                self.modals.close_all();
                Ok(())
            }
            UiEvent::KeyDown {
                key: Key::Enter,
                field,
            } => match field.as_deref().and_then(|f| self.bindings.on_enter(f)) {
                Some(handler) => self.run(handler).await,
                None => Ok(()),
            },
        }
    }

    /// Run a bound handler with the busy indicator up
    pub async fn run(&mut self, handler: Handler) -> Result<(), ClientError> {
        let span = info_span!("ui_action", action = handler.name());
        self.busy.begin();
        let result = self.dispatch(handler).instrument(span).await;
        self.busy.end();
        self.surface(result)
    }

    /// Run the action behind a rendered affordance
    pub async fn activate(&mut self, affordance: Affordance) -> Result<(), ClientError> {
        let span = info_span!("ui_action", action = affordance.label());
        self.busy.begin();
        let result = match affordance {
            Affordance::ViewPatient(id) => self.view_patient(&id).instrument(span).await,
            Affordance::EditPatient(id) => self.edit_patient(&id).instrument(span).await,
            Affordance::DeletePatient(id) => self.delete_patient(&id).instrument(span).await,
            Affordance::EditAppointment {
                patient_id,
                appointment_id,
            } => {
                self.edit_appointment(&patient_id, &appointment_id)
                    .instrument(span)
                    .await
            }
            Affordance::DeleteAppointment {
                patient_id,
                appointment_id,
            } => {
                self.delete_appointment(&patient_id, &appointment_id)
                    .instrument(span)
                    .await
            }
            Affordance::CloseModal(id) => {
                self.modals.close(id);
                Ok(())
            }
        };
        self.busy.end();
        self.surface(result)
    }

    async fn dispatch(&mut self, handler: Handler) -> Result<(), ClientError> {
        match handler {
            Handler::Login => self.login().await,
            Handler::Logout => {
                self.logout().await;
                Ok(())
            }
            Handler::VerifySession => self.verify_session().await,
            Handler::LoadPatients => self.load_patients(self.session.current_page()).await,
            Handler::PreviousPage => self.change_page(-1).await,
            Handler::NextPage => self.change_page(1).await,
            Handler::AddPatient => self.add_patient().await,
            Handler::UpdatePatient => self.update_patient().await,
            Handler::ClearPatientForm => {
                self.clear_patient_form();
                Ok(())
            }
            Handler::QuickFillPatient => {
                self.quick_fill_patient();
                Ok(())
            }
            Handler::Search => self.search().await,
            Handler::ClearSearch => self.clear_search().await,
            Handler::AddAppointment => self.add_appointment().await,
            Handler::UpdateAppointment => self.update_appointment().await,
            Handler::ViewAppointments => self.view_appointments().await,
            Handler::ClearAppointmentForm => {
                self.clear_appointment_form();
                Ok(())
            }
            Handler::QuickFillAppointment => {
                self.quick_fill_appointment();
                Ok(())
            }
            Handler::SystemStats => self.system_stats().await,
            Handler::AppointmentStats => self.appointment_stats().await,
            Handler::ClearAllForms => {
                self.clear_all_forms();
                Ok(())
            }
            Handler::CloseModal(id) => {
                self.modals.close(id);
                Ok(())
            }
        }
    }

    fn surface(&mut self, result: Result<(), ClientError>) -> Result<(), ClientError> {
        if let Err(e) = &result {
            debug!(error = %e, "Action failed");
            self.notifier.error(e.user_message());
        }
        result
    }

    /// Local admin check before an admin-gated action touches the network.
    ///
    /// This only spares a round trip the server would reject anyway; the
    /// server's own check is the real control.
    fn require_admin(&self, action: &str) -> Result<(), ClientError> {
        if self.session.is_admin() {
            return Ok(());
        }

        SessionAuditEvent::new(
            SessionEventType::AdminPreflightDenied,
            SessionEventOutcome::Failure,
        )
        .with_username(self.session.username().map(str::to_string))
        .with_action(action)
        .log();
        self.api.record_preflight_rejection("admin_required");

        Err(ClientError::admin_required())
    }

    /// Show a validation message for missing form fields
    fn missing_fields(&mut self, message: &str) -> Result<(), ClientError> {
        self.notifier.error(message);
        Ok(())
    }
}
