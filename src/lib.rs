//! Patient Records Client - session-aware client for the patient records API
//!
//! The crate signs a user in against the REST API, keeps the session token,
//! and drives a set of display regions from the API's responses:
//! - Token-based login, logout and session verification
//! - Paged patient listing with previous/next navigation
//! - Patient create, read, update and delete
//! - Appointment booking, listing and deletion
//! - Free-text search and admin statistics
//! - Admin gating of destructive actions before they reach the network
//!
//! ## Architecture
//!
//! The codebase is organized into focused modules:
//! - `models/` - Wire types exchanged with the API
//! - `services/` - API gateway, session state, notifications and metrics
//! - `view/` - Pure renderers, modal state and event bindings
//! - `handlers/` - The controller and one handler per user action
//! - `utils/` - Token claims, date formatting and log redaction
//! - `config/` - Configuration structures and environment loading
//! - `telemetry` - Tracing subscriber setup
//! - `console` - Line commands for the terminal front-end
//!
//! ## Quick Start
//!
//! ```no_run
//! use patient_records_client::{ApiClient, ClientConfig, Controller, UiEvent, fields};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = ApiClient::new(ClientConfig::from_env(), None)?;
//!     let mut controller = Controller::new(api);
//!
//!     controller.inputs_mut().set(fields::USERNAME, "admin");
//!     controller.inputs_mut().set(fields::PASSWORD, "admin123");
//!     let _ = controller.handle(UiEvent::Click("login-btn".into())).await;
//!
//!     println!("{}", controller.render_text());
//!     Ok(())
//! }
//! ```

// Core modules
pub mod config;
pub mod console;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod utils;
pub mod view;

// Re-export commonly used types and functions for convenience
pub use config::{ClientConfig, LogFormat, MetricsConfig, TelemetryConfig};
pub use error::{ClientError, SetupError};
pub use handlers::{Controller, Key, UiEvent};
pub use models::{
    Appointment, AppointmentForm, AppointmentStatus, AppointmentUpdate, DoctorCount, Patient,
    PatientForm, PatientPage, SessionAuditEvent, SessionEventOutcome, SessionEventType, TokenClaims,
};
pub use services::{
    ApiClient, ApiClientMetrics, BusyIndicator, Notification, NotificationKind, Notifier, Session,
};
pub use telemetry::init_tracing;
pub use utils::{decode_claims, format_date, redact_sensitive_data};
pub use view::{
    Affordance, EventBindings, Handler, Inputs, Listing, ModalId, ModalState, Screen, fields,
};
