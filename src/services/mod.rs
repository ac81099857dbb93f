//! Session state, the API gateway, and the notification area.

pub mod api_client;
pub mod metrics;
pub mod notifications;
pub mod session;

pub use api_client::*;
pub use metrics::*;
pub use notifications::*;
pub use session::*;
