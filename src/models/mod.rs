//! Data models exchanged with the patient records API.
//!
//! These are transit types: the client checks field presence through serde
//! and otherwise passes values through to the view layer untouched.

pub mod api;
pub mod appointment;
pub mod audit;
pub mod auth;
pub mod patient;

pub use api::*;
pub use appointment::*;
pub use audit::*;
pub use auth::*;
pub use patient::*;
