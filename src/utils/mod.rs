//! Utility functions and helper modules.
//!
//! Token claim decoding, display formatting for dates, and log redaction.

pub mod format;
pub mod redact;
pub mod token;

pub use format::*;
pub use redact::*;
pub use token::*;
