//! Session audit events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Session transitions and refused admin actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEventType {
    LoginSuccess,
    LoginFailure,
    Logout,
    LogoutNotificationFailed,
    AdminPreflightDenied,
}

/// Outcomes of session events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEventOutcome {
    Success,
    Failure,
}

/// Structured audit log entry for session events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionAuditEvent {
    pub event_type: SessionEventType,
    pub outcome: SessionEventOutcome,
    pub timestamp: DateTime<Utc>,
    pub username: Option<String>,
    pub action: Option<String>,
    pub details: Option<String>,
}

impl SessionAuditEvent {
    pub fn new(event_type: SessionEventType, outcome: SessionEventOutcome) -> Self {
        Self {
            event_type,
            outcome,
            timestamp: Utc::now(),
            username: None,
            action: None,
            details: None,
        }
    }

    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }

    /// Name of the UI action that triggered the event
    pub fn with_action(mut self, action: &str) -> Self {
        self.action = Some(action.to_string());
        self
    }

    pub fn with_details(mut self, details: Option<String>) -> Self {
        self.details = details;
        self
    }

    /// Log the audit event using structured logging
    pub fn log(&self) {
        info!(
            target: "session_audit",
            event_type = ?self.event_type,
            outcome = ?self.outcome,
            timestamp = %self.timestamp,
            username = ?self.username,
            action = ?self.action,
            details = ?self.details,
            "Session audit event"
        );
    }
}
