//! Error types for API calls and client setup.

/// Errors surfaced by a user action.
///
/// `Auth` is raised locally (missing credentials, missing token, rejected or
/// malformed token, failed admin pre-flight). `Request` means the server
/// answered with a non-2xx status. `Transport` means the server could not be
/// reached or its answer could not be read.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Request rejected with status {status}: {message}")]
    Request { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),
}

impl ClientError {
    /// Get a user-friendly message for the notification area
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Auth(msg) => msg.clone(),
            ClientError::Request { message, .. } => message.clone(),
            ClientError::Transport(msg) => format!("Could not reach the server: {}", msg),
        }
    }

    pub(crate) fn not_logged_in() -> Self {
        ClientError::Auth("You must be logged in".to_string())
    }

    pub(crate) fn admin_required() -> Self {
        ClientError::Auth("Admin access required".to_string())
    }

    /// Whether the server was reached and rejected the call
    pub fn is_rejection(&self) -> bool {
        matches!(self, ClientError::Request { .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Transport("request timed out".to_string())
        } else if err.is_connect() {
            ClientError::Transport(format!("connection failed: {}", err))
        } else if err.is_decode() {
            ClientError::Transport(format!("malformed response payload: {}", err))
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

/// Errors building an [`ApiClient`](crate::services::ApiClient)
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
