//! Authentication-related data models.

use serde::{Deserialize, Serialize};

/// Response body of `GET /auth/login`.
///
/// The API has returned the token both at the top level and nested under
/// `data`; either shape is accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub data: Option<LoginData>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    pub token: String,
}

impl LoginResponse {
    /// The issued token, wherever the server put it
    pub fn into_token(self) -> Option<String> {
        self.token
            .or_else(|| self.data.map(|d| d.token))
            .filter(|t| !t.is_empty())
    }
}

/// Claims read from the token payload without signature verification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub exp: Option<i64>,
}
