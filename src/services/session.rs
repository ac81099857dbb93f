//! Session state: credential, identity and pagination cursor for one login.
//!
//! The session is the only state that outlives a single user action. It is
//! owned by the controller and mutated only through the methods below.

use tracing::warn;

use crate::error::ClientError;
use crate::models::{SessionAuditEvent, SessionEventOutcome, SessionEventType};
use crate::services::api_client::ApiClient;
use crate::utils::decode_claims;

/// Credential and pagination state for the signed-in user
#[derive(Debug, Clone)]
pub struct Session {
    token: Option<String>,
    username: Option<String>,
    is_admin: bool,
    current_page: u32,
    page_limit: u32,
    total_count: u64,
}

impl Session {
    /// A signed-out session; a zero page limit is raised to 1
    pub fn new(page_limit: u32) -> Self {
        Self {
            token: None,
            username: None,
            is_admin: false,
            current_page: 1,
            page_limit: page_limit.max(1),
            total_count: 0,
        }
    }

    /// Exchange credentials for a token and populate the session.
    ///
    /// The admin flag comes from the token's own claims, decoded without
    /// verifying the signature. It only steers what the client offers; the
    /// server stays the authority on every call. On any failure the session
    /// is left exactly as it was.
    pub async fn login(
        &mut self,
        api: &ApiClient,
        username: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ClientError::Auth(
                "Please enter both username and password".to_string(),
            ));
        }

        let established = match api.login(username, password).await {
            Ok(token) => decode_claims(&token).map(|claims| (token, claims)),
            Err(e) => Err(e),
        };

        match established {
            Ok((token, claims)) => {
                self.token = Some(token);
                self.username = Some(username.to_string());
                self.is_admin = claims.admin;
                self.current_page = 1;
                self.total_count = 0;

                SessionAuditEvent::new(SessionEventType::LoginSuccess, SessionEventOutcome::Success)
                    .with_username(Some(username.to_string()))
                    .with_details(Some(format!("admin={}", claims.admin)))
                    .log();
                Ok(())
            }
            Err(e) => {
                SessionAuditEvent::new(SessionEventType::LoginFailure, SessionEventOutcome::Failure)
                    .with_username(Some(username.to_string()))
                    .with_details(Some(e.to_string()))
                    .log();
                Err(e)
            }
        }
    }

    /// Notify the server (best effort) and clear every session field.
    ///
    /// Never fails: a rejected, unreachable or timed-out notification is
    /// logged and the session is cleared anyway.
    pub async fn logout(&mut self, api: &ApiClient) {
        if self.token.is_some() {
            if let Err(e) = api.logout(self.token.as_deref()).await {
                warn!(error = %e, "Logout notification failed; clearing session anyway");
                SessionAuditEvent::new(
                    SessionEventType::LogoutNotificationFailed,
                    SessionEventOutcome::Failure,
                )
                .with_username(self.username.clone())
                .with_details(Some(e.to_string()))
                .log();
            }
        }

        SessionAuditEvent::new(SessionEventType::Logout, SessionEventOutcome::Success)
            .with_username(self.username.clone())
            .log();

        self.clear();
    }

    /// Drop the credential and reset pagination; the page size is kept
    pub fn clear(&mut self) {
        *self = Self::new(self.page_limit);
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Move the cursor, clamping to page 1.
    ///
    /// Pages past the end are allowed; the server answers them with an empty
    /// set.
    pub fn set_page(&mut self, page: i64) -> u32 {
        self.current_page = page.clamp(1, i64::from(u32::MAX)) as u32;
        self.current_page
    }

    pub fn set_total_count(&mut self, total: u64) {
        self.total_count = total;
    }

    /// Record a successfully loaded page
    pub fn record_page(&mut self, page: u32, total: u64) {
        self.set_page(i64::from(page));
        self.set_total_count(total);
    }

    /// `ceil(total_count / page_limit)`
    pub fn total_pages(&self) -> u32 {
        let limit = u64::from(self.page_limit);
        let pages = self.total_count.div_ceil(limit);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Target page for a previous/next move, or `None` when that control is
    /// disabled. This is the one place the "no request past the last page"
    /// rule is enforced.
    pub fn step_page(&self, delta: i32) -> Option<u32> {
        match delta.signum() {
            -1 if self.can_go_previous() => {
                let target = i64::from(self.current_page) + i64::from(delta);
                Some(target.max(1) as u32)
            }
            1 if self.can_go_next() => {
                let target = i64::from(self.current_page) + i64::from(delta);
                Some(target.min(i64::from(self.total_pages())) as u32)
            }
            _ => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn signed_in(username: &str, is_admin: bool, page_limit: u32) -> Self {
        Self {
            token: Some("test.token.value".to_string()),
            username: Some(username.to_string()),
            is_admin,
            ..Self::new(page_limit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_is_ceiling() {
        let mut session = Session::new(10);
        for (total, pages) in [(0, 0), (1, 1), (9, 1), (10, 1), (11, 2), (100, 10), (101, 11)] {
            session.set_total_count(total);
            assert_eq!(session.total_pages(), pages, "total {total}");
        }

        let mut single = Session::new(1);
        single.set_total_count(7);
        assert_eq!(single.total_pages(), 7);
    }

    #[test]
    fn test_zero_page_limit_raised_to_one() {
        let session = Session::new(0);
        assert_eq!(session.page_limit(), 1);
    }

    #[test]
    fn test_set_page_never_below_one() {
        let mut session = Session::new(10);
        for requested in [i64::MIN, -5, 0, 1] {
            assert_eq!(session.set_page(requested), 1);
        }
        assert_eq!(session.set_page(7), 7);
        assert_eq!(session.current_page(), 7);
    }

    #[test]
    fn test_set_page_does_not_clamp_to_last_page() {
        let mut session = Session::new(10);
        session.set_total_count(15);
        assert_eq!(session.set_page(9), 9);
    }

    #[test]
    fn test_pagination_controls() {
        let mut session = Session::new(10);
        session.record_page(1, 25);
        assert!(!session.can_go_previous());
        assert!(session.can_go_next());
        assert_eq!(session.step_page(-1), None);
        assert_eq!(session.step_page(1), Some(2));

        session.record_page(3, 25);
        assert!(session.can_go_previous());
        assert!(!session.can_go_next());
        assert_eq!(session.step_page(1), None);
        assert_eq!(session.step_page(-1), Some(2));
    }

    #[test]
    fn test_next_disabled_when_empty() {
        let session = Session::new(10);
        assert_eq!(session.total_pages(), 0);
        assert!(!session.can_go_next());
        assert_eq!(session.step_page(1), None);
    }

    #[test]
    fn test_clear_keeps_page_limit() {
        let mut session = Session::signed_in("admin", true, 25);
        session.record_page(4, 200);
        session.clear();

        assert!(!session.is_authenticated());
        assert!(session.username().is_none());
        assert!(!session.is_admin());
        assert_eq!(session.current_page(), 1);
        assert_eq!(session.total_count(), 0);
        assert_eq!(session.page_limit(), 25);
    }

    #[tokio::test]
    async fn test_login_with_blank_fields_is_refused_locally() {
        let api = ApiClient::new(
            crate::config::ClientConfig {
                base_url: "http://127.0.0.1:9/api/v1.0".to_string(),
                ..Default::default()
            },
            None,
        )
        .unwrap();
        let mut session = Session::new(10);

        let err = session.login(&api, "  ", "secret").await.unwrap_err();
        assert!(matches!(err, ClientError::Auth(_)));
        assert!(!session.is_authenticated());
    }
}
