//! Integration tests for session login and logout against the mock API

mod common;

use std::sync::atomic::Ordering;

use common::MockApi;
use patient_records_client::{ApiClient, ClientConfig, ClientError, Session};

#[actix_web::test]
async fn test_admin_login_populates_session() {
    let mock = MockApi::start(vec![]).await;
    let api = mock.client();
    let mut session = Session::new(10);

    session
        .login(&api, "admin", "admin123")
        .await
        .expect("admin login should succeed");

    assert!(session.is_authenticated());
    assert_eq!(session.username(), Some("admin"));
    assert!(session.is_admin());
    assert_eq!(session.current_page(), 1);

    mock.stop().await;
}

#[actix_web::test]
async fn test_nested_token_shape_and_non_admin_claims() {
    let mock = MockApi::start(vec![]).await;
    let api = mock.client();
    let mut session = Session::new(10);

    session.login(&api, " nurse ", "user123").await.unwrap();

    assert_eq!(session.username(), Some("nurse"));
    assert!(!session.is_admin());

    mock.stop().await;
}

#[actix_web::test]
async fn test_rejected_credentials_leave_session_untouched() {
    let mock = MockApi::start(vec![]).await;
    let api = mock.client();
    let mut session = Session::new(10);

    let err = session.login(&api, "admin", "wrong").await.unwrap_err();

    assert!(matches!(err, ClientError::Auth(_)), "got {err:?}");
    assert!(!session.is_authenticated());
    assert!(session.username().is_none());
    assert_eq!(mock.hits_to("GET", "/auth/login"), 1);

    mock.stop().await;
}

#[actix_web::test]
async fn test_undecodable_token_is_an_auth_error() {
    let mock = MockApi::start(vec![]).await;
    let api = mock.client();
    let mut session = Session::new(10);

    let err = session.login(&api, "broken", "broken").await.unwrap_err();

    assert!(matches!(err, ClientError::Auth(ref m) if m.contains("Malformed")));
    assert!(!session.is_authenticated());

    mock.stop().await;
}

#[actix_web::test]
async fn test_failed_login_keeps_previous_session() {
    let mock = MockApi::start(vec![]).await;
    let api = mock.client();
    let mut session = Session::new(10);

    session.login(&api, "admin", "admin123").await.unwrap();
    let token = session.token().map(str::to_string);

    assert!(session.login(&api, "nurse", "nope").await.is_err());
    assert_eq!(session.token().map(str::to_string), token);
    assert_eq!(session.username(), Some("admin"));
    assert!(session.is_admin());

    mock.stop().await;
}

#[actix_web::test]
async fn test_logout_clears_even_when_server_fails() {
    let mock = MockApi::start(vec![]).await;
    mock.state.fail_logout.store(true, Ordering::SeqCst);
    let api = mock.client();
    let mut session = Session::new(10);
    session.login(&api, "admin", "admin123").await.unwrap();
    session.record_page(3, 40);

    session.logout(&api).await;

    assert!(!session.is_authenticated());
    assert!(session.username().is_none());
    assert!(!session.is_admin());
    assert_eq!(session.current_page(), 1);
    assert_eq!(session.total_count(), 0);
    assert_eq!(mock.hits_to("GET", "/auth/logout"), 1);

    mock.stop().await;
}

#[actix_web::test]
async fn test_logout_clears_when_server_unreachable() {
    let mock = MockApi::start(vec![]).await;
    let api = mock.client();
    let mut session = Session::new(10);
    session.login(&api, "nurse", "user123").await.unwrap();
    mock.stop().await;

    session.logout(&api).await;

    assert!(!session.is_authenticated());
}

#[actix_web::test]
async fn test_logout_clears_when_server_times_out() {
    let mock = MockApi::start(vec![]).await;
    mock.state.logout_delay_ms.store(2_500, Ordering::SeqCst);
    let api = ApiClient::new(
        ClientConfig {
            read_timeout_seconds: 1,
            ..mock.config()
        },
        None,
    )
    .unwrap();
    let mut session = Session::new(10);
    session.login(&api, "admin", "admin123").await.unwrap();

    session.logout(&api).await;

    assert!(!session.is_authenticated());
    assert!(session.token().is_none());
    assert_eq!(mock.hits_to("GET", "/auth/logout"), 1);

    mock.stop().await;
}

#[actix_web::test]
async fn test_signed_out_logout_sends_nothing() {
    let mock = MockApi::start(vec![]).await;
    let api = mock.client();
    let mut session = Session::new(10);

    session.logout(&api).await;

    assert_eq!(mock.hit_count(), 0);

    mock.stop().await;
}
