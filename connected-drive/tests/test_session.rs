//! Session manager state machine tests

mod common;

use connected_drive::auth::DriveEvent;
use connected_drive::errors::DriveError;
use connected_drive::models::Hub;
use connected_drive::storage::{
    PreferenceStore, SecureStore, KEY_LAST_USED_HUB, KEY_PASSWORD, KEY_USERNAME,
};
use connected_drive::{ClientConfig, ConnectedDrive, State};

use common::*;

#[tokio::test]
async fn test_login_success_installs_session() {
    let h = harness();
    h.transport.push(200, &tokens_body("access-1", "refresh-1"));

    let session = h
        .drive
        .login("driver@example.com", "hunter2", Some(Hub::Usa))
        .await
        .unwrap();

    assert_eq!(session.hub, Hub::Usa);
    assert_eq!(session.tokens.access_token, "access-1");
    assert_eq!(h.drive.state().await, State::LoggedIn);
    assert_eq!(h.drive.current_session().await.unwrap(), session);

    // Credentials and hub persisted for auto-login
    assert!(h.secure.contains(KEY_USERNAME));
    assert!(h.secure.contains(KEY_PASSWORD));
    assert_eq!(
        h.prefs.get(KEY_LAST_USED_HUB).await.unwrap().as_deref(),
        Some("HUB_US")
    );
}

#[tokio::test]
async fn test_login_event_order() {
    let h = harness();
    let mut rx = h.drive.subscribe();
    h.transport.push(200, &tokens_body("a", "r"));

    h.drive.login("u", "p", None).await.unwrap();

    // The forced logout always precedes the login for the same re-login
    assert_eq!(
        drain_events(&mut rx),
        vec![
            DriveEvent::DidLogout,
            DriveEvent::StartedFetching,
            DriveEvent::FinishedFetching,
            DriveEvent::DidLogin,
        ]
    );
}

#[tokio::test]
async fn test_login_failure_lands_in_logged_out() {
    let h = harness();
    h.transport.push(400, r#"{"error": "invalid_grant"}"#);

    let err = h.drive.login("u", "wrong", None).await.unwrap_err();

    assert!(matches!(err, DriveError::ServerStatus { status: 400, .. }));
    assert_eq!(h.drive.state().await, State::LoggedOut);
    assert!(h.drive.current_session().await.is_none());
}

#[tokio::test]
async fn test_login_defaults_to_europe() {
    let h = harness();
    h.transport.push(200, &tokens_body("a", "r"));

    h.drive.login("u", "p", None).await.unwrap();

    let requests = h.transport.requests();
    assert!(requests[0]
        .url
        .as_str()
        .starts_with(Hub::Europe.base_url()));
}

#[tokio::test]
async fn test_login_prefers_last_used_hub() {
    let h = harness();
    h.prefs.set(KEY_LAST_USED_HUB, Some("HUB_CN")).await.unwrap();
    h.transport.push(200, &tokens_body("a", "r"));

    let session = h.drive.login("u", "p", None).await.unwrap();

    assert_eq!(session.hub, Hub::China);
    assert!(h.transport.requests()[0]
        .url
        .as_str()
        .starts_with(Hub::China.base_url()));
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let h = harness();
    let mut rx = h.drive.subscribe();

    h.drive.logout(false).await;
    assert_eq!(h.drive.state().await, State::LoggedOut);

    h.drive.logout(false).await;
    assert_eq!(h.drive.state().await, State::LoggedOut);

    assert_eq!(
        drain_events(&mut rx),
        vec![DriveEvent::DidLogout, DriveEvent::DidLogout]
    );
}

#[tokio::test]
async fn test_logout_with_delete_erases_credentials_but_keeps_hub() {
    let h = harness();
    h.transport.push(200, &tokens_body("a", "r"));
    h.drive.login("u", "p", Some(Hub::Usa)).await.unwrap();

    h.drive.logout(true).await;

    assert!(!h.secure.contains(KEY_USERNAME));
    assert!(!h.secure.contains(KEY_PASSWORD));
    assert_eq!(
        h.prefs.get(KEY_LAST_USED_HUB).await.unwrap().as_deref(),
        Some("HUB_US")
    );
}

#[tokio::test]
async fn test_logout_bumps_epoch() {
    let h = harness();
    let manager = h.drive.session_manager();
    let before = manager.epoch();

    h.drive.logout(false).await;

    assert_eq!(manager.epoch(), before + 1);
}

#[tokio::test]
async fn test_auto_login_without_credentials_makes_no_network_call() {
    let h = harness();
    let mut rx = h.drive.subscribe();

    let err = h.drive.auto_login(None).await.unwrap_err();

    assert!(matches!(err, DriveError::NoCredentialsStored));
    assert_eq!(h.transport.request_count(), 0);
    assert_eq!(
        drain_events(&mut rx),
        vec![DriveEvent::ShouldPresentLoginWindow]
    );
}

#[tokio::test]
async fn test_auto_login_with_stored_credentials() {
    let h = harness();
    h.secure.save(KEY_USERNAME, b"driver@example.com").await.unwrap();
    h.secure.save(KEY_PASSWORD, b"hunter2").await.unwrap();
    h.prefs.set(KEY_LAST_USED_HUB, Some("HUB_US")).await.unwrap();
    h.transport.push(200, &tokens_body("a", "r"));

    let session = h.drive.auto_login(None).await.unwrap();

    assert_eq!(session.hub, Hub::Usa);
    assert_eq!(h.drive.state().await, State::LoggedIn);
    let requests = h.transport.requests();
    let form = requests[0].form.clone().unwrap();
    assert!(form.contains(&("grant_type", "password".to_string())));
    assert!(form.contains(&("username", "driver@example.com".to_string())));
}

#[tokio::test]
async fn test_broken_secure_store_degrades_to_no_credentials() {
    let transport = MockTransport::new();
    let drive = ConnectedDrive::with_transport(
        ClientConfig::new(API_KEY),
        transport.clone(),
        std::sync::Arc::new(BrokenSecureStore),
        MemoryPreferenceStore::new(),
    );

    let err = drive.auto_login(None).await.unwrap_err();

    assert!(matches!(err, DriveError::NoCredentialsStored));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_refresh_replaces_tokens_and_keeps_hub() {
    let h = harness();
    h.transport.push(200, &tokens_body("access-1", "refresh-1"));
    h.drive.login("u", "p", Some(Hub::China)).await.unwrap();

    h.transport.push(200, &tokens_body("access-2", "refresh-2"));
    let session = h.drive.refresh_access_token().await.unwrap();

    assert_eq!(session.hub, Hub::China);
    assert_eq!(session.tokens.access_token, "access-2");
    assert_eq!(h.drive.state().await, State::LoggedIn);

    let requests = h.transport.requests();
    assert!(requests[1].url.as_str().starts_with(Hub::China.base_url()));
    let form = requests[1].form.clone().unwrap();
    assert!(form.contains(&("grant_type", "refresh_token".to_string())));
    assert!(form.contains(&("refresh_token", "refresh-1".to_string())));
}

#[tokio::test]
async fn test_refresh_without_session_delegates_to_auto_login() {
    let h = harness();
    h.secure.save(KEY_USERNAME, b"u").await.unwrap();
    h.secure.save(KEY_PASSWORD, b"p").await.unwrap();
    h.transport.push(200, &tokens_body("a", "r"));

    let session = h.drive.refresh_access_token().await.unwrap();

    assert_eq!(h.drive.state().await, State::LoggedIn);
    assert_eq!(session.tokens.access_token, "a");
    // The network call was a password login, not a token refresh
    assert_eq!(count_grant_requests(&h.transport, "password"), 1);
    assert_eq!(count_grant_requests(&h.transport, "refresh_token"), 0);
}

#[tokio::test]
async fn test_refresh_failure_logs_out() {
    let h = harness();
    h.transport.push(200, &tokens_body("a", "r"));
    h.drive.login("u", "p", None).await.unwrap();
    let mut rx = h.drive.subscribe();

    h.transport.push(401, "token expired");
    let err = h.drive.refresh_access_token().await.unwrap_err();

    assert!(err.is_auth_rejected());
    assert_eq!(h.drive.state().await, State::LoggedOut);
    assert!(h.drive.current_session().await.is_none());
    assert!(drain_events(&mut rx).contains(&DriveEvent::DidLogout));
}
