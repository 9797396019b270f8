//! Session manager
//!
//! Owns the login state machine and the active (hub, tokens) session, and
//! orchestrates login, auto-login, logout and token refresh. One manager
//! instance per process is the expected setup; all session-affecting
//! operations route through it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::auth::events::{DriveEvent, EventBus};
use crate::auth::session::{Session, Tokens};
use crate::config::ClientConfig;
use crate::errors::DriveError;
use crate::http::codec;
use crate::http::router::{self, Operation};
use crate::http::transport::Transport;
use crate::storage::{
    PreferenceStore, SecureStore, KEY_LAST_USED_HUB, KEY_PASSWORD, KEY_USERNAME,
};
use crate::models::hub::Hub;

/// Login state. A live session exists iff the state is `LoggedIn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    LoggedOut,
    LoggingIn,
    LoggedIn,
}

struct Inner {
    state: State,
    session: Option<Session>,
}

/// Session manager. See module docs.
pub struct SessionManager {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    secure: Arc<dyn SecureStore>,
    prefs: Arc<dyn PreferenceStore>,
    inner: RwLock<Inner>,
    /// Bumped on every explicit logout; pending retries check it so they
    /// cannot resurrect a session the user discarded.
    epoch: AtomicU64,
    events: EventBus,
    /// Serializes login attempts so two racing triggers cannot overwrite
    /// each other's session.
    login_serial: Mutex<()>,
}

impl SessionManager {
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        secure: Arc<dyn SecureStore>,
        prefs: Arc<dyn PreferenceStore>,
    ) -> Self {
        Self {
            config,
            transport,
            secure,
            prefs,
            inner: RwLock::new(Inner {
                state: State::LoggedOut,
                session: None,
            }),
            epoch: AtomicU64::new(0),
            events: EventBus::new(),
            login_serial: Mutex::new(()),
        }
    }

    pub async fn state(&self) -> State {
        self.inner.read().await.state
    }

    pub async fn current_session(&self) -> Option<Session> {
        self.inner.read().await.session.clone()
    }

    /// Session epoch; incremented on every explicit logout.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<DriveEvent> {
        self.events.subscribe()
    }

    pub(crate) fn notify(&self, event: DriveEvent) {
        self.events.send(event);
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.config.api_key
    }

    /// Log in with explicit credentials.
    ///
    /// The target hub is resolved from the argument, then the last-used hub
    /// in the preference store, then the configured default. On success the
    /// credentials and hub are persisted for auto-login.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        hub: Option<Hub>,
    ) -> Result<Session, DriveError> {
        let _serial = self.login_serial.lock().await;
        let password = SecretString::from(password);
        self.login_locked(username, &password, hub).await
    }

    /// Log in with credentials from the store.
    ///
    /// Never issues a network call when no credentials are stored; that case
    /// signals `ShouldPresentLoginWindow` and fails with
    /// `NoCredentialsStored`.
    pub async fn auto_login(&self, hub: Option<Hub>) -> Result<Session, DriveError> {
        let _serial = self.login_serial.lock().await;

        let username = self.load_stored(KEY_USERNAME).await;
        let password = self.load_stored(KEY_PASSWORD).await;
        let (username, password) = match (username, password) {
            (Some(username), Some(password)) => (username, SecretString::from(password)),
            _ => {
                self.events.send(DriveEvent::ShouldPresentLoginWindow);
                return Err(DriveError::NoCredentialsStored);
            }
        };

        self.login_locked(&username, &password, hub).await
    }

    /// Clear the session. Idempotent; always notifies `DidLogout`. With
    /// `delete_stored`, also erases the stored username and password (the
    /// hub preference is retained).
    pub async fn logout(&self, delete_stored: bool) {
        if delete_stored {
            if let Err(err) = self.secure.delete(KEY_USERNAME).await {
                warn!("failed to delete stored username: {}", err);
            }
            if let Err(err) = self.secure.delete(KEY_PASSWORD).await {
                warn!("failed to delete stored password: {}", err);
            }
        }

        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.clear_session().await;
        info!("logged out");
    }

    /// Exchange the refresh token for fresh tokens against the current hub.
    ///
    /// With no session there is nothing to refresh, so this delegates to
    /// auto-login. A refresh failure lands in `LoggedOut`; the caller's
    /// retry orchestrator decides what happens next.
    pub async fn refresh_access_token(&self) -> Result<Session, DriveError> {
        let session = match self.current_session().await {
            Some(session) => session,
            None => return self.auto_login(None).await,
        };

        info!(hub = %session.hub, "refreshing access token");
        let request = router::build(&Operation::RefreshToken, Some(&session), self.api_key())?;

        self.events.send(DriveEvent::StartedFetching);
        let result = self.transport.execute(request).await;
        self.events.send(DriveEvent::FinishedFetching);

        match result
            .and_then(|response| response.into_body())
            .and_then(|body| codec::decode_object::<Tokens>(&body))
        {
            Ok(tokens) => {
                let session = Session {
                    hub: session.hub,
                    tokens,
                };
                let mut inner = self.inner.write().await;
                inner.state = State::LoggedIn;
                inner.session = Some(session.clone());
                Ok(session)
            }
            Err(err) => {
                warn!("token refresh failed: {}", err);
                self.clear_session().await;
                Err(err)
            }
        }
    }

    /// Login with the serial lock held.
    async fn login_locked(
        &self,
        username: &str,
        password: &SecretString,
        hub: Option<Hub>,
    ) -> Result<Session, DriveError> {
        // Log out first so no in-flight call can use a stale session while
        // logging in is in progress.
        self.clear_session().await;
        self.inner.write().await.state = State::LoggingIn;

        let hub = match hub {
            Some(hub) => hub,
            None => self
                .stored_hub()
                .await
                .unwrap_or(self.config.default_hub),
        };
        info!(hub = %hub, "logging in");

        let op = Operation::Login {
            username: username.to_string(),
            password: password.expose_secret().to_string(),
            hub,
        };
        let request = router::build(&op, None, self.api_key())?;

        self.events.send(DriveEvent::StartedFetching);
        let result = self.transport.execute(request).await;
        self.events.send(DriveEvent::FinishedFetching);

        match result
            .and_then(|response| response.into_body())
            .and_then(|body| codec::decode_object::<Tokens>(&body))
        {
            Ok(tokens) => {
                self.persist_credentials(username, password, hub).await;

                let session = Session { hub, tokens };
                {
                    let mut inner = self.inner.write().await;
                    inner.state = State::LoggedIn;
                    inner.session = Some(session.clone());
                }
                info!(hub = %hub, "logged in");
                self.events.send(DriveEvent::DidLogin);
                Ok(session)
            }
            Err(err) => {
                warn!("login failed: {}", err);
                let mut inner = self.inner.write().await;
                inner.state = State::LoggedOut;
                inner.session = None;
                Err(err)
            }
        }
    }

    /// Drop the session, move to `LoggedOut` and notify. Fires `DidLogout`
    /// even when already logged out.
    async fn clear_session(&self) {
        let mut inner = self.inner.write().await;
        inner.state = State::LoggedOut;
        inner.session = None;
        drop(inner);
        self.events.send(DriveEvent::DidLogout);
    }

    /// Store failures degrade to "absent"; a corrupted store means
    /// re-login, never a crash.
    async fn load_stored(&self, key: &str) -> Option<String> {
        match self.secure.load(key).await {
            Ok(Some(bytes)) => match String::from_utf8(bytes) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("stored value for {} is not valid UTF-8", key);
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!("failed to load {} from secure store: {}", key, err);
                None
            }
        }
    }

    async fn stored_hub(&self) -> Option<Hub> {
        match self.prefs.get(KEY_LAST_USED_HUB).await {
            Ok(value) => value.and_then(|code| code.parse().ok()),
            Err(err) => {
                warn!("failed to read last-used hub: {}", err);
                None
            }
        }
    }

    /// Persist credentials and hub for auto-login. Fail-soft: a store that
    /// cannot be written only costs the user a future re-login.
    async fn persist_credentials(&self, username: &str, password: &SecretString, hub: Hub) {
        if let Err(err) = self.secure.save(KEY_USERNAME, username.as_bytes()).await {
            warn!("failed to persist username: {}", err);
        }
        if let Err(err) = self
            .secure
            .save(KEY_PASSWORD, password.expose_secret().as_bytes())
            .await
        {
            warn!("failed to persist password: {}", err);
        }
        if let Err(err) = self
            .prefs
            .set(KEY_LAST_USED_HUB, Some(hub.wire_code()))
            .await
        {
            warn!("failed to persist last-used hub: {}", err);
        }
    }
}
