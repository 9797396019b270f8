//! Session event stream
//!
//! Replaces a weak delegate back-reference with a tagged event stream the
//! composing application (UI shell, CLI, test harness) subscribes to. Events
//! are sent synchronously at the state transition points, so subscribers see
//! them in transition order.

use tokio::sync::broadcast;

/// Notifications for the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveEvent {
    /// Started fetching data from the server.
    StartedFetching,
    /// Finished fetching data from the server.
    FinishedFetching,
    /// Not logged in and no stored credentials; the app needs to present the
    /// login window.
    ShouldPresentLoginWindow,
    /// Login succeeded.
    DidLogin,
    /// Logged out, either explicitly or because the server rejected the
    /// session.
    DidLogout,
}

/// Broadcast bus for [`DriveEvent`]s.
pub struct EventBus {
    tx: broadcast::Sender<DriveEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self { tx }
    }

    /// Deliver an event to all subscribers. Having no subscriber is fine.
    pub fn send(&self, event: DriveEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DriveEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
