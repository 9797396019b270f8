//! Session and credential management

pub mod events;
pub mod manager;
pub mod session;

pub use events::{DriveEvent, EventBus};
pub use manager::{SessionManager, State};
pub use session::{Session, Tokens};
