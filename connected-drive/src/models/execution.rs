//! Remote command execution status

use serde::Deserialize;

use crate::models::enums::VehicleService;

/// Server-side status of a remote command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum RequestStatus {
    #[serde(rename = "DELIVERED")]
    Delivered,
    #[serde(rename = "EXECUTED")]
    Executed,
    #[serde(rename = "INITIATED")]
    Initiated,
    #[serde(rename = "NOT_EXECUTED")]
    NotExecuted,
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "TIMED_OUT")]
    TimedOut,
    #[default]
    #[serde(other)]
    UnknownKey,
}

/// Result of issuing a remote command. Poll by `event_id` via the
/// service-execution-status operation until the status settles.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionStatus {
    #[serde(rename = "serviceType", default)]
    pub service_type: VehicleService,

    #[serde(rename = "status", default)]
    pub request_status: RequestStatus,

    #[serde(rename = "eventId")]
    pub event_id: String,
}
