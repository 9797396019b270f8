//! Request construction
//!
//! Pure mapping from an operation plus the current session to a fully
//! addressed wire request. Because requests can go to any of the three hubs,
//! the router stores no server address or token itself; everything is passed
//! in per call.

use reqwest::Method;
use url::Url;

use crate::auth::session::Session;
use crate::errors::DriveError;
use crate::models::enums::VehicleService;
use crate::models::hub::Hub;

/// An API operation to be turned into a wire request.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Login {
        username: String,
        password: String,
        hub: Hub,
    },
    RefreshToken,
    Vehicles,
    VehicleStatus {
        vin: String,
    },
    LastTrip {
        vin: String,
    },
    AllTrips {
        vin: String,
    },
    ChargingTimes {
        vin: String,
    },
    Destinations {
        vin: String,
    },
    RangeMap {
        vin: String,
    },
    ServiceStatus {
        vin: String,
        service: VehicleService,
    },
    ExecuteService {
        vin: String,
        service: VehicleService,
    },
    ChargingStations,
}

impl Operation {
    fn method(&self) -> Method {
        match self {
            Operation::Login { .. } | Operation::RefreshToken | Operation::ExecuteService { .. } => {
                Method::POST
            }
            _ => Method::GET,
        }
    }

    fn path(&self) -> String {
        match self {
            Operation::Login { .. } | Operation::RefreshToken => "/webapi/oauth/token/".to_string(),
            Operation::Vehicles => "/webapi/v1/user/vehicles/".to_string(),
            Operation::VehicleStatus { vin } => {
                format!("/webapi/v1/user/vehicles/{}/status", vin)
            }
            Operation::LastTrip { vin } => {
                format!("/webapi/v1/user/vehicles/{}/statistics/lastTrip", vin)
            }
            Operation::AllTrips { vin } => {
                format!("/webapi/v1/user/vehicles/{}/statistics/allTrips", vin)
            }
            Operation::ChargingTimes { vin } => {
                format!("/webapi/v1/user/vehicles/{}/chargingprofile", vin)
            }
            Operation::Destinations { vin } => {
                format!("/webapi/v1/user/vehicles/{}/destinations", vin)
            }
            Operation::RangeMap { vin } => {
                format!("/webapi/v1/user/vehicles/{}/rangemap", vin)
            }
            Operation::ServiceStatus { vin, .. } => {
                format!("/webapi/v1/user/vehicles/{}/serviceExecutionStatus", vin)
            }
            Operation::ExecuteService { vin, .. } => {
                format!("/webapi/v1/user/vehicles/{}/executeService", vin)
            }
            Operation::ChargingStations => "/webapi/v1/chargingstations/dynamicdata".to_string(),
        }
    }
}

/// A fully addressed request, ready for the transport.
#[derive(Clone)]
pub struct WireRequest {
    pub method: Method,
    pub url: Url,
    pub authorization: String,
    pub form: Option<Vec<(&'static str, String)>>,
    pub query: Option<Vec<(&'static str, String)>>,
}

// The Authorization header carries tokens; keep it out of Debug output.
impl std::fmt::Debug for WireRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WireRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

/// Build the wire request for an operation.
///
/// Callers guard the "not logged in" case before constructing hub-scoped
/// requests; a missing session here is a contract violation and surfaces as
/// `NotLoggedIn`.
pub fn build(
    op: &Operation,
    session: Option<&Session>,
    api_key: &str,
) -> Result<WireRequest, DriveError> {
    let (base_url, authorization) = match op {
        Operation::Login { hub, .. } => (hub.base_url(), format!("Basic {}", api_key)),
        Operation::RefreshToken => {
            let session = session.ok_or(DriveError::NotLoggedIn)?;
            (session.hub.base_url(), format!("Basic {}", api_key))
        }
        _ => {
            let session = session.ok_or(DriveError::NotLoggedIn)?;
            (
                session.hub.base_url(),
                format!("Bearer {}", session.tokens.access_token),
            )
        }
    };

    let url = Url::parse(&format!("{}{}", base_url, op.path()))?;

    let form = match op {
        Operation::Login {
            username, password, ..
        } => Some(vec![
            ("grant_type", "password".to_string()),
            ("username", username.clone()),
            ("password", password.clone()),
            ("scope", "remote_services vehicle_data".to_string()),
        ]),
        Operation::RefreshToken => {
            // Checked above
            let session = session.ok_or(DriveError::NotLoggedIn)?;
            Some(vec![
                ("grant_type", "refresh_token".to_string()),
                ("refresh_token", session.tokens.refresh_token.clone()),
            ])
        }
        Operation::ExecuteService { service, .. } => {
            Some(vec![("serviceType", service.wire_code().to_string())])
        }
        _ => None,
    };

    let query = match op {
        Operation::ServiceStatus { service, .. } => {
            Some(vec![("serviceType", service.wire_code().to_string())])
        }
        _ => None,
    };

    Ok(WireRequest {
        method: op.method(),
        url,
        authorization,
        form,
        query,
    })
}
