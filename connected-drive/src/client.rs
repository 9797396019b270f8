//! ConnectedDrive client
//!
//! Public surface of the library. Wraps every hub-scoped call in two
//! policies: hub confinement (log into the hub that owns the resource before
//! calling it) and auth-expiry retry (refresh the token and retry the one
//! failed call, bounded by a retry budget).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::debug;

use crate::auth::events::DriveEvent;
use crate::auth::manager::{SessionManager, State};
use crate::auth::session::Session;
use crate::config::ClientConfig;
use crate::errors::DriveError;
use crate::http::codec;
use crate::http::router::{self, Operation};
use crate::http::transport::{HttpTransport, Transport};
use crate::models::enums::VehicleService;
use crate::models::execution::ExecutionStatus;
use crate::models::hub::Hub;
use crate::models::rangemap::RangeMap;
use crate::models::status::VehicleStatus;
use crate::models::vehicle::Vehicle;
use crate::storage::{PreferenceStore, SecureStore};

/// Auth-expiry retry budget: a rejected call is retried at most this many
/// times, each preceded by a token refresh.
const MAX_AUTH_RETRIES: u32 = 3;

/// Client for the ConnectedDrive regional API.
///
/// Explicitly constructed, no process-wide instance; pass it (or share it via
/// `Arc`) to whatever composes the system.
pub struct ConnectedDrive {
    config: ClientConfig,
    manager: Arc<SessionManager>,
    transport: Arc<dyn Transport>,
}

impl ConnectedDrive {
    /// Create a client with the default HTTP transport.
    pub fn new(
        config: ClientConfig,
        secure: Arc<dyn SecureStore>,
        prefs: Arc<dyn PreferenceStore>,
    ) -> Result<Self, DriveError> {
        let transport = Arc::new(HttpTransport::new(config.request_timeout_secs)?);
        Ok(Self::with_transport(config, transport, secure, prefs))
    }

    /// Create a client over a caller-provided transport.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        secure: Arc<dyn SecureStore>,
        prefs: Arc<dyn PreferenceStore>,
    ) -> Self {
        let manager = Arc::new(SessionManager::new(
            config.clone(),
            transport.clone(),
            secure,
            prefs,
        ));
        Self {
            config,
            manager,
            transport,
        }
    }

    /// The session manager owning the login state machine.
    pub fn session_manager(&self) -> &Arc<SessionManager> {
        &self.manager
    }

    /// Subscribe to session and fetch notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<DriveEvent> {
        self.manager.subscribe()
    }

    pub async fn state(&self) -> State {
        self.manager.state().await
    }

    pub async fn current_session(&self) -> Option<Session> {
        self.manager.current_session().await
    }

    pub async fn login(
        &self,
        username: &str,
        password: &str,
        hub: Option<Hub>,
    ) -> Result<Session, DriveError> {
        self.manager.login(username, password, hub).await
    }

    pub async fn auto_login(&self, hub: Option<Hub>) -> Result<Session, DriveError> {
        self.manager.auto_login(hub).await
    }

    pub async fn logout(&self, delete_stored: bool) {
        self.manager.logout(delete_stored).await
    }

    pub async fn refresh_access_token(&self) -> Result<Session, DriveError> {
        self.manager.refresh_access_token().await
    }

    /// Fetch the vehicle list.
    ///
    /// All hubs return the same list, so no confinement applies; an empty
    /// list is reported as `VehicleNotFound`.
    pub async fn vehicles(&self) -> Result<Vec<Vehicle>, DriveError> {
        let body = self.fetch_body(Operation::Vehicles, None).await?;
        let vehicles: Vec<Vehicle> = codec::decode_collection(&body, "vehicles")?;
        if vehicles.is_empty() {
            return Err(DriveError::VehicleNotFound);
        }
        Ok(vehicles)
    }

    /// Fetch the current status of a vehicle from the hub that owns it.
    pub async fn vehicle_status(&self, vehicle: &Vehicle) -> Result<VehicleStatus, DriveError> {
        let op = Operation::VehicleStatus {
            vin: vehicle.vin.clone(),
        };
        let body = self.fetch_body(op, Some(vehicle.hub)).await?;
        codec::decode_keyed(&body, "vehicleStatus")
    }

    /// Fetch the reachable-range polygons for a vehicle.
    pub async fn range_map(&self, vehicle: &Vehicle) -> Result<RangeMap, DriveError> {
        let op = Operation::RangeMap {
            vin: vehicle.vin.clone(),
        };
        let body = self.fetch_body(op, Some(vehicle.hub)).await?;
        codec::decode_keyed(&body, "rangemap")
    }

    /// Issue a remote command. Poll the result with [`Self::service_status`].
    pub async fn execute_service(
        &self,
        vehicle: &Vehicle,
        service: VehicleService,
    ) -> Result<ExecutionStatus, DriveError> {
        let op = Operation::ExecuteService {
            vin: vehicle.vin.clone(),
            service,
        };
        let body = self.fetch_body(op, Some(vehicle.hub)).await?;
        codec::decode_keyed(&body, "executionStatus")
    }

    /// Check the execution status of a previously issued remote command.
    pub async fn service_status(
        &self,
        vehicle: &Vehicle,
        service: VehicleService,
    ) -> Result<ExecutionStatus, DriveError> {
        let op = Operation::ServiceStatus {
            vin: vehicle.vin.clone(),
            service,
        };
        let body = self.fetch_body(op, Some(vehicle.hub)).await?;
        codec::decode_keyed(&body, "executionStatus")
    }

    /// Statistics for the most recent trip, as raw JSON.
    pub async fn last_trip(&self, vehicle: &Vehicle) -> Result<serde_json::Value, DriveError> {
        let op = Operation::LastTrip {
            vin: vehicle.vin.clone(),
        };
        let body = self.fetch_body(op, Some(vehicle.hub)).await?;
        codec::decode_object(&body)
    }

    /// Aggregate trip statistics, as raw JSON.
    pub async fn all_trips(&self, vehicle: &Vehicle) -> Result<serde_json::Value, DriveError> {
        let op = Operation::AllTrips {
            vin: vehicle.vin.clone(),
        };
        let body = self.fetch_body(op, Some(vehicle.hub)).await?;
        codec::decode_object(&body)
    }

    /// Charging profile for a vehicle, as raw JSON.
    pub async fn charging_times(&self, vehicle: &Vehicle) -> Result<serde_json::Value, DriveError> {
        let op = Operation::ChargingTimes {
            vin: vehicle.vin.clone(),
        };
        let body = self.fetch_body(op, Some(vehicle.hub)).await?;
        codec::decode_object(&body)
    }

    /// Navigation destinations stored in a vehicle, as raw JSON.
    pub async fn destinations(&self, vehicle: &Vehicle) -> Result<serde_json::Value, DriveError> {
        let op = Operation::Destinations {
            vin: vehicle.vin.clone(),
        };
        let body = self.fetch_body(op, Some(vehicle.hub)).await?;
        codec::decode_object(&body)
    }

    /// Dynamic charging station data, as raw JSON.
    pub async fn charging_stations(&self) -> Result<serde_json::Value, DriveError> {
        let body = self.fetch_body(Operation::ChargingStations, None).await?;
        codec::decode_object(&body)
    }

    /// Run one operation with confinement and retry, bracketed by fetch
    /// notifications.
    async fn fetch_body(
        &self,
        op: Operation,
        target_hub: Option<Hub>,
    ) -> Result<String, DriveError> {
        match target_hub {
            Some(hub) => self.confine_hub(hub).await?,
            None => {
                if self.manager.current_session().await.is_none() {
                    return Err(DriveError::NotLoggedIn);
                }
            }
        }

        self.manager.notify(DriveEvent::StartedFetching);
        let result = self.execute_with_reauth(&op).await;
        self.manager.notify(DriveEvent::FinishedFetching);
        result
    }

    /// Make sure the session matches the hub that owns the target resource,
    /// logging into that hub if necessary.
    ///
    /// A regional server rejects requests for vehicles it does not own; the
    /// owning hub comes from vehicle metadata, which any hub serves.
    async fn confine_hub(&self, target: Hub) -> Result<(), DriveError> {
        if let Some(session) = self.manager.current_session().await {
            if session.hub == target {
                return Ok(());
            }
            debug!(current = %session.hub, target = %target, "switching hub");
        }

        match self.manager.auto_login(Some(target)).await {
            Ok(_) => Ok(()),
            Err(err) => {
                debug!("hub confinement login failed: {}", err);
                // The manager already prompts when nothing is stored.
                if !matches!(err, DriveError::NoCredentialsStored) {
                    self.manager.notify(DriveEvent::ShouldPresentLoginWindow);
                }
                Err(DriveError::NotLoggedIn)
            }
        }
    }

    /// Execute an operation, refreshing the token and retrying on auth
    /// rejection.
    ///
    /// The retry bound and attempt counter are explicit data, not captured
    /// state: each iteration rebuilds the request from the current session,
    /// so a refresh mid-cycle is picked up by the next attempt. Exhausting
    /// the budget surfaces the original rejection unchanged.
    async fn execute_with_reauth(&self, op: &Operation) -> Result<String, DriveError> {
        let epoch = self.manager.epoch();
        let mut attempt: u32 = 0;

        loop {
            let session = self
                .manager
                .current_session()
                .await
                .ok_or(DriveError::NotLoggedIn)?;
            let request = router::build(op, Some(&session), self.manager.api_key())?;
            let response = self.transport.execute(request).await?;

            match response.into_body() {
                Ok(body) => return Ok(body),
                Err(err) if err.is_auth_rejected() => {
                    if attempt >= MAX_AUTH_RETRIES {
                        debug!(attempt, "auth retry budget exhausted");
                        return Err(err);
                    }

                    // Back off while a login is concurrently in progress.
                    if self.manager.state().await == State::LoggingIn {
                        tokio::time::sleep(Duration::from_millis(
                            self.config.login_retry_delay_ms,
                        ))
                        .await;
                    }

                    // A logout since the first attempt invalidates the
                    // retry; do not resurrect the session.
                    if self.manager.epoch() != epoch {
                        return Err(DriveError::NotLoggedIn);
                    }

                    debug!(attempt, "access token rejected, refreshing");
                    if self.manager.refresh_access_token().await.is_err() {
                        return Err(err);
                    }
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
