//! Shared test fixtures: scripted transport and in-memory stores
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use connected_drive::auth::DriveEvent;
use connected_drive::client::ConnectedDrive;
use connected_drive::config::ClientConfig;
use connected_drive::errors::DriveError;
use connected_drive::http::{Transport, WireRequest, WireResponse};
use connected_drive::models::{DriveTrain, Hub, Model, Vehicle};
use connected_drive::storage::{PreferenceStore, SecureStore};

pub const API_KEY: &str = "a2V5OnNlY3JldA==";

/// Transport that replays scripted responses and records every request.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<WireResponse>>,
    requests: Mutex<Vec<WireRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(WireResponse {
            status,
            body: body.to_string(),
        });
    }

    pub fn requests(&self) -> Vec<WireRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: WireRequest) -> Result<WireResponse, DriveError> {
        self.requests.lock().unwrap().push(request);
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock transport: no scripted response left"))
    }
}

/// In-memory secure store.
#[derive(Default)]
pub struct MemorySecureStore {
    map: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemorySecureStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.lock().unwrap().contains_key(key)
    }
}

#[async_trait]
impl SecureStore for MemorySecureStore {
    async fn save(&self, key: &str, value: &[u8]) -> Result<(), DriveError> {
        self.map
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, DriveError> {
        Ok(self.map.lock().unwrap().get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<(), DriveError> {
        self.map.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Secure store whose every operation fails, for fail-soft tests.
pub struct BrokenSecureStore;

#[async_trait]
impl SecureStore for BrokenSecureStore {
    async fn save(&self, _key: &str, _value: &[u8]) -> Result<(), DriveError> {
        Err(DriveError::StorageError("store unavailable".to_string()))
    }

    async fn load(&self, _key: &str) -> Result<Option<Vec<u8>>, DriveError> {
        Err(DriveError::StorageError("store unavailable".to_string()))
    }

    async fn delete(&self, _key: &str) -> Result<(), DriveError> {
        Err(DriveError::StorageError("store unavailable".to_string()))
    }
}

/// In-memory preference store.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DriveError> {
        Ok(self.map.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Option<&str>) -> Result<(), DriveError> {
        let mut map = self.map.lock().unwrap();
        match value {
            Some(value) => map.insert(key.to_string(), value.to_string()),
            None => map.remove(key),
        };
        Ok(())
    }
}

/// A client wired to mocks, plus handles to the mocks.
pub struct Harness {
    pub drive: ConnectedDrive,
    pub transport: Arc<MockTransport>,
    pub secure: Arc<MemorySecureStore>,
    pub prefs: Arc<MemoryPreferenceStore>,
}

pub fn harness() -> Harness {
    let transport = MockTransport::new();
    let secure = MemorySecureStore::new();
    let prefs = MemoryPreferenceStore::new();
    let drive = ConnectedDrive::with_transport(
        ClientConfig::new(API_KEY),
        transport.clone(),
        secure.clone(),
        prefs.clone(),
    );
    Harness {
        drive,
        transport,
        secure,
        prefs,
    }
}

pub fn tokens_body(access: &str, refresh: &str) -> String {
    format!(
        r#"{{"access_token": "{}", "refresh_token": "{}"}}"#,
        access, refresh
    )
}

pub fn vehicle(vin: &str, hub: Hub) -> Vehicle {
    Vehicle {
        model: Model::I3,
        body_type: "I01".to_string(),
        year: 2015,
        vin: vin.to_string(),
        hub,
        color: Default::default(),
        drive_train: DriveTrain::Bev,
        country_code: "US".to_string(),
        last_status: None,
    }
}

pub const STATUS_BODY: &str = r#"{"vehicleStatus": {
    "updateTime": "2015-12-10T22:48:49-0500",
    "chargingLevelHv": 87,
    "chargingStatus": "CHARGING",
    "connectionStatus": "CONNECTED",
    "updateReason": "CHARGING_STARTED",
    "lastChargingEndReason": "UNKNOWN",
    "lastChargingEndResult": "UNKNOWN",
    "maxRangeElectric": 160,
    "maxRangeElectricMls": 99,
    "remainingRangeElectric": 140,
    "remainingRangeElectricMls": 87,
    "remainingFuel": 4,
    "mileage": 10234,
    "doorLockState": "SECURED"
}}"#;

/// Collect everything currently buffered on an event receiver.
pub fn drain_events(
    rx: &mut tokio::sync::broadcast::Receiver<DriveEvent>,
) -> Vec<DriveEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Count login/refresh requests by form grant type.
pub fn count_grant_requests(transport: &MockTransport, grant_type: &str) -> usize {
    transport
        .requests()
        .iter()
        .filter(|request| {
            request.form.as_ref().is_some_and(|form| {
                form.contains(&("grant_type", grant_type.to_string()))
            })
        })
        .count()
}
