/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for float-sdk tests

use std::sync::{Arc, Mutex};

use float_sdk::{Event, EventEmitter, Float, FloatConfig};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Facade with every module pointed at the mock server
#[allow(dead_code)]
pub fn float_for(server: &MockServer) -> Float {
    Float::new(FloatConfig::with_host(server.uri())).expect("float init")
}

/// User record as returned by the users API
#[allow(dead_code)]
pub fn user_json(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "email": "bruce@hellofloat.com",
        "first_name": "Bruce",
        "last_name": "Lim",
        "verified": {"address": false, "birthDate": false, "email": false, "phone": false},
        "createdAt": "2015-11-05T00:44:28.572Z",
        "updatedAt": "2015-11-05T02:12:53.948Z",
        "deletedAt": null
    })
}

/// Recorded events, in emission order
pub type EventLog = Arc<Mutex<Vec<Event>>>;

/// Record every event emitted on `emitter`
#[allow(dead_code)]
pub fn record(emitter: &EventEmitter) -> EventLog {
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    emitter.on_any(move |event| sink.lock().unwrap().push(event.clone()));
    log
}

#[allow(dead_code)]
pub fn names(log: &EventLog) -> Vec<String> {
    log.lock().unwrap().iter().map(|event| event.name.clone()).collect()
}
