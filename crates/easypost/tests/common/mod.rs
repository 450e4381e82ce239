//! Shared helpers for API tests against a mock server.

#![allow(dead_code)]

use std::time::Duration;

use easypost::{ClientConfig, EasyPostClient};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const API_KEY: &str = "EZTKtest123";

/// Start a mock server and a client pointed at its `/v2` prefix.
pub async fn setup() -> (MockServer, EasyPostClient) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let server = MockServer::start().await;
    let client = client_for(&server, Duration::from_secs(5));
    (server, client)
}

pub fn client_for(server: &MockServer, timeout: Duration) -> EasyPostClient {
    let config = ClientConfig::new(API_KEY)
        .unwrap()
        .with_base_url(&format!("{}/v2", server.uri()))
        .unwrap()
        .with_timeout(timeout);
    EasyPostClient::new(config).unwrap()
}

pub fn tracker_json(id: &str, tracking_code: &str) -> Value {
    json!({
        "id": id,
        "object": "Tracker",
        "mode": "test",
        "tracking_code": tracking_code,
        "status": "in_transit",
        "carrier": "USPS",
        "tracking_details": [],
        "fees": [],
        "created_at": "2024-03-01T12:00:00Z",
        "updated_at": "2024-03-01T12:00:00Z"
    })
}

pub fn rate_json(id: &str, carrier: &str, service: &str, rate: &str) -> Value {
    json!({
        "id": id,
        "object": "Rate",
        "mode": "test",
        "carrier": carrier,
        "service": service,
        "rate": rate,
        "currency": "USD",
        "shipment_id": "shp_1"
    })
}

pub fn shipment_json(id: &str) -> Value {
    json!({
        "id": id,
        "object": "Shipment",
        "mode": "test",
        "status": "unknown",
        "rates": [
            rate_json("rate_1", "USPS", "Priority", "7.58"),
            rate_json("rate_2", "USPS", "First", "5.49"),
            rate_json("rate_3", "FedEx", "FEDEX_GROUND", "9.10")
        ],
        "messages": [],
        "fees": []
    })
}

pub fn error_json(code: &str, message: &str) -> Value {
    json!({
        "error": {
            "code": code,
            "message": message,
            "errors": []
        }
    })
}
