//! Failure handling: API errors, transport failures and bad payloads.

mod common;

use std::time::Duration;

use easypost::tracker::CreateTrackerParams;
use easypost::{ClientConfig, EasyPostClient, EasyPostError};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use common::{client_for, error_json, setup, tracker_json, API_KEY};

#[tokio::test]
async fn test_retrieve_missing_resource() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/customs_items/cstitem_missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(error_json("NOT_FOUND", "The requested resource could not be found.")),
        )
        .mount(&server)
        .await;

    let err = client
        .customs_items()
        .retrieve("cstitem_missing")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(err.is_not_found());
    match err {
        EasyPostError::Api { code, message, .. } => {
            assert_eq!(code, "NOT_FOUND");
            assert!(!message.is_empty());
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_without_envelope_keeps_a_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/trackers/trk_1"))
        .respond_with(ResponseTemplate::new(502).set_body_string(""))
        .mount(&server)
        .await;

    let err = client.trackers().retrieve("trk_1").await.unwrap_err();

    match err {
        EasyPostError::Api {
            status,
            code,
            message,
            ..
        } => {
            assert_eq!(status, 502);
            assert_eq!(code, "HTTP.502");
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_structured_error_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2/trackers"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "error": {
                "code": "TRACKER.INVALID",
                "message": {"tracking_code": ["is invalid"]},
                "errors": []
            }
        })))
        .mount(&server)
        .await;

    let err = client
        .trackers()
        .create(CreateTrackerParams::new("bogus"))
        .await
        .unwrap_err();

    match err {
        EasyPostError::Api { message, .. } => assert!(message.contains("is invalid")),
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/trackers/trk_1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client.trackers().retrieve("trk_1").await.unwrap_err();
    assert!(matches!(err, EasyPostError::Deserialization(_)));
}

#[tokio::test]
async fn test_request_timeout() {
    let (server, _) = setup().await;
    let client = client_for(&server, Duration::from_millis(100));

    Mock::given(method("GET"))
        .and(path("/v2/trackers/trk_1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(tracker_json("trk_1", "EZ1000000001"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = client.trackers().retrieve("trk_1").await.unwrap_err();
    assert!(matches!(err, EasyPostError::Timeout(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_unreachable_host() {
    let config = ClientConfig::new(API_KEY)
        .unwrap()
        .with_base_url("http://127.0.0.1:1/v2")
        .unwrap()
        .with_timeout(Duration::from_secs(2));
    let client = EasyPostClient::new(config).unwrap();

    let err = client.parcels().retrieve("prcl_1").await.unwrap_err();
    assert!(err.is_transport() || matches!(err, EasyPostError::Timeout(_)));
}

#[tokio::test]
async fn test_blank_id_is_rejected_locally() {
    let (server, client) = setup().await;

    let err = client.shipments().retrieve("  ").await.unwrap_err();
    assert!(matches!(err, EasyPostError::Validation(_)));

    let err = client
        .trackers()
        .create(CreateTrackerParams::new(""))
        .await
        .unwrap_err();
    assert!(matches!(err, EasyPostError::Validation(_)));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_requests_carry_credentials() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/trackers/trk_1"))
        .and(header("authorization", format!("Bearer {API_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(tracker_json("trk_1", "EZ1000000001")))
        .expect(1)
        .mount(&server)
        .await;

    client.trackers().retrieve("trk_1").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let user_agent = requests[0]
        .headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(user_agent.starts_with("easypost-rust/"));
}

/// Serve one response whose headers arrive at once but whose body stalls.
async fn stalled_body_server(status_line: &'static str) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0_u8; 4096];
        let _ = socket.read(&mut buf).await;
        let head = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: 100\r\n\r\n{{\"id\":"
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.flush().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    format!("http://{addr}/v2")
}

fn client_with_timeout(base_url: &str, timeout: Duration) -> EasyPostClient {
    let config = ClientConfig::new(API_KEY)
        .unwrap()
        .with_base_url(base_url)
        .unwrap()
        .with_timeout(timeout);
    EasyPostClient::new(config).unwrap()
}

#[tokio::test]
async fn test_slow_body_reports_timeout() {
    let base_url = stalled_body_server("200 OK").await;
    let client = client_with_timeout(&base_url, Duration::from_millis(300));

    let err = client.trackers().retrieve("trk_1").await.unwrap_err();
    assert!(matches!(err, EasyPostError::Timeout(_)), "got {err:?}");
}

#[tokio::test]
async fn test_slow_error_body_on_delete_reports_timeout() {
    let base_url = stalled_body_server("500 Internal Server Error").await;
    let client = client_with_timeout(&base_url, Duration::from_millis(300));

    let err = client.webhooks().delete("hook_1").await.unwrap_err();
    assert!(matches!(err, EasyPostError::Timeout(_)), "got {err:?}");
}
