//! Integration tests using wiremock to simulate HTTP servers.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use verdict::{cancel_pair, CallOutcome, Client, FaultKind, Json, RequestSpec, Text};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
}

fn ann() -> User {
    User {
        id: 1,
        name: "Ann".to_string(),
    }
}

#[tokio::test]
async fn success_carries_decoded_value_and_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ann()))
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(mock_server.uri())
        .unwrap()
        .build()
        .unwrap();

    match client.get::<User>("/users/1").await {
        CallOutcome::Success {
            value,
            status,
            headers,
        } => {
            assert_eq!(value, ann());
            assert_eq!(status.as_u16(), 200);
            assert!(headers.get("content-type").is_some());
        }
        other => panic!("expected Success, got {other:?}"),
    }
}

#[tokio::test]
async fn http_failure_preserves_status_and_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/999"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error":"not found"}"#))
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(mock_server.uri())
        .unwrap()
        .build()
        .unwrap();

    match client.get::<User>("/users/999").await {
        CallOutcome::HttpFailure {
            status,
            raw_error_body,
        } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(raw_error_body.as_deref(), Some(r#"{"error":"not found"}"#));
        }
        other => panic!("expected HttpFailure, got {other:?}"),
    }
}

#[tokio::test]
async fn server_errors_are_not_retried() {
    let mock_server = MockServer::start().await;

    // expect(1) fails the test on teardown if the client sneaks in a retry.
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Server error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(mock_server.uri())
        .unwrap()
        .build()
        .unwrap();

    let outcome = client.get::<User>("/flaky").await;
    assert!(outcome.is_http_failure());
    assert_eq!(outcome.status().map(|s| s.as_u16()), Some(500));
}

#[tokio::test]
async fn undecodable_2xx_body_is_a_decode_fault() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not-json"))
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(mock_server.uri())
        .unwrap()
        .build()
        .unwrap();

    let outcome = client.get::<User>("/users/1").await;
    assert_eq!(outcome.fault(), Some(FaultKind::Decode));
    assert_eq!(outcome.status(), None);
}

#[tokio::test]
async fn connection_failure_is_a_network_fault() {
    // Grab a port wiremock just released so nothing is listening there.
    let dead_uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let client = Client::builder()
        .base_url(dead_uri)
        .unwrap()
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    match client.get::<User>("/anything").await {
        CallOutcome::TransportFailure { fault, message } => {
            assert_eq!(fault, FaultKind::Network);
            assert!(!message.is_empty());
        }
        other => panic!("expected TransportFailure, got {other:?}"),
    }
}

#[tokio::test]
async fn timeout_is_a_network_fault() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ann())
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(mock_server.uri())
        .unwrap()
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let start = std::time::Instant::now();
    let outcome = client.get::<User>("/slow").await;

    assert_eq!(outcome.fault(), Some(FaultKind::Network));
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn cancellation_mid_flight_resolves_promptly() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ann())
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(mock_server.uri())
        .unwrap()
        .build()
        .unwrap();

    let (handle, token) = cancel_pair();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.cancel();
    });

    let start = std::time::Instant::now();
    let spec = RequestSpec::new(http::Method::GET, "/slow");
    let outcome = client.invoke_with_cancel::<User, _>(spec, Json, token).await;

    assert_eq!(outcome.fault(), Some(FaultKind::Cancelled));
    assert!(!outcome.is_success());
    assert!(
        start.elapsed() < Duration::from_secs(2),
        "cancellation took {:?}",
        start.elapsed()
    );
}

#[tokio::test]
async fn pre_cancelled_token_never_hits_the_wire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ann()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(mock_server.uri())
        .unwrap()
        .build()
        .unwrap();

    let (handle, token) = cancel_pair();
    handle.cancel();

    let spec = RequestSpec::new(http::Method::GET, "/users/1");
    let outcome = client.invoke_with_cancel::<User, _>(spec, Json, token).await;

    assert_eq!(outcome.fault(), Some(FaultKind::Cancelled));
}

#[tokio::test]
async fn default_headers_and_query_params_reach_the_wire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(header("x-api-key", "secret"))
        .and(query_param("q", "rust"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ann()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(mock_server.uri())
        .unwrap()
        .default_header("x-api-key", "secret")
        .unwrap()
        .build()
        .unwrap();

    let spec = RequestSpec::new(http::Method::GET, "/search")
        .with_query_param("q", "rust")
        .with_query_param("limit", "10");

    let outcome = client.invoke::<User, _>(spec, Json).await;
    assert!(outcome.is_success());
}

#[tokio::test]
async fn post_body_reaches_the_wire() {
    let mock_server = MockServer::start().await;

    let new_user = User {
        id: 0,
        name: "New".to_string(),
    };
    let created = User {
        id: 2,
        name: "New".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_json(&new_user))
        .respond_with(ResponseTemplate::new(201).set_body_json(&created))
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(mock_server.uri())
        .unwrap()
        .build()
        .unwrap();

    match client.post::<User, User>("/users", &new_user).await {
        CallOutcome::Success { value, status, .. } => {
            assert_eq!(value, created);
            assert_eq!(status.as_u16(), 201);
        }
        other => panic!("expected Success, got {other:?}"),
    }
}

#[tokio::test]
async fn put_patch_and_delete_resolve_like_any_other_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ann()))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ann()))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(204).set_body_string(""))
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(mock_server.uri())
        .unwrap()
        .build()
        .unwrap();

    assert!(client.put::<User, User>("/users/1", &ann()).await.is_success());
    assert!(client
        .patch::<User, User>("/users/1", &ann())
        .await
        .is_success());

    // 204 has an empty body, which is not valid JSON; the closed taxonomy
    // reports that as a decode fault rather than inventing a success.
    let deleted = client.delete::<serde_json::Value>("/users/1").await;
    assert_eq!(deleted.fault(), Some(FaultKind::Decode));
}

#[tokio::test]
async fn custom_decoders_plug_into_invoke() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(mock_server.uri())
        .unwrap()
        .build()
        .unwrap();

    // Text decoder
    let spec = RequestSpec::new(http::Method::GET, "/health");
    let raw = client.invoke::<String, _>(spec, Text).await;
    assert_eq!(raw.success().as_deref(), Some("ok"));

    // Closure decoder
    let spec = RequestSpec::new(http::Method::GET, "/health");
    let healthy = client
        .invoke(spec, |raw: &str| -> Result<bool, String> {
            Ok(raw.trim() == "ok")
        })
        .await;
    assert_eq!(healthy.success(), Some(true));
}

#[tokio::test]
async fn failing_custom_decoder_is_a_decode_fault() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(mock_server.uri())
        .unwrap()
        .build()
        .unwrap();

    let spec = RequestSpec::new(http::Method::GET, "/health");
    let outcome = client
        .invoke(spec, |_raw: &str| -> Result<u32, String> {
            Err("refused to decode".to_string())
        })
        .await;

    match outcome {
        CallOutcome::TransportFailure { fault, message } => {
            assert_eq!(fault, FaultKind::Decode);
            assert_eq!(message, "refused to decode");
        }
        other => panic!("expected TransportFailure, got {other:?}"),
    }
}

#[tokio::test]
async fn per_request_headers_reach_the_wire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/export"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ann()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(mock_server.uri())
        .unwrap()
        .build()
        .unwrap();

    let spec = RequestSpec::new(http::Method::GET, "/export")
        .with_header("accept", "application/json")
        .unwrap();

    assert!(client.invoke::<User, _>(spec, Json).await.is_success());
}

#[tokio::test]
async fn into_result_supports_question_mark_callers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ann()))
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(mock_server.uri())
        .unwrap()
        .build()
        .unwrap();

    async fn fetch(client: &Client) -> Result<User, verdict::CallFailure> {
        let user = client.get::<User>("/users/1").await.into_result()?;
        Ok(user)
    }

    assert_eq!(fetch(&client).await.unwrap(), ann());
}

#[tokio::test]
async fn concurrent_invocations_resolve_independently() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ann()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/999"))
        .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(mock_server.uri())
        .unwrap()
        .build()
        .unwrap();

    let (found, missing) = tokio::join!(
        client.get::<User>("/users/1"),
        client.get::<User>("/users/999"),
    );

    assert!(found.is_success());
    assert_eq!(missing.status().map(|s| s.as_u16()), Some(404));
}
