//! HTTP behavior of the blocking Kaleido client against a mock console.

use anyhow::Result;
use kaleido_acctest::{ApiError, EnvironmentApi, KaleidoClient};
use serde_json::json;
use test_helpers::http::MockApi;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn fetch_decodes_a_live_environment() -> Result<()> {
    let api = MockApi::start()?;
    api.register(
        Mock::given(method("GET"))
            .and(path("/consortia/cons1/environments/env1"))
            .and(header("authorization", "Bearer devkey"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "env1",
                "name": "terraEnv",
                "description": "terraforming",
                "provider": "quorum",
                "consensus_type": "raft",
                "state": "live"
            }))),
    );

    let client = KaleidoClient::new(&api.uri(), "devkey")?;
    let response = client.get_environment("cons1", "env1")?;
    assert_eq!(response.status_code(), 200);
    let record = response.body().expect("decoded body");
    assert_eq!(record.id.as_deref(), Some("env1"));
    assert_eq!(record.provider, "quorum");
    assert_eq!(record.consensus_type, "raft");
    Ok(())
}

#[test]
fn missing_environment_reports_status_without_body() -> Result<()> {
    let api = MockApi::start()?;
    api.register(
        Mock::given(method("GET"))
            .and(path("/consortia/cons1/environments/gone"))
            .respond_with(ResponseTemplate::new(404)),
    );

    let client = KaleidoClient::new(&api.uri(), "devkey")?;
    let response = client.get_environment("cons1", "gone")?;
    assert_eq!(response.status_code(), 404);
    assert!(response.body().is_none());
    Ok(())
}

#[test]
fn malformed_success_body_is_a_decode_error() -> Result<()> {
    let api = MockApi::start()?;
    api.register(
        Mock::given(method("GET"))
            .and(path("/consortia/cons1/environments/env1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json")),
    );

    let client = KaleidoClient::new(&api.uri(), "devkey")?;
    let err = client
        .get_environment("cons1", "env1")
        .expect_err("undecodable body");
    assert!(matches!(err, ApiError::Decode { .. }), "got {err:?}");
    Ok(())
}

#[test]
fn deleted_environment_stops_resolving() -> Result<()> {
    let api = MockApi::start()?;
    api.register(
        Mock::given(method("GET"))
            .and(path("/consortia/cons1/environments/env1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "env1",
                "name": "terraEnv",
                "description": "terraforming",
                "provider": "quorum",
                "consensus_type": "raft",
                "state": "live"
            }))),
    );

    let client = KaleidoClient::new(&api.uri(), "devkey")?;
    assert_eq!(client.get_environment("cons1", "env1")?.status_code(), 200);

    // Simulate teardown: with the mock gone, the fetch no longer matches.
    api.reset();
    let response = client.get_environment("cons1", "env1")?;
    assert_eq!(response.status_code(), 404);
    assert!(response.body().is_none());
    Ok(())
}

#[test]
fn unreachable_console_is_a_transport_error() -> Result<()> {
    // Reserved port with nothing listening.
    let client = KaleidoClient::new("http://127.0.0.1:9", "devkey")?;
    let err = client
        .get_environment("cons1", "env1")
        .expect_err("connection refused");
    assert!(matches!(err, ApiError::Transport { .. }), "got {err:?}");
    Ok(())
}
