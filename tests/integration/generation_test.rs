use super::common;

use common::test_server::{unreachable_base_url, StubService, TestServer};
use forge::adapters::generation_client::HttpGenerationClient;
use forge::adapters::session::ForgeSession;
use forge::commands;
use forge::config::Settings;
use forge::domain::{
    FieldDefinition, FieldType, GenerationState, Schema, FALLBACK_ERROR_MESSAGE,
    GENERIC_FAILURE_MESSAGE,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn session_for(base_url: &str, schema: Schema) -> ForgeSession {
    let client = Arc::new(HttpGenerationClient::new(base_url, Duration::from_secs(5)));
    ForgeSession::with_schema(client, schema)
}

fn age_schema() -> Schema {
    let mut schema = Schema::new();
    schema
        .insert("age", FieldDefinition::new(FieldType::Number))
        .unwrap();
    schema
}

#[tokio::test]
async fn test_successful_generation_is_shown() {
    let stub = StubService::new(200, r#"[{"age":31},{"age":45}]"#).await;
    let mut session = session_for(stub.base_url(), age_schema());
    session.set_record_count(2);

    let state = session.generate().await.unwrap();
    assert_eq!(state, &GenerationState::Succeeded);

    let expected = vec![json!({"age": 31}), json!({"age": 45})];
    assert_eq!(session.result(), Some(expected.as_slice()));

    let rendered = session.render_output().unwrap();
    assert!(rendered.starts_with("Generated Output"));
    assert!(rendered.contains("\"age\": 31"));
    assert!(rendered.contains("\"age\": 45"));

    assert_eq!(
        stub.last_body(),
        Some(json!({ "schema": { "age": { "type": "number" } }, "count": 2 }))
    );
}

#[tokio::test]
async fn test_service_error_message_is_shown_verbatim() {
    let stub = StubService::sequence(vec![
        (200, r#"[{"age":31}]"#),
        (500, r#"{"error":"invalid schema"}"#),
    ])
    .await;
    let mut session = session_for(stub.base_url(), age_schema());

    session.generate().await.unwrap();
    let before = session.render_output();

    let state = session.generate().await.unwrap();
    assert_eq!(state.failure_message(), Some("invalid schema"));
    assert_eq!(session.result(), Some(&[json!({"age": 31})][..]));
    assert_eq!(session.render_output(), before);
    assert!(session.can_generate());
}

#[tokio::test]
async fn test_unreadable_error_body_uses_fallback() {
    let stub = StubService::new(502, "<html>bad gateway</html>").await;
    let mut session = session_for(stub.base_url(), age_schema());

    let state = session.generate().await.unwrap();
    assert_eq!(state.failure_message(), Some(FALLBACK_ERROR_MESSAGE));
}

#[tokio::test]
async fn test_error_body_without_message_uses_fallback() {
    let stub = StubService::new(400, r#"{"detail":"nope"}"#).await;
    let mut session = session_for(stub.base_url(), age_schema());

    let state = session.generate().await.unwrap();
    assert_eq!(state.failure_message(), Some(FALLBACK_ERROR_MESSAGE));
}

#[tokio::test]
async fn test_malformed_success_body_is_a_generic_failure() {
    let stub = StubService::new(200, r#"{"records":[]}"#).await;
    let mut session = session_for(stub.base_url(), age_schema());

    let state = session.generate().await.unwrap();
    assert_eq!(state.failure_message(), Some(GENERIC_FAILURE_MESSAGE));
    assert!(session.result().is_none());
    assert!(session.render_output().is_none());
}

#[tokio::test]
async fn test_transport_failure_is_a_generic_failure() {
    let base_url = unreachable_base_url().await;
    let mut session = session_for(&base_url, age_schema());

    let state = session.generate().await.unwrap();
    assert_eq!(state.failure_message(), Some(GENERIC_FAILURE_MESSAGE));

    session.dismiss();
    assert_eq!(session.state(), &GenerationState::Idle);
}

#[tokio::test]
async fn test_empty_schema_sends_nothing() {
    let stub = StubService::new(200, "[]").await;
    let mut session = session_for(stub.base_url(), Schema::new());

    assert!(!session.can_generate());
    assert!(session.generate().await.is_err());
    assert_eq!(stub.hits(), 0);
    assert_eq!(session.state(), &GenerationState::Idle);
}

#[tokio::test]
async fn test_stale_constraints_are_sent_to_the_service() {
    let stub = StubService::new(200, "[]").await;
    let mut session = session_for(stub.base_url(), Schema::new());

    let name = session.add_field();
    session.store_mut().update_field(
        &name,
        FieldDefinition::new(FieldType::Number).with_range(Some(1.into()), Some(3.into())),
    );
    session.change_field_type(&name, FieldType::Name);
    session.generate().await.unwrap();

    assert_eq!(
        stub.last_body().unwrap()["schema"]["field_1"],
        json!({ "type": "name", "min": 1, "max": 3 })
    );
    assert_eq!(stub.last_body().unwrap()["count"], 10);
}

#[tokio::test]
async fn test_integer_bounds_reach_the_service_as_integers() {
    let stub = StubService::new(200, "[]").await;
    let schema: Schema =
        serde_json::from_str(r#"{"age":{"type":"number","min":18,"max":65}}"#).unwrap();
    let mut session = session_for(stub.base_url(), schema);

    session.generate().await.unwrap();

    let sent = stub.last_body().unwrap();
    assert_eq!(sent["schema"]["age"], json!({ "type": "number", "min": 18, "max": 65 }));
    assert!(sent["schema"]["age"]["min"].is_i64());
}

#[tokio::test]
async fn test_round_trip_against_generation_service() {
    let server = TestServer::new().await;
    let mut session = session_for(&server.base_url, Schema::new());

    let age = session.add_field();
    let contact = session.add_field();
    session.add_field();
    session.change_field_type(&age, FieldType::Number);
    session.change_field_type(&contact, FieldType::Email);
    session.set_record_count(3);

    let state = session.generate().await.unwrap();
    assert_eq!(state, &GenerationState::Succeeded);

    let records = session.result().unwrap();
    assert_eq!(records.len(), 3);
    for record in records {
        assert!(record["field_1"].is_i64());
        assert!(record["field_2"].as_str().unwrap().contains('@'));
        assert!(record["field_3"].is_string());
    }
}

#[tokio::test]
async fn test_generation_service_rejects_bad_count() {
    let server = TestServer::new().await;
    let mut session = session_for(&server.base_url, age_schema());
    session.set_record_count(0);

    let state = session.generate().await.unwrap();
    assert_eq!(state.failure_message(), Some("'count' must be a positive integer."));
}

#[tokio::test]
async fn test_request_command_renders_output() {
    let server = TestServer::new().await;
    let dir = tempfile::TempDir::new().unwrap();
    let input = dir.path().join("schema.json");
    std::fs::write(&input, r#"{"name":{"type":"name"}}"#).unwrap();

    let mut settings = Settings::default();
    settings.client.api_url = server.base_url.clone();

    let rendered = commands::request_remote(&settings, &input, 2).await.unwrap();
    assert!(rendered.starts_with("Generated Output"));
    assert_eq!(rendered.matches("\"name\":").count(), 2);
}

#[tokio::test]
async fn test_request_command_reports_service_error() {
    let stub = StubService::new(500, r#"{"error":"invalid schema"}"#).await;
    let dir = tempfile::TempDir::new().unwrap();
    let input = dir.path().join("schema.json");
    std::fs::write(&input, r#"{"age":{"type":"number"}}"#).unwrap();

    let mut settings = Settings::default();
    settings.client.api_url = stub.base_url().to_string();

    let err = commands::request_remote(&settings, &input, 2).await.unwrap_err();
    assert_eq!(err.to_string(), "invalid schema");
}
