//! `POST /api/generate`

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::adapters::record_generator::RecordGenerator;
use crate::domain::Schema;

pub const INVALID_SCHEMA_MESSAGE: &str = "Missing or invalid 'schema' in request body.";
pub const INVALID_COUNT_MESSAGE: &str = "'count' must be a positive integer.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error during data generation.";

/// Count used when the request omits one.
pub const DEFAULT_SERVICE_COUNT: u64 = 1;

#[derive(Clone)]
pub struct GenerateState {
    pub generator: Arc<RecordGenerator>,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Non-empty object that decodes as a [`Schema`].
fn parse_schema(value: Option<&Value>) -> Option<Schema> {
    let value = value.filter(|v| v.as_object().is_some_and(|map| !map.is_empty()))?;
    Schema::deserialize(value).ok()
}

/// Absent means the default; anything but a positive integer is invalid.
fn parse_count(value: Option<&Value>) -> Option<usize> {
    let count = match value {
        None => DEFAULT_SERVICE_COUNT,
        Some(v) => v.as_u64().filter(|c| *c >= 1)?,
    };
    usize::try_from(count).ok()
}

pub async fn generate_records(
    State(state): State<GenerateState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!("Rejected generate request body: {}", rejection);
            return error_response(StatusCode::BAD_REQUEST, INVALID_SCHEMA_MESSAGE);
        }
    };

    let Some(schema) = parse_schema(body.get("schema")) else {
        return error_response(StatusCode::BAD_REQUEST, INVALID_SCHEMA_MESSAGE);
    };
    let Some(count) = parse_count(body.get("count")) else {
        return error_response(StatusCode::BAD_REQUEST, INVALID_COUNT_MESSAGE);
    };

    info!("Received request to generate {} records", count);

    match state.generator.generate(&schema, count) {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => {
            error!("An error occurred during generation: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": INTERNAL_ERROR_MESSAGE,
                    "details": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}
