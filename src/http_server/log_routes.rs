//! # Record Log HTTP Routes
//!
//! - `POST /` appends `{"record": {...}}` and answers `{"offset": n}`
//! - `GET /` takes `{"offset": n}` and answers `{"record": {...}}`
//!
//! Bodies are parsed whatever the content type says.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::errors::{ApiError, ApiResult};
use crate::log::{Record, RecordLog};

/// Record log shared between handlers
pub type SharedLog = Arc<dyn RecordLog>;

/// Body of `POST /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecordRequest {
    pub record: Record,
}

/// Response of `POST /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecordResponse {
    pub offset: u64,
}

/// Body of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindRecordRequest {
    pub offset: u64,
}

/// Response of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindRecordResponse {
    pub record: Record,
}

/// Create record log routes
pub fn log_routes(log: SharedLog) -> Router {
    Router::new()
        .route("/", post(create_record).get(find_record))
        .with_state(log)
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

/// Runs a record log call off the async workers; store calls block on file I/O.
async fn blocking<T, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
}

async fn create_record(
    State(log): State<SharedLog>,
    body: Bytes,
) -> ApiResult<Json<CreateRecordResponse>> {
    let request: CreateRecordRequest = parse_body(&body)?;
    let offset = blocking(move || Ok(log.append(request.record)?)).await?;
    Ok(Json(CreateRecordResponse { offset }))
}

async fn find_record(
    State(log): State<SharedLog>,
    body: Bytes,
) -> ApiResult<Json<FindRecordResponse>> {
    let request: FindRecordRequest = parse_body(&body)?;
    let record = blocking(move || Ok(log.read(request.offset)?)).await?;
    Ok(Json(FindRecordResponse { record }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create_request() {
        let request: CreateRecordRequest =
            parse_body(br#"{"record":{"value":"aGVsbG8="}}"#).unwrap();
        assert_eq!(request.record.value, b"hello");
    }

    #[test]
    fn test_parse_rejects_malformed_body() {
        let result: ApiResult<FindRecordRequest> = parse_body(b"{offset: 1");
        assert!(matches!(result, Err(ApiError::InvalidBody(_))));
    }
}
