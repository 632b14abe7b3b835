//! Centralized helpers for HTTP error responses.
//!
//! Every error body has the shape `{"error": "<message>"}`.
use actix_web::{HttpResponse, http::StatusCode};
use log::{debug, error};
use serde_json::json;

use crate::store::StoreError;

/// Body sent for any load failure. The underlying cause stays in the server log.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load maze grids";

/// Returns an HTTP error response with a JSON body.
pub fn http_error_response(message: &str, status: StatusCode) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "error": message }))
}

/// Maps a store failure to its response: 404 for missing data, 500 for load failures.
///
/// `route` names the endpoint in the log line.
pub fn store_error_response(route: &str, err: &StoreError) -> HttpResponse {
    match err {
        StoreError::NotFound { .. } => {
            debug!("[MazeApi] {}: {}", route, err);
            http_error_response(&err.to_string(), StatusCode::NOT_FOUND)
        }
        StoreError::Load(_) => {
            error!("[MazeApi] {}: {}", route, err);
            http_error_response(LOAD_FAILURE_MESSAGE, StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
