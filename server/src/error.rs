//! Mapping domain errors onto HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{debug, error};

use dxlookup_contracts::error::{DxError, ErrorKind};

/// An error on its way out of a handler.
///
/// Renders as `{"detail": "<message>"}`; unrecognized symptoms also carry an
/// `invalid_symptoms` array so clients need not parse the message.
#[derive(Debug)]
pub enum ApiError {
    /// A domain error from the core.
    Domain(DxError),
    /// The request body was not valid JSON for the endpoint.
    Body(JsonRejection),
}

impl From<DxError> for ApiError {
    fn from(e: DxError) -> Self {
        Self::Domain(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body(rejection)
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::ClientInput => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::DataIntegrity | ErrorKind::Startup | ErrorKind::Internal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Body(rejection) => {
                let status = rejection.status();
                let detail = rejection.body_text();
                debug!(status = status.as_u16(), %detail, "request body rejected");
                (status, json!({ "detail": detail }))
            }
            Self::Domain(e) => {
                let status = status_for(e.kind());
                if status.is_server_error() {
                    error!(error = %e, status = status.as_u16(), "request failed");
                }
                let mut body = json!({ "detail": e.to_string() });
                if let DxError::UnrecognizedSymptoms { symptoms } = &e {
                    body["invalid_symptoms"] = json!(symptoms);
                }
                (status, body)
            }
        };
        (status, Json(body)).into_response()
    }
}
