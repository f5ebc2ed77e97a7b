use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;

use crate::error::GatewayError;

pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope<'a> {
    pub status: EnvelopeStatus,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub channel: &'a str,
}

impl<'a> ErrorEnvelope<'a> {
    pub fn new(message: &'a str, channel: &'a str) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            message,
            error: None,
            channel,
        }
    }
}

/// Local wall-clock time rendered like `1/2/2026, 3:04:05 PM`.
pub fn local_timestamp() -> String {
    chrono::Local::now()
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

/// Serializes `body` as pretty-printed JSON with the given status code.
pub fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
) -> Result<HttpResponse, GatewayError> {
    let text = serde_json::to_string_pretty(body)?;
    Ok(HttpResponse::build(status)
        .content_type(JSON_CONTENT_TYPE)
        .body(text))
}

pub fn client_error(message: &str, channel: &str) -> Result<HttpResponse, GatewayError> {
    json_response(StatusCode::BAD_REQUEST, &ErrorEnvelope::new(message, channel))
}

/// Last-resort 500 response for a failure that escaped a handler.
pub fn internal_error(err: &GatewayError, channel: &str) -> HttpResponse {
    let envelope = ErrorEnvelope {
        error: Some(err.to_string()),
        ..ErrorEnvelope::new("Face swap API request failed", channel)
    };
    let body = serde_json::to_string_pretty(&envelope).unwrap_or_else(|_| {
        format!(
            "{{\"status\":\"error\",\"message\":\"Face swap API request failed\",\"channel\":{:?}}}",
            channel
        )
    });
    HttpResponse::InternalServerError()
        .content_type(JSON_CONTENT_TYPE)
        .body(body)
}
