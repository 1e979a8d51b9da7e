use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use pedidos_core::DomainError;

/// Map a domain error onto the HTTP surface. Upstream/auth failures mirror
/// the article service's status where one exists, 502 otherwise.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, msg),
        DomainError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, msg),
        DomainError::Auth { status } => {
            json_error(mirror_status(Some(status)), "could not obtain token")
        }
        DomainError::Upstream { status, message } => json_error(mirror_status(status), message),
        DomainError::Store(msg) => {
            tracing::error!("store failure: {msg}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal storage error")
        }
    }
}

fn mirror_status(status: Option<u16>) -> StatusCode {
    status
        .and_then(|s| StatusCode::from_u16(s).ok())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
        })),
    )
        .into_response()
}
