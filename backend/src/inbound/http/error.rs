//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        Error::internal("Internal server error")
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case::invalid(ErrorCode::InvalidRequest, StatusCode::BAD_REQUEST)]
    #[case::unauthorized(ErrorCode::Unauthorized, StatusCode::UNAUTHORIZED)]
    #[case::forbidden(ErrorCode::Forbidden, StatusCode::FORBIDDEN)]
    #[case::not_found(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
    #[case::conflict(ErrorCode::Conflict, StatusCode::CONFLICT)]
    #[case::unavailable(ErrorCode::ServiceUnavailable, StatusCode::SERVICE_UNAVAILABLE)]
    #[case::internal(ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR)]
    fn codes_map_to_the_expected_statuses(#[case] code: ErrorCode, #[case] status: StatusCode) {
        let error = Error::new(code, "message");
        assert_eq!(error.status_code(), status);
    }

    #[actix_web::test]
    async fn internal_errors_are_redacted_in_the_response_body() {
        let error = Error::internal("database password leaked in message");
        let response = error.error_response();
        let bytes = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("read body");
        let body: Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Internal server error")
        );
    }

    #[actix_web::test]
    async fn non_internal_errors_keep_their_message() {
        let error = Error::forbidden("administrator capability required");
        let response = error.error_response();
        let bytes = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("read body");
        let body: Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("administrator capability required")
        );
    }
}
