//! Domain errors rendered as HTTP responses.
//!
//! Every failed request answers with the domain error envelope
//! `{"code", "message", "traceId"?, "details"?}` and echoes the trace id in
//! the `trace-id` header. Registration and blood-bank duplicates are
//! user-correctable, so `Conflict` shares status 400 with validation
//! failures. Internal errors keep only their code and trace id.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, HttpResponseBuilder, ResponseError};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias returned by HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message sent instead of the text of an internal error.
pub(crate) const REDACTED_MESSAGE: &str = "Internal server error";

const fn http_status(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::Conflict => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// The error as clients see it.
fn public_view(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    error!(message = error.message(), details = ?error.details(), "internal error");
    let redacted = Error::internal(REDACTED_MESSAGE);
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id),
        None => redacted,
    }
}

fn with_trace_header(mut builder: HttpResponseBuilder, error: &Error) -> HttpResponseBuilder {
    if let Some(id) = error.trace_id() {
        builder.insert_header((TRACE_ID_HEADER, id));
    }
    builder
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        http_status(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let body = public_view(self);
        with_trace_header(HttpResponse::build(self.status_code()), &body).json(body)
    }
}
