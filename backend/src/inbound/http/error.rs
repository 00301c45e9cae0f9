//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while giving every
//! handler the same `{"detail", "code"}` envelope. The kind-to-status table
//! lives here and nowhere else.

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TraceId;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const DATABASE_DETAIL: &str = "Database error";
const INTERNAL_DETAIL: &str = "Internal server error";

/// Serialised error body.
#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    detail: Value,
    code: ErrorCode,
}

pub(crate) const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::AppError => StatusCode::BAD_REQUEST,
        ErrorCode::DatabaseError | ErrorCode::InternalServerError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Build the client-facing detail, hiding server-side failure text.
fn detail_for(error: &Error) -> Value {
    match error.code() {
        ErrorCode::DatabaseError => Value::from(DATABASE_DETAIL),
        ErrorCode::InternalServerError => Value::from(INTERNAL_DETAIL),
        ErrorCode::ValidationError => error
            .details()
            .cloned()
            .unwrap_or_else(|| Value::from(error.message())),
        _ => Value::from(error.message()),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let trace_id = TraceId::current().map(|id| id.to_string());
        if status.is_server_error() {
            error!(
                code = %self.code(),
                status = status.as_u16(),
                trace_id = trace_id.as_deref().unwrap_or("-"),
                message = self.message(),
                "request failed"
            );
        } else {
            warn!(
                code = %self.code(),
                status = status.as_u16(),
                trace_id = trace_id.as_deref().unwrap_or("-"),
                message = self.message(),
                "request rejected"
            );
        }

        HttpResponse::build(status).json(ErrorEnvelope {
            detail: detail_for(self),
            code: self.code(),
        })
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Self::internal(INTERNAL_DETAIL)
    }
}

/// Fallback for unmatched routes, answering with the `NOT_FOUND` envelope.
pub async fn route_not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::not_found(format!(
        "No route for {} {}",
        req.method(),
        req.path()
    )))
}
