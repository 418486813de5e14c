use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kantor_core::errors::{DatabaseError, Error as CoreError};
use kantor_core::ledger::LedgerError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<String>>,
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::NotFound(_)
        | CoreError::Ledger(LedgerError::NotFound(_))
        | CoreError::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
        CoreError::Ledger(_)
        | CoreError::Validation(_)
        | CoreError::InvalidCredentials
        | CoreError::Database(DatabaseError::UniqueViolation(_))
        | CoreError::Database(DatabaseError::ForeignKeyViolation(_)) => StatusCode::BAD_REQUEST,
        CoreError::RateUnavailable(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match &self {
            ApiError::Core(CoreError::Validation(v)) => {
                (StatusCode::BAD_REQUEST, v.to_string(), Some(v.messages()))
            }
            ApiError::Core(e) => (core_status(e), e.to_string(), None),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone(), None),
            ApiError::Anyhow(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string(), None),
        };
        if status.is_server_error() {
            tracing::error!("Request failed with {}: {}", status, message);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message,
            errors,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
