use anyhow::{anyhow, Error};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;

/// Errors raised by the pagination core for inputs outside its domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum PaginationError {
    #[error("limit must be a positive integer, got {0}")]
    InvalidLimit(i64),
}

pub type PaginationResult<T> = Result<T, PaginationError>;

#[derive(Debug)]
pub struct AppError((Option<StatusCode>, Error));

impl AppError {
    pub fn new(err: Error) -> Self {
        Self((None, err))
    }

    pub fn status<E: Into<anyhow::Error>>(status: StatusCode, err: E) -> Self {
        Self((Some(status), err.into()))
    }

    pub fn bad_request<E: Into<anyhow::Error>>(err: E) -> Self {
        Self::status(StatusCode::BAD_REQUEST, err)
    }

    pub fn not_found() -> Self {
        Self::status(StatusCode::NOT_FOUND, anyhow!("Not Found"))
    }

    pub fn status_code(&self) -> StatusCode {
        self.0 .0.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), format!("{}", self.0 .1)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self((None, err.into()))
    }
}
