//! Request-level errors and their HTTP responses
//!
//! Validation failures are not errors here: they re-render the form.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::models::error::ErrorResponse;
use crate::services::reservation_repository::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Reservation not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => AppError::NotFound,
            StoreError::Database(db_err) => AppError::Database(db_err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => {
                warn!("Reservation not found");
                StatusCode::NOT_FOUND
            }
            AppError::BadRequest(msg) => {
                warn!(error = %msg, "Bad request");
                StatusCode::BAD_REQUEST
            }
            AppError::Database(e) => {
                error!(error = %e, "Database error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
