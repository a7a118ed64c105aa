pub mod health;
pub mod prayer_time;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use prayer_time_core::PrayerTimeError;
use serde::Serialize;
use tracing::error;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert errors to HTTP responses
pub struct AppError(anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<PrayerTimeError>() {
            Some(PrayerTimeError::Validation(_)) => StatusCode::BAD_REQUEST,
            Some(PrayerTimeError::LinkExpired) => StatusCode::GONE,
            Some(PrayerTimeError::CityNotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
