//! API error type with HTTP response mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use weather_core::WeatherError;

/// Error returned by handlers; always rendered as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    /// Classified failure from the weather lookup.
    Weather(WeatherError),
    /// Anything unclassified. The detail is logged, never returned.
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Weather(err) => weather_status(err),
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn weather_status(err: &WeatherError) -> StatusCode {
    match err {
        WeatherError::NotFound { .. } => StatusCode::NOT_FOUND,
        WeatherError::InvalidApiKey => StatusCode::UNAUTHORIZED,
        WeatherError::Network(_) => StatusCode::SERVICE_UNAVAILABLE,
        WeatherError::MissingApiKey
        | WeatherError::Upstream { .. }
        | WeatherError::InvalidResponse(_)
        | WeatherError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            ApiError::Weather(err) => {
                match &err {
                    WeatherError::NotFound { .. } => {
                        tracing::debug!(error = %err, "location not found");
                    }
                    WeatherError::Network(detail) => {
                        tracing::warn!(%detail, "weather provider unreachable");
                    }
                    WeatherError::InvalidApiKey | WeatherError::MissingApiKey => {
                        tracing::error!(error = %err, "weather provider credential problem");
                    }
                    _ => {
                        tracing::error!(
                            error = %err,
                            detail = err.detail().unwrap_or_default(),
                            "weather lookup failed"
                        );
                    }
                }
                err.to_string()
            }
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "unexpected error");
                "Internal server error".to_string()
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        ApiError::Weather(err)
    }
}
