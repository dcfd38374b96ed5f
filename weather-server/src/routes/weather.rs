//! Weather lookup endpoints.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
};
use serde::Deserialize;
use weather_core::WeatherReport;

use crate::{AppState, error::ApiError};

/// JSON body for `POST /getWeather`.
#[derive(Debug, Default, Deserialize)]
pub struct WeatherBody {
    pub city: Option<String>,
}

/// GET /getWeather?city=...
///
/// The query is taken as raw pairs so repeated or unknown parameters never
/// reject the request; the first `city` wins.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<WeatherReport>, ApiError> {
    lookup(&state, first_city(params)).await
}

/// POST /getWeather with an optional `{"city": "..."}` body.
///
/// An empty body or `null` uses the default city. The content type is not
/// checked.
pub async fn post(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<WeatherReport>, ApiError> {
    let city = city_from_body(&body)
        .map_err(|e| ApiError::Internal(format!("unreadable request body: {e}")))?;
    lookup(&state, city).await
}

async fn lookup(state: &AppState, city: Option<String>) -> Result<Json<WeatherReport>, ApiError> {
    let query = state.weather.query(city);
    let report = state.weather.current(&query).await?;
    tracing::info!(city = %query.city, condition = %report.condition, "weather lookup served");
    Ok(Json(report))
}

fn first_city(params: Vec<(String, String)>) -> Option<String> {
    params.into_iter().find(|(k, _)| k == "city").map(|(_, v)| v)
}

fn city_from_body(body: &[u8]) -> Result<Option<String>, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let parsed: Option<WeatherBody> = serde_json::from_slice(body)?;
    Ok(parsed.and_then(|b| b.city))
}
