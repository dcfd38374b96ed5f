//! HTTP front end for the weather proxy.
//!
//! Exposes a liveness probe at `/` and the weather lookup at `/getWeather`,
//! with permissive CORS and per-request tracing.

pub mod error;
pub mod routes;

use std::{any::Any, sync::Arc};

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, CorsLayer},
    trace::TraceLayer,
};
use weather_core::WeatherService;

/// Shared, read-only application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub weather: WeatherService,
}

/// Creates the router with all routes and middleware.
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::health::check))
        .route("/getWeather", get(routes::weather::get).post(routes::weather::post))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods(cors::Any)
                .allow_headers(cors::Any),
        )
        .layer(TraceLayer::new_for_http())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    tracing::error!(%detail, "request handler panicked");

    let body = serde_json::json!({ "error": "Internal server error" });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
