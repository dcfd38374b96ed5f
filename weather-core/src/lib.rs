//! Core library for the `weather-api` proxy.
//!
//! This crate defines:
//! - Configuration (file + environment)
//! - The error taxonomy for weather lookups
//! - Abstraction over weather providers and the WeatherAPI.com client
//! - The [`WeatherService`] that turns a city into a flattened report
//!
//! It is used by `weather-server`, but carries no HTTP server concerns itself.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;

pub use config::{Config, ProviderConfig, ServerConfig};
pub use error::WeatherError;
pub use model::{DEFAULT_CITY, UpstreamReport, WeatherQuery, WeatherReport};
pub use provider::{WeatherProvider, weatherapi::WeatherApiProvider};
pub use service::WeatherService;
