use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::{fmt, time::Duration};
use tracing::{debug, instrument, warn};

use crate::{config::ProviderConfig, error::WeatherError, model::UpstreamReport};

use super::WeatherProvider;

/// Client for the WeatherAPI.com `current.json` endpoint.
#[derive(Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    lang: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String, config: &ProviderConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client for WeatherAPI.com")?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            lang: config.lang.clone(),
            http,
        })
    }

    fn current_url(&self) -> String {
        format!("{}/current.json", self.base_url)
    }
}

impl fmt::Debug for WeatherApiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherApiProvider")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("lang", &self.lang)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    #[instrument(skip(self), fields(provider = "weatherapi"))]
    async fn fetch(&self, city: &str) -> Result<UpstreamReport, WeatherError> {
        let res = self
            .http
            .get(self.current_url())
            .query(&[("key", self.api_key.as_str()), ("q", city), ("lang", self.lang.as_str())])
            .send()
            .await
            .map_err(|e| WeatherError::Network(format!("WeatherAPI request failed: {e}")))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            WeatherError::Network(format!("Failed to read WeatherAPI response body: {e}"))
        })?;

        debug!(%status, bytes = body.len(), "WeatherAPI responded");

        match status {
            StatusCode::BAD_REQUEST => {
                return Err(WeatherError::NotFound { city: city.to_string() });
            }
            StatusCode::UNAUTHORIZED => return Err(WeatherError::InvalidApiKey),
            StatusCode::OK => {}
            s => {
                warn!(status = s.as_u16(), body = %truncate_body(&body), "WeatherAPI request failed");
                return Err(WeatherError::Upstream { status: s.as_u16() });
            }
        }

        parse_current(&body)
    }
}

/// Validate and decode a `current.json` body.
///
/// A body that is not JSON, or lacks `current.condition`, violates the
/// provider contract. Anything else missing past that point is unexpected.
fn parse_current(body: &str) -> Result<UpstreamReport, WeatherError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        WeatherError::InvalidResponse(format!("body is not JSON ({e}): {}", truncate_body(body)))
    })?;

    if value.pointer("/current/condition").is_none() {
        return Err(WeatherError::InvalidResponse(format!(
            "missing current.condition: {}",
            truncate_body(body)
        )));
    }

    serde_json::from_value(value)
        .map_err(|e| WeatherError::Internal(format!("Failed to decode WeatherAPI JSON: {e}")))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> serde_json::Value {
        json!({
            "location": { "name": "Tokyo", "region": "Tokyo", "country": "Japan" },
            "current": {
                "last_updated": "2024-05-01 21:15",
                "temp_c": 18.0,
                "temp_f": 64.4,
                "condition": { "text": "Clear", "code": 1000 },
                "wind_mph": 5.6,
                "wind_kph": 9.0,
                "humidity": 72
            }
        })
    }

    #[test]
    fn parses_well_formed_body() {
        let parsed = parse_current(&payload().to_string()).unwrap();

        assert_eq!(parsed.current.condition.text, "Clear");
        assert_eq!(parsed.current.humidity, 72);
        assert_eq!(parsed.location.unwrap().name.as_deref(), Some("Tokyo"));
    }

    #[test]
    fn missing_condition_is_contract_violation() {
        let mut body = payload();
        body["current"].as_object_mut().unwrap().remove("condition");

        let err = parse_current(&body.to_string()).unwrap_err();
        assert!(matches!(err, WeatherError::InvalidResponse(_)));
    }

    #[test]
    fn missing_current_is_contract_violation() {
        let err = parse_current(r#"{"location":{"name":"Tokyo"}}"#).unwrap_err();
        assert!(matches!(err, WeatherError::InvalidResponse(_)));
    }

    #[test]
    fn non_json_is_contract_violation() {
        let err = parse_current("<html>oops</html>").unwrap_err();
        assert!(matches!(err, WeatherError::InvalidResponse(_)));
    }

    #[test]
    fn missing_measurement_is_internal() {
        let mut body = payload();
        body["current"].as_object_mut().unwrap().remove("temp_c");

        let err = parse_current(&body.to_string()).unwrap_err();
        assert!(matches!(err, WeatherError::Internal(_)));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "é".repeat(150);
        let out = truncate_body(&body);

        assert!(out.ends_with("..."));
        assert!(out.len() <= 203);
    }

    #[test]
    fn debug_output_redacts_key() {
        let provider = WeatherApiProvider::new("SECRET".into(), &ProviderConfig::default()).unwrap();
        let debug = format!("{provider:?}");

        assert!(!debug.contains("SECRET"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = ProviderConfig {
            base_url: "http://localhost:1234/v1/".into(),
            ..ProviderConfig::default()
        };
        let provider = WeatherApiProvider::new("KEY".into(), &config).unwrap();

        assert_eq!(provider.current_url(), "http://localhost:1234/v1/current.json");
    }
}
