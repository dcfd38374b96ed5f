use std::sync::Arc;

use tracing::warn;

use crate::{
    Config, WeatherError, WeatherProvider, WeatherQuery, WeatherReport,
    provider::provider_from_config,
};

/// Resolves lookups against the configured provider and flattens the result.
///
/// Holds no mutable state, so one instance is shared across all requests.
#[derive(Debug, Clone)]
pub struct WeatherService {
    provider: Option<Arc<dyn WeatherProvider>>,
    default_city: String,
}

impl WeatherService {
    /// `provider` is `None` when no credential is configured; every lookup
    /// then fails with [`WeatherError::MissingApiKey`].
    pub fn new(provider: Option<Arc<dyn WeatherProvider>>, default_city: impl Into<String>) -> Self {
        Self { provider, default_city: default_city.into() }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let provider: Option<Arc<dyn WeatherProvider>> = if config.provider.is_configured() {
            Some(Arc::from(provider_from_config(config)?))
        } else {
            warn!("WEATHER_API_KEY is not set; weather lookups will fail");
            None
        };

        Ok(Self::new(provider, config.default_city.clone()))
    }

    pub fn default_city(&self) -> &str {
        &self.default_city
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Build a query from caller input, applying the default city.
    pub fn query(&self, city: Option<String>) -> WeatherQuery {
        WeatherQuery::resolve(city, &self.default_city)
    }

    pub async fn current(&self, query: &WeatherQuery) -> Result<WeatherReport, WeatherError> {
        let provider = self.provider.as_ref().ok_or(WeatherError::MissingApiKey)?;
        let upstream = provider.fetch(&query.city).await?;
        Ok(WeatherReport::from_upstream(upstream, &query.city))
    }
}
