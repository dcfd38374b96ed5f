use serde::{Deserialize, Serialize};

/// City used when a caller does not name one.
pub const DEFAULT_CITY: &str = "tokyo";

/// A single inbound lookup, resolved from the query string or JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub city: String,
}

impl WeatherQuery {
    /// Absent or empty input falls back to `default_city`; anything else is
    /// forwarded untouched.
    pub fn resolve(city: Option<String>, default_city: &str) -> Self {
        let city = city
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| default_city.to_string());
        Self { city }
    }
}

/// Flattened current conditions returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub region: String,
    pub country: String,
    pub condition: String,
    pub temperature_c: f64,
    pub temperature_f: f64,
    pub humidity: u8,
    pub wind_kph: f64,
    pub wind_mph: f64,
    pub last_updated: String,
}

impl WeatherReport {
    /// Project a validated upstream payload. `requested_city` stands in for
    /// the location name when the provider leaves it out.
    pub fn from_upstream(upstream: UpstreamReport, requested_city: &str) -> Self {
        let location = upstream.location.unwrap_or_default();
        let current = upstream.current;

        Self {
            city: location.name.unwrap_or_else(|| requested_city.to_string()),
            region: location.region.unwrap_or_default(),
            country: location.country.unwrap_or_default(),
            condition: current.condition.text,
            temperature_c: current.temp_c,
            temperature_f: current.temp_f,
            humidity: current.humidity,
            wind_kph: current.wind_kph,
            wind_mph: current.wind_mph,
            last_updated: current.last_updated,
        }
    }
}

/// The subset of the provider's `current.json` payload we rely on.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamReport {
    pub location: Option<UpstreamLocation>,
    pub current: UpstreamCurrent,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamLocation {
    pub name: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamCondition {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamCurrent {
    pub condition: UpstreamCondition,
    pub temp_c: f64,
    pub temp_f: f64,
    pub humidity: u8,
    pub wind_kph: f64,
    pub wind_mph: f64,
    pub last_updated: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> UpstreamCurrent {
        UpstreamCurrent {
            condition: UpstreamCondition { text: "Sunny".into() },
            temp_c: 21.0,
            temp_f: 69.8,
            humidity: 40,
            wind_kph: 11.2,
            wind_mph: 6.9,
            last_updated: "2024-05-01 12:00".into(),
        }
    }

    #[test]
    fn resolve_uses_default_when_absent_or_empty() {
        assert_eq!(WeatherQuery::resolve(None, DEFAULT_CITY).city, "tokyo");
        assert_eq!(WeatherQuery::resolve(Some(String::new()), DEFAULT_CITY).city, "tokyo");
    }

    #[test]
    fn resolve_forwards_city_as_is() {
        let query = WeatherQuery::resolve(Some(" São Paulo ".into()), DEFAULT_CITY);
        assert_eq!(query.city, " São Paulo ");
    }

    #[test]
    fn projection_prefers_upstream_location() {
        let upstream = UpstreamReport {
            location: Some(UpstreamLocation {
                name: Some("London".into()),
                region: Some("City of London, Greater London".into()),
                country: Some("United Kingdom".into()),
            }),
            current: current(),
        };

        let report = WeatherReport::from_upstream(upstream, "london");
        assert_eq!(report.city, "London");
        assert_eq!(report.region, "City of London, Greater London");
        assert_eq!(report.country, "United Kingdom");
        assert_eq!(report.condition, "Sunny");
        assert_eq!(report.humidity, 40);
    }

    #[test]
    fn projection_falls_back_without_location() {
        let upstream = UpstreamReport { location: None, current: current() };

        let report = WeatherReport::from_upstream(upstream, "paris");
        assert_eq!(report.city, "paris");
        assert_eq!(report.region, "");
        assert_eq!(report.country, "");
    }

    #[test]
    fn report_serializes_flat_fields() {
        let upstream = UpstreamReport { location: None, current: current() };
        let json = serde_json::to_value(WeatherReport::from_upstream(upstream, "oslo")).unwrap();

        for field in [
            "city",
            "region",
            "country",
            "condition",
            "temperature_c",
            "temperature_f",
            "humidity",
            "wind_kph",
            "wind_mph",
            "last_updated",
        ] {
            assert!(json.get(field).is_some(), "missing {field}");
        }
    }
}
