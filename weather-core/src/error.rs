use thiserror::Error;

/// Classified failure of a weather lookup.
///
/// `Display` renders the message that is safe to hand back to a caller.
/// Variants carrying a `String` keep the diagnostic detail for logs only.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No upstream credential is configured; no request was sent.
    #[error("Weather API key not configured")]
    MissingApiKey,

    /// The provider does not recognise the requested location.
    #[error("City '{city}' not found")]
    NotFound { city: String },

    /// The provider rejected the configured credential.
    #[error("Invalid API key")]
    InvalidApiKey,

    /// Any other non-success status from the provider.
    #[error("Weather API error: {status}")]
    Upstream { status: u16 },

    /// The provider answered with success but the payload has the wrong shape.
    #[error("Invalid response from weather API")]
    InvalidResponse(String),

    /// Connection failure or timeout while talking to the provider.
    #[error("Network error occurred")]
    Network(String),

    #[error("Internal server error")]
    Internal(String),
}

impl WeatherError {
    /// Diagnostic detail for logging, if the variant carries any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            WeatherError::InvalidResponse(detail)
            | WeatherError::Network(detail)
            | WeatherError::Internal(detail) => Some(detail),
            _ => None,
        }
    }
}
