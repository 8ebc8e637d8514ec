use reqwest::StatusCode;
use thiserror::Error;

/// Generic text shown for any failure of the current-conditions lookup.
pub const GENERIC_ERROR_MESSAGE: &str = "Unable to fetch weather. Check city or connection.";

/// Text shown next to the current card when only the forecast failed.
pub const FORECAST_UNAVAILABLE_MESSAGE: &str = "Forecast unavailable right now.";

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("City name must not be empty")]
    EmptyCity,

    #[error("City not found or provider error (status {status})")]
    CityNotFoundOrApiError { status: StatusCode },

    #[error("Forecast unavailable: {0}")]
    ForecastUnavailable(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected provider response: {0}")]
    MalformedResponse(String),
}

impl WeatherError {
    /// Message for display. Provider detail is never shown.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::ForecastUnavailable(_) => FORECAST_UNAVAILABLE_MESSAGE,
            _ => GENERIC_ERROR_MESSAGE,
        }
    }

    pub fn is_forecast_only(&self) -> bool {
        matches!(self, Self::ForecastUnavailable(_))
    }
}
