//! Search orchestration: current conditions first, forecast only after that
//! succeeded.

use tracing::{info, instrument, warn};

use crate::{
    error::WeatherError,
    model::{CurrentConditions, ForecastEntry},
    provider::WeatherProvider,
};

/// Result of one successful search.
///
/// A failed forecast does not fail the search; it is kept here so callers can
/// surface it next to the current card.
#[derive(Debug)]
pub struct SearchOutcome {
    pub current: CurrentConditions,
    pub forecast: Result<Vec<ForecastEntry>, WeatherError>,
}

impl SearchOutcome {
    /// Forecast entries, empty when the forecast could not be fetched.
    pub fn forecast_entries(&self) -> &[ForecastEntry] {
        self.forecast.as_deref().unwrap_or_default()
    }

    pub fn forecast_notice(&self) -> Option<&'static str> {
        self.forecast.as_ref().err().map(WeatherError::user_message)
    }
}

#[derive(Debug)]
pub struct WeatherQueryService {
    provider: Box<dyn WeatherProvider>,
}

impl WeatherQueryService {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    pub async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let city = normalize_city(city)?;
        self.provider.fetch_current(city).await
    }

    pub async fn fetch_forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, WeatherError> {
        let city = normalize_city(city)?;
        self.provider.fetch_forecast(city).await
    }

    #[instrument(skip(self), level = "info")]
    pub async fn search(&self, city: &str) -> Result<SearchOutcome, WeatherError> {
        let city = normalize_city(city)?;

        let current = self.provider.fetch_current(city).await?;
        let forecast = self.provider.fetch_forecast(city).await;

        match &forecast {
            Ok(entries) => info!(city, days = entries.len(), "search complete"),
            Err(err) => warn!(city, error = %err, "forecast unavailable, showing current conditions only"),
        }

        Ok(SearchOutcome { current, forecast })
    }
}

fn normalize_city(city: &str) -> Result<&str, WeatherError> {
    let city = city.trim();
    if city.is_empty() {
        return Err(WeatherError::EmptyCity);
    }
    Ok(city)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    pub(crate) fn sample_current(city: &str) -> CurrentConditions {
        CurrentConditions {
            city_name: city.to_string(),
            temperature_c: 15.4,
            feels_like_c: 14.6,
            humidity_pct: 60,
            wind_speed_mps: 3.09,
            pressure_hpa: 1015,
            description: "clear sky".into(),
            icon: "01d".into(),
            sunrise: Some(1732684320),
            sunset: Some(1732718400),
            timezone_offset_secs: 3600,
        }
    }

    pub(crate) fn sample_forecast(days: usize) -> Vec<ForecastEntry> {
        (0..days)
            .map(|day| {
                let timestamp = 1_732_708_800 + day as i64 * 86_400;
                let dt_txt = chrono::DateTime::from_timestamp(timestamp, 0)
                    .expect("valid ts")
                    .format(crate::model::PROVIDER_DATETIME_FORMAT)
                    .to_string();
                ForecastEntry {
                    timestamp,
                    dt_txt,
                    temperature_c: 10.0 + day as f64,
                    feels_like_c: 9.0,
                    humidity_pct: 70,
                    wind_speed_mps: 2.5,
                    pressure_hpa: 1012,
                    description: "few clouds".into(),
                    icon: "02d".into(),
                }
            })
            .collect()
    }

    /// Scripted provider counting forecast requests.
    #[derive(Debug, Default)]
    pub(crate) struct StubProvider {
        pub current_status: Option<StatusCode>,
        pub forecast_fails: bool,
        pub forecast_calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
            match self.current_status {
                Some(status) => Err(WeatherError::CityNotFoundOrApiError { status }),
                None => Ok(sample_current(city)),
            }
        }

        async fn fetch_forecast(&self, _city: &str) -> Result<Vec<ForecastEntry>, WeatherError> {
            self.forecast_calls.fetch_add(1, Ordering::SeqCst);
            if self.forecast_fails {
                Err(WeatherError::ForecastUnavailable("status 503".into()))
            } else {
                Ok(sample_forecast(5))
            }
        }
    }

    #[tokio::test]
    async fn search_returns_current_and_forecast() {
        let service = WeatherQueryService::new(Box::new(StubProvider::default()));

        let outcome = service.search("Pristina").await.expect("search");

        assert_eq!(outcome.current.city_name, "Pristina");
        assert_eq!(outcome.forecast_entries().len(), 5);
        assert_eq!(outcome.forecast_notice(), None);
    }

    #[tokio::test]
    async fn forecast_failure_keeps_current_conditions() {
        let provider = StubProvider { forecast_fails: true, ..StubProvider::default() };
        let service = WeatherQueryService::new(Box::new(provider));

        let outcome = service.search("Pristina").await.expect("search");

        assert_eq!(outcome.current.city_name, "Pristina");
        assert!(outcome.forecast_entries().is_empty());
        assert_eq!(outcome.forecast_notice(), Some(crate::error::FORECAST_UNAVAILABLE_MESSAGE));
    }

    #[tokio::test]
    async fn current_failure_skips_forecast() {
        let provider = StubProvider {
            current_status: Some(StatusCode::NOT_FOUND),
            ..StubProvider::default()
        };
        let forecast_calls = Arc::clone(&provider.forecast_calls);
        let service = WeatherQueryService::new(Box::new(provider));

        let err = service.search("Atlantis").await.unwrap_err();

        assert!(matches!(err, WeatherError::CityNotFoundOrApiError { .. }));
        assert_eq!(forecast_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn city_is_trimmed_and_empty_rejected() {
        let service = WeatherQueryService::new(Box::new(StubProvider::default()));

        let outcome = service.search("  Prizren ").await.expect("search");
        assert_eq!(outcome.current.city_name, "Prizren");

        let err = service.search("   ").await.unwrap_err();
        assert!(matches!(err, WeatherError::EmptyCity));
    }
}
