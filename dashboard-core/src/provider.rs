use crate::{
    Config,
    error::WeatherError,
    model::{CurrentConditions, ForecastEntry},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for `city`, metric units.
    async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, WeatherError>;

    /// One forecast entry per day, taken from the midday sample.
    async fn fetch_forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, WeatherError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `weather-dashboard configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    let provider = match config.base_url.as_deref() {
        Some(base_url) => OpenWeatherProvider::with_base_url(api_key, base_url),
        None => OpenWeatherProvider::new(api_key),
    };

    Ok(Box::new(provider))
}
