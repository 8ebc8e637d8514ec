use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    error::WeatherError,
    model::{CurrentConditions, ForecastEntry},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Forecast samples whose `dt_txt` contains this are kept, one per day.
pub const MIDDAY_MARKER: &str = "12:00:00";

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn get(&self, endpoint: &str, city: &str) -> Result<(StatusCode, String), WeatherError> {
        let url = format!("{}/{endpoint}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = res.status();
        let body = res.text().await.map_err(reqwest::Error::without_url)?;
        debug!(endpoint, %status, bytes = body.len(), "provider responded");

        Ok((status, body))
    }

    async fn request_forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, WeatherError> {
        let (status, body) = self.get("forecast", city).await?;

        if !status.is_success() {
            return Err(WeatherError::ForecastUnavailable(format!(
                "forecast request failed with status {status}"
            )));
        }

        let parsed: OwForecastResponse = serde_json::from_str(&body)?;
        select_midday(parsed.list).into_iter().map(ForecastEntry::try_from).collect()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self), level = "debug")]
    async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let (status, body) = self.get("weather", city).await?;

        if !status.is_success() {
            return Err(WeatherError::CityNotFoundOrApiError { status });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        CurrentConditions::try_from(parsed)
    }

    #[instrument(skip(self), level = "debug")]
    async fn fetch_forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, WeatherError> {
        self.request_forecast(city).await.map_err(|err| match err {
            WeatherError::ForecastUnavailable(_) => err,
            other => WeatherError::ForecastUnavailable(other.to_string()),
        })
    }
}

/// Keeps the midday samples in provider order.
fn select_midday(samples: Vec<OwForecastEntry>) -> Vec<OwForecastEntry> {
    samples.into_iter().filter(|s| s.dt_txt.contains(MIDDAY_MARKER)).collect()
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    sys: Option<OwSys>,
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn first_condition(weather: Vec<OwWeather>, what: &str) -> Result<OwWeather, WeatherError> {
    weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::MalformedResponse(format!("{what} has no weather condition")))
}

impl TryFrom<OwCurrentResponse> for CurrentConditions {
    type Error = WeatherError;

    fn try_from(raw: OwCurrentResponse) -> Result<Self, Self::Error> {
        let condition = first_condition(raw.weather, "current conditions")?;
        let sys = raw.sys.unwrap_or_default();

        Ok(CurrentConditions {
            city_name: raw.name,
            temperature_c: raw.main.temp,
            feels_like_c: raw.main.feels_like,
            humidity_pct: raw.main.humidity,
            wind_speed_mps: raw.wind.speed,
            pressure_hpa: raw.main.pressure,
            description: condition.description,
            icon: condition.icon,
            sunrise: sys.sunrise,
            sunset: sys.sunset,
            timezone_offset_secs: raw.timezone,
        })
    }
}

impl TryFrom<OwForecastEntry> for ForecastEntry {
    type Error = WeatherError;

    fn try_from(raw: OwForecastEntry) -> Result<Self, Self::Error> {
        let condition = first_condition(raw.weather, &format!("forecast sample {}", raw.dt_txt))?;

        Ok(ForecastEntry {
            timestamp: raw.dt,
            dt_txt: raw.dt_txt,
            temperature_c: raw.main.temp,
            feels_like_c: raw.main.feels_like,
            humidity_pct: raw.main.humidity,
            wind_speed_mps: raw.wind.speed,
            pressure_hpa: raw.main.pressure,
            description: condition.description,
            icon: condition.icon,
        })
    }
}
