//! Core library for the `weather-dashboard` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider (current conditions, midday forecast)
//! - `WeatherQueryService`, which runs a search
//! - `ViewState`, the screen state advanced by discrete transitions
//!
//! It is used by `dashboard-cli`, but can also be reused by other front ends.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;
pub mod state;

pub use config::Config;
pub use dashboard::Dashboard;
pub use error::WeatherError;
pub use model::{CurrentConditions, ForecastEntry};
pub use provider::{WeatherProvider, provider_from_config};
pub use service::{SearchOutcome, WeatherQueryService};
pub use state::{Action, ViewState};
