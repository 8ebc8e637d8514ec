//! Screen state advanced by discrete transitions.
//!
//! Every transition consumes the previous [`ViewState`] and returns the next
//! one; nothing is mutated in place. Each search gets a generation number so a
//! late completion of an older search can't overwrite a newer one.

use serde::Serialize;

use crate::{
    error::WeatherError,
    model::{CurrentConditions, ForecastEntry},
    service::SearchOutcome,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SearchStarted {
        city: String,
    },
    SearchSucceeded {
        generation: u64,
        current: CurrentConditions,
        forecast: Vec<ForecastEntry>,
        forecast_notice: Option<String>,
    },
    SearchFailed {
        generation: u64,
        message: String,
    },
    DaySelected(usize),
    DayDeselected,
}

impl Action {
    /// Completion transition for the search tagged `generation`.
    pub fn search_finished(generation: u64, result: Result<SearchOutcome, WeatherError>) -> Self {
        match result {
            Ok(outcome) => {
                let forecast_notice = outcome.forecast_notice().map(str::to_string);
                Action::SearchSucceeded {
                    generation,
                    current: outcome.current,
                    forecast: outcome.forecast.unwrap_or_default(),
                    forecast_notice,
                }
            }
            Err(err) => Action::SearchFailed {
                generation,
                message: err.user_message().to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ViewState {
    pub city: String,
    pub current: Option<CurrentConditions>,
    pub forecast: Vec<ForecastEntry>,
    pub error: Option<String>,
    pub forecast_notice: Option<String>,
    pub selected_day: Option<usize>,
    pub loading: bool,
    pub generation: u64,
}

impl ViewState {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into(), ..Self::default() }
    }

    /// A new search may only start once the previous one finished.
    pub fn can_search(&self) -> bool {
        !self.loading
    }

    pub fn selected_entry(&self) -> Option<&ForecastEntry> {
        self.selected_day.and_then(|idx| self.forecast.get(idx))
    }

    #[must_use]
    pub fn apply(self, action: Action) -> Self {
        match action {
            Action::SearchStarted { city } => Self {
                city,
                loading: true,
                generation: self.generation + 1,
                ..Self::default()
            },
            Action::SearchSucceeded { generation, current, forecast, forecast_notice } => {
                if generation != self.generation {
                    return self;
                }
                Self {
                    current: Some(current),
                    forecast,
                    forecast_notice,
                    error: None,
                    selected_day: None,
                    loading: false,
                    ..self
                }
            }
            Action::SearchFailed { generation, message } => {
                if generation != self.generation {
                    return self;
                }
                Self {
                    current: None,
                    forecast: Vec::new(),
                    forecast_notice: None,
                    error: Some(message),
                    selected_day: None,
                    loading: false,
                    ..self
                }
            }
            Action::DaySelected(idx) if idx < self.forecast.len() => {
                Self { selected_day: Some(idx), ..self }
            }
            Action::DaySelected(_) => self,
            Action::DayDeselected => Self { selected_day: None, ..self },
        }
    }
}
