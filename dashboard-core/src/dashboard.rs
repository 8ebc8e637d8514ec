use tracing::debug;

use crate::{
    error::WeatherError,
    model::ForecastEntry,
    service::{SearchOutcome, WeatherQueryService},
    state::{Action, ViewState},
};

/// One screen session: the query service plus the state it drives.
#[derive(Debug)]
pub struct Dashboard {
    service: WeatherQueryService,
    state: ViewState,
}

impl Dashboard {
    pub fn new(service: WeatherQueryService, initial_city: impl Into<String>) -> Self {
        Self { service, state: ViewState::new(initial_city) }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    fn dispatch(&mut self, action: Action) {
        self.state = std::mem::take(&mut self.state).apply(action);
    }

    /// Starts a search unless one is already running. Returns the search's
    /// generation, to be handed back to [`Dashboard::finish_search`].
    pub fn begin_search(&mut self, city: &str) -> Option<u64> {
        if !self.state.can_search() {
            debug!(city, "search ignored, another one is in flight");
            return None;
        }

        self.dispatch(Action::SearchStarted { city: city.trim().to_string() });
        Some(self.state.generation)
    }

    pub fn finish_search(&mut self, generation: u64, result: Result<SearchOutcome, WeatherError>) {
        self.dispatch(Action::search_finished(generation, result));
    }

    /// Runs a full search for `city` and returns the resulting state.
    pub async fn submit(&mut self, city: &str) -> &ViewState {
        if let Some(generation) = self.begin_search(city) {
            let result = self.service.search(city).await;
            self.finish_search(generation, result);
        }
        &self.state
    }

    /// Searches the city currently held in the state.
    pub async fn refresh(&mut self) -> &ViewState {
        let city = self.state.city.clone();
        self.submit(&city).await
    }

    pub fn select_day(&mut self, index: usize) -> Option<&ForecastEntry> {
        self.dispatch(Action::DaySelected(index));
        self.state.selected_entry()
    }

    pub fn close_day(&mut self) {
        self.dispatch(Action::DayDeselected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GENERIC_ERROR_MESSAGE;
    use crate::service::tests::{StubProvider, sample_current};
    use reqwest::StatusCode;

    fn dashboard(provider: StubProvider) -> Dashboard {
        Dashboard::new(WeatherQueryService::new(Box::new(provider)), "Pristina")
    }

    #[tokio::test]
    async fn refresh_loads_initial_city() {
        let mut dash = dashboard(StubProvider::default());

        let state = dash.refresh().await;

        assert_eq!(state.current.as_ref().map(|c| c.city_name.as_str()), Some("Pristina"));
        assert_eq!(state.forecast.len(), 5);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn failed_search_shows_generic_error() {
        let provider = StubProvider {
            current_status: Some(StatusCode::NOT_FOUND),
            ..StubProvider::default()
        };
        let mut dash = dashboard(provider);

        let state = dash.submit("Atlantis").await;

        assert_eq!(state.city, "Atlantis");
        assert_eq!(state.error.as_deref(), Some(GENERIC_ERROR_MESSAGE));
        assert!(state.current.is_none());
        assert!(state.forecast.is_empty());
    }

    #[tokio::test]
    async fn forecast_outage_still_renders_current() {
        let provider = StubProvider { forecast_fails: true, ..StubProvider::default() };
        let mut dash = dashboard(provider);

        let state = dash.submit("Pristina").await;

        assert!(state.current.is_some());
        assert!(state.forecast.is_empty());
        assert!(state.forecast_notice.is_some());
        assert!(state.error.is_none());
    }

    #[test]
    fn second_search_is_refused_while_loading() {
        let mut dash = dashboard(StubProvider::default());

        let first = dash.begin_search("Pristina");
        assert_eq!(first, Some(1));
        assert_eq!(dash.begin_search("Tirana"), None);
        assert_eq!(dash.state().city, "Pristina");

        let outcome = SearchOutcome { current: sample_current("Pristina"), forecast: Ok(Vec::new()) };
        dash.finish_search(1, Ok(outcome));

        assert!(dash.state().can_search());
        assert_eq!(dash.begin_search("Tirana"), Some(2));
    }

    #[tokio::test]
    async fn select_and_close_day() {
        let mut dash = dashboard(StubProvider::default());
        dash.refresh().await;

        let picked = dash.select_day(1).map(|e| e.dt_txt.clone());
        assert_eq!(picked.as_deref(), Some("2024-11-28 12:00:00"));

        dash.close_day();
        assert!(dash.state().selected_entry().is_none());
        assert!(dash.select_day(9).is_none());
    }
}
