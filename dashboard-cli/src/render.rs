//! Plain-text rendering of the dashboard cards.

use dashboard_core::{CurrentConditions, ForecastEntry, ViewState};

pub fn render_current(current: &CurrentConditions) -> String {
    format!(
        "{city}\n  {temp}  {desc}\n  Feels Like: {feels}\n  Humidity: {humidity}%\n  \
         Wind: {wind} m/s\n  Pressure: {pressure} hPa\n  Sunrise: {sunrise}\n  \
         Sunset: {sunset}\n  Icon: {icon}\n",
        city = current.city_name,
        temp = current.display_temperature(),
        desc = current.display_description(),
        feels = current.display_feels_like(),
        humidity = current.humidity_pct,
        wind = current.wind_speed_mps,
        pressure = current.pressure_hpa,
        sunrise = current.sunrise_label(),
        sunset = current.sunset_label(),
        icon = current.icon_url(),
    )
}

/// One line per day: "1. Thu, Nov 28   12°C  Few Clouds".
pub fn render_forecast(forecast: &[ForecastEntry]) -> String {
    let mut out = String::from("5-Day Forecast\n");
    for (idx, entry) in forecast.iter().enumerate() {
        out.push_str(&format!(
            "  {}. {:<12} {:>5}  {}\n",
            idx + 1,
            entry.day_label(),
            entry.display_temperature(),
            entry.display_description(),
        ));
    }
    out
}

pub fn render_day_detail(entry: &ForecastEntry) -> String {
    format!(
        "{day}\n  {temp}  {desc}\n  Feels Like: {feels}\n  Humidity: {humidity}%\n  \
         Wind: {wind} m/s\n  Pressure: {pressure} hPa\n  Icon: {icon}\n",
        day = entry.day_label(),
        temp = entry.display_temperature(),
        desc = entry.display_description(),
        feels = entry.display_feels_like(),
        humidity = entry.humidity_pct,
        wind = entry.wind_speed_mps,
        pressure = entry.pressure_hpa,
        icon = entry.icon_url(),
    )
}

/// Whole screen: error or current card, forecast strip (or its notice), and
/// the detail view when a day is selected.
pub fn render_state(state: &ViewState) -> String {
    if state.loading {
        return format!("Loading weather for {}...\n", state.city);
    }

    let mut out = String::new();

    if let Some(error) = &state.error {
        out.push_str(&format!("{error}\n"));
    }

    if let Some(current) = &state.current {
        out.push_str(&render_current(current));
    }

    if !state.forecast.is_empty() {
        out.push('\n');
        out.push_str(&render_forecast(&state.forecast));
    } else if let Some(notice) = &state.forecast_notice {
        out.push_str(&format!("\n{notice}\n"));
    }

    if let Some(entry) = state.selected_entry() {
        out.push('\n');
        out.push_str(&render_day_detail(entry));
    }

    out
}
