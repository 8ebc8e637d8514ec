use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dashboard_core::{Config, Dashboard, WeatherQueryService, provider_from_config};
use inquire::{InquireError, Password, Select, Text};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "Current weather and 5-day forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and the default city.
    Configure,

    /// Show current conditions and the 5-day forecast for a city.
    Show {
        /// City name; the configured default city when absent.
        city: Option<String>,

        /// Open the detail view for forecast day N (1-based).
        #[arg(long, value_name = "N")]
        day: Option<usize>,

        /// Print the dashboard state as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Search, browse forecast days and search again until an empty city is entered.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, day, json } => show(city, day, json).await,
            Command::Interactive => interactive().await,
        }
    }
}

fn open_dashboard(config: &Config) -> anyhow::Result<Dashboard> {
    let provider = provider_from_config(config)?;
    Ok(Dashboard::new(WeatherQueryService::new(provider), config.default_city()))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }
    config.set_api_key(api_key.trim().to_string());

    let city = Text::new("Default city:")
        .with_default(config.default_city())
        .prompt()
        .context("Failed to read default city")?;
    config.set_default_city(city.trim());

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

async fn show(city: Option<String>, day: Option<usize>, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut dash = open_dashboard(&config)?;

    let state = match city {
        Some(city) => dash.submit(&city).await,
        None => dash.refresh().await,
    };

    if let Some(error) = &state.error {
        bail!("{error}");
    }

    if let Some(n) = day {
        let index = n.checked_sub(1).context("Forecast days are numbered from 1")?;
        if dash.select_day(index).is_none() {
            bail!("No forecast for day {n}; {} day(s) available", dash.state().forecast.len());
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(dash.state())?);
    } else {
        print!("{}", render::render_state(dash.state()));
    }

    Ok(())
}

enum Choice {
    Day(usize),
    NewSearch,
}

async fn interactive() -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut dash = open_dashboard(&config)?;

    loop {
        let city = match Text::new("City (empty to quit):")
            .with_default(&dash.state().city)
            .prompt()
        {
            Ok(city) => city,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };
        if city.trim().is_empty() {
            break;
        }

        print!("{}", render::render_state(dash.submit(&city).await));

        while !dash.state().forecast.is_empty() {
            match pick_day(&dash)? {
                Choice::Day(index) => {
                    if let Some(entry) = dash.select_day(index) {
                        print!("\n{}", render::render_day_detail(entry));
                    }
                    dash.close_day();
                }
                Choice::NewSearch => break,
            }
        }
    }

    Ok(())
}

fn pick_day(dash: &Dashboard) -> anyhow::Result<Choice> {
    let mut options: Vec<String> = dash
        .state()
        .forecast
        .iter()
        .map(|entry| format!("{}  {}", entry.day_label(), entry.display_temperature()))
        .collect();
    options.push("New search".to_string());
    let new_search = options.len() - 1;

    match Select::new("Forecast day:", options).raw_prompt() {
        Ok(picked) if picked.index == new_search => Ok(Choice::NewSearch),
        Ok(picked) => Ok(Choice::Day(picked.index)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            Ok(Choice::NewSearch)
        }
        Err(err) => Err(err.into()),
    }
}
