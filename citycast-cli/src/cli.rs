use anyhow::{Context, bail};
use chrono::{FixedOffset, Offset, Utc};
use citycast_core::{
    Config, FetchState, ForecastState, Location, SearchState, WeatherRepository,
    repository_from_config, state::LocationsState,
};
use clap::{Parser, Subcommand};
use inquire::{Confirm, Password, Select, Text};
use std::sync::Arc;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citycast", version, about = "City weather forecasts from AccuWeather")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the AccuWeather API key, unit and language preferences.
    Configure,

    /// List locations matching a city name.
    Search {
        /// City name, e.g. "Auckland".
        query: String,
    },

    /// Show hourly and daily forecasts for a location key.
    Forecast {
        /// Provider location key, as printed by `search`.
        location_key: String,
    },

    /// Search for a city, pick a match, and show its forecast.
    Show {
        /// City name, e.g. "Auckland".
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Search { query } => {
                let repo = load_repository()?;
                let locations = search(repo, &query).await?;
                render::print_locations(&locations);
                Ok(())
            }
            Command::Forecast { location_key } => {
                let repo = load_repository()?;
                show_forecast(repo, &location_key, Utc.fix()).await
            }
            Command::Show { city } => {
                let repo = load_repository()?;
                let locations = search(Arc::clone(&repo), &city).await?;
                let chosen = choose_location(locations)?;

                println!("{}", render::location_heading(&chosen));
                show_forecast(repo, &chosen.key, chosen.time_zone.utc_offset()).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("AccuWeather API key:")
        .without_confirmation()
        .with_help_message("Create one at https://developer.accuweather.com")
        .prompt()
        .context("API key prompt was cancelled")?;
    config.set_api_key(api_key);

    config.metric = Confirm::new("Use metric units?")
        .with_default(config.metric)
        .prompt()
        .context("Unit prompt was cancelled")?;

    let language = Text::new("Language code (blank for provider default):")
        .with_initial_value(config.language.as_deref().unwrap_or_default())
        .with_help_message("e.g. en-us, fr-fr, de-de")
        .prompt()
        .context("Language prompt was cancelled")?;
    config.set_language(&language);

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

fn load_repository() -> anyhow::Result<Arc<dyn WeatherRepository>> {
    let config = Config::load()?;
    repository_from_config(&config)
}

/// Run one search through the search state holder and wait for its outcome.
async fn search(repo: Arc<dyn WeatherRepository>, query: &str) -> anyhow::Result<Vec<Location>> {
    let state = SearchState::new(repo);
    let mut updates = state.locations().subscribe();

    state.search_location(query);

    let settled: LocationsState = updates
        .wait_for(|s| matches!(s, Some(current) if !current.is_loading()))
        .await
        .context("search state closed before the search finished")?
        .clone();

    match settled {
        Some(FetchState::Success(locations)) => Ok(locations),
        Some(FetchState::Error(message)) => bail!("Location search failed: {message}"),
        Some(FetchState::Loading) | None => bail!("Location search did not finish"),
    }
}

fn choose_location(mut locations: Vec<Location>) -> anyhow::Result<Location> {
    match locations.len() {
        0 => bail!("No matching locations found"),
        1 => Ok(locations.remove(0)),
        _ => {
            let labels: Vec<String> = locations.iter().map(render::location_line).collect();
            let picked = Select::new("Several places match, pick one:", labels)
                .raw_prompt()
                .context("Location prompt was cancelled")?;
            Ok(locations.swap_remove(picked.index))
        }
    }
}

async fn show_forecast(
    repo: Arc<dyn WeatherRepository>,
    location_key: &str,
    offset: FixedOffset,
) -> anyhow::Result<()> {
    let state = ForecastState::new(repo);
    let mut hourly = state.hourly().subscribe();
    let mut daily = state.daily().subscribe();

    state.load(location_key);

    let hourly = hourly
        .wait_for(|s| !s.is_loading())
        .await
        .context("hourly forecast state closed early")?
        .clone();
    let daily = daily
        .wait_for(|s| !s.is_loading())
        .await
        .context("daily forecast state closed early")?
        .clone();

    render::print_hourly(&hourly, offset);
    println!();
    render::print_daily(&daily, offset);

    if hourly.error().is_some() && daily.error().is_some() {
        bail!("Could not load any forecast for location {location_key}");
    }
    Ok(())
}
