//! Core library for `citycast`.
//!
//! This crate defines:
//! - Wire models for the AccuWeather location and forecast endpoints
//! - The remote client contract and its HTTP implementation
//! - A repository that turns every remote outcome into a [`FetchState`]
//! - Observable per-screen state holders
//! - Configuration & credentials handling
//!
//! It is used by `citycast-cli`, but any front end can drive the state holders.

pub mod client;
pub mod config;
pub mod fetch_state;
pub mod format;
pub mod model;
pub mod repository;
pub mod state;

#[cfg(test)]
mod testing;

pub use client::{AccuWeatherClient, ClientError, DEFAULT_BASE_URL, TransportResponse, WeatherApi};
pub use config::Config;
pub use fetch_state::FetchState;
pub use model::{DailyForecast, DailyForecastSet, HourlyForecast, Location};
pub use repository::{WeatherRepo, WeatherRepository};
pub use state::{ForecastState, Observable, SearchState};

use std::sync::Arc;

/// Build the client and repository once from config.
///
/// The returned repository is meant to be shared by every state holder.
pub fn repository_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherRepository>> {
    let api_key = config.resolved_api_key()?;
    let mut client = AccuWeatherClient::new(api_key, &config.base_url)?
        .with_metric(config.metric);
    if let Some(language) = &config.language {
        client = client.with_language(language.as_str());
    }
    Ok(Arc::new(WeatherRepo::new(Arc::new(client))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_from_config_needs_a_key() {
        let cfg = Config::default();
        if std::env::var(config::API_KEY_ENV).is_ok() {
            return;
        }
        let err = repository_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No AccuWeather API key configured"));
    }

    #[test]
    fn repository_from_config_rejects_bad_base_url() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.base_url = "::nope".into();

        let err = repository_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("invalid base URL"));
    }

    #[tokio::test]
    async fn repository_from_config_sends_configured_language() {
        use wiremock::matchers::{method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/locations/v1/cities/search"))
            .and(query_param("apikey", "KEY"))
            .and(query_param("language", "de-de"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"Key": "178086", "EnglishName": "Berlin"}
            ])))
            .mount(&server)
            .await;

        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.set_language("de-de");
        cfg.base_url = server.uri();

        let repo = repository_from_config(&cfg).unwrap();
        let state = repo.search_location("Berlin").await;

        assert_eq!(state.data().map(|l| l[0].key.as_str()), Some("178086"));
    }

    #[test]
    fn repository_from_config_works_with_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        assert!(repository_from_config(&cfg).is_ok());
    }
}
