//! Adapts the remote client to [`FetchState`].
//!
//! Every remote call goes through [`execute`], so the three lookups share a
//! single error path: nothing escapes the repository as an `Err`, and nothing
//! is retried.

use async_trait::async_trait;
use std::{fmt::Debug, fmt::Display, future::Future, sync::Arc};

use crate::{
    client::{TransportResponse, WeatherApi},
    fetch_state::FetchState,
    model::{DailyForecastSet, HourlyForecast, Location},
};

/// Message used when the provider rejects a request without saying why.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Run one remote call and fold its outcome into a [`FetchState`].
///
/// - `Err(e)` becomes `Error(e.to_string())`.
/// - A successful response becomes `Success(body)`.
/// - A failed response becomes `Error(error_body)`, or
///   [`UNKNOWN_ERROR_MESSAGE`] when the body is missing or blank.
pub async fn execute<T, E, F, Fut>(call: F) -> FetchState<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<TransportResponse<T>, E>>,
    E: Display,
{
    match call().await {
        Ok(TransportResponse::Success { body, .. }) => FetchState::Success(body),
        Ok(TransportResponse::Failure { status, error_body }) => {
            let message = error_body
                .filter(|body| !body.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string());
            tracing::warn!(%status, %message, "request rejected by provider");
            FetchState::Error(message)
        }
        Err(err) => {
            let message = err.to_string();
            tracing::warn!(%message, "request failed");
            FetchState::Error(message)
        }
    }
}

#[async_trait]
pub trait WeatherRepository: Send + Sync + Debug {
    async fn search_location(&self, query: &str) -> FetchState<Vec<Location>>;

    async fn get_daily_forecasts(&self, location_key: &str) -> FetchState<DailyForecastSet>;

    async fn get_hourly_forecasts(&self, location_key: &str) -> FetchState<Vec<HourlyForecast>>;
}

/// [`WeatherRepository`] over any [`WeatherApi`].
#[derive(Debug, Clone)]
pub struct WeatherRepo {
    api: Arc<dyn WeatherApi>,
}

impl WeatherRepo {
    pub fn new(api: Arc<dyn WeatherApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl WeatherRepository for WeatherRepo {
    async fn search_location(&self, query: &str) -> FetchState<Vec<Location>> {
        tracing::debug!(query, "searching locations");
        execute(|| self.api.search_location(query)).await
    }

    async fn get_daily_forecasts(&self, location_key: &str) -> FetchState<DailyForecastSet> {
        tracing::debug!(location_key, "fetching daily forecasts");
        execute(|| self.api.get_daily_forecasts(location_key)).await
    }

    async fn get_hourly_forecasts(&self, location_key: &str) -> FetchState<Vec<HourlyForecast>> {
        tracing::debug!(location_key, "fetching hourly forecasts");
        execute(|| self.api.get_hourly_forecasts(location_key)).await
    }
}
