use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::model::{DailyForecastSet, HourlyForecast, Location};

pub const DEFAULT_BASE_URL: &str = "http://dataservice.accuweather.com/";

const SEARCH_PATH: &str = "locations/v1/cities/search";
const DAILY_PATH: &str = "forecasts/v1/daily/5day/";
const HOURLY_PATH: &str = "forecasts/v1/hourly/12hour/";

/// Raw outcome of one HTTP exchange that produced a status line.
///
/// A successful response always carries its decoded body; a 2xx reply whose
/// body cannot be decoded never becomes a `TransportResponse` at all, it is a
/// [`ClientError::Decode`].
#[derive(Debug, Clone, PartialEq)]
pub enum TransportResponse<T> {
    Success {
        status: StatusCode,
        body: T,
    },
    Failure {
        status: StatusCode,
        error_body: Option<String>,
    },
}

/// Failures that happen before a usable response exists.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// The three remote lookups the app needs.
#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    async fn search_location(
        &self,
        query: &str,
    ) -> Result<TransportResponse<Vec<Location>>, ClientError>;

    async fn get_daily_forecasts(
        &self,
        location_key: &str,
    ) -> Result<TransportResponse<DailyForecastSet>, ClientError>;

    async fn get_hourly_forecasts(
        &self,
        location_key: &str,
    ) -> Result<TransportResponse<Vec<HourlyForecast>>, ClientError>;
}

/// [`WeatherApi`] backed by the AccuWeather REST API.
#[derive(Debug, Clone)]
pub struct AccuWeatherClient {
    api_key: String,
    base_url: Url,
    metric: bool,
    language: Option<String>,
    http: Client,
}

impl AccuWeatherClient {
    /// Build a client for `base_url`, normally [`DEFAULT_BASE_URL`].
    pub fn new(api_key: String, base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            api_key,
            base_url: parse_base_url(base_url)?,
            metric: true,
            language: None,
            http: Client::new(),
        })
    }

    /// Request imperial units instead of metric ones.
    pub fn with_metric(mut self, metric: bool) -> Self {
        self.metric = metric;
        self
    }

    /// Ask for names and phrases in `language` (e.g. `"fr-fr"`) on every endpoint.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint_url(&self, path: &str, location_key: Option<&str>) -> Result<Url, ClientError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        if let Some(key) = location_key {
            url.path_segments_mut()
                .map_err(|()| ClientError::InvalidBaseUrl {
                    url: self.base_url.to_string(),
                    reason: "URL cannot be a base".to_string(),
                })?
                .pop_if_empty()
                .push(key);
        }

        Ok(url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<TransportResponse<T>, ClientError> {
        tracing::debug!(endpoint, url = %url, "sending request");

        let mut request = self
            .http
            .get(url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(query);
        if let Some(language) = &self.language {
            request = request.query(&[("language", language.as_str())]);
        }

        let res = request
            .send()
            .await
            .map_err(|source| ClientError::Http { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| ClientError::Http { endpoint, source })?;

        if !status.is_success() {
            tracing::warn!(endpoint, %status, "provider returned an error status");
            let error_body = if body.is_empty() { None } else { Some(body) };
            return Ok(TransportResponse::Failure { status, error_body });
        }

        let body = serde_json::from_str(&body)
            .map_err(|source| ClientError::Decode { endpoint, source })?;

        Ok(TransportResponse::Success { status, body })
    }

    fn metric_param(&self) -> &'static str {
        if self.metric { "true" } else { "false" }
    }
}

#[async_trait]
impl WeatherApi for AccuWeatherClient {
    async fn search_location(
        &self,
        query: &str,
    ) -> Result<TransportResponse<Vec<Location>>, ClientError> {
        let url = self.endpoint_url(SEARCH_PATH, None)?;
        self.get("location search", url, &[("q", query)]).await
    }

    async fn get_daily_forecasts(
        &self,
        location_key: &str,
    ) -> Result<TransportResponse<DailyForecastSet>, ClientError> {
        let url = self.endpoint_url(DAILY_PATH, Some(location_key))?;
        self.get("daily forecast", url, &[("metric", self.metric_param())])
            .await
    }

    async fn get_hourly_forecasts(
        &self,
        location_key: &str,
    ) -> Result<TransportResponse<Vec<HourlyForecast>>, ClientError> {
        let url = self.endpoint_url(HOURLY_PATH, Some(location_key))?;
        self.get("hourly forecast", url, &[("metric", self.metric_param())])
            .await
    }
}

/// Parse a base URL, making sure it ends in `/` so relative joins keep its path.
fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };

    Url::parse(&normalized).map_err(|e| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}
