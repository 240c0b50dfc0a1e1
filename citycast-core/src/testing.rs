//! Scripted [`WeatherApi`] for unit tests.

use async_trait::async_trait;
use std::{collections::HashMap, sync::Mutex};
use tokio::sync::oneshot;

use crate::{
    client::{ClientError, TransportResponse, WeatherApi},
    model::{DailyForecastSet, HourlyForecast, Location, Name},
};

type Reply<T> = Result<TransportResponse<T>, ClientError>;

struct Scripted<T> {
    gate: Option<oneshot::Receiver<()>>,
    reply: Reply<T>,
}

/// Each scripted reply is served once. A gated reply waits until its sender
/// fires (or is dropped), which lets tests pick the completion order.
#[derive(Default)]
pub(crate) struct FakeApi {
    searches: Mutex<HashMap<String, Scripted<Vec<Location>>>>,
    daily: Mutex<HashMap<String, Scripted<DailyForecastSet>>>,
    hourly: Mutex<HashMap<String, Scripted<Vec<HourlyForecast>>>>,
}

impl std::fmt::Debug for FakeApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeApi").finish_non_exhaustive()
    }
}

impl FakeApi {
    pub fn on_search(&self, query: &str, reply: Reply<Vec<Location>>) {
        script(&self.searches, query, None, reply);
    }

    pub fn on_search_gated(&self, query: &str, reply: Reply<Vec<Location>>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        script(&self.searches, query, Some(rx), reply);
        tx
    }

    pub fn on_daily(&self, key: &str, reply: Reply<DailyForecastSet>) {
        script(&self.daily, key, None, reply);
    }

    pub fn on_daily_gated(&self, key: &str, reply: Reply<DailyForecastSet>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        script(&self.daily, key, Some(rx), reply);
        tx
    }

    pub fn on_hourly(&self, key: &str, reply: Reply<Vec<HourlyForecast>>) {
        script(&self.hourly, key, None, reply);
    }
}

fn script<T>(
    table: &Mutex<HashMap<String, Scripted<T>>>,
    arg: &str,
    gate: Option<oneshot::Receiver<()>>,
    reply: Reply<T>,
) {
    table.lock().unwrap().insert(arg.to_string(), Scripted { gate, reply });
}

async fn serve<T>(table: &Mutex<HashMap<String, Scripted<T>>>, arg: &str) -> Reply<T> {
    let scripted = table
        .lock()
        .unwrap()
        .remove(arg)
        .unwrap_or_else(|| panic!("no reply scripted for {arg:?}"));

    if let Some(gate) = scripted.gate {
        let _ = gate.await;
    }
    scripted.reply
}

#[async_trait]
impl WeatherApi for FakeApi {
    async fn search_location(&self, query: &str) -> Reply<Vec<Location>> {
        serve(&self.searches, query).await
    }

    async fn get_daily_forecasts(&self, location_key: &str) -> Reply<DailyForecastSet> {
        serve(&self.daily, location_key).await
    }

    async fn get_hourly_forecasts(&self, location_key: &str) -> Reply<Vec<HourlyForecast>> {
        serve(&self.hourly, location_key).await
    }
}

pub(crate) fn location(key: &str, name: &str, country: &str) -> Location {
    Location {
        key: key.to_string(),
        english_name: name.to_string(),
        country: Name {
            english_name: country.to_string(),
            ..Name::default()
        },
        ..Location::default()
    }
}

pub(crate) fn decode_error(endpoint: &'static str) -> ClientError {
    let source = serde_json::from_str::<u8>("not json").unwrap_err();
    ClientError::Decode { endpoint, source }
}
