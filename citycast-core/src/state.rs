//! Per-screen state holders.
//!
//! Each holder publishes the latest [`FetchState`] through an [`Observable`].
//! Triggering a fetch publishes `Loading` right away and spawns one task that
//! publishes the repository's answer when it arrives. Overlapping fetches are
//! not coordinated: whichever task finishes last decides the final value,
//! regardless of the order the fetches were started in.
//!
//! Tasks only keep a weak handle on the holder's state. Once the holder is
//! dropped, late results are discarded.

use std::{
    future::Future,
    sync::{Arc, Weak},
};
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    fetch_state::FetchState,
    model::{DailyForecastSet, HourlyForecast, Location},
    repository::WeatherRepository,
};

/// Latest-value cell. New subscribers immediately see the current value.
#[derive(Debug)]
pub struct Observable<S> {
    tx: Arc<watch::Sender<S>>,
}

impl<S: Clone> Observable<S> {
    pub fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> S {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }

    pub(crate) fn set(&self, value: S) {
        self.tx.send_replace(value);
    }

    fn publisher(&self) -> Publisher<S> {
        Publisher(Arc::downgrade(&self.tx))
    }
}

struct Publisher<S>(Weak<watch::Sender<S>>);

impl<S> Publisher<S> {
    /// Returns `false` when the owning holder is gone.
    fn publish(&self, value: S) -> bool {
        match self.0.upgrade() {
            Some(tx) => {
                tx.send_replace(value);
                true
            }
            None => false,
        }
    }
}

fn spawn_fetch<S, Fut>(publisher: Publisher<S>, what: &'static str, fetch: Fut) -> JoinHandle<()>
where
    S: Send + Sync + 'static,
    Fut: Future<Output = S> + Send + 'static,
{
    tokio::spawn(async move {
        let value = fetch.await;
        if !publisher.publish(value) {
            tracing::debug!(what, "state holder dropped, discarding result");
        }
    })
}

pub type LocationsState = Option<FetchState<Vec<Location>>>;

/// State behind the city search screen.
///
/// Starts at `None`: no search has been requested yet.
#[derive(Debug)]
pub struct SearchState {
    repo: Arc<dyn WeatherRepository>,
    locations: Observable<LocationsState>,
}

impl SearchState {
    pub fn new(repo: Arc<dyn WeatherRepository>) -> Self {
        Self {
            repo,
            locations: Observable::new(None),
        }
    }

    pub fn locations(&self) -> &Observable<LocationsState> {
        &self.locations
    }

    /// Publish `Loading` and start a search for `query`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn search_location(&self, query: impl Into<String>) -> JoinHandle<()> {
        let query = query.into();
        tracing::debug!(%query, "search triggered");
        self.locations.set(Some(FetchState::Loading));

        let repo = Arc::clone(&self.repo);
        spawn_fetch(self.locations.publisher(), "location search", async move {
            Some(repo.search_location(&query).await)
        })
    }
}

/// State behind the forecast screen for one location.
///
/// Both forecasts start at `Loading`.
#[derive(Debug)]
pub struct ForecastState {
    repo: Arc<dyn WeatherRepository>,
    daily: Observable<FetchState<DailyForecastSet>>,
    hourly: Observable<FetchState<Vec<HourlyForecast>>>,
}

impl ForecastState {
    pub fn new(repo: Arc<dyn WeatherRepository>) -> Self {
        Self {
            repo,
            daily: Observable::new(FetchState::Loading),
            hourly: Observable::new(FetchState::Loading),
        }
    }

    pub fn daily(&self) -> &Observable<FetchState<DailyForecastSet>> {
        &self.daily
    }

    pub fn hourly(&self) -> &Observable<FetchState<Vec<HourlyForecast>>> {
        &self.hourly
    }

    pub fn load_daily(&self, location_key: impl Into<String>) -> JoinHandle<()> {
        let key = location_key.into();
        self.daily.set(FetchState::Loading);

        let repo = Arc::clone(&self.repo);
        spawn_fetch(self.daily.publisher(), "daily forecast", async move {
            repo.get_daily_forecasts(&key).await
        })
    }

    pub fn load_hourly(&self, location_key: impl Into<String>) -> JoinHandle<()> {
        let key = location_key.into();
        self.hourly.set(FetchState::Loading);

        let repo = Arc::clone(&self.repo);
        spawn_fetch(self.hourly.publisher(), "hourly forecast", async move {
            repo.get_hourly_forecasts(&key).await
        })
    }

    /// Start both forecasts for `location_key`. They complete independently.
    pub fn load(&self, location_key: &str) -> (JoinHandle<()>, JoinHandle<()>) {
        (self.load_daily(location_key), self.load_hourly(location_key))
    }
}
