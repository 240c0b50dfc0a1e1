use serde::{Deserialize, Serialize};

/// Outcome of a remote lookup as seen by the presentation layer.
///
/// Exactly one variant is current at a time. Starting a new fetch replaces
/// whatever was there, including a previous `Success`, with `Loading`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum FetchState<T> {
    /// Nothing has completed yet, or a new attempt is in flight.
    Loading,
    Success(T),
    /// Human-readable diagnostic, not a structured code.
    Error(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Success(data) => Some(data),
            FetchState::Loading | FetchState::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Error(message) => Some(message),
            FetchState::Loading | FetchState::Success(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            FetchState::Loading => FetchState::Loading,
            FetchState::Success(data) => FetchState::Success(f(data)),
            FetchState::Error(message) => FetchState::Error(message),
        }
    }
}
