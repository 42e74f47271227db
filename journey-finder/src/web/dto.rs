//! Data transfer objects for web requests and responses.

use std::fmt;

use chrono::TimeZone;
use serde::{Deserialize, Serialize};

use crate::backend::TripBackend;
use crate::domain::{QueryParameters, StationDirectory};
use crate::presenter::{DisplayTrip, present_all};
use crate::session::ItinerarySession;

/// Form posted by the itinerary page controls.
#[derive(Debug, Deserialize)]
pub struct ParamsForm {
    /// Origin station index
    pub origin: usize,

    /// Destination station index
    pub destination: usize,

    /// Present (any value) when the monthly card box is ticked
    pub fare_eligible: Option<String>,
}

impl ParamsForm {
    pub fn to_params(&self) -> QueryParameters {
        QueryParameters::new(self.origin, self.destination, self.fare_eligible.is_some())
    }
}

/// JSON request to change the parameters.
#[derive(Debug, Deserialize)]
pub struct ParamsRequest {
    pub origin: usize,
    pub destination: usize,
    pub fare_eligible: bool,
}

impl ParamsRequest {
    pub fn to_params(&self) -> QueryParameters {
        QueryParameters::new(self.origin, self.destination, self.fare_eligible)
    }
}

/// Snapshot of the session for JSON clients.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    /// Current parameters
    pub params: QueryParameters,

    /// "idle", "loading", "ready" or "failed"
    pub status: &'static str,

    /// Token of the latest issued query
    pub token: Option<u64>,

    /// Trips of the latest query, in backend order (empty unless ready)
    pub trips: Vec<DisplayTrip>,

    /// Failure details when failed
    pub error: Option<ErrorInfo>,
}

impl StateResponse {
    /// Build from a session, with clock times in `tz`.
    pub fn from_session<B, Tz>(session: &ItinerarySession<B>, tz: &Tz) -> Self
    where
        B: TripBackend,
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let state = session.state();
        Self {
            params: session.params(),
            status: state.name(),
            token: session.latest_token().map(|t| t.get()),
            trips: present_all(state.trips(), tz),
            error: state.error().map(|e| ErrorInfo {
                kind: e.kind(),
                message: e.to_string(),
            }),
        }
    }
}

/// A query failure.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub kind: &'static str,
    pub message: String,
}

/// A station in the directory.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub index: usize,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Response listing the station directory.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,
}

impl StationsResponse {
    pub fn from_directory(directory: &StationDirectory) -> Self {
        let stations = directory
            .iter()
            .enumerate()
            .map(|(index, s)| StationResult {
                index,
                name: s.name.clone(),
                latitude: s.latitude,
                longitude: s.longitude,
            })
            .collect();
        Self { stations }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
