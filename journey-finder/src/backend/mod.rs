//! Journey-planning backend clients.
//!
//! The backend is opaque: it takes an origin, a destination and a fare flag
//! at `POST /api/get-trip` and answers with a JSON array of trips. It may be
//! slow, may fail, and may return zero or many results.
//!
//! Key characteristics of the contract:
//! - An empty array means "no trips found" and is not an error
//! - Trip order is meaningful and must be preserved
//! - Non-2xx statuses, transport failures and malformed bodies all become a
//!   [`QueryError`]

mod client;
mod error;
mod mock;
mod types;

use std::future::Future;

use futures::future::Either;

use crate::domain::RawTrip;

pub use client::{BackendConfig, DEFAULT_BASE_URL, HttpTripBackend};
pub use error::QueryError;
pub use mock::{MockDataError, MockTripBackend, route_key};
pub use types::{TripRequest, parse_trips};

/// Something that can answer trip queries.
///
/// The returned future owns everything it needs, so callers can spawn it and
/// drop or abort it at any time. Implementations should do request setup
/// eagerly and leave only the I/O to the future.
pub trait TripBackend: Send + Sync + 'static {
    fn fetch_trips(
        &self,
        request: TripRequest,
    ) -> impl Future<Output = Result<Vec<RawTrip>, QueryError>> + Send + 'static;
}

/// Either the real HTTP backend or the file-backed mock, chosen at startup.
#[derive(Clone)]
pub enum AnyBackend {
    Http(HttpTripBackend),
    Mock(MockTripBackend),
}

impl AnyBackend {
    pub fn describe(&self) -> String {
        match self {
            AnyBackend::Http(http) => format!("HTTP backend at {}", http.endpoint()),
            AnyBackend::Mock(_) => "mock backend".to_string(),
        }
    }
}

impl TripBackend for AnyBackend {
    fn fetch_trips(
        &self,
        request: TripRequest,
    ) -> impl Future<Output = Result<Vec<RawTrip>, QueryError>> + Send + 'static {
        match self {
            AnyBackend::Http(http) => Either::Left(http.fetch_trips(request)),
            AnyBackend::Mock(mock) => Either::Right(mock.fetch_trips(request)),
        }
    }
}
