//! Domain types for the journey finder.
//!
//! Stations, query parameters and trip records. Parameter edits are
//! validated against the station directory before they are stored, and
//! trip records are validated when they are deserialized, so code that
//! receives these types can trust their shape.

mod params;
mod station;
mod trip;

pub use params::{ParamsEdit, ParamsError, ParamsObserver, ParamsStore, QueryParameters};
pub use station::{DirectoryError, Station, StationDirectory};
pub use trip::{RawTrip, TripId, TripJourney};
