//! Trip query lifecycle.
//!
//! Turns parameter changes into backend requests and keeps a single
//! authoritative [`QueryState`] that always belongs to the latest parameters.

mod controller;
mod state;

pub use controller::{ControllerConfig, Resolution, TripQueryController};
pub use state::{QueryState, RequestToken};
