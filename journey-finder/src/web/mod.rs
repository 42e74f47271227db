//! Web layer for the journey finder.
//!
//! Serves the itinerary page and a small JSON API over the single active
//! query session.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, Session};
pub use templates::*;
