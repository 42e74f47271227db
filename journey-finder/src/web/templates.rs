//! Askama templates for the itinerary page.

use std::fmt;

use askama::Template;
use chrono::TimeZone;

use crate::backend::TripBackend;
use crate::presenter::{DisplayTrip, present_all};
use crate::query::QueryState;
use crate::session::ItinerarySession;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// The itinerary page: station pickers, fare toggle and the trip list.
#[derive(Template)]
#[template(path = "index.html")]
pub struct ItineraryTemplate {
    pub origin_options: Vec<StationOption>,
    pub destination_options: Vec<StationOption>,
    pub fare_eligible: bool,
    pub status: StatusView,
}

impl ItineraryTemplate {
    /// Build the page from the session, with clock times in `tz`.
    pub fn from_session<B, Tz>(session: &ItinerarySession<B>, tz: &Tz) -> Self
    where
        B: TripBackend,
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let params = session.params();
        let options = |selected: usize| -> Vec<StationOption> {
            session
                .directory()
                .iter()
                .enumerate()
                .map(|(index, station)| StationOption {
                    index,
                    name: station.name.clone(),
                    selected: index == selected,
                })
                .collect()
        };

        Self {
            origin_options: options(params.origin),
            destination_options: options(params.destination),
            fare_eligible: params.fare_eligible,
            status: StatusView::from_state(session.state(), tz),
        }
    }
}

// ============================================================================
// Fragment Templates (no base.html)
// ============================================================================

/// Just the trip list, for clients that refresh it on its own.
#[derive(Template)]
#[template(path = "trip_list.html")]
pub struct TripListTemplate {
    pub status: StatusView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One entry of a station picker.
#[derive(Debug, Clone)]
pub struct StationOption {
    pub index: usize,
    pub name: String,
    pub selected: bool,
}

/// What the trip area shows.
#[derive(Debug, Clone)]
pub enum StatusView {
    /// Nothing yet.
    Idle,
    Loading,
    Ready(Vec<DisplayTrip>),
    /// Error message, shown with a retry button.
    Failed(String),
}

impl StatusView {
    pub fn from_state<Tz>(state: &QueryState, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match state {
            QueryState::Idle => StatusView::Idle,
            QueryState::Loading => StatusView::Loading,
            QueryState::Ready(trips) => StatusView::Ready(present_all(trips, tz)),
            QueryState::Failed(err) => StatusView::Failed(err.to_string()),
        }
    }

    /// The page refreshes itself while this is true.
    pub fn is_loading(&self) -> bool {
        matches!(self, StatusView::Loading)
    }
}
