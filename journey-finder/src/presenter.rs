//! Display mapping for trips.
//!
//! Pure functions: the same trip and timezone always give the same
//! [`DisplayTrip`]. Nothing here is cached; callers re-derive on every render.

use std::fmt;

use chrono::{DateTime, FixedOffset, TimeZone};
use serde::Serialize;

use crate::domain::RawTrip;

/// Currency label for money saved.
pub const CURRENCY: &str = "NOK";

/// Unit label for CO₂ saved.
pub const CO2_UNIT: &str = "g";

/// A trip ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayTrip {
    /// Stable rendering key (the backend's trip id).
    pub key: String,
    /// Local departure time, "HH:MM".
    pub departure_time: String,
    /// Local arrival time, "HH:MM".
    pub arrival_time: String,
    /// Whole minutes, e.g. "3 min".
    pub duration: String,
    pub time_saved_minutes: i64,
    /// Passed through unrounded; may be negative.
    pub money_saved: f64,
    /// Passed through unrounded; may be negative.
    pub co2_saved: f64,
}

impl DisplayTrip {
    /// "10:15 - 10:40"
    pub fn time_window(&self) -> String {
        format!("{} - {}", self.departure_time, self.arrival_time)
    }

    pub fn time_saved_label(&self) -> String {
        format!("{} min", self.time_saved_minutes)
    }

    pub fn money_saved_label(&self) -> String {
        format!("{} {CURRENCY}", self.money_saved)
    }

    pub fn co2_saved_label(&self) -> String {
        format!("{} {CO2_UNIT}", self.co2_saved)
    }
}

/// Map a raw trip to its display form, with clock times in `tz`.
pub fn present<Tz: TimeZone>(raw: &RawTrip, tz: &Tz) -> DisplayTrip
where
    Tz::Offset: fmt::Display,
{
    DisplayTrip {
        key: raw.id.to_string(),
        departure_time: clock_time(&raw.trip.expected_start_time, tz),
        arrival_time: clock_time(&raw.trip.expected_end_time, tz),
        duration: format!("{} min", duration_minutes(raw.trip.duration)),
        time_saved_minutes: rounded_minutes(raw.duration_saved),
        money_saved: raw.money_saved,
        co2_saved: raw.co2_saved,
    }
}

/// Map every trip, keeping order.
pub fn present_all<Tz: TimeZone>(trips: &[RawTrip], tz: &Tz) -> Vec<DisplayTrip>
where
    Tz::Offset: fmt::Display,
{
    trips.iter().map(|trip| present(trip, tz)).collect()
}

/// Whole minutes in `seconds`, rounded down.
pub fn duration_minutes(seconds: f64) -> i64 {
    (seconds / 60.0).floor() as i64
}

/// Minutes in `seconds`, rounded half away from zero.
pub fn rounded_minutes(seconds: f64) -> i64 {
    (seconds / 60.0).round() as i64
}

/// "HH:MM" in the target zone. Seconds are dropped, never rounded up.
fn clock_time<Tz: TimeZone>(at: &DateTime<FixedOffset>, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    at.with_timezone(tz).format("%H:%M").to_string()
}
