//! Trip records as returned by the journey-planning backend.
//!
//! Every field the presenter reads is required. A record that is missing one,
//! or has it in the wrong type, fails to deserialize instead of leaking an
//! undefined value into formatting code. Extra fields are ignored.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize, de};

/// Stable identifier of a trip, used as a rendering key.
///
/// Backends send strings or numbers. Numbers that do not fit an `i64`
/// (floats, large unsigned values) are kept in their JSON text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum TripId {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for TripId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => Ok(TripId::Text(s)),
            serde_json::Value::Number(n) => Ok(match n.as_i64() {
                Some(n) => TripId::Number(n),
                None => TripId::Text(n.to_string()),
            }),
            other => Err(de::Error::custom(format!(
                "trip id must be a string or a number, got {other}"
            ))),
        }
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripId::Number(n) => write!(f, "{n}"),
            TripId::Text(s) => f.write_str(s),
        }
    }
}

/// The journey itself: expected start/end and total duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripJourney {
    /// Expected departure, with UTC offset.
    pub expected_start_time: DateTime<FixedOffset>,

    /// Expected arrival, with UTC offset.
    pub expected_end_time: DateTime<FixedOffset>,

    /// Total duration in seconds.
    pub duration: f64,
}

/// A candidate trip with its savings relative to the baseline.
///
/// Savings may be negative when the trip is worse than the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrip {
    pub id: TripId,

    pub trip: TripJourney,

    /// Seconds saved.
    pub duration_saved: f64,

    /// Currency units (NOK) saved.
    pub money_saved: f64,

    /// Grams of CO₂ saved.
    pub co2_saved: f64,
}
