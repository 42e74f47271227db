//! Request and response shapes of the `POST /api/get-trip` endpoint.

use serde::Serialize;

use crate::domain::{ParamsError, QueryParameters, RawTrip, Station, StationDirectory};

use super::error::QueryError;

/// Body of a trip search request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub from: Station,
    pub to: Station,
    pub has_monthly_card: bool,
}

impl TripRequest {
    /// Resolve the parameters' station indices against the directory.
    pub fn from_params(
        params: &QueryParameters,
        directory: &StationDirectory,
    ) -> Result<Self, ParamsError> {
        let lookup = |index: usize| {
            directory
                .get(index)
                .cloned()
                .ok_or(ParamsError::UnknownStation {
                    index,
                    len: directory.len(),
                })
        };

        Ok(Self {
            from: lookup(params.origin)?,
            to: lookup(params.destination)?,
            has_monthly_card: params.fare_eligible,
        })
    }
}

/// Parse a response body into trips, keeping the backend's order.
///
/// An empty array is a valid "no trips found" result.
pub fn parse_trips(body: &str) -> Result<Vec<RawTrip>, QueryError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| QueryError::malformed(format!("invalid JSON: {e}"), body))?;

    if !value.is_array() {
        return Err(QueryError::malformed("expected a JSON array of trips", body));
    }

    serde_json::from_value(value)
        .map_err(|e| QueryError::malformed(format!("invalid trip record: {e}"), body))
}
