//! Query state and request tokens.

use std::fmt;

use crate::backend::QueryError;
use crate::domain::RawTrip;

/// Identifies one issued query. Tokens increase strictly with every issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub(crate) u64);

impl RequestToken {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of the current trip query.
///
/// ```text
/// Idle --(params set)--> Loading --(success)--> Ready
///                        Loading --(failure)--> Failed
/// Ready | Failed | Loading --(params change / retry)--> Loading
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryState {
    /// Nothing has been asked yet.
    #[default]
    Idle,
    /// A query is in flight; there are no results.
    Loading,
    /// The latest query succeeded. Trips keep the backend's order and may be
    /// empty.
    Ready(Vec<RawTrip>),
    /// The latest query failed.
    Failed(QueryError),
}

impl QueryState {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    /// Current trips; empty unless `Ready`.
    pub fn trips(&self) -> &[RawTrip] {
        match self {
            QueryState::Ready(trips) => trips,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&QueryError> {
        match self {
            QueryState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Lowercase name of the state, as exposed in JSON.
    pub fn name(&self) -> &'static str {
        match self {
            QueryState::Idle => "idle",
            QueryState::Loading => "loading",
            QueryState::Ready(_) => "ready",
            QueryState::Failed(_) => "failed",
        }
    }
}
