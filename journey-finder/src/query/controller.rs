//! Trip query controller.
//!
//! Keeps exactly one authoritative [`QueryState`] consistent with the most
//! recent parameters, even when several requests are in flight and resolve
//! out of order.
//!
//! Each issued query gets a fresh [`RequestToken`]. Requests run as spawned
//! tasks that report back over a channel; the owner applies the results
//! between its own steps. A result is applied only if its token is the one
//! the controller is still waiting for, so a slow response for old
//! parameters can never overwrite the state for newer ones. Superseded tasks
//! are also aborted, but nothing relies on the abort landing in time.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::backend::{QueryError, TripBackend, TripRequest};
use crate::domain::{ParamsError, ParamsObserver, QueryParameters, RawTrip, StationDirectory};

use super::state::{QueryState, RequestToken};

/// Configuration for the controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Abort the previous request task when a new query supersedes it.
    pub abort_superseded: bool,
}

impl ControllerConfig {
    pub fn with_abort_superseded(mut self, abort: bool) -> Self {
        self.abort_superseded = abort;
        self
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            abort_superseded: true,
        }
    }
}

/// The outcome of one issued request.
#[derive(Debug)]
pub struct Resolution {
    pub token: RequestToken,
    pub outcome: Result<Vec<RawTrip>, QueryError>,
}

/// Owns the trip query lifecycle. The only writer of [`QueryState`].
pub struct TripQueryController<B> {
    backend: Arc<B>,
    directory: Arc<StationDirectory>,
    config: ControllerConfig,
    state: QueryState,

    /// Last token handed out; counts from 1.
    last_issued: Option<RequestToken>,

    /// Token whose result will be accepted. Cleared once it is applied.
    awaiting: Option<RequestToken>,

    in_flight: Option<JoinHandle<()>>,
    resolutions_tx: mpsc::UnboundedSender<Resolution>,
    resolutions_rx: mpsc::UnboundedReceiver<Resolution>,
}

impl<B: TripBackend> TripQueryController<B> {
    /// Create an idle controller. No request is issued until the first
    /// parameter notification.
    pub fn new(
        backend: Arc<B>,
        directory: Arc<StationDirectory>,
        config: ControllerConfig,
    ) -> Self {
        let (resolutions_tx, resolutions_rx) = mpsc::unbounded_channel();
        Self {
            backend,
            directory,
            config,
            state: QueryState::Idle,
            last_issued: None,
            awaiting: None,
            in_flight: None,
            resolutions_tx,
            resolutions_rx,
        }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn latest_token(&self) -> Option<RequestToken> {
        self.last_issued
    }

    /// Whether a result for the latest query is still outstanding.
    pub fn is_waiting(&self) -> bool {
        self.awaiting.is_some()
    }

    /// Issue a query for `params`, superseding whatever came before.
    ///
    /// Moves to `Loading` immediately and starts exactly one backend request.
    /// Must be called from within a Tokio runtime.
    pub fn issue(&mut self, params: &QueryParameters) -> Result<RequestToken, ParamsError> {
        let request = TripRequest::from_params(params, &self.directory)?;

        let token = RequestToken(self.last_issued.map_or(1, |t| t.0 + 1));
        self.last_issued = Some(token);
        self.awaiting = Some(token);
        self.state = QueryState::Loading;

        if let Some(previous) = self.in_flight.take()
            && self.config.abort_superseded
        {
            previous.abort();
        }

        let fetch = self.backend.fetch_trips(request);
        let tx = self.resolutions_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = fetch.await;
            // Only fails if the controller is gone, and then nobody cares.
            let _ = tx.send(Resolution { token, outcome });
        }));

        debug!(%token, ?params, "issued trip query");
        Ok(token)
    }

    /// Re-issue the query for `params` after a failure (or at any time).
    pub fn retry(&mut self, params: &QueryParameters) -> Result<RequestToken, ParamsError> {
        info!(?params, "retrying trip query");
        self.issue(params)
    }

    /// Apply one resolution. Returns whether the state changed.
    ///
    /// Results for any token other than the one being awaited are dropped.
    pub fn apply(&mut self, resolution: Resolution) -> bool {
        let Resolution { token, outcome } = resolution;

        if self.awaiting != Some(token) {
            debug!(%token, latest = ?self.last_issued, "discarding stale trip result");
            return false;
        }

        self.awaiting = None;
        self.in_flight = None;
        self.state = match outcome {
            Ok(trips) => {
                info!(%token, trips = trips.len(), "trip query ready");
                QueryState::Ready(trips)
            }
            Err(err) => {
                warn!(%token, kind = err.kind(), error = %err, "trip query failed");
                QueryState::Failed(err)
            }
        };
        true
    }

    /// Apply every resolution that has already arrived, without waiting.
    /// Returns how many changed the state.
    pub fn poll_resolutions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(resolution) = self.resolutions_rx.try_recv() {
            if self.apply(resolution) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next resolution and apply it. Returns whether the state
    /// changed; stale results return `false`.
    ///
    /// Waits forever if nothing is in flight.
    pub async fn next_resolution(&mut self) -> bool {
        match self.resolutions_rx.recv().await {
            Some(resolution) => self.apply(resolution),
            None => false,
        }
    }

    /// Wait until the latest query has resolved.
    pub async fn settle(&mut self) -> &QueryState {
        while self.awaiting.is_some() {
            self.next_resolution().await;
        }
        &self.state
    }
}

impl<B: TripBackend> ParamsObserver for TripQueryController<B> {
    fn params_changed(&mut self, params: &QueryParameters) -> Result<(), ParamsError> {
        self.issue(params).map(|_| ())
    }
}

impl<B> Drop for TripQueryController<B> {
    fn drop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
