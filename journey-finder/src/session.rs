//! The itinerary screen's state shell.
//!
//! Owns the query parameters (the only user-editable state) and the query
//! controller, and wires parameter changes into the controller. It caches
//! nothing else: renderers read the parameters and the controller's state
//! through the accessors on every render.

use std::sync::Arc;

use crate::backend::TripBackend;
use crate::domain::{ParamsEdit, ParamsError, ParamsStore, QueryParameters, StationDirectory};
use crate::query::{ControllerConfig, QueryState, RequestToken, TripQueryController};

/// One active query session.
pub struct ItinerarySession<B> {
    directory: Arc<StationDirectory>,
    params: ParamsStore,
    controller: TripQueryController<B>,
    mounted: bool,
}

impl<B: TripBackend> ItinerarySession<B> {
    /// Create an unmounted session. No query is issued until [`mount`].
    ///
    /// [`mount`]: ItinerarySession::mount
    pub fn new(
        directory: Arc<StationDirectory>,
        backend: Arc<B>,
        initial: QueryParameters,
        config: ControllerConfig,
    ) -> Result<Self, ParamsError> {
        let params = ParamsStore::new(initial, &directory)?;
        let controller = TripQueryController::new(backend, Arc::clone(&directory), config);
        Ok(Self {
            directory,
            params,
            controller,
            mounted: false,
        })
    }

    /// Issue the initial query. Only the first call has any effect.
    pub fn mount(&mut self) -> Result<bool, ParamsError> {
        if self.mounted {
            return Ok(false);
        }
        self.params.mount(&mut self.controller)?;
        self.mounted = true;
        Ok(true)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn directory(&self) -> &StationDirectory {
        &self.directory
    }

    pub fn params(&self) -> QueryParameters {
        self.params.current()
    }

    pub fn state(&self) -> &QueryState {
        self.controller.state()
    }

    pub fn latest_token(&self) -> Option<RequestToken> {
        self.controller.latest_token()
    }

    pub fn select_origin(&mut self, index: usize) -> Result<bool, ParamsError> {
        self.edit(ParamsEdit::Origin(index))
    }

    pub fn select_destination(&mut self, index: usize) -> Result<bool, ParamsError> {
        self.edit(ParamsEdit::Destination(index))
    }

    pub fn set_fare_eligible(&mut self, fare_eligible: bool) -> Result<bool, ParamsError> {
        self.edit(ParamsEdit::FareEligible(fare_eligible))
    }

    /// Apply one edit; re-queries if the parameters changed.
    pub fn edit(&mut self, edit: ParamsEdit) -> Result<bool, ParamsError> {
        let changed = self
            .params
            .apply(edit, &self.directory, &mut self.controller)?;
        self.mounted |= changed;
        Ok(changed)
    }

    /// Replace all parameters at once (one form submission). Re-queries at
    /// most once.
    pub fn submit(&mut self, next: QueryParameters) -> Result<bool, ParamsError> {
        let changed = self
            .params
            .set(next, &self.directory, &mut self.controller)?;
        self.mounted |= changed;
        Ok(changed)
    }

    /// Explicitly re-run the current query.
    pub fn retry(&mut self) -> Result<RequestToken, ParamsError> {
        self.mounted = true;
        self.controller.retry(&self.params.current())
    }

    /// Apply any results that have arrived since the last call.
    pub fn sync(&mut self) -> usize {
        self.controller.poll_resolutions()
    }

    /// Wait for the latest query to resolve.
    pub async fn settle(&mut self) -> &QueryState {
        self.controller.settle().await
    }
}
