//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::backend::AnyBackend;
use crate::session::ItinerarySession;

/// The session type served by the web layer.
pub type Session = ItinerarySession<AnyBackend>;

/// Shared application state.
///
/// Holds the single active query session. Handlers lock it for the duration
/// of one step (apply arrived results, apply an edit, render), so steps never
/// overlap.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }
}
