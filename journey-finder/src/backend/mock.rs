//! Mock trip backend for running without a real journey planner.
//!
//! Loads sample responses from JSON files and serves them as if they were
//! live API responses.

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{RawTrip, Station};

use super::TripBackend;
use super::error::QueryError;
use super::types::{TripRequest, parse_trips};

/// Separator between origin and destination slugs in file names.
const ROUTE_SEPARATOR: &str = "__";

/// Errors from loading mock trip data at startup or on reload.
#[derive(Debug, thiserror::Error)]
pub enum MockDataError {
    /// The directory or one of its files could not be read
    #[error("failed to read mock data {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A route file is not a valid trip response
    #[error("invalid mock route file {}: {source}", path.display())]
    InvalidRoute { path: PathBuf, source: QueryError },

    /// The directory has no `{from}__{to}.json` files
    #[error("no mock route files found in {}", .0.display())]
    NoRoutes(PathBuf),
}

/// Mock backend that serves trips from JSON files.
///
/// Files are named `{from}__{to}.json` using station slugs, for example
/// `oslo-s__nationaltheatret.json`, and contain the same JSON array the real
/// backend returns. Routes without a file answer with no trips.
#[derive(Clone)]
pub struct MockTripBackend {
    routes: Arc<RwLock<HashMap<String, Vec<RawTrip>>>>,
    latency: Option<Duration>,
}

impl MockTripBackend {
    /// Create a new mock backend by loading JSON files from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, MockDataError> {
        let routes = load_routes(data_dir.as_ref())?;
        Ok(Self {
            routes: Arc::new(RwLock::new(routes)),
            latency: None,
        })
    }

    /// Delay every response by `latency`, to make loading states visible.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// List route keys available in the mock data.
    pub async fn available_routes(&self) -> Vec<String> {
        let routes = self.routes.read().await;
        let mut keys: Vec<String> = routes.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Reload mock data from disk.
    pub async fn reload(&self, data_dir: impl AsRef<Path>) -> Result<(), MockDataError> {
        let fresh = load_routes(data_dir.as_ref())?;
        *self.routes.write().await = fresh;
        Ok(())
    }
}

impl TripBackend for MockTripBackend {
    /// The fare flag is ignored - mock data is static.
    fn fetch_trips(
        &self,
        request: TripRequest,
    ) -> impl Future<Output = Result<Vec<RawTrip>, QueryError>> + Send + 'static {
        let routes = Arc::clone(&self.routes);
        let latency = self.latency;
        let key = route_key(&request.from, &request.to);

        async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            let routes = routes.read().await;
            let trips = routes.get(&key).cloned().unwrap_or_default();
            debug!(route = %key, trips = trips.len(), "served mock trips");
            Ok(trips)
        }
    }
}

/// File stem for a route, e.g. `oslo-s__nationaltheatret`.
pub fn route_key(from: &Station, to: &Station) -> String {
    format!("{}{ROUTE_SEPARATOR}{}", from.slug(), to.slug())
}

fn load_routes(data_dir: &Path) -> Result<HashMap<String, Vec<RawTrip>>, MockDataError> {
    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| MockDataError::Io { path, source }
    };

    let entries = std::fs::read_dir(data_dir).map_err(io_error(data_dir))?;

    let mut routes = HashMap::new();
    for entry in entries {
        let path = entry.map_err(io_error(data_dir))?.path();

        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }

        let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if !key.contains(ROUTE_SEPARATOR) {
            continue;
        }

        let json = std::fs::read_to_string(&path).map_err(io_error(&path))?;
        let trips = parse_trips(&json).map_err(|source| MockDataError::InvalidRoute {
            path: path.clone(),
            source,
        })?;

        routes.insert(key.to_string(), trips);
    }

    if routes.is_empty() {
        return Err(MockDataError::NoRoutes(data_dir.to_path_buf()));
    }

    Ok(routes)
}
