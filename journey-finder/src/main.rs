use std::sync::Arc;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use journey_finder::backend::{AnyBackend, HttpTripBackend, MockTripBackend};
use journey_finder::config::AppConfig;
use journey_finder::domain::{QueryParameters, StationDirectory};
use journey_finder::session::ItinerarySession;
use journey_finder::web::{AppState, create_router};

fn init_tracing() {
    let default_level = LevelFilter::INFO;
    let rust_log =
        std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| default_level.to_string());
    let filter = EnvFilter::try_new(rust_log).unwrap_or_else(|err| {
        eprintln!(
            "invalid {}, falling back to level '{}' - {}",
            EnvFilter::DEFAULT_ENV,
            default_level,
            err,
        );
        EnvFilter::new(default_level.to_string())
    });
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Station directory
    let directory = match &config.stations_file {
        Some(path) => StationDirectory::load(path).expect("Failed to load station directory"),
        None => StationDirectory::builtin(),
    };
    tracing::info!(stations = directory.len(), "station directory ready");
    let directory = Arc::new(directory);

    // Backend: mock data when configured, otherwise the real service
    let backend = match &config.mock_data_dir {
        Some(dir) => {
            let mut mock = MockTripBackend::new(dir).expect("Failed to load mock trip data");
            if let Some(latency) = config.mock_latency {
                mock = mock.with_latency(latency);
            }
            tracing::info!(
                routes = mock.available_routes().await.len(),
                dir = %dir.display(),
                "loaded mock trips"
            );
            AnyBackend::Mock(mock)
        }
        None => AnyBackend::Http(
            HttpTripBackend::new(config.backend.clone()).expect("Failed to create HTTP client"),
        ),
    };
    tracing::info!(backend = %backend.describe(), "trip backend ready");

    // Session, mounted once: this issues the initial query
    let initial = QueryParameters::default_for(&directory);
    let mut session =
        ItinerarySession::new(directory, Arc::new(backend), initial, config.controller)
            .expect("Invalid initial parameters");
    session.mount().expect("Failed to issue initial query");

    let app = create_router(AppState::new(session), &config.static_dir);

    let addr = config.listen_addr;
    tracing::info!("Journey finder listening on http://{addr}");
    tracing::info!("  GET  /             - Itinerary page");
    tracing::info!("  POST /params       - Change origin, destination or fare flag");
    tracing::info!("  POST /retry        - Re-run the current query");
    tracing::info!("  GET  /api/state    - Current state as JSON");
    tracing::info!("  GET  /api/stations - Station directory");
    tracing::info!("  GET  /health       - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
