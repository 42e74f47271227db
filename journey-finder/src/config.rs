//! Application configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::backend::{BackendConfig, DEFAULT_BASE_URL};
use crate::query::ControllerConfig;

/// Default listen address.
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Default static asset directory.
const DEFAULT_STATIC_DIR: &str = "static";

/// Error returned when an environment variable has an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {key}: {reason}")]
pub struct ConfigError {
    key: &'static str,
    value: String,
    reason: String,
}

/// Everything `main` needs to start the server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to listen on (`LISTEN_ADDR`).
    pub listen_addr: SocketAddr,

    /// Real backend settings (`TRIP_BACKEND_URL`, `TRIP_BACKEND_TIMEOUT_SECS`).
    pub backend: BackendConfig,

    /// Serve trips from this directory instead of the real backend
    /// (`TRIP_MOCK_DATA`).
    pub mock_data_dir: Option<PathBuf>,

    /// Simulated mock latency (`TRIP_MOCK_LATENCY_MS`).
    pub mock_latency: Option<Duration>,

    /// Station directory file; the built-in directory when unset
    /// (`STATIONS_FILE`).
    pub stations_file: Option<PathBuf>,

    /// Static assets (`STATIC_DIR`).
    pub static_dir: String,

    /// Controller settings (`ABORT_SUPERSEDED`).
    pub controller: ControllerConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let listen_addr = parse(
            "LISTEN_ADDR",
            get("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string()),
        )?;

        let mut backend =
            BackendConfig::new(get("TRIP_BACKEND_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()));
        if let Some(timeout) = get("TRIP_BACKEND_TIMEOUT_SECS") {
            backend = backend.with_timeout(parse("TRIP_BACKEND_TIMEOUT_SECS", timeout)?);
        }

        let mock_latency = get("TRIP_MOCK_LATENCY_MS")
            .map(|ms| parse("TRIP_MOCK_LATENCY_MS", ms).map(Duration::from_millis))
            .transpose()?;

        let abort_superseded = match get("ABORT_SUPERSEDED") {
            Some(value) => parse_bool("ABORT_SUPERSEDED", value)?,
            None => true,
        };

        Ok(Self {
            listen_addr,
            backend,
            mock_data_dir: get("TRIP_MOCK_DATA").map(PathBuf::from),
            mock_latency,
            stations_file: get("STATIONS_FILE").map(PathBuf::from),
            static_dir: get("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            controller: ControllerConfig::default().with_abort_superseded(abort_superseded),
        })
    }
}

fn parse<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError {
        key,
        reason: e.to_string(),
        value,
    })
}

fn parse_bool(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError {
            key,
            value,
            reason: "expected true or false".to_string(),
        }),
    }
}
