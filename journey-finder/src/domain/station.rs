//! Stations and the fixed station directory.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors from loading a station directory file.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The file could not be read
    #[error("failed to read station file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a JSON array of stations
    #[error("invalid station file: {0}")]
    Json(#[from] serde_json::Error),

    /// A directory needs at least one station to pick from
    #[error("station directory is empty")]
    Empty,
}

/// A named transit stop with coordinates.
///
/// Serializes as `{ "name", "latitude", "longitude" }`, which is also the
/// shape the trip backend expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Station {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Filesystem/URL friendly form of the name, e.g. "Oslo S" -> "oslo-s".
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.name.len());
        for c in self.name.chars().flat_map(char::to_lowercase) {
            if c.is_alphanumeric() {
                slug.push(c);
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        while slug.ends_with('-') {
            slug.pop();
        }
        slug
    }
}

/// Immutable, ordered list of known stations.
///
/// Stations are identified by their position. The directory never changes
/// after construction, so it can be shared behind an `Arc` without locking.
///
/// # Examples
///
/// ```
/// use journey_finder::domain::StationDirectory;
///
/// let directory = StationDirectory::builtin();
/// assert_eq!(directory.get(0).unwrap().name, "Oslo S");
/// assert!(directory.get(99).is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StationDirectory {
    stations: Vec<Station>,
}

impl StationDirectory {
    /// Create a directory from a non-empty list of stations.
    pub fn new(stations: Vec<Station>) -> Result<Self, DirectoryError> {
        if stations.is_empty() {
            return Err(DirectoryError::Empty);
        }
        Ok(Self { stations })
    }

    /// The built-in Oslo directory.
    pub fn builtin() -> Self {
        Self {
            stations: vec![
                Station::new("Oslo S", 59.9109078, 10.7505334),
                Station::new("Nationaltheatret", 59.9144439, 10.7341009),
                Station::new("Lysaker stasjon", 59.9130584, 10.6375508),
            ],
        }
    }

    /// Load a directory from a JSON file containing an array of stations.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let json = std::fs::read_to_string(path)?;
        let stations: Vec<Station> = serde_json::from_str(&json)?;
        Self::new(stations)
    }

    /// Look up a station by index.
    pub fn get(&self, index: usize) -> Option<&Station> {
        self.stations.get(index)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn builtin_directory_order() {
        let directory = StationDirectory::builtin();
        let names: Vec<&str> = directory.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Oslo S", "Nationaltheatret", "Lysaker stasjon"]);
        assert_eq!(directory.len(), 3);
    }

    #[test]
    fn lookup_out_of_range() {
        let directory = StationDirectory::builtin();
        assert!(directory.get(2).is_some());
        assert!(directory.get(3).is_none());
    }

    #[test]
    fn empty_directory_rejected() {
        assert!(matches!(
            StationDirectory::new(vec![]),
            Err(DirectoryError::Empty)
        ));
    }

    #[test]
    fn station_serializes_backend_shape() {
        let station = Station::new("Oslo S", 59.9109078, 10.7505334);
        let json = serde_json::to_value(&station).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Oslo S",
                "latitude": 59.9109078,
                "longitude": 10.7505334
            })
        );
    }

    #[test]
    fn slugs() {
        assert_eq!(Station::new("Oslo S", 0.0, 0.0).slug(), "oslo-s");
        assert_eq!(
            Station::new("Lysaker stasjon", 0.0, 0.0).slug(),
            "lysaker-stasjon"
        );
        assert_eq!(Station::new("  Skøyen (T) ", 0.0, 0.0).slug(), "skøyen-t");
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stations.json");
        std::fs::write(
            &path,
            r#"[{"name": "Bergen", "latitude": 60.39, "longitude": 5.33}]"#,
        )
        .unwrap();

        let directory = StationDirectory::load(&path).unwrap();
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.get(0).unwrap().name, "Bergen");
    }

    #[test]
    fn load_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stations.json");
        std::fs::write(&path, r#"{"name": "Bergen"}"#).unwrap();

        assert!(matches!(
            StationDirectory::load(&path),
            Err(DirectoryError::Json(_))
        ));
        assert!(matches!(
            StationDirectory::load(dir.path().join("missing.json")),
            Err(DirectoryError::Io(_))
        ));
    }
}
