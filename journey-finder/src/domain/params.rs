//! Query parameters and their change notifications.

use serde::Serialize;

use super::station::StationDirectory;

/// Error returned when an edit refers to a station that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParamsError {
    #[error("no station at index {index} (directory has {len})")]
    UnknownStation { index: usize, len: usize },
}

/// The user's current query: origin, destination and fare eligibility.
///
/// Origin and destination may be equal; such a query is still sent to the
/// backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct QueryParameters {
    pub origin: usize,
    pub destination: usize,
    pub fare_eligible: bool,
}

impl QueryParameters {
    pub fn new(origin: usize, destination: usize, fare_eligible: bool) -> Self {
        Self {
            origin,
            destination,
            fare_eligible,
        }
    }

    /// Apply a single edit, returning the resulting parameters.
    pub fn with_edit(self, edit: ParamsEdit) -> Self {
        match edit {
            ParamsEdit::Origin(origin) => Self { origin, ..self },
            ParamsEdit::Destination(destination) => Self {
                destination,
                ..self
            },
            ParamsEdit::FareEligible(fare_eligible) => Self {
                fare_eligible,
                ..self
            },
        }
    }

    /// The default query for `directory`. A single-station directory gets
    /// that station as both origin and destination.
    pub fn default_for(directory: &StationDirectory) -> Self {
        let default = Self::default();
        if directory.len() > default.destination {
            default
        } else {
            Self::new(0, 0, default.fare_eligible)
        }
    }

    /// Check both indices against the directory.
    pub fn validate(&self, directory: &StationDirectory) -> Result<(), ParamsError> {
        for index in [self.origin, self.destination] {
            if directory.get(index).is_none() {
                return Err(ParamsError::UnknownStation {
                    index,
                    len: directory.len(),
                });
            }
        }
        Ok(())
    }
}

impl Default for QueryParameters {
    /// First station to second station, with a monthly card.
    fn default() -> Self {
        Self::new(0, 1, true)
    }
}

/// A single user edit to the parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamsEdit {
    Origin(usize),
    Destination(usize),
    FareEligible(bool),
}

/// Receives parameter change notifications.
///
/// Notifications are delivered synchronously, once per actual change.
pub trait ParamsObserver {
    fn params_changed(&mut self, params: &QueryParameters) -> Result<(), ParamsError>;
}

/// Holds the current parameters and notifies an observer when they change.
///
/// This is the only writer of [`QueryParameters`]. Edits are validated
/// against the station directory before they are stored, so observers only
/// ever see valid indices.
#[derive(Debug, Clone)]
pub struct ParamsStore {
    current: QueryParameters,
}

impl ParamsStore {
    /// Create a store with validated initial parameters.
    pub fn new(
        initial: QueryParameters,
        directory: &StationDirectory,
    ) -> Result<Self, ParamsError> {
        initial.validate(directory)?;
        Ok(Self { current: initial })
    }

    pub fn current(&self) -> QueryParameters {
        self.current
    }

    /// Deliver the initial "no parameters -> current" notification.
    pub fn mount<O: ParamsObserver>(&self, observer: &mut O) -> Result<(), ParamsError> {
        observer.params_changed(&self.current)
    }

    /// Replace the parameters. Notifies the observer once if the value
    /// changed and returns whether it did.
    pub fn set<O: ParamsObserver>(
        &mut self,
        next: QueryParameters,
        directory: &StationDirectory,
        observer: &mut O,
    ) -> Result<bool, ParamsError> {
        next.validate(directory)?;
        if next == self.current {
            return Ok(false);
        }
        self.current = next;
        observer.params_changed(&self.current)?;
        Ok(true)
    }

    /// Apply a single edit. See [`ParamsStore::set`].
    pub fn apply<O: ParamsObserver>(
        &mut self,
        edit: ParamsEdit,
        directory: &StationDirectory,
        observer: &mut O,
    ) -> Result<bool, ParamsError> {
        self.set(self.current.with_edit(edit), directory, observer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Station;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<QueryParameters>,
    }

    impl ParamsObserver for Recorder {
        fn params_changed(&mut self, params: &QueryParameters) -> Result<(), ParamsError> {
            self.seen.push(*params);
            Ok(())
        }
    }

    fn store() -> (ParamsStore, StationDirectory) {
        let directory = StationDirectory::builtin();
        let store = ParamsStore::new(QueryParameters::default(), &directory).unwrap();
        (store, directory)
    }

    #[test]
    fn default_parameters() {
        assert_eq!(QueryParameters::default(), QueryParameters::new(0, 1, true));

        let builtin = StationDirectory::builtin();
        assert_eq!(QueryParameters::default_for(&builtin), QueryParameters::default());

        let single = StationDirectory::new(vec![Station::new("Oslo S", 59.91, 10.75)]).unwrap();
        assert_eq!(QueryParameters::default_for(&single), QueryParameters::new(0, 0, true));
    }

    #[test]
    fn mount_notifies_with_initial() {
        let (store, _) = store();
        let mut recorder = Recorder::default();
        store.mount(&mut recorder).unwrap();
        assert_eq!(recorder.seen, vec![QueryParameters::new(0, 1, true)]);
    }

    #[test]
    fn edit_notifies_once() {
        let (mut store, directory) = store();
        let mut recorder = Recorder::default();

        let changed = store
            .apply(ParamsEdit::Destination(2), &directory, &mut recorder)
            .unwrap();

        assert!(changed);
        assert_eq!(recorder.seen, vec![QueryParameters::new(0, 2, true)]);
        assert_eq!(store.current(), QueryParameters::new(0, 2, true));
    }

    #[test]
    fn unchanged_edit_is_silent() {
        let (mut store, directory) = store();
        let mut recorder = Recorder::default();

        let changed = store
            .apply(ParamsEdit::FareEligible(true), &directory, &mut recorder)
            .unwrap();

        assert!(!changed);
        assert!(recorder.seen.is_empty());
    }

    #[test]
    fn batch_set_notifies_once() {
        let (mut store, directory) = store();
        let mut recorder = Recorder::default();

        store
            .set(QueryParameters::new(2, 0, false), &directory, &mut recorder)
            .unwrap();

        assert_eq!(recorder.seen.len(), 1);
    }

    #[test]
    fn same_origin_and_destination_allowed() {
        let (mut store, directory) = store();
        let mut recorder = Recorder::default();

        let changed = store
            .apply(ParamsEdit::Destination(0), &directory, &mut recorder)
            .unwrap();

        assert!(changed);
        assert_eq!(recorder.seen, vec![QueryParameters::new(0, 0, true)]);
    }

    #[test]
    fn unknown_station_rejected_without_notification() {
        let (mut store, directory) = store();
        let mut recorder = Recorder::default();

        let err = store
            .apply(ParamsEdit::Origin(7), &directory, &mut recorder)
            .unwrap_err();

        assert_eq!(err, ParamsError::UnknownStation { index: 7, len: 3 });
        assert_eq!(err.to_string(), "no station at index 7 (directory has 3)");
        assert!(recorder.seen.is_empty());
        assert_eq!(store.current(), QueryParameters::default());
    }

    #[test]
    fn invalid_initial_rejected() {
        let directory = StationDirectory::builtin();
        assert!(ParamsStore::new(QueryParameters::new(0, 3, true), &directory).is_err());
    }
}
