/// Persistence adapter
///
/// Saves the board to a key-value store after every change and restores it
/// at startup. Export and import files live in `snapshot`.
pub mod kv;
pub mod snapshot;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use snapshot::{parse_import, ExportFile, ExportSnapshot, StoredState};

use crate::error::StorageError;
use crate::state::AppState;
use crate::teams::validate_teams;

/// Key the whole board is stored under
pub const STORAGE_KEY: &str = "teamManagerData";

/// Binds the board's serialized form to a store
#[derive(Debug)]
pub struct Persistence<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Overwrite the stored record with `state`
    pub fn save(&mut self, state: &AppState) -> Result<(), StorageError> {
        let record = StoredState::from_state(state);
        let json = serde_json::to_string(&record).map_err(StorageError::Encode)?;
        self.store.set(STORAGE_KEY, &json)
    }

    /// Restore the stored record.
    ///
    /// Absent, unreadable and malformed records all yield `None`; the caller
    /// then seeds a fresh board. A record must pass the same checks as an
    /// import.
    pub fn load(&self) -> Option<AppState> {
        let json = match self.store.get(STORAGE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => {
                tracing::debug!("No saved board found, starting fresh");
                return None;
            }
            Err(e) => {
                tracing::warn!("Failed to read saved board: {}", e);
                return None;
            }
        };

        let record = match serde_json::from_str::<StoredState>(&json) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Saved board is malformed, ignoring it: {}", e);
                return None;
            }
        };

        match validate_teams(&record.teams) {
            Ok(()) => {
                let state = record.into_state();
                tracing::debug!(
                    "Loaded {} teams (next id {})",
                    state.len(),
                    state.next_team_id()
                );
                Some(state)
            }
            Err(e) => {
                tracing::warn!("Saved board is invalid, ignoring it: {}", e);
                None
            }
        }
    }

    /// Forget the stored record
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.store.remove(STORAGE_KEY)
    }
}
