//! Persistence backends for the habit store.
//!
//! The store round-trips a whole [`StoreSnapshot`] through a
//! [`PersistenceBackend`]. The working set is small and reloaded wholesale
//! at process start, so snapshot-level load/save is all the store needs.

mod json_file;
mod memory;

pub use json_file::JsonFileBackend;
pub use memory::MemoryBackend;

use crate::Result;
use crate::models::{Entry, Habit};

/// A full serialized view of the habit store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSnapshot {
    /// All habits, in creation order.
    pub habits: Vec<Habit>,
    /// All entries, in log order.
    pub entries: Vec<Entry>,
}

impl StoreSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            habits: Vec::new(),
            entries: Vec::new(),
        }
    }
}

/// Storage collaborator for the habit store.
///
/// Implementations must round-trip every field of [`Habit`] and [`Entry`];
/// the encoding is their own business.
pub trait PersistenceBackend: Send + Sync {
    /// Loads the persisted snapshot.
    ///
    /// A backend with nothing persisted yet returns an empty snapshot, not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Persistence`] if the persisted data exists
    /// but cannot be read, or [`crate::Error::InvalidInput`] if a record
    /// fails schema validation.
    fn load(&self) -> Result<StoreSnapshot>;

    /// Persists the full snapshot, replacing whatever was stored before.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Persistence`] if the snapshot cannot be
    /// written.
    fn save(&self, snapshot: &StoreSnapshot) -> Result<()>;
}
