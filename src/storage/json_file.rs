//! JSON file persistence backend.
//!
//! Stores the full habit/entry snapshot as a single pretty-printed JSON
//! file. Deserialization is schema-validated and fails closed: a record
//! with an unknown frequency or a zero target count rejects the snapshot
//! instead of silently defaulting. The store applies the lenient recovery
//! policy (start empty, log the failure) one level up.

use crate::models::{Entry, Habit, HabitId, TargetFrequency};
use crate::storage::{PersistenceBackend, StoreSnapshot};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum snapshot file size (4MB).
/// Prevents memory exhaustion from a corrupted or maliciously large file.
const MAX_FILE_SIZE: u64 = 4 * 1024 * 1024;

/// Serializable habit format for file storage.
#[derive(Debug, Serialize, Deserialize)]
struct StoredHabit {
    id: String,
    name: String,
    description: String,
    category: String,
    target_frequency: String,
    target_count: u32,
    created_date: DateTime<Utc>,
    #[serde(default = "default_true")]
    is_active: bool,
    #[serde(default)]
    streak_count: u32,
    #[serde(default)]
    total_completions: u32,
}

const fn default_true() -> bool {
    true
}

impl From<&Habit> for StoredHabit {
    fn from(h: &Habit) -> Self {
        Self {
            id: h.id.as_str().to_string(),
            name: h.name.clone(),
            description: h.description.clone(),
            category: h.category.clone(),
            target_frequency: h.target_frequency.as_str().to_string(),
            target_count: h.target_count,
            created_date: h.created_date,
            is_active: h.is_active,
            streak_count: h.streak_count,
            total_completions: h.total_completions,
        }
    }
}

impl TryFrom<StoredHabit> for Habit {
    type Error = Error;

    fn try_from(stored: StoredHabit) -> Result<Self> {
        let target_frequency = TargetFrequency::parse(&stored.target_frequency).ok_or_else(|| {
            Error::InvalidInput(format!(
                "habit '{}' has unknown target_frequency '{}'",
                stored.id, stored.target_frequency
            ))
        })?;

        if stored.target_count == 0 {
            return Err(Error::InvalidInput(format!(
                "habit '{}' has zero target_count",
                stored.id
            )));
        }

        Ok(Self {
            id: HabitId::new(stored.id),
            name: stored.name,
            description: stored.description,
            category: stored.category,
            target_frequency,
            target_count: stored.target_count,
            created_date: stored.created_date,
            is_active: stored.is_active,
            streak_count: stored.streak_count,
            total_completions: stored.total_completions,
        })
    }
}

/// Serializable entry format for file storage.
#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    habit_id: String,
    date: NaiveDate,
    completed: bool,
    #[serde(default)]
    notes: String,
    timestamp: DateTime<Utc>,
}

impl From<&Entry> for StoredEntry {
    fn from(e: &Entry) -> Self {
        Self {
            habit_id: e.habit_id.as_str().to_string(),
            date: e.date,
            completed: e.completed,
            notes: e.notes.clone(),
            timestamp: e.timestamp,
        }
    }
}

impl From<StoredEntry> for Entry {
    fn from(stored: StoredEntry) -> Self {
        Self {
            habit_id: HabitId::new(stored.habit_id),
            date: stored.date,
            completed: stored.completed,
            notes: stored.notes,
            timestamp: stored.timestamp,
        }
    }
}

/// On-disk snapshot layout.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSnapshot {
    #[serde(default)]
    habits: Vec<StoredHabit>,
    #[serde(default)]
    entries: Vec<StoredEntry>,
}

/// JSON file persistence backend.
pub struct JsonFileBackend {
    /// Path of the snapshot file.
    data_file: PathBuf,
}

impl JsonFileBackend {
    /// Creates a backend writing to the given file path.
    #[must_use]
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    /// Creates a backend with checked parent directory creation.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn with_create(data_file: impl Into<PathBuf>) -> Result<Self> {
        let data_file = data_file.into();

        if let Some(parent) = data_file.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::Persistence {
                operation: "create_data_dir".to_string(),
                cause: e.to_string(),
            })?;
        }

        Ok(Self { data_file })
    }

    /// Returns the snapshot file path.
    #[must_use]
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}

impl PersistenceBackend for JsonFileBackend {
    fn load(&self) -> Result<StoreSnapshot> {
        if !self.data_file.exists() {
            return Ok(StoreSnapshot::new());
        }

        let metadata = fs::metadata(&self.data_file).map_err(|e| Error::Persistence {
            operation: "read_file_metadata".to_string(),
            cause: e.to_string(),
        })?;

        if metadata.len() > MAX_FILE_SIZE {
            return Err(Error::Persistence {
                operation: "load_snapshot".to_string(),
                cause: format!(
                    "snapshot file exceeds maximum size of {MAX_FILE_SIZE} bytes: {}",
                    self.data_file.display()
                ),
            });
        }

        let json = fs::read_to_string(&self.data_file).map_err(|e| Error::Persistence {
            operation: "read_snapshot".to_string(),
            cause: e.to_string(),
        })?;

        let stored: StoredSnapshot =
            serde_json::from_str(&json).map_err(|e| Error::Persistence {
                operation: "deserialize_snapshot".to_string(),
                cause: e.to_string(),
            })?;

        let habits = stored
            .habits
            .into_iter()
            .map(Habit::try_from)
            .collect::<Result<Vec<_>>>()?;
        let entries = stored.entries.into_iter().map(Entry::from).collect();

        Ok(StoreSnapshot { habits, entries })
    }

    fn save(&self, snapshot: &StoreSnapshot) -> Result<()> {
        if let Some(parent) = self.data_file.parent() {
            let _ = fs::create_dir_all(parent);
        }

        let stored = StoredSnapshot {
            habits: snapshot.habits.iter().map(StoredHabit::from).collect(),
            entries: snapshot.entries.iter().map(StoredEntry::from).collect(),
        };

        let json = serde_json::to_string_pretty(&stored).map_err(|e| Error::Persistence {
            operation: "serialize_snapshot".to_string(),
            cause: e.to_string(),
        })?;

        fs::write(&self.data_file, json).map_err(|e| Error::Persistence {
            operation: "write_snapshot".to_string(),
            cause: e.to_string(),
        })?;

        Ok(())
    }
}
