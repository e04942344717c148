//! In-memory persistence backend.
//!
//! Holds the last saved snapshot behind a mutex. Used by tests and by
//! callers that want a store without any file-backed state.

use crate::storage::{PersistenceBackend, StoreSnapshot};
use crate::{Error, Result};
use std::sync::Mutex;

/// In-memory persistence backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    snapshot: Mutex<StoreSnapshot>,
}

impl MemoryBackend {
    /// Creates an empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-seeded with a snapshot.
    #[must_use]
    pub fn with_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
        }
    }
}

impl PersistenceBackend for MemoryBackend {
    fn load(&self) -> Result<StoreSnapshot> {
        self.snapshot
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| Error::Persistence {
                operation: "load_snapshot".to_string(),
                cause: "snapshot lock poisoned".to_string(),
            })
    }

    fn save(&self, snapshot: &StoreSnapshot) -> Result<()> {
        let mut guard = self.snapshot.lock().map_err(|_| Error::Persistence {
            operation: "save_snapshot".to_string(),
            cause: "snapshot lock poisoned".to_string(),
        })?;
        *guard = snapshot.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Habit, HabitId, TargetFrequency};

    #[test]
    fn test_roundtrip() {
        let backend = MemoryBackend::new();
        assert!(backend.load().unwrap().habits.is_empty());

        let snapshot = StoreSnapshot {
            habits: vec![Habit {
                id: HabitId::new("habit_0_aaaa1111"),
                name: "Meditate".to_string(),
                description: String::new(),
                category: "mindfulness".to_string(),
                target_frequency: TargetFrequency::Daily,
                target_count: 1,
                created_date: "2025-05-01T07:00:00Z".parse().unwrap(),
                is_active: true,
                streak_count: 0,
                total_completions: 0,
            }],
            entries: vec![],
        };

        backend.save(&snapshot).unwrap();
        assert_eq!(backend.load().unwrap(), snapshot);
    }
}
