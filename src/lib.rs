//! # Habitrack
//!
//! A personal habit-tracking backend exposed through a tool-calling (MCP)
//! surface.
//!
//! Callers create habits, log daily completions, and request derived views:
//! progress windows, cross-habit analytics, and motivational insights. The
//! heart of the crate is the entity store ([`store::HabitStore`]) and the
//! statistics engine ([`stats`]), which derives streaks, completion rates,
//! and aggregates from the entry log.
//!
//! ## Design points
//!
//! - Single logical owner: one in-memory snapshot, reloaded wholesale at
//!   startup, persisted synchronously after each mutation.
//! - Streaks count consecutive *logged* completions walking backward from
//!   the most recent entry; a never-logged day does not break a streak,
//!   only an explicit not-completed entry does.
//! - Persistence failures never crash the process. Load/save return
//!   explicit `Result`s, but store operations proceed optimistically and
//!   surface the last failure through [`store::StoreHealth`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use habitrack::{HabitStore, TargetFrequency};
//!
//! let mut store = HabitStore::open(backend, clock);
//! let id = store.create_habit("Read", "20 pages", "learning", TargetFrequency::Daily, 1)?;
//! store.log_entry(&id, true, "finished chapter 3")?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use thiserror::Error as ThisError;

// Module declarations
pub mod cli;
pub mod clock;
pub mod config;
pub mod mcp;
pub mod models;
pub mod observability;
pub mod rendering;
pub mod stats;
pub mod storage;
pub mod store;

// Re-exports for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::HabitrackConfig;
pub use models::{
    AnalyticsSummary, DayRecord, Entry, Habit, HabitId, Insight, LogOutcome, ProgressReport,
    StreakRanking, TargetFrequency,
};
pub use storage::{JsonFileBackend, MemoryBackend, PersistenceBackend, StoreSnapshot};
pub use store::{HabitStore, MAX_PROGRESS_DAYS, SharedStore, StoreHealth};

/// Error type for habitrack operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Empty habit name, unknown frequency, zero target count, malformed tool arguments |
/// | `NotFound` | Logging or querying an unknown habit id |
/// | `Persistence` | Load/save of the habit snapshot fails (I/O, malformed JSON) |
/// | `OperationFailed` | A non-storage operation fails (transport I/O, config read, logging init) |
/// | `Unauthorized` | Missing or wrong bearer token on the MCP HTTP transport |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - A habit is created with an empty name or a zero `target_count`
    /// - A frequency string does not parse
    /// - JSON deserialization fails in MCP tool handlers
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A habit id was not found in the store.
    #[error("habit not found: {0}")]
    NotFound(String),

    /// A persistence operation failed.
    ///
    /// Load and save surface this to their direct callers. Higher-level
    /// store operations log it and keep going; the availability-first
    /// policy is visible through `StoreHealth`.
    #[error("persistence operation '{operation}' failed: {cause}")]
    Persistence {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// A non-storage operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// Authentication failed.
    ///
    /// Raised when the bearer token is missing or does not match the
    /// configured secret on the MCP HTTP transport.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

/// Result type alias for habitrack operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("target_count must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "invalid input: target_count must be positive"
        );

        let err = Error::NotFound("habit_42_deadbeef".to_string());
        assert_eq!(err.to_string(), "habit not found: habit_42_deadbeef");

        let err = Error::Persistence {
            operation: "save_snapshot".to_string(),
            cause: "disk full".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "persistence operation 'save_snapshot' failed: disk full"
        );
    }
}
