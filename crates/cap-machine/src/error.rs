//! Error types for the slot machine.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for machine operations.
pub type MachineResult<T> = Result<T, MachineError>;

/// Errors that can occur while operating the machine.
#[derive(Debug, Error)]
pub enum MachineError {
    /// A spin was requested while the spin lock is set.
    #[error("spin locked: the machine has already been played")]
    SpinLocked,

    /// A probability outside `[0, 1]` was supplied to a simulation.
    #[error("invalid probability: {0}")]
    InvalidProbability(f64),

    /// The state file could not be written.
    #[error("failed to write state file {}: {source}", path.display())]
    Io {
        /// Path of the state file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The state could not be serialized.
    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Core engine error.
    #[error("{0}")]
    Core(#[from] cap_core::CoreError),
}
