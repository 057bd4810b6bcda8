//! Error types for the simulation engine.

use thiserror::Error;

/// Errors the engine can produce. The taxonomy is deliberately shallow:
/// generator preconditions are programming errors surfaced eagerly, and
/// nothing else in the engine is fallible.
#[derive(Debug, Error)]
pub enum SimError {
    /// A generator was handed an empty process list.
    #[error("cannot generate IPC traffic without processes")]
    NoProcesses,

    /// The registry was asked for more distinct names than the pool holds.
    #[error("requested {requested} processes but the name pool only has {available}")]
    NamePoolExhausted { requested: usize, available: usize },
}
