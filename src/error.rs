//! error.rs
//! Errors raised by the rotation thread lifecycle.
//!
//! Counting itself never fails. Only starting and joining the background
//! rotation thread can go wrong, and those are the cases modelled here.

/// Error type for counter lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum RateCounterError {
    /// The operating system refused to spawn the rotation thread.
    #[error("failed to spawn rotation thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// The rotation thread panicked before it could be joined.
    #[error("rotation thread panicked")]
    RotationPanicked,
}

/// Result type for counter lifecycle operations.
pub type RateCounterResult<T> = Result<T, RateCounterError>;
