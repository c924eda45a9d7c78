// src/error.rs

use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

/// Errors surfaced to callers at construction time.
///
/// Numerical divergence during a run is not an error variant: the run loop
/// handles it with step-size reduction and, past a bounded number of
/// retries, an early stop that still returns the collected history.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("data field length mismatch: got {got} values, expected {expected} ({n}x{n} grid)")]
    DataFieldShape {
        got: usize,
        expected: usize,
        n: usize,
    },

    #[error("data field contains a non-finite value at flat index {index}")]
    DataFieldNotFinite { index: usize },
}
