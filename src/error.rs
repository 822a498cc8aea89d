//! Deepfield error types

use thiserror::Error;

/// Errors raised while viewing or decoding engine memory
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Requested byte range does not fit inside the memory region
    ///
    /// Always a contract violation between engine and host (stale offset,
    /// miscounted batch, or a view held across a reallocation). Never retried
    /// and never clamped.
    #[error("out of bounds: {length} bytes at offset {offset} exceed region of {region_len} bytes")]
    OutOfBounds {
        /// Start of the requested range
        offset: usize,
        /// Length of the requested range
        length: usize,
        /// Region size observed when the request was checked
        region_len: usize,
    },

    /// Engine failed to produce a batch
    #[error("engine error: {0}")]
    Engine(String),
}

impl Error {
    /// Check whether this is a bounds violation
    #[must_use]
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
