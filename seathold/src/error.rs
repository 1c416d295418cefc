//! Error types for the seathold library.
//!
//! Seat contention is not an error: running out of seats, failing to find a
//! contiguous block, or presenting a stale hold id are reported as outcome
//! values (see [`crate::outcome`]). The [`Error`] type here covers
//! programming-contract violations and environment failures, using
//! `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

use crate::seat::{SeatId, SeatStatus};

/// Result type alias for operations that may fail with a seathold error.
///
/// # Examples
///
/// ```
/// use seathold::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(16)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the seathold library.
#[derive(Debug, Error)]
pub enum Error {
    /// A hold was requested for zero seats.
    #[error("invalid seat count {requested}: at least one seat must be requested")]
    InvalidSeatCount {
        /// The number of seats requested.
        requested: usize,
    },

    /// The venue dimensions are unusable.
    #[error("invalid venue dimensions {rows}x{cols}: {reason}")]
    InvalidDimensions {
        /// Requested number of rows.
        rows: usize,
        /// Requested number of seats per row.
        cols: usize,
        /// The reason the dimensions are invalid.
        reason: String,
    },

    /// A seat outside the venue was addressed.
    #[error("seat {seat} is outside the venue")]
    SeatOutOfBounds {
        /// The offending seat.
        seat: SeatId,
    },

    /// A seat status change that the lifecycle does not allow.
    #[error("seat {seat} cannot move from {from} to {to}")]
    IllegalTransition {
        /// The seat being changed.
        seat: SeatId,
        /// Its current status.
        from: SeatStatus,
        /// The requested status.
        to: SeatStatus,
    },

    /// A row's availability cache disagrees with its seats.
    #[error("row {row} caches {cached} available seats but has {actual}")]
    CacheMismatch {
        /// The inconsistent row.
        row: usize,
        /// The cached count.
        cached: usize,
        /// The counted number of available seats.
        actual: usize,
    },

    /// The hold id counter has no values left.
    #[error("hold id space exhausted")]
    HoldIdsExhausted,

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// The home directory could not be determined.
    #[error("cannot determine home directory")]
    HomeDirectoryUnavailable,

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if the error reports caller misuse of the service API.
    ///
    /// # Examples
    ///
    /// ```
    /// use seathold::Error;
    ///
    /// let err = Error::InvalidSeatCount { requested: 0 };
    /// assert!(err.is_contract_violation());
    /// ```
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidSeatCount { .. }
                | Self::SeatOutOfBounds { .. }
                | Self::IllegalTransition { .. }
                | Self::Validation { .. }
        )
    }
}
