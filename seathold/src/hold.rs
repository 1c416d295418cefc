//! Hold types: the temporary claim a customer places on a block of seats.
//!
//! A [`SeatHold`] lives in the [`HoldLedger`] from the moment its seats are
//! marked on hold until it is either reserved or expires.

mod ledger;

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::seat::SeatId;
use crate::venue::SeatBlock;

pub use ledger::{HoldIdGenerator, HoldLedger};

/// Identifier of a hold, unique for the life of the process.
///
/// # Examples
///
/// ```
/// use seathold::HoldId;
///
/// let id: HoldId = "42".parse().unwrap();
/// assert_eq!(id.value(), 42);
/// assert_eq!(format!("{id}"), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoldId(u64);

impl HoldId {
    /// Wraps a raw id value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HoldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HoldId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// An outstanding claim on a contiguous block of seats in one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatHold {
    id: HoldId,
    row: usize,
    seats: Vec<SeatId>,
    email: String,
    created_at: SystemTime,
    expires_at: SystemTime,
}

impl SeatHold {
    /// Creates a hold over `block` for `email`, expiring `timeout` after
    /// `created_at`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the expiry time does not fit in a
    /// [`SystemTime`].
    pub fn new(
        id: HoldId,
        block: SeatBlock,
        email: impl Into<String>,
        created_at: SystemTime,
        timeout: Duration,
    ) -> Result<Self> {
        let expires_at = created_at
            .checked_add(timeout)
            .ok_or_else(|| Error::Validation {
                field: "hold_timeout_ms".to_string(),
                message: format!("{timeout:?} past the hold time is out of range"),
            })?;
        Ok(Self {
            id,
            row: block.row,
            seats: block.seats().collect(),
            email: email.into(),
            created_at,
            expires_at,
        })
    }

    /// The hold id.
    #[must_use]
    pub const fn id(&self) -> HoldId {
        self.id
    }

    /// Row the block was taken from.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Held seats in index order.
    #[must_use]
    pub fn seats(&self) -> &[SeatId] {
        &self.seats
    }

    /// Number of held seats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Returns `true` if the hold covers no seats.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Email of the customer who placed the hold.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns `true` if `email` identifies the holder (ASCII case-insensitive).
    #[must_use]
    pub fn is_held_by(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }

    /// When the hold was placed.
    #[must_use]
    pub const fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// When the hold lapses unless reserved first.
    #[must_use]
    pub const fn expires_at(&self) -> SystemTime {
        self.expires_at
    }
}
