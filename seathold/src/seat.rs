//! Seat identity and status types.
//!
//! A seat is addressed by its row and its index within the row. Lower rows
//! and lower indices are the better seats.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a single seat in the venue.
///
/// # Examples
///
/// ```
/// use seathold::SeatId;
///
/// let seat = SeatId::new(0, 3);
/// assert_eq!(seat.row, 0);
/// assert_eq!(seat.index, 3);
/// assert_eq!(format!("{seat}"), "row 0 seat 3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeatId {
    /// Row number, 0 being the best row.
    pub row: usize,
    /// Position within the row, 0 being the best seat.
    pub index: usize,
}

impl SeatId {
    /// Creates a seat identity.
    #[must_use]
    pub const fn new(row: usize, index: usize) -> Self {
        Self { row, index }
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {} seat {}", self.row, self.index)
    }
}

/// Lifecycle state of a seat.
///
/// Seats move `Available -> OnHold -> Reserved`, or back from `OnHold` to
/// `Available` when a hold expires. `Reserved` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    /// Free to be held.
    Available,
    /// Temporarily claimed by an outstanding hold.
    OnHold,
    /// Permanently booked.
    Reserved,
}

impl SeatStatus {
    /// Single-character display code: `A`, `O` or `R`.
    ///
    /// # Examples
    ///
    /// ```
    /// use seathold::SeatStatus;
    ///
    /// assert_eq!(SeatStatus::Available.code(), 'A');
    /// assert_eq!(SeatStatus::OnHold.code(), 'O');
    /// assert_eq!(SeatStatus::Reserved.code(), 'R');
    /// ```
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Available => 'A',
            Self::OnHold => 'O',
            Self::Reserved => 'R',
        }
    }

    /// Parses a display code back into a status.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'A' => Some(Self::Available),
            'O' => Some(Self::OnHold),
            'R' => Some(Self::Reserved),
            _ => None,
        }
    }

    /// Returns `true` if the lifecycle allows moving from `self` to `next`.
    #[must_use]
    pub const fn can_become(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Available, Self::OnHold)
                | (Self::OnHold, Self::Reserved)
                | (Self::OnHold, Self::Available)
        )
    }
}

impl fmt::Display for SeatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::OnHold => write!(f, "on hold"),
            Self::Reserved => write!(f, "reserved"),
        }
    }
}

/// A seat together with its current status and holder.
///
/// `holder` is set exactly when the seat is not available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    id: SeatId,
    status: SeatStatus,
    holder: Option<String>,
}

impl Seat {
    /// Creates an available seat.
    #[must_use]
    pub const fn available(id: SeatId) -> Self {
        Self {
            id,
            status: SeatStatus::Available,
            holder: None,
        }
    }

    /// Returns the seat identity.
    #[must_use]
    pub const fn id(&self) -> SeatId {
        self.id
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> SeatStatus {
        self.status
    }

    /// Returns the email of the customer holding or owning the seat.
    #[must_use]
    pub fn holder(&self) -> Option<&str> {
        self.holder.as_deref()
    }

    /// Returns `true` if the seat can be held.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == SeatStatus::Available
    }

    /// Returns `true` if the seat is on hold for `email`.
    #[must_use]
    pub fn is_held_by(&self, email: &str) -> bool {
        self.status == SeatStatus::OnHold
            && self
                .holder
                .as_deref()
                .is_some_and(|holder| holder.eq_ignore_ascii_case(email))
    }

    /// Overwrites status and holder. Transition rules are enforced by the row.
    pub(crate) fn set(&mut self, status: SeatStatus, holder: Option<String>) {
        self.status = status;
        self.holder = if status == SeatStatus::Available {
            None
        } else {
            holder
        };
    }
}
