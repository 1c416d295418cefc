//! Outcome values returned by the ticket service.
//!
//! Contention is part of normal operation, so every way a request can fail
//! because of other customers is a value the caller inspects rather than an
//! [`Error`](crate::Error).

use std::fmt;

use serde::Serialize;

use crate::hold::{HoldId, SeatHold};
use crate::seat::SeatId;

/// Why a hold request could not be satisfied.
///
/// # Examples
///
/// ```
/// use seathold::HoldRejection;
///
/// let rejection = HoldRejection::TooManyRequested { requested: 20 };
/// assert_eq!(rejection.message(), "Sorry, we do not have 20 tickets available.");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HoldRejection {
    /// More seats were requested than the whole venue has available.
    TooManyRequested {
        /// Seats requested.
        requested: usize,
    },
    /// No single row has enough consecutive available seats.
    ConsecutiveUnavailable {
        /// Seats requested.
        requested: usize,
    },
}

impl HoldRejection {
    /// Number of seats the rejected request asked for.
    #[must_use]
    pub const fn requested(&self) -> usize {
        match self {
            Self::TooManyRequested { requested } | Self::ConsecutiveUnavailable { requested } => {
                *requested
            }
        }
    }

    /// Customer-facing explanation.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HoldRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyRequested { requested } => {
                write!(f, "Sorry, we do not have {requested} tickets available.")
            }
            Self::ConsecutiveUnavailable { requested } => write!(
                f,
                "Sorry, {requested} consecutive seats are not available in the venue."
            ),
        }
    }
}

/// Result of `find_and_hold_seats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum HoldOutcome {
    /// Seats are on hold until the hold is reserved or expires.
    Held(SeatHold),
    /// Nothing was held; the venue is unchanged.
    Rejected(HoldRejection),
}

impl HoldOutcome {
    /// The hold, if the request succeeded.
    #[must_use]
    pub fn hold(&self) -> Option<&SeatHold> {
        match self {
            Self::Held(hold) => Some(hold),
            Self::Rejected(_) => None,
        }
    }

    /// Consumes the outcome, returning the hold if the request succeeded.
    #[must_use]
    pub fn into_hold(self) -> Option<SeatHold> {
        match self {
            Self::Held(hold) => Some(hold),
            Self::Rejected(_) => None,
        }
    }

    /// The rejection, if the request failed.
    #[must_use]
    pub fn rejection(&self) -> Option<HoldRejection> {
        match self {
            Self::Held(_) => None,
            Self::Rejected(rejection) => Some(*rejection),
        }
    }

    /// Returns `true` if no seats were held.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Customer-facing message for a rejected request.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.rejection().map(|rejection| rejection.message())
    }
}

/// Result of `reserve_seats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReserveOutcome {
    /// The held seats are now permanently booked.
    Reserved {
        /// The hold that was converted.
        hold_id: HoldId,
        /// Seats now reserved.
        seats: Vec<SeatId>,
    },
    /// No outstanding hold has this id; it was never issued, already
    /// reserved, or already expired.
    HoldNotFound {
        /// The id presented.
        hold_id: HoldId,
    },
    /// The hold belongs to a different customer. Its seats stay on hold.
    EmailMismatch {
        /// The id presented.
        hold_id: HoldId,
    },
}

impl ReserveOutcome {
    /// Returns `true` if the seats were reserved.
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        matches!(self, Self::Reserved { .. })
    }

    /// The hold id the outcome refers to.
    #[must_use]
    pub const fn hold_id(&self) -> HoldId {
        match self {
            Self::Reserved { hold_id, .. }
            | Self::HoldNotFound { hold_id }
            | Self::EmailMismatch { hold_id } => *hold_id,
        }
    }

    /// Customer-facing message.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ReserveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reserved { .. } => {
                write!(f, "Hurray! Your seats have been reserved. Congratulations!")
            }
            Self::HoldNotFound { hold_id } => write!(
                f,
                "Sorry your seats could not be reserved. Hold {hold_id} was not found or has already expired."
            ),
            Self::EmailMismatch { hold_id } => write!(
                f,
                "Sorry your seats could not be reserved. Hold {hold_id} belongs to a different customer."
            ),
        }
    }
}

/// Result of firing the expiry for one hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ExpiryOutcome {
    /// The hold was outstanding; these seats went back to the pool.
    Released {
        /// The expired hold.
        hold_id: HoldId,
        /// Seats made available again.
        seats: Vec<SeatId>,
    },
    /// The hold had already been reserved or expired. Nothing changed.
    AlreadySettled {
        /// The id whose expiry fired.
        hold_id: HoldId,
    },
    /// The ticket service no longer exists.
    ServiceGone {
        /// The id whose expiry fired.
        hold_id: HoldId,
    },
}

impl ExpiryOutcome {
    /// Returns `true` if seats were released.
    #[must_use]
    pub fn released(&self) -> bool {
        matches!(self, Self::Released { .. })
    }
}
