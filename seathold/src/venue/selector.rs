//! Contiguous block selection.
//!
//! The policy is first fit, row-major, best rows first:
//!
//! 1. Reject when the request exceeds venue-wide availability.
//! 2. Scan rows from the best (row 0) down, skipping full rows.
//! 3. Within a row, scan from the best seat; a start index qualifies only if
//!    the block fits inside the row and every seat in it is available.
//! 4. The first qualifying block wins. Blocks never span rows.
//!
//! The selector only reads the venue, and the same venue state always yields
//! the same block.

use log::debug;

use crate::outcome::HoldRejection;
use crate::seat::SeatId;

use super::{Row, Venue};

/// A run of consecutive seats inside one row.
///
/// # Examples
///
/// ```
/// use seathold::{SeatBlock, SeatId};
///
/// let block = SeatBlock { row: 1, start: 2, len: 2 };
/// let seats: Vec<SeatId> = block.seats().collect();
/// assert_eq!(seats, vec![SeatId::new(1, 2), SeatId::new(1, 3)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeatBlock {
    /// Row holding the block.
    pub row: usize,
    /// Index of the first seat.
    pub start: usize,
    /// Number of seats.
    pub len: usize,
}

impl SeatBlock {
    /// Seats covered by the block, in index order.
    pub fn seats(&self) -> impl Iterator<Item = SeatId> {
        let row = self.row;
        (self.start..self.start + self.len).map(move |index| SeatId::new(row, index))
    }

    /// One past the last index.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Finds the best block of `num_seats` consecutive available seats.
///
/// `num_seats` must be at least 1; the ticket service checks this before
/// calling.
///
/// # Errors
///
/// Returns [`HoldRejection::TooManyRequested`] when `num_seats` exceeds the
/// seats available in the whole venue, and
/// [`HoldRejection::ConsecutiveUnavailable`] when no row has a fitting block.
///
/// # Examples
///
/// ```
/// use seathold::{select_block, HoldRejection, SeatBlock, Venue};
///
/// let venue = Venue::initialize(4, 4).unwrap();
///
/// assert_eq!(
///     select_block(&venue, 3),
///     Ok(SeatBlock { row: 0, start: 0, len: 3 })
/// );
/// assert_eq!(
///     select_block(&venue, 5),
///     Err(HoldRejection::ConsecutiveUnavailable { requested: 5 })
/// );
/// assert_eq!(
///     select_block(&venue, 20),
///     Err(HoldRejection::TooManyRequested { requested: 20 })
/// );
/// ```
pub fn select_block(venue: &Venue, num_seats: usize) -> Result<SeatBlock, HoldRejection> {
    debug_assert!(num_seats > 0, "a block needs at least one seat");

    let total = venue.total_available();
    if num_seats > total {
        debug!("request for {num_seats} seats exceeds {total} available");
        return Err(HoldRejection::TooManyRequested {
            requested: num_seats,
        });
    }

    let cols = venue.dimensions().cols;
    if num_seats <= cols {
        for row in venue.rows() {
            if row.available() == 0 {
                continue;
            }
            if let Some(start) = first_fit(row, num_seats, cols) {
                let block = SeatBlock {
                    row: row.id(),
                    start,
                    len: num_seats,
                };
                debug!("selected row {} seats {}..{}", block.row, block.start, block.end());
                return Ok(block);
            }
        }
    }

    debug!("no row has {num_seats} consecutive available seats");
    Err(HoldRejection::ConsecutiveUnavailable {
        requested: num_seats,
    })
}

/// Lowest start index in `row` whose block of `len` seats is all available.
fn first_fit(row: &Row, len: usize, cols: usize) -> Option<usize> {
    let seats = row.seats();
    let last_start = cols - len;
    let mut start = 0;

    while start <= last_start {
        if !seats[start].is_available() {
            start += 1;
            continue;
        }

        match seats[start..start + len]
            .iter()
            .position(|seat| !seat.is_available())
        {
            None => return Some(start),
            // Every start up to the blocking seat would contain it
            Some(offset) => start += offset + 1,
        }
    }

    None
}
