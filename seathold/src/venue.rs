//! The venue grid: rows of seats with a per-row availability cache.
//!
//! A [`Venue`] is built once with fixed [`VenueDimensions`]. Each [`Row`]
//! keeps a count of its available seats that is updated together with every
//! seat status change, so that venue-wide availability is a sum over rows
//! rather than a scan over every seat.

pub mod selector;
mod snapshot;

#[cfg(test)]
mod proptests;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::seat::{Seat, SeatId, SeatStatus};

pub use selector::{select_block, SeatBlock};
pub use snapshot::{SeatCounts, StatusCodes, VenueSnapshot};

/// Fixed size of a venue.
///
/// # Examples
///
/// ```
/// use seathold::VenueDimensions;
///
/// let dims = VenueDimensions::new(4, 5).unwrap();
/// assert_eq!(dims.capacity(), 20);
///
/// assert!(VenueDimensions::new(0, 5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VenueDimensions {
    /// Number of rows.
    pub rows: usize,
    /// Number of seats in every row.
    pub cols: usize,
}

impl VenueDimensions {
    /// Creates validated dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either side is zero or the
    /// seat count does not fit in a `usize`.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidDimensions {
            rows,
            cols,
            reason: reason.to_string(),
        };

        if rows == 0 {
            return Err(invalid("a venue needs at least one row"));
        }
        if cols == 0 {
            return Err(invalid("a row needs at least one seat"));
        }
        if rows.checked_mul(cols).is_none() {
            return Err(invalid("seat count overflows"));
        }

        Ok(Self { rows, cols })
    }

    /// Total number of seats.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    /// Returns `true` if `seat` lies inside the venue.
    #[must_use]
    pub const fn contains(&self, seat: SeatId) -> bool {
        seat.row < self.rows && seat.index < self.cols
    }
}

/// One row of seats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: usize,
    seats: Vec<Seat>,
    available: usize,
}

impl Row {
    fn new(id: usize, cols: usize) -> Self {
        Self {
            id,
            seats: (0..cols).map(|index| Seat::available(SeatId::new(id, index))).collect(),
            available: cols,
        }
    }

    /// Row number, 0 being the best row.
    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Seats in index order.
    #[must_use]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Returns the seat at `index`.
    #[must_use]
    pub fn seat(&self, index: usize) -> Option<&Seat> {
        self.seats.get(index)
    }

    /// Cached number of available seats.
    #[must_use]
    pub const fn available(&self) -> usize {
        self.available
    }

    /// Counts available seats without the cache.
    #[must_use]
    pub fn count_available(&self) -> usize {
        self.seats.iter().filter(|seat| seat.is_available()).count()
    }

    fn set_status(&mut self, index: usize, status: SeatStatus, holder: Option<&str>) -> Result<()> {
        let row = self.id;
        let seat = self
            .seats
            .get_mut(index)
            .ok_or(Error::SeatOutOfBounds {
                seat: SeatId::new(row, index),
            })?;

        let from = seat.status();
        if !from.can_become(status) {
            return Err(Error::IllegalTransition {
                seat: seat.id(),
                from,
                to: status,
            });
        }

        seat.set(status, holder.map(str::to_string));

        // Keep the cache in step with the seat it describes
        if from == SeatStatus::Available {
            self.available -= 1;
        } else if status == SeatStatus::Available {
            self.available += 1;
        }

        Ok(())
    }
}

/// The full seat grid.
///
/// Mutation requires `&mut Venue`; inside the ticket service the venue lives
/// behind the service lock, so every change happens in a critical section.
///
/// # Examples
///
/// ```
/// use seathold::{SeatId, SeatStatus, Venue};
///
/// let mut venue = Venue::initialize(4, 4).unwrap();
/// assert_eq!(venue.total_available(), 16);
///
/// venue
///     .set_seat_status(SeatId::new(0, 0), SeatStatus::OnHold, Some("a@example.com"))
///     .unwrap();
/// assert_eq!(venue.total_available(), 15);
/// assert_eq!(venue.rows()[0].available(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Venue {
    dimensions: VenueDimensions,
    rows: Vec<Row>,
}

impl Venue {
    /// Builds a venue with every seat available.
    #[must_use]
    pub fn new(dimensions: VenueDimensions) -> Self {
        let rows = (0..dimensions.rows)
            .map(|id| Row::new(id, dimensions.cols))
            .collect();
        Self { dimensions, rows }
    }

    /// Validates `rows` x `cols` and builds the venue.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for a zero-sized venue.
    pub fn initialize(rows: usize, cols: usize) -> Result<Self> {
        Ok(Self::new(VenueDimensions::new(rows, cols)?))
    }

    /// The fixed venue size.
    #[must_use]
    pub const fn dimensions(&self) -> VenueDimensions {
        self.dimensions
    }

    /// Rows in order, best first.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Looks up a seat.
    #[must_use]
    pub fn seat(&self, seat: SeatId) -> Option<&Seat> {
        self.rows.get(seat.row).and_then(|row| row.seat(seat.index))
    }

    /// Sum of every row's cached availability.
    #[must_use]
    pub fn total_available(&self) -> usize {
        self.rows.iter().map(Row::available).sum()
    }

    /// Changes one seat's status and keeps its row cache consistent.
    ///
    /// `holder` is recorded for held and reserved seats and cleared when the
    /// seat becomes available again.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SeatOutOfBounds`] for a seat outside the venue and
    /// [`Error::IllegalTransition`] for a change the seat lifecycle forbids.
    /// On error the venue is left untouched.
    pub fn set_seat_status(
        &mut self,
        seat: SeatId,
        status: SeatStatus,
        holder: Option<&str>,
    ) -> Result<()> {
        let row = self
            .rows
            .get_mut(seat.row)
            .ok_or(Error::SeatOutOfBounds { seat })?;
        row.set_status(seat.index, status, holder)
    }

    /// Changes several seats at once, all or nothing.
    ///
    /// Every seat is checked before any is changed, so a failure leaves the
    /// venue untouched.
    ///
    /// # Errors
    ///
    /// Same as [`Venue::set_seat_status`], for the first offending seat.
    pub fn set_block_status(
        &mut self,
        seats: &[SeatId],
        status: SeatStatus,
        holder: Option<&str>,
    ) -> Result<()> {
        for &seat in seats {
            let from = self
                .seat(seat)
                .ok_or(Error::SeatOutOfBounds { seat })?
                .status();
            if !from.can_become(status) {
                return Err(Error::IllegalTransition {
                    seat,
                    from,
                    to: status,
                });
            }
        }
        for &seat in seats {
            self.set_seat_status(seat, status, holder)?;
        }
        Ok(())
    }

    /// Copies the current seat states.
    #[must_use]
    pub fn snapshot(&self) -> VenueSnapshot {
        let statuses = self
            .rows
            .iter()
            .flat_map(|row| row.seats().iter().map(Seat::status))
            .collect();
        VenueSnapshot::new(self.dimensions, statuses)
    }

    /// Verifies every row cache against its seats.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CacheMismatch`] for the first inconsistent row.
    pub fn check_consistency(&self) -> Result<()> {
        for row in &self.rows {
            let actual = row.count_available();
            if actual != row.available() {
                return Err(Error::CacheMismatch {
                    row: row.id(),
                    cached: row.available(),
                    actual,
                });
            }
        }
        Ok(())
    }
}
