//! Read-only copies of the venue for display.

use std::fmt;
use std::iter::FusedIterator;

use serde::{Serialize, Serializer};

use crate::seat::SeatStatus;

use super::VenueDimensions;

/// Number of seats in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeatCounts {
    /// Seats free to be held.
    pub available: usize,
    /// Seats under an outstanding hold.
    pub on_hold: usize,
    /// Seats permanently booked.
    pub reserved: usize,
}

impl SeatCounts {
    /// Total seats counted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.available + self.on_hold + self.reserved
    }
}

/// Seat states copied out of the venue at one instant.
///
/// The snapshot is detached from the live venue: later holds, reservations
/// and expirations do not change it.
///
/// # Examples
///
/// ```
/// use seathold::Venue;
///
/// let snapshot = Venue::initialize(2, 3).unwrap().snapshot();
/// assert_eq!(snapshot.row_codes(0).as_deref(), Some("AAA"));
///
/// // Each call to codes() starts over from the first seat
/// assert_eq!(snapshot.codes().count(), 6);
/// assert_eq!(snapshot.codes().count(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueSnapshot {
    dimensions: VenueDimensions,
    statuses: Vec<SeatStatus>,
}

impl VenueSnapshot {
    pub(super) fn new(dimensions: VenueDimensions, statuses: Vec<SeatStatus>) -> Self {
        debug_assert_eq!(statuses.len(), dimensions.capacity());
        Self {
            dimensions,
            statuses,
        }
    }

    /// Size of the venue the snapshot was taken from.
    #[must_use]
    pub const fn dimensions(&self) -> VenueDimensions {
        self.dimensions
    }

    /// Status codes of every seat in row-major order.
    #[must_use]
    pub fn codes(&self) -> StatusCodes<'_> {
        StatusCodes {
            inner: self.statuses.iter(),
        }
    }

    /// Seat statuses grouped by row, best row first.
    pub fn rows(&self) -> impl Iterator<Item = &[SeatStatus]> + '_ {
        self.statuses.chunks(self.dimensions.cols)
    }

    /// Status codes of one row as a string, e.g. `"AAOR"`.
    #[must_use]
    pub fn row_codes(&self, row: usize) -> Option<String> {
        self.rows()
            .nth(row)
            .map(|seats| seats.iter().map(|status| status.code()).collect())
    }

    /// Status of a single seat.
    #[must_use]
    pub fn seat(&self, row: usize, index: usize) -> Option<SeatStatus> {
        if row >= self.dimensions.rows || index >= self.dimensions.cols {
            return None;
        }
        self.statuses.get(row * self.dimensions.cols + index).copied()
    }

    /// Tallies seats per status.
    #[must_use]
    pub fn counts(&self) -> SeatCounts {
        self.statuses
            .iter()
            .fold(SeatCounts::default(), |mut counts, status| {
                match status {
                    SeatStatus::Available => counts.available += 1,
                    SeatStatus::OnHold => counts.on_hold += 1,
                    SeatStatus::Reserved => counts.reserved += 1,
                }
                counts
            })
    }
}

impl fmt::Display for VenueSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--------")?;
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(|status| status.code().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        write!(f, "--------")
    }
}

impl Serialize for VenueSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct View {
            rows: usize,
            cols: usize,
            seats: Vec<String>,
            counts: SeatCounts,
        }

        View {
            rows: self.dimensions.rows,
            cols: self.dimensions.cols,
            seats: self
                .rows()
                .map(|row| row.iter().map(|status| status.code()).collect())
                .collect(),
            counts: self.counts(),
        }
        .serialize(serializer)
    }
}

/// Iterator over seat status codes, see [`VenueSnapshot::codes`].
#[derive(Debug, Clone)]
pub struct StatusCodes<'a> {
    inner: std::slice::Iter<'a, SeatStatus>,
}

impl Iterator for StatusCodes<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        self.inner.next().map(|status| status.code())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for StatusCodes<'_> {}

impl FusedIterator for StatusCodes<'_> {}
