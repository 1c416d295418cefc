//! The table of outstanding holds and the id counter that names them.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

use super::{HoldId, SeatHold};

/// Issues hold ids from a strictly increasing counter.
///
/// Ids are never reused, so a stale id from a reserved or expired hold can
/// never match a newer hold on the same seats.
///
/// # Examples
///
/// ```
/// use seathold::HoldIdGenerator;
///
/// let mut ids = HoldIdGenerator::new();
/// let first = ids.next_id().unwrap();
/// let second = ids.next_id().unwrap();
/// assert!(second > first);
/// ```
#[derive(Debug, Clone)]
pub struct HoldIdGenerator {
    next: u64,
}

impl HoldIdGenerator {
    /// Starts counting at 1.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns the next unused id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HoldIdsExhausted`] once every `u64` has been issued.
    pub fn next_id(&mut self) -> Result<HoldId> {
        let id = self.next;
        self.next = id.checked_add(1).ok_or(Error::HoldIdsExhausted)?;
        Ok(HoldId::new(id))
    }
}

impl Default for HoldIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Outstanding holds keyed by id, iterated in issue order.
#[derive(Debug, Clone, Default)]
pub struct HoldLedger {
    holds: BTreeMap<HoldId, SeatHold>,
}

impl HoldLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a hold and returns its id.
    pub fn record(&mut self, hold: SeatHold) -> HoldId {
        let id = hold.id();
        let previous = self.holds.insert(id, hold);
        debug_assert!(previous.is_none(), "hold id {id} recorded twice");
        id
    }

    /// Looks up an outstanding hold.
    #[must_use]
    pub fn get(&self, id: HoldId) -> Option<&SeatHold> {
        self.holds.get(&id)
    }

    /// Removes a hold, returning it if it was outstanding.
    pub fn remove(&mut self, id: HoldId) -> Option<SeatHold> {
        self.holds.remove(&id)
    }

    /// Returns `true` if `id` is outstanding.
    #[must_use]
    pub fn contains(&self, id: HoldId) -> bool {
        self.holds.contains_key(&id)
    }

    /// Number of outstanding holds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.holds.len()
    }

    /// Returns `true` if nothing is on hold.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holds.is_empty()
    }

    /// Outstanding holds in issue order.
    pub fn iter(&self) -> impl Iterator<Item = &SeatHold> {
        self.holds.values()
    }

    /// Outstanding holds placed by `email`.
    pub fn holds_for<'a>(&'a self, email: &'a str) -> impl Iterator<Item = &'a SeatHold> + 'a {
        self.holds.values().filter(move |hold| hold.is_held_by(email))
    }

    /// Total number of seats under outstanding holds.
    #[must_use]
    pub fn seats_on_hold(&self) -> usize {
        self.holds.values().map(SeatHold::len).sum()
    }
}
