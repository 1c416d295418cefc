//! The state guarded by the service lock.

use std::time::{Duration, SystemTime};

use log::{debug, info, warn};

use crate::error::Result;
use crate::hold::{HoldId, HoldIdGenerator, HoldLedger, SeatHold};
use crate::outcome::{ExpiryOutcome, HoldOutcome, ReserveOutcome};
use crate::seat::SeatStatus;
use crate::venue::{select_block, Venue, VenueDimensions, VenueSnapshot};

/// Venue grid, hold ledger and id counter.
///
/// Every method assumes the caller holds the service lock; none of them
/// block or call back out.
#[derive(Debug)]
pub struct BoxOffice {
    venue: Venue,
    ledger: HoldLedger,
    ids: HoldIdGenerator,
}

impl BoxOffice {
    pub(crate) fn new(dimensions: VenueDimensions) -> Self {
        Self {
            venue: Venue::new(dimensions),
            ledger: HoldLedger::new(),
            ids: HoldIdGenerator::new(),
        }
    }

    pub(crate) fn hold(
        &mut self,
        num_seats: usize,
        email: &str,
        now: SystemTime,
        timeout: Duration,
    ) -> Result<HoldOutcome> {
        let block = match select_block(&self.venue, num_seats) {
            Ok(block) => block,
            Err(rejection) => {
                info!("hold of {num_seats} seats for {email} rejected: {rejection}");
                return Ok(HoldOutcome::Rejected(rejection));
            }
        };

        // Everything that can fail happens before the grid changes
        let id = self.ids.next_id()?;
        let hold = SeatHold::new(id, block, email, now, timeout)?;
        self.venue
            .set_block_status(hold.seats(), SeatStatus::OnHold, Some(email))?;
        self.ledger.record(hold.clone());
        self.debug_check();

        info!(
            "hold {id}: {} seats in row {} for {email}",
            hold.len(),
            hold.row()
        );
        Ok(HoldOutcome::Held(hold))
    }

    pub(crate) fn reserve(&mut self, hold_id: HoldId, email: &str) -> Result<ReserveOutcome> {
        let Some(hold) = self.ledger.get(hold_id) else {
            warn!("reservation of hold {hold_id} by {email} failed: no such hold");
            return Ok(ReserveOutcome::HoldNotFound { hold_id });
        };
        if !hold.is_held_by(email) {
            warn!("reservation of hold {hold_id} by {email} failed: held by someone else");
            return Ok(ReserveOutcome::EmailMismatch { hold_id });
        }

        let seats = hold.seats().to_vec();
        let holder = hold.email().to_string();
        self.venue
            .set_block_status(&seats, SeatStatus::Reserved, Some(&holder))?;
        self.ledger.remove(hold_id);
        self.debug_check();

        info!("hold {hold_id} reserved for {holder}");
        Ok(ReserveOutcome::Reserved { hold_id, seats })
    }

    /// Releases a hold that is still outstanding.
    ///
    /// Only seats still on hold for the hold's customer are released, and the
    /// hold is looked up by id alone.
    pub(crate) fn expire(&mut self, hold_id: HoldId) -> Result<ExpiryOutcome> {
        let Some(hold) = self.ledger.remove(hold_id) else {
            debug!("expiry of hold {hold_id} ignored: already settled");
            return Ok(ExpiryOutcome::AlreadySettled { hold_id });
        };

        let mut released = Vec::with_capacity(hold.len());
        for &seat in hold.seats() {
            let still_held = self
                .venue
                .seat(seat)
                .is_some_and(|s| s.status() == SeatStatus::OnHold && s.is_held_by(hold.email()));
            if still_held {
                self.venue.set_seat_status(seat, SeatStatus::Available, None)?;
                released.push(seat);
            }
        }
        self.debug_check();

        info!("hold {hold_id} expired, {} seats released", released.len());
        Ok(ExpiryOutcome::Released {
            hold_id,
            seats: released,
        })
    }

    pub(crate) fn available(&self) -> usize {
        self.venue.total_available()
    }

    pub(crate) fn snapshot(&self) -> VenueSnapshot {
        self.venue.snapshot()
    }

    pub(crate) fn hold_by_id(&self, hold_id: HoldId) -> Option<&SeatHold> {
        self.ledger.get(hold_id)
    }

    pub(crate) fn ledger(&self) -> &HoldLedger {
        &self.ledger
    }

    #[cfg(test)]
    pub(crate) fn venue(&self) -> &Venue {
        &self.venue
    }

    fn debug_check(&self) {
        debug_assert!(
            self.venue.check_consistency().is_ok(),
            "venue availability cache out of sync"
        );
    }
}
