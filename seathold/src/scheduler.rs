//! Expiry scheduling for outstanding holds.
//!
//! Every successful hold arms exactly one [`ExpiryTask`]. When the task runs
//! it re-enters the box office under the service lock and releases the hold
//! if, and only if, it is still outstanding. Reservation and expiry both
//! remove the ledger entry, so whichever runs second finds nothing to do.
//!
//! The [`ExpiryScheduler`] trait is the seam between the service and the
//! clock. [`TimerScheduler`] is the production implementation backed by a
//! single worker thread; [`ManualScheduler`] fires tasks only when told to.

mod manual;
mod timer;

use std::sync::Weak;
use std::time::Duration;

use log::error;
use parking_lot::Mutex;

use crate::hold::HoldId;
use crate::outcome::ExpiryOutcome;
use crate::service::BoxOffice;

pub use manual::ManualScheduler;
pub use timer::TimerScheduler;

/// Arms and cancels hold expiries.
///
/// Implementations must never run a task while holding a lock that the task
/// itself needs; tasks take the service lock when they run.
#[cfg_attr(test, mockall::automock)]
pub trait ExpiryScheduler: Send + Sync {
    /// Runs `task` once, `delay` from now.
    fn schedule(&self, task: ExpiryTask, delay: Duration);

    /// Disarms the task for `hold_id`, if it has not fired yet.
    ///
    /// Cancelling is an optimisation: a task that fires for a settled hold is
    /// a no-op anyway.
    fn cancel(&self, _hold_id: HoldId) {}
}

/// Deferred release of one hold.
///
/// The task keeps only a weak handle on the service state, so pending
/// expiries never keep a dropped service alive.
#[derive(Debug, Clone)]
pub struct ExpiryTask {
    hold_id: HoldId,
    office: Weak<Mutex<BoxOffice>>,
}

impl ExpiryTask {
    pub(crate) fn new(hold_id: HoldId, office: Weak<Mutex<BoxOffice>>) -> Self {
        Self { hold_id, office }
    }

    /// The hold this task expires.
    #[must_use]
    pub const fn hold_id(&self) -> HoldId {
        self.hold_id
    }

    /// Releases the hold if it is still outstanding.
    pub fn run(&self) -> ExpiryOutcome {
        let Some(office) = self.office.upgrade() else {
            return ExpiryOutcome::ServiceGone {
                hold_id: self.hold_id,
            };
        };
        let mut office = office.lock();
        match office.expire(self.hold_id) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("failed to release hold {}: {e}", self.hold_id);
                ExpiryOutcome::AlreadySettled {
                    hold_id: self.hold_id,
                }
            }
        }
    }
}
