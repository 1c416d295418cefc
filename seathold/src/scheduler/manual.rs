//! A scheduler driven by hand instead of a clock.

use std::collections::BTreeMap;
use std::time::Duration;

use log::debug;
use parking_lot::Mutex;

use crate::hold::HoldId;
use crate::outcome::ExpiryOutcome;

use super::{ExpiryScheduler, ExpiryTask};

/// Records armed expiries and fires them only on request.
///
/// Useful wherever timing must be deterministic: tests, benchmarks and
/// scripted sessions that simulate the passage of time.
///
/// # Examples
///
/// ```
/// use seathold::{ManualScheduler, ServiceSettings, TicketService};
///
/// let service = TicketService::with_scheduler(ServiceSettings::default(), ManualScheduler::new());
/// let hold = service.find_and_hold_seats(2, "a@example.com").unwrap().into_hold().unwrap();
/// assert_eq!(service.num_seats_available(), 14);
///
/// service.scheduler().fire(hold.id());
/// assert_eq!(service.num_seats_available(), 16);
/// ```
#[derive(Debug, Default)]
pub struct ManualScheduler {
    armed: Mutex<BTreeMap<HoldId, (ExpiryTask, Duration)>>,
}

impl ManualScheduler {
    /// Creates a scheduler with nothing armed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the task armed for `hold_id`, if any.
    pub fn fire(&self, hold_id: HoldId) -> Option<ExpiryOutcome> {
        let task = self.armed.lock().remove(&hold_id).map(|(task, _)| task)?;
        Some(task.run())
    }

    /// Runs every armed task in hold id order.
    pub fn fire_all(&self) -> Vec<ExpiryOutcome> {
        let armed = std::mem::take(&mut *self.armed.lock());
        armed.into_values().map(|(task, _)| task.run()).collect()
    }

    /// Ids with an armed task, ascending.
    #[must_use]
    pub fn pending(&self) -> Vec<HoldId> {
        self.armed.lock().keys().copied().collect()
    }

    /// Delay the task for `hold_id` was armed with.
    #[must_use]
    pub fn delay(&self, hold_id: HoldId) -> Option<Duration> {
        self.armed.lock().get(&hold_id).map(|(_, delay)| *delay)
    }
}

impl ExpiryScheduler for ManualScheduler {
    fn schedule(&self, task: ExpiryTask, delay: Duration) {
        debug!("armed manual expiry for hold {}", task.hold_id());
        self.armed.lock().insert(task.hold_id(), (task, delay));
    }

    fn cancel(&self, hold_id: HoldId) {
        self.armed.lock().remove(&hold_id);
    }
}
