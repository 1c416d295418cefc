//! The ticket service: the public, thread-safe entry points.
//!
//! All seat and hold state lives in one [`BoxOffice`] behind a single
//! `parking_lot::Mutex`. Each operation is one critical section, so a
//! decision based on availability and the mutation it leads to can never be
//! interleaved with another request. Expiry tasks re-enter through the same
//! lock.
//!
//! ```
//! use seathold::{HoldOutcome, ManualScheduler, ServiceSettings, TicketService};
//!
//! let service = TicketService::with_scheduler(ServiceSettings::default(), ManualScheduler::new());
//!
//! let HoldOutcome::Held(hold) = service.find_and_hold_seats(3, "fan@example.com").unwrap() else {
//!     panic!("a fresh venue has room for three");
//! };
//! assert_eq!(service.num_seats_available(), 13);
//!
//! let reserved = service.reserve_seats(hold.id(), "fan@example.com").unwrap();
//! assert!(reserved.is_reserved());
//! assert_eq!(service.venue_status().row_codes(0).as_deref(), Some("RRRA"));
//! ```

mod office;

#[cfg(test)]
mod proptests;

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use parking_lot::Mutex;

use crate::config::validator::MAX_HOLD_TIMEOUT_MS;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::hold::{HoldId, SeatHold};
use crate::outcome::{ExpiryOutcome, HoldOutcome, ReserveOutcome};
use crate::scheduler::{ExpiryScheduler, ExpiryTask, TimerScheduler};
use crate::venue::{VenueDimensions, VenueSnapshot};

pub(crate) use office::BoxOffice;

/// Default venue rows.
pub const DEFAULT_ROWS: usize = 4;
/// Default seats per row.
pub const DEFAULT_COLS: usize = 4;
/// Default hold lifetime in milliseconds.
pub const DEFAULT_HOLD_TIMEOUT_MS: u64 = 5000;

/// Construction parameters for a [`TicketService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    dimensions: VenueDimensions,
    hold_timeout: Duration,
}

impl ServiceSettings {
    /// Validates venue size and hold timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for a zero-sized venue and
    /// [`Error::Validation`] for a zero timeout or one longer than
    /// [`MAX_HOLD_TIMEOUT_MS`].
    pub fn new(rows: usize, cols: usize, hold_timeout: Duration) -> Result<Self> {
        let dimensions = VenueDimensions::new(rows, cols)?;
        if hold_timeout.is_zero() {
            return Err(Error::Validation {
                field: "hold_timeout_ms".to_string(),
                message: "hold timeout must be at least 1 ms".to_string(),
            });
        }
        if hold_timeout > Duration::from_millis(MAX_HOLD_TIMEOUT_MS) {
            return Err(Error::Validation {
                field: "hold_timeout_ms".to_string(),
                message: format!("hold timeout cannot exceed {MAX_HOLD_TIMEOUT_MS} ms"),
            });
        }
        Ok(Self {
            dimensions,
            hold_timeout,
        })
    }

    /// Venue size.
    #[must_use]
    pub const fn dimensions(&self) -> VenueDimensions {
        self.dimensions
    }

    /// How long a hold lasts before it expires.
    #[must_use]
    pub const fn hold_timeout(&self) -> Duration {
        self.hold_timeout
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            dimensions: VenueDimensions {
                rows: DEFAULT_ROWS,
                cols: DEFAULT_COLS,
            },
            hold_timeout: Duration::from_millis(DEFAULT_HOLD_TIMEOUT_MS),
        }
    }
}

/// Holds, reserves and expires seats in one venue.
///
/// The service is `Send + Sync`; share it between threads with an `Arc`.
#[derive(Debug)]
pub struct TicketService<S: ExpiryScheduler = TimerScheduler> {
    office: Arc<Mutex<BoxOffice>>,
    scheduler: S,
    settings: ServiceSettings,
}

impl TicketService<TimerScheduler> {
    /// Creates a service whose holds expire on the wall clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the expiry worker thread cannot be started.
    pub fn new(settings: ServiceSettings) -> Result<Self> {
        Ok(Self::with_scheduler(settings, TimerScheduler::new()?))
    }

    /// Creates a service from a merged configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not describe a usable
    /// venue or the expiry worker cannot be started.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.service_settings()?)
    }
}

impl<S: ExpiryScheduler> TicketService<S> {
    /// Creates a service with a caller-supplied expiry scheduler.
    pub fn with_scheduler(settings: ServiceSettings, scheduler: S) -> Self {
        log::debug!(
            "venue {}x{} opened, holds last {:?}",
            settings.dimensions.rows,
            settings.dimensions.cols,
            settings.hold_timeout
        );
        Self {
            office: Arc::new(Mutex::new(BoxOffice::new(settings.dimensions))),
            scheduler,
            settings,
        }
    }

    /// Finds the best block of `num_seats` consecutive seats and holds it for
    /// `email`.
    ///
    /// Running out of seats is not an error: the outcome says whether seats
    /// were held. A rejected request leaves the venue unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSeatCount`] for zero seats and
    /// [`Error::Validation`] for a blank email.
    pub fn find_and_hold_seats(&self, num_seats: usize, email: &str) -> Result<HoldOutcome> {
        if num_seats == 0 {
            return Err(Error::InvalidSeatCount {
                requested: num_seats,
            });
        }
        let email = validate_email(email)?;

        let mut office = self.office.lock();
        let outcome = office.hold(
            num_seats,
            email,
            SystemTime::now(),
            self.settings.hold_timeout,
        )?;
        if let HoldOutcome::Held(hold) = &outcome {
            self.scheduler.schedule(
                ExpiryTask::new(hold.id(), Arc::downgrade(&self.office)),
                self.settings.hold_timeout,
            );
        }
        Ok(outcome)
    }

    /// Converts an outstanding hold into a reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a blank email. Unknown, settled or
    /// foreign holds are reported through [`ReserveOutcome`].
    pub fn reserve_seats(&self, hold_id: HoldId, email: &str) -> Result<ReserveOutcome> {
        let email = validate_email(email)?;

        let mut office = self.office.lock();
        let outcome = office.reserve(hold_id, email)?;
        if outcome.is_reserved() {
            self.scheduler.cancel(hold_id);
        }
        Ok(outcome)
    }

    /// Seats currently free to be held.
    #[must_use]
    pub fn num_seats_available(&self) -> usize {
        self.office.lock().available()
    }

    /// A detached copy of every seat's status.
    #[must_use]
    pub fn venue_status(&self) -> VenueSnapshot {
        self.office.lock().snapshot()
    }

    /// Releases `hold_id` if it is still outstanding.
    ///
    /// This is what an armed expiry runs; calling it more than once, or after
    /// the hold was reserved, changes nothing.
    pub fn expire_hold(&self, hold_id: HoldId) -> ExpiryOutcome {
        self.scheduler.cancel(hold_id);
        ExpiryTask::new(hold_id, Arc::downgrade(&self.office)).run()
    }

    /// Outstanding holds in issue order.
    #[must_use]
    pub fn active_holds(&self) -> Vec<SeatHold> {
        self.office.lock().ledger().iter().cloned().collect()
    }

    /// Outstanding holds placed by `email`.
    #[must_use]
    pub fn holds_for(&self, email: &str) -> Vec<SeatHold> {
        self.office
            .lock()
            .ledger()
            .holds_for(email)
            .cloned()
            .collect()
    }

    /// The outstanding hold with this id.
    #[must_use]
    pub fn hold(&self, hold_id: HoldId) -> Option<SeatHold> {
        self.office.lock().hold_by_id(hold_id).cloned()
    }

    /// Venue size.
    #[must_use]
    pub const fn dimensions(&self) -> VenueDimensions {
        self.settings.dimensions
    }

    /// How long a hold lasts.
    #[must_use]
    pub const fn hold_timeout(&self) -> Duration {
        self.settings.hold_timeout
    }

    /// The expiry scheduler.
    #[must_use]
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

fn validate_email(email: &str) -> Result<&str> {
    let email = email.trim();
    if email.is_empty() {
        return Err(Error::Validation {
            field: "email".to_string(),
            message: "customer email cannot be empty".to_string(),
        });
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use std::thread;

    use mockall::predicate::eq;

    use super::*;
    use crate::outcome::HoldRejection;
    use crate::scheduler::{ManualScheduler, MockExpiryScheduler};
    use crate::seat::{SeatId, SeatStatus};

    fn service() -> TicketService<ManualScheduler> {
        TicketService::with_scheduler(ServiceSettings::default(), ManualScheduler::new())
    }

    fn held(service: &TicketService<ManualScheduler>, n: usize, email: &str) -> SeatHold {
        service
            .find_and_hold_seats(n, email)
            .unwrap()
            .into_hold()
            .unwrap()
    }

    #[test]
    fn test_settings_validation() {
        assert!(ServiceSettings::new(0, 4, Duration::from_secs(1)).is_err());
        assert!(ServiceSettings::new(4, 0, Duration::from_secs(1)).is_err());
        assert!(matches!(
            ServiceSettings::new(4, 4, Duration::ZERO),
            Err(Error::Validation { .. })
        ));
        let settings = ServiceSettings::new(2, 3, Duration::from_millis(10)).unwrap();
        assert_eq!(settings.dimensions().capacity(), 6);
    }

    #[test]
    fn test_settings_bound_hold_timeout() {
        let longest = Duration::from_millis(MAX_HOLD_TIMEOUT_MS);
        assert_eq!(
            ServiceSettings::new(4, 4, longest).unwrap().hold_timeout(),
            longest
        );
        for too_long in [longest + Duration::from_millis(1), Duration::MAX] {
            assert!(matches!(
                ServiceSettings::new(4, 4, too_long),
                Err(Error::Validation { .. })
            ));
        }
    }

    #[test]
    fn test_zero_seats_is_contract_violation() {
        let service = service();
        let err = service.find_and_hold_seats(0, "a@example.com").unwrap_err();
        assert!(matches!(err, Error::InvalidSeatCount { requested: 0 }));
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_blank_email_rejected() {
        let service = service();
        assert!(matches!(
            service.find_and_hold_seats(1, "   "),
            Err(Error::Validation { .. })
        ));
        assert!(matches!(
            service.reserve_seats(HoldId::new(1), ""),
            Err(Error::Validation { .. })
        ));
        assert_eq!(service.num_seats_available(), 16);
    }

    #[test]
    fn test_hold_arms_expiry_with_timeout() {
        let service = service();
        let hold = held(&service, 2, "a@example.com");
        assert_eq!(service.scheduler().pending(), vec![hold.id()]);
        assert_eq!(
            service.scheduler().delay(hold.id()),
            Some(Duration::from_millis(DEFAULT_HOLD_TIMEOUT_MS))
        );
        assert_eq!(
            hold.expires_at().duration_since(hold.created_at()).unwrap(),
            service.hold_timeout()
        );
    }

    #[test]
    fn test_rejected_hold_is_not_scheduled() {
        let mut scheduler = MockExpiryScheduler::new();
        scheduler.expect_schedule().never();
        let service = TicketService::with_scheduler(ServiceSettings::default(), scheduler);

        let outcome = service.find_and_hold_seats(20, "a@example.com").unwrap();
        assert_eq!(
            outcome.rejection(),
            Some(HoldRejection::TooManyRequested { requested: 20 })
        );
        let outcome = service.find_and_hold_seats(5, "a@example.com").unwrap();
        assert_eq!(
            outcome.rejection(),
            Some(HoldRejection::ConsecutiveUnavailable { requested: 5 })
        );
        assert_eq!(service.num_seats_available(), 16);
    }

    #[test]
    fn test_reserve_cancels_expiry() {
        let mut scheduler = MockExpiryScheduler::new();
        scheduler
            .expect_schedule()
            .withf(|task, delay| task.hold_id() == HoldId::new(1) && *delay == Duration::from_secs(5))
            .times(1)
            .return_const(());
        scheduler
            .expect_cancel()
            .with(eq(HoldId::new(1)))
            .times(1)
            .return_const(());
        let service = TicketService::with_scheduler(ServiceSettings::default(), scheduler);

        let hold = service
            .find_and_hold_seats(3, "a@example.com")
            .unwrap()
            .into_hold()
            .unwrap();
        assert!(service
            .reserve_seats(hold.id(), "a@example.com")
            .unwrap()
            .is_reserved());
    }

    #[test]
    fn test_failed_reserve_keeps_expiry_armed() {
        let service = service();
        let hold = held(&service, 3, "a@example.com");

        let outcome = service.reserve_seats(hold.id(), "b@example.com").unwrap();
        assert_eq!(outcome, ReserveOutcome::EmailMismatch { hold_id: hold.id() });
        assert_eq!(service.scheduler().pending(), vec![hold.id()]);

        let snapshot = service.venue_status();
        for seat in hold.seats() {
            assert_eq!(snapshot.seat(seat.row, seat.index), Some(SeatStatus::OnHold));
        }
    }

    #[test]
    fn test_expiry_returns_seats() {
        let service = service();
        let hold = held(&service, 3, "a@example.com");
        assert_eq!(service.num_seats_available(), 13);

        let outcome = service.scheduler().fire(hold.id()).unwrap();
        assert_eq!(
            outcome,
            ExpiryOutcome::Released {
                hold_id: hold.id(),
                seats: vec![SeatId::new(0, 0), SeatId::new(0, 1), SeatId::new(0, 2)],
            }
        );
        assert_eq!(service.num_seats_available(), 16);
        assert_eq!(
            service.reserve_seats(hold.id(), "a@example.com").unwrap(),
            ReserveOutcome::HoldNotFound { hold_id: hold.id() }
        );
    }

    #[test]
    fn test_expire_hold_is_idempotent() {
        let service = service();
        let hold = held(&service, 2, "a@example.com");
        held(&service, 2, "b@example.com");

        assert!(service.expire_hold(hold.id()).released());
        let after_first = service.venue_status();
        assert!(!service.expire_hold(hold.id()).released());
        assert_eq!(service.venue_status(), after_first);
        assert_eq!(service.num_seats_available(), 14);
        // Direct expiry disarms the scheduled one
        assert_eq!(service.scheduler().pending().len(), 1);
    }

    #[test]
    fn test_hold_queries() {
        let service = service();
        let a = held(&service, 2, "a@example.com");
        let b = held(&service, 1, "b@example.com");
        let a2 = held(&service, 1, "A@EXAMPLE.COM");

        let ids: Vec<HoldId> = service.active_holds().iter().map(SeatHold::id).collect();
        assert_eq!(ids, vec![a.id(), b.id(), a2.id()]);
        let mine: Vec<HoldId> = service
            .holds_for("a@example.com")
            .iter()
            .map(SeatHold::id)
            .collect();
        assert_eq!(mine, vec![a.id(), a2.id()]);
        assert_eq!(service.hold(b.id()), Some(b));
        assert_eq!(service.hold(HoldId::new(99)), None);
    }

    #[test]
    fn test_concurrent_holds_are_disjoint() {
        let service = Arc::new(service());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let service = Arc::clone(&service);
                thread::spawn(move || {
                    service
                        .find_and_hold_seats(2, &format!("user{i}@example.com"))
                        .unwrap()
                })
            })
            .collect();

        let mut seats: Vec<SeatId> = handles
            .into_iter()
            .filter_map(|h| h.join().unwrap().into_hold())
            .flat_map(|hold| hold.seats().to_vec())
            .collect();
        assert_eq!(seats.len(), 16);
        seats.sort();
        seats.dedup();
        assert_eq!(seats.len(), 16);
        assert_eq!(service.num_seats_available(), 0);
    }
}
