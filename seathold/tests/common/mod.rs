//! Common test utilities for integration tests.
//!
//! Helpers for building services with short hold timeouts and for waiting
//! on expiries driven by the real clock.

use std::thread;
use std::time::{Duration, Instant};

use seathold::{
    ManualScheduler, SeatHold, SeatStatus, ServiceSettings, TicketService, TimerScheduler,
};

/// Hold timeout used by wall-clock tests.
#[allow(dead_code)]
pub const SHORT_TIMEOUT: Duration = Duration::from_millis(150);

/// Builds a 4x4 service whose holds expire after [`SHORT_TIMEOUT`].
#[allow(dead_code)]
pub fn timed_service() -> TicketService<TimerScheduler> {
    timed_service_sized(4, 4, SHORT_TIMEOUT)
}

/// Builds a service of the given size with a real timer.
#[allow(dead_code)]
pub fn timed_service_sized(rows: usize, cols: usize, timeout: Duration) -> TicketService {
    let settings = ServiceSettings::new(rows, cols, timeout).unwrap();
    TicketService::new(settings).unwrap()
}

/// Builds a 4x4 service whose expiries only fire when told to.
#[allow(dead_code)]
pub fn manual_service() -> TicketService<ManualScheduler> {
    TicketService::with_scheduler(ServiceSettings::default(), ManualScheduler::new())
}

/// Holds `n` seats for `email`, panicking if the venue cannot fit them.
#[allow(dead_code)]
pub fn hold<S: seathold::ExpiryScheduler>(
    service: &TicketService<S>,
    n: usize,
    email: &str,
) -> SeatHold {
    service
        .find_and_hold_seats(n, email)
        .unwrap()
        .into_hold()
        .unwrap_or_else(|| panic!("expected room for {n} seats"))
}

/// Status of one seat right now.
#[allow(dead_code)]
pub fn status_of<S: seathold::ExpiryScheduler>(
    service: &TicketService<S>,
    row: usize,
    index: usize,
) -> SeatStatus {
    service.venue_status().seat(row, index).unwrap()
}

/// Polls `condition` until it holds or a generous deadline passes.
#[allow(dead_code)]
pub fn eventually(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(10));
    }
    condition()
}

/// Sleeps comfortably past [`SHORT_TIMEOUT`].
#[allow(dead_code)]
pub fn wait_past_timeout() {
    thread::sleep(SHORT_TIMEOUT * 3);
}
