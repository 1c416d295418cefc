#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # seathold
//!
//! A library for leasing venue seats under contention.
//!
//! Callers first place a temporary, exclusive hold on the best block of
//! consecutive seats in one row. The hold either becomes a permanent
//! reservation before its timeout or expires and returns its seats to the
//! pool. All state sits behind one lock, so concurrent requests never
//! double-book a seat or lose one.
//!
//! ## Core Types
//!
//! - [`TicketService`]: the thread-safe entry points
//! - [`Venue`], [`SeatId`] and [`SeatStatus`]: the seat grid
//! - [`SeatHold`] and [`HoldId`]: outstanding holds
//! - [`HoldOutcome`], [`ReserveOutcome`] and [`ExpiryOutcome`]: results of
//!   each operation
//! - [`ExpiryScheduler`]: the seam between holds and the clock
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use seathold::{HoldRejection, ManualScheduler, ServiceSettings, TicketService};
//!
//! let service = TicketService::with_scheduler(ServiceSettings::default(), ManualScheduler::new());
//! assert_eq!(service.num_seats_available(), 16);
//!
//! // No row of a 4x4 venue fits five seats
//! let outcome = service.find_and_hold_seats(5, "fan@example.com").unwrap();
//! assert_eq!(
//!     outcome.rejection(),
//!     Some(HoldRejection::ConsecutiveUnavailable { requested: 5 })
//! );
//!
//! let hold = service.find_and_hold_seats(4, "fan@example.com").unwrap().into_hold().unwrap();
//! assert_eq!(hold.row(), 0);
//! assert_eq!(service.num_seats_available(), 12);
//! ```

pub mod config;
pub mod error;
pub mod hold;
pub mod logging;
pub mod outcome;
pub mod scheduler;
pub mod seat;
pub mod service;
pub mod venue;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use hold::{HoldId, HoldIdGenerator, HoldLedger, SeatHold};
pub use logging::{init_logger, LogLevel, Logger};
pub use outcome::{ExpiryOutcome, HoldOutcome, HoldRejection, ReserveOutcome};
pub use scheduler::{ExpiryScheduler, ExpiryTask, ManualScheduler, TimerScheduler};
pub use seat::{Seat, SeatId, SeatStatus};
pub use service::{ServiceSettings, TicketService};
pub use venue::{
    select_block, Row, SeatBlock, SeatCounts, StatusCodes, Venue, VenueDimensions, VenueSnapshot,
};
