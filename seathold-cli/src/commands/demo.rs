//! Demo command implementation.
//!
//! Runs a fixed sequence of booking scenarios against a fresh venue and
//! prints the seat matrix after each step. Scenarios that wait for expiry
//! sleep for the hold timeout plus a grace period.

use std::io::{self, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Args;
use seathold::{HoldOutcome, TicketService};

use crate::error::CliError;
use crate::utils::{build_service, describe_hold, load_configuration, write_venue, GlobalOptions};

const RULE: &str = "*****************************************************";

/// Walk through the standard booking scenarios.
#[derive(Args)]
pub struct DemoCommand {
    /// Extra wait past the hold timeout before checking expiry (in milliseconds)
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    pub grace_ms: u64,
}

impl DemoCommand {
    /// Execute the demo command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let service = Arc::new(build_service(&config)?);
        let wait = service.hold_timeout() + Duration::from_millis(self.grace_ms);

        let stdout = io::stdout();
        let mut demo = Demo {
            service,
            wait,
            out: stdout.lock(),
        };
        demo.run()
    }
}

struct Demo<W> {
    service: Arc<TicketService>,
    wait: Duration,
    out: W,
}

impl<W: Write> Demo<W> {
    fn run(&mut self) -> Result<(), CliError> {
        self.initial_state()?;
        self.over_booking()?;
        self.no_consecutive_block()?;
        self.hold_and_reserve()?;
        self.hold_until_expiry()?;
        self.next_row()?;
        self.best_available()?;
        self.concurrent_holders()?;
        Ok(())
    }

    fn initial_state(&mut self) -> Result<(), CliError> {
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out, "Seat states: A available, O on hold, R reserved")?;
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out, "Freshly opened venue:")?;
        self.show()?;
        self.end()
    }

    fn over_booking(&mut self) -> Result<(), CliError> {
        let requested = self.service.dimensions().capacity() + 1;
        self.begin(&format!(
            "Scenario: user1 asks for {requested} seats, more than the venue holds"
        ))?;
        let outcome = self.service.find_and_hold_seats(requested, "user1@example.com")?;
        self.report(&outcome)?;
        self.end()
    }

    fn no_consecutive_block(&mut self) -> Result<(), CliError> {
        let requested = self.service.dimensions().cols + 1;
        self.begin(&format!(
            "Scenario: user2 asks for {requested} seats, more than fit in one row"
        ))?;
        let outcome = self.service.find_and_hold_seats(requested, "user2@example.com")?;
        self.report(&outcome)?;
        self.end()
    }

    fn hold_and_reserve(&mut self) -> Result<(), CliError> {
        let n = self.party_size();
        self.begin(&format!("Scenario: user3 holds and reserves {n} seats"))?;
        self.hold_then_reserve(n, "user3@example.com")?;
        self.show()?;
        self.end()
    }

    fn hold_until_expiry(&mut self) -> Result<(), CliError> {
        let n = self.party_size();
        self.begin(&format!(
            "Scenario: user4 holds {n} seats and never reserves; they return to the pool after the timeout"
        ))?;
        let outcome = self.service.find_and_hold_seats(n, "user4@example.com")?;
        self.report(&outcome)?;
        writeln!(self.out, "Before the timeout:")?;
        self.show()?;

        self.sleep();
        if let Some(hold) = outcome.hold() {
            let late = self.service.reserve_seats(hold.id(), "user4@example.com")?;
            writeln!(self.out, "Message to user4: {}", late.message())?;
        }
        writeln!(self.out, "After the timeout:")?;
        self.show()?;
        self.end()
    }

    fn next_row(&mut self) -> Result<(), CliError> {
        self.begin("Scenario: front rows are searched first, but a broken row pushes a party back")?;
        writeln!(self.out, "user5 holds 1 seat and never reserves")?;
        let outcome = self.service.find_and_hold_seats(1, "user5@example.com")?;
        self.report(&outcome)?;
        writeln!(self.out, "user6 holds and reserves 1 seat")?;
        self.hold_then_reserve(1, "user6@example.com")?;
        writeln!(self.out, "Before the timeout:")?;
        self.show()?;

        self.sleep();
        writeln!(self.out, "After the timeout:")?;
        self.show()?;
        writeln!(self.out, "user7 holds and reserves 2 seats")?;
        self.hold_then_reserve(2, "user7@example.com")?;
        self.show()?;
        self.end()
    }

    fn best_available(&mut self) -> Result<(), CliError> {
        self.begin("Scenario: a released seat between reserved ones is the next best seat")?;
        writeln!(self.out, "user8 holds 1 seat and never reserves")?;
        let outcome = self.service.find_and_hold_seats(1, "user8@example.com")?;
        self.report(&outcome)?;
        writeln!(self.out, "user9 holds and reserves 1 seat")?;
        self.hold_then_reserve(1, "user9@example.com")?;
        writeln!(self.out, "Before the timeout:")?;
        self.show()?;

        self.sleep();
        writeln!(self.out, "After the timeout:")?;
        self.show()?;
        writeln!(self.out, "user10 holds and reserves 1 seat")?;
        self.hold_then_reserve(1, "user10@example.com")?;
        self.show()?;
        self.end()
    }

    fn concurrent_holders(&mut self) -> Result<(), CliError> {
        self.begin("Scenario: two threads hold 2 and 3 seats at the same time")?;
        let handles: Vec<_> = [(2, "user11@example.com"), (3, "user12@example.com")]
            .into_iter()
            .map(|(n, email)| {
                let service = Arc::clone(&self.service);
                thread::spawn(move || service.find_and_hold_seats(n, email))
            })
            .collect();

        for handle in handles {
            let outcome = handle
                .join()
                .map_err(|_| CliError::SemanticFailure("demo thread panicked".to_string()))??;
            self.report(&outcome)?;
        }
        writeln!(self.out, "Before the timeout:")?;
        self.show()?;

        self.sleep();
        writeln!(self.out, "After the timeout, both holds are released:")?;
        self.show()?;
        self.end()
    }

    fn hold_then_reserve(&mut self, n: usize, email: &str) -> Result<(), CliError> {
        let outcome = self.service.find_and_hold_seats(n, email)?;
        self.report(&outcome)?;
        if let Some(hold) = outcome.hold() {
            let reserved = self.service.reserve_seats(hold.id(), email)?;
            writeln!(self.out, "Message to {email}: {}", reserved.message())?;
        }
        Ok(())
    }

    fn report(&mut self, outcome: &HoldOutcome) -> Result<(), CliError> {
        match outcome {
            HoldOutcome::Held(hold) => writeln!(self.out, "Held {}", describe_hold(hold))?,
            HoldOutcome::Rejected(rejection) => {
                writeln!(self.out, "Error message: {rejection}")?;
            }
        }
        Ok(())
    }

    fn party_size(&self) -> usize {
        self.service.dimensions().cols.saturating_sub(2).max(1)
    }

    fn sleep(&self) {
        log::debug!("waiting {:?} for holds to expire", self.wait);
        thread::sleep(self.wait);
    }

    fn show(&mut self) -> Result<(), CliError> {
        let snapshot = self.service.venue_status();
        let available = self.service.num_seats_available();
        write_venue(&mut self.out, &snapshot, available)
    }

    fn begin(&mut self, title: &str) -> Result<(), CliError> {
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out, "{title}")?;
        Ok(())
    }

    fn end(&mut self) -> Result<(), CliError> {
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out)?;
        Ok(())
    }
}
