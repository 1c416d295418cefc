//! Property-based tests for random operation sequences on the service.

use std::collections::HashSet;

use super::*;
use crate::scheduler::ManualScheduler;
use crate::seat::SeatStatus;
use proptest::prelude::*;

const EMAILS: [&str; 3] = ["a@example.com", "b@example.com", "c@example.com"];

#[derive(Debug, Clone)]
enum Op {
    Hold { seats: usize, who: usize },
    Reserve { pick: usize, who: usize },
    Expire { pick: usize },
    ExpireAll,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (1usize..=6, 0usize..3).prop_map(|(seats, who)| Op::Hold { seats, who }),
        3 => (0usize..32, 0usize..3).prop_map(|(pick, who)| Op::Reserve { pick, who }),
        2 => (0usize..32).prop_map(|pick| Op::Expire { pick }),
        1 => Just(Op::ExpireAll),
    ]
}

/// Picks one of the ids issued so far, including settled ones.
fn issued(ids: &[HoldId], pick: usize) -> HoldId {
    if ids.is_empty() {
        HoldId::new(1)
    } else {
        ids[pick % ids.len()]
    }
}

fn check_invariants(
    service: &TicketService<ManualScheduler>,
) -> std::result::Result<(), TestCaseError> {
    let office = service.office.lock();
    prop_assert!(office.venue().check_consistency().is_ok());

    let counts = office.snapshot().counts();
    let dims = service.dimensions();
    prop_assert_eq!(counts.total(), dims.capacity());
    prop_assert_eq!(office.available(), counts.available);
    prop_assert_eq!(office.ledger().seats_on_hold(), counts.on_hold);

    // Every held seat belongs to exactly one hold and carries its email
    let mut seen = HashSet::new();
    for hold in office.ledger().iter() {
        for &seat in hold.seats() {
            prop_assert!(seen.insert(seat), "seat {} held twice", seat);
            let seat = office.venue().seat(seat).unwrap();
            prop_assert_eq!(seat.status(), SeatStatus::OnHold);
            prop_assert_eq!(seat.holder(), Some(hold.email()));
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    // Availability, ledger and grid agree after every operation
    #[test]
    fn operations_preserve_invariants(ops in prop::collection::vec(op(), 1..60)) {
        let settings = ServiceSettings::new(3, 5, Duration::from_secs(60)).unwrap();
        let service = TicketService::with_scheduler(settings, ManualScheduler::new());
        let mut ids = Vec::new();
        let mut reserved = 0;

        for op in ops {
            match op {
                Op::Hold { seats, who } => {
                    let before = service.num_seats_available();
                    match service.find_and_hold_seats(seats, EMAILS[who]).unwrap() {
                        HoldOutcome::Held(hold) => {
                            prop_assert!(ids.last().map_or(true, |last| hold.id() > *last));
                            prop_assert_eq!(service.num_seats_available(), before - seats);
                            ids.push(hold.id());
                        }
                        HoldOutcome::Rejected(_) => {
                            prop_assert_eq!(service.num_seats_available(), before);
                        }
                    }
                }
                Op::Reserve { pick, who } => {
                    let id = issued(&ids, pick);
                    let before = service.num_seats_available();
                    if let ReserveOutcome::Reserved { seats, .. } =
                        service.reserve_seats(id, EMAILS[who]).unwrap()
                    {
                        reserved += seats.len();
                        prop_assert!(service.hold(id).is_none());
                    }
                    prop_assert_eq!(service.num_seats_available(), before);
                }
                Op::Expire { pick } => {
                    let id = issued(&ids, pick);
                    service.expire_hold(id);
                    prop_assert!(service.hold(id).is_none());
                }
                Op::ExpireAll => {
                    service.scheduler().fire_all();
                    prop_assert!(service.active_holds().is_empty());
                }
            }
            check_invariants(&service)?;
            prop_assert_eq!(service.venue_status().counts().reserved, reserved);
        }
    }

    // Expiring everything returns every unreserved seat
    #[test]
    fn expiring_all_restores_unreserved_seats(ops in prop::collection::vec(op(), 1..40)) {
        let service = TicketService::with_scheduler(ServiceSettings::default(), ManualScheduler::new());
        let mut ids = Vec::new();
        for op in ops {
            match op {
                Op::Hold { seats, who } => {
                    if let Some(hold) = service.find_and_hold_seats(seats, EMAILS[who]).unwrap().into_hold() {
                        ids.push(hold.id());
                    }
                }
                Op::Reserve { pick, who } => {
                    service.reserve_seats(issued(&ids, pick), EMAILS[who]).unwrap();
                }
                Op::Expire { .. } | Op::ExpireAll => {}
            }
        }
        service.scheduler().fire_all();
        let counts = service.venue_status().counts();
        prop_assert_eq!(counts.on_hold, 0);
        prop_assert_eq!(service.num_seats_available(), 16 - counts.reserved);
    }
}
