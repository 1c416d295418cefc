//! Property-based tests for the venue grid and block selection.

use super::{select_block, SeatBlock, Venue};
use crate::outcome::HoldRejection;
use crate::seat::{SeatId, SeatStatus};
use proptest::prelude::*;

const EMAIL: &str = "prop@example.com";

/// Venue dimensions plus one status per seat, row-major.
fn venue_layout() -> impl Strategy<Value = (usize, usize, Vec<SeatStatus>)> {
    (1usize..=6, 1usize..=8).prop_flat_map(|(rows, cols)| {
        let status = prop_oneof![
            3 => Just(SeatStatus::Available),
            1 => Just(SeatStatus::OnHold),
            1 => Just(SeatStatus::Reserved),
        ];
        (Just(rows), Just(cols), prop::collection::vec(status, rows * cols))
    })
}

fn build_venue(rows: usize, cols: usize, statuses: &[SeatStatus]) -> Venue {
    let mut venue = Venue::initialize(rows, cols).unwrap();
    for (offset, status) in statuses.iter().enumerate() {
        let seat = SeatId::new(offset / cols, offset % cols);
        match status {
            SeatStatus::Available => {}
            SeatStatus::OnHold => {
                venue.set_seat_status(seat, SeatStatus::OnHold, Some(EMAIL)).unwrap();
            }
            SeatStatus::Reserved => {
                venue.set_seat_status(seat, SeatStatus::OnHold, Some(EMAIL)).unwrap();
                venue.set_seat_status(seat, SeatStatus::Reserved, Some(EMAIL)).unwrap();
            }
        }
    }
    venue
}

/// Exhaustive first-fit search used as the oracle.
fn brute_force(venue: &Venue, len: usize) -> Option<SeatBlock> {
    let cols = venue.dimensions().cols;
    for row in venue.rows() {
        for start in 0..cols {
            if start + len > cols {
                break;
            }
            if row.seats()[start..start + len].iter().all(|s| s.is_available()) {
                return Some(SeatBlock {
                    row: row.id(),
                    start,
                    len,
                });
            }
        }
    }
    None
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Row caches always match the seats they summarise
    #[test]
    fn cache_matches_seats((rows, cols, statuses) in venue_layout()) {
        let venue = build_venue(rows, cols, &statuses);
        prop_assert!(venue.check_consistency().is_ok());

        let available = statuses.iter().filter(|s| **s == SeatStatus::Available).count();
        prop_assert_eq!(venue.total_available(), available);
        prop_assert_eq!(venue.snapshot().counts().available, available);
    }

    // The selector agrees with an exhaustive first-fit search
    #[test]
    fn selector_matches_oracle((rows, cols, statuses) in venue_layout(), len in 1usize..=10) {
        let venue = build_venue(rows, cols, &statuses);
        let result = select_block(&venue, len);

        if len > venue.total_available() {
            prop_assert_eq!(result, Err(HoldRejection::TooManyRequested { requested: len }));
        } else {
            match brute_force(&venue, len) {
                Some(block) => prop_assert_eq!(result, Ok(block)),
                None => prop_assert_eq!(
                    result,
                    Err(HoldRejection::ConsecutiveUnavailable { requested: len })
                ),
            }
        }
    }

    // A selected block is inside one row, in bounds and entirely available
    #[test]
    fn selected_block_is_valid((rows, cols, statuses) in venue_layout(), len in 1usize..=8) {
        let venue = build_venue(rows, cols, &statuses);
        if let Ok(block) = select_block(&venue, len) {
            prop_assert_eq!(block.len, len);
            prop_assert!(block.end() <= cols);
            for seat in block.seats() {
                prop_assert!(venue.seat(seat).unwrap().is_available());
            }
        }
    }

    // Holding then releasing a selected block restores the venue exactly
    #[test]
    fn hold_release_round_trip((rows, cols, statuses) in venue_layout(), len in 1usize..=8) {
        let original = build_venue(rows, cols, &statuses);
        let mut venue = original.clone();
        if let Ok(block) = select_block(&venue, len) {
            for seat in block.seats() {
                venue.set_seat_status(seat, SeatStatus::OnHold, Some(EMAIL)).unwrap();
            }
            prop_assert_eq!(venue.total_available(), original.total_available() - len);
            for seat in block.seats() {
                venue.set_seat_status(seat, SeatStatus::Available, None).unwrap();
            }
            prop_assert_eq!(venue, original);
        }
    }
}
