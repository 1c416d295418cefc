//! Concurrency tests: many threads racing for the same seats.

mod common;

use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use common::{manual_service, timed_service_sized};
use seathold::{HoldOutcome, ReserveOutcome, SeatId};

#[test]
fn test_no_seat_is_held_twice() {
    let service = Arc::new(timed_service_sized(10, 10, Duration::from_secs(60)));
    let barrier = Arc::new(Barrier::new(16));

    let handles: Vec<_> = (0..16)
        .map(|t| {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mut seats = Vec::new();
                for i in 0..10 {
                    let n = 1 + (t + i) % 4;
                    if let HoldOutcome::Held(hold) = service
                        .find_and_hold_seats(n, &format!("t{t}@x.com"))
                        .unwrap()
                    {
                        seats.extend_from_slice(hold.seats());
                    }
                }
                seats
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for seat in handle.join().unwrap() {
            assert!(seen.insert(seat), "{seat} handed out twice");
        }
    }

    let counts = service.venue_status().counts();
    assert_eq!(counts.on_hold, seen.len());
    assert_eq!(service.num_seats_available(), 100 - seen.len());
}

#[test]
fn test_reserve_and_expire_race_has_one_winner() {
    for _ in 0..50 {
        let service = Arc::new(manual_service());
        let id = common::hold(&*service, 3, "a@x.com").id();
        let barrier = Arc::new(Barrier::new(2));

        let reserver = {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                service.reserve_seats(id, "a@x.com").unwrap()
            })
        };
        let expirer = {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                service.expire_hold(id)
            })
        };

        let reserved = reserver.join().unwrap();
        let expired = expirer.join().unwrap();
        assert_ne!(
            reserved.is_reserved(),
            expired.released(),
            "exactly one of reserve and expiry must win"
        );

        let counts = service.venue_status().counts();
        if reserved.is_reserved() {
            assert_eq!(counts.reserved, 3);
            assert_eq!(service.num_seats_available(), 13);
        } else {
            assert_eq!(reserved, ReserveOutcome::HoldNotFound { hold_id: id });
            assert_eq!(counts.reserved, 0);
            assert_eq!(service.num_seats_available(), 16);
        }
        assert_eq!(counts.on_hold, 0);
    }
}

#[test]
fn test_readers_see_consistent_counts() {
    let service = Arc::new(timed_service_sized(6, 6, Duration::from_millis(20)));
    let writers: Vec<_> = (0..4)
        .map(|t| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for i in 0..50 {
                    let email = format!("w{t}@x.com");
                    if let Some(hold) = service
                        .find_and_hold_seats(1 + i % 3, &email)
                        .unwrap()
                        .into_hold()
                    {
                        if i % 2 == 0 {
                            service.reserve_seats(hold.id(), &email).unwrap();
                        }
                    }
                }
            })
        })
        .collect();

    let reader = {
        let service = Arc::clone(&service);
        thread::spawn(move || {
            for _ in 0..200 {
                let snapshot = service.venue_status();
                let counts = snapshot.counts();
                assert_eq!(counts.total(), 36);
                assert_eq!(snapshot.codes().count(), 36);
            }
        })
    };

    for writer in writers {
        writer.join().unwrap();
    }
    reader.join().unwrap();

    let counts = service.venue_status().counts();
    assert_eq!(service.num_seats_available(), 36 - counts.on_hold - counts.reserved);
}

#[test]
fn test_only_one_thread_gets_the_last_block() {
    for _ in 0..20 {
        let service = Arc::new(timed_service_sized(1, 4, Duration::from_secs(60)));
        let barrier = Arc::new(Barrier::new(8));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let service = Arc::clone(&service);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    service
                        .find_and_hold_seats(4, &format!("t{t}@x.com"))
                        .unwrap()
                        .into_hold()
                })
            })
            .collect();

        let winners: Vec<_> = handles
            .into_iter()
            .filter_map(|h| h.join().unwrap())
            .collect();
        assert_eq!(winners.len(), 1);
        assert_eq!(
            winners[0].seats(),
            &[
                SeatId::new(0, 0),
                SeatId::new(0, 1),
                SeatId::new(0, 2),
                SeatId::new(0, 3)
            ]
        );
    }
}
