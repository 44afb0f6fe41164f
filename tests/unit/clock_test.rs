//! Tests for clocks and owner-thread checks

use std::thread;
use std::time::Duration;

use deferred_callbacks::util::{Clock, ManualClock, OwnerCheck, OwnerThread, SystemClock, Timestamp};

#[test]
fn test_timestamp_ordering() {
    let a = Timestamp::from_secs(1.0);
    let b = Timestamp::from_secs(2.0);
    assert!(a < b);
    assert_eq!(a.offset_secs(1.0), b);
    assert_eq!(b.saturating_duration_since(a), Duration::from_secs(1));
    assert_eq!(a.saturating_duration_since(b), Duration::ZERO);
}

#[test]
fn test_system_clock_advances() {
    let clock = SystemClock;
    let before = clock.now();
    thread::sleep(Duration::from_millis(5));
    assert!(clock.now().diff_secs(before) >= 0.005);
    assert_eq!(clock.sleep_interval(Duration::from_millis(7)), Duration::from_millis(7));
}

#[test]
fn test_manual_clock_advance_and_set() {
    let clock = ManualClock::starting_at(Timestamp::from_secs(10.0));
    clock.advance(2.5);
    assert_eq!(clock.now(), Timestamp::from_secs(12.5));

    clock.set(Timestamp::from_secs(1.0));
    assert_eq!(clock.now(), Timestamp::from_secs(1.0));
    assert!(clock.sleeps().is_empty());
}

#[test]
fn test_owner_thread_from_id() {
    let here = OwnerThread::current();
    let elsewhere = thread::spawn(OwnerThread::current).join().unwrap();

    assert!(here.is_owner());
    assert!(!elsewhere.is_owner());
    assert_eq!(OwnerThread::from_id(elsewhere.id()), elsewhere);
}
