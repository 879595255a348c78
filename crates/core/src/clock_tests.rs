// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::TimeZone;

#[test]
fn system_clock_does_not_go_backwards() {
    let clock = SystemClock;
    let t1 = clock.now();
    let t2 = clock.now();
    assert!(t2 >= t1);
}

#[test]
fn fake_clock_is_frozen_until_advanced() {
    let start = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let clock = FakeClock::at(start);
    assert_eq!(clock.now(), start);

    clock.advance(Duration::from_secs(60));
    assert_eq!(clock.now(), start + chrono::Duration::seconds(60));
}

#[test]
fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::new();
    let clock2 = clock1.clone();
    let t1 = clock1.now();
    clock2.advance(Duration::from_secs(30));
    assert_eq!(clock1.now() - t1, chrono::Duration::seconds(30));
}

#[test]
fn fake_clock_can_be_set() {
    let clock = FakeClock::new();
    let target = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
    clock.set(target);
    assert_eq!(clock.now(), target);
}
