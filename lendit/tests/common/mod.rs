//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for testing
//! the lendit library against both store implementations.

use chrono::{DateTime, Duration, TimeZone, Utc};

use lendit::database::{Database, DatabaseConfig};
use lendit::{Booking, BookingDraft, BookingStore, BookingWindow, Item, User};

/// Creates a test database in a temporary location.
///
/// The backing directory is leaked for the lifetime of the test process so
/// the database file outlives this function.
#[allow(dead_code)]
pub fn create_test_database() -> Database {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).expect("should open test database");
    std::mem::forget(dir);
    db
}

/// A fixed reference instant away from any window boundary used in tests.
#[allow(dead_code)]
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 15, 12, 0, 0).unwrap()
}

/// Builds a window offset in whole days from [`reference_now`].
///
/// Negative offsets produce past windows, positive ones future windows.
///
/// # Panics
///
/// Panics if `start_days >= end_days`.
#[allow(dead_code)]
pub fn window_days(start_days: i64, end_days: i64) -> BookingWindow {
    let base = reference_now();
    BookingWindow::new(
        base + Duration::days(start_days),
        base + Duration::days(end_days),
    )
    .expect("fixture windows must be ordered")
}

/// Seeds a store with an owner, a booker, and one available item.
#[allow(dead_code)]
pub fn seed_catalog<S: BookingStore>(store: &mut S) -> (User, User, Item) {
    let owner = store
        .create_user("Owner", "owner@example.com")
        .expect("should create owner");
    let booker = store
        .create_user("Booker", "booker@example.com")
        .expect("should create booker");
    let item = store
        .create_item(owner.id(), "drill", true)
        .expect("should create item");
    (owner, booker, item)
}

/// Inserts a waiting booking of `item` by `booker` over the given window.
#[allow(dead_code)]
pub fn insert_booking<S: BookingStore>(
    store: &mut S,
    item: &Item,
    booker: &User,
    window: BookingWindow,
) -> Booking {
    store
        .insert_booking(&BookingDraft {
            item: item.id(),
            owner: item.owner(),
            booker: booker.id(),
            window,
        })
        .expect("fixture booking should insert")
}
