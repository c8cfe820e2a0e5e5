//! Storage abstraction for the booking core.
//!
//! [`BookingStore`] is the seam between the lifecycle engine and a concrete
//! repository. The library ships two implementations: [`crate::Database`]
//! (SQLite) for production use and [`MemoryStore`] for tests and embedding
//! without a database file.

mod memory;

pub use memory::MemoryStore;

use chrono::{DateTime, Utc};

use crate::booking::{Booking, BookingDraft, BookingId, BookingStatus, BookingWindow};
use crate::catalog::{Item, ItemId, User, UserId};
use crate::error::Result;
use crate::query::{Page, PageRequest, SortOrder, StatePredicate, Viewpoint};

/// Repository operations required by the booking lifecycle engine.
///
/// Implementations must uphold two contracts beyond the per-method
/// documentation:
///
/// * ids are assigned by the store, strictly increasing in creation order,
///   so ordering by id is ordering by creation time;
/// * [`insert_booking`](Self::insert_booking) re-checks the overlap
///   condition atomically with the insert, so two racing inserts for the
///   same item can never both succeed with conflicting windows.
pub trait BookingStore {
    /// Registers a user and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] if the email is already
    /// registered, or a store error.
    fn create_user(&mut self, name: &str, email: &str) -> Result<User>;

    /// Registers an item owned by `owner` and returns it with its id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UserNotFound`] if the owner does not exist,
    /// or a store error.
    fn create_item(&mut self, owner: UserId, name: &str, available: bool) -> Result<Item>;

    /// Looks up a user by id.
    ///
    /// # Errors
    ///
    /// Returns a store error on infrastructure failure. An absent user is
    /// `Ok(None)`, not an error.
    fn find_user(&self, id: UserId) -> Result<Option<User>>;

    /// Returns whether a user with the given id exists.
    ///
    /// # Errors
    ///
    /// Returns a store error on infrastructure failure.
    fn user_exists(&self, id: UserId) -> Result<bool> {
        Ok(self.find_user(id)?.is_some())
    }

    /// Looks up an item by id.
    ///
    /// # Errors
    ///
    /// Returns a store error on infrastructure failure.
    fn find_item(&self, id: ItemId) -> Result<Option<Item>>;

    /// Persists a new booking in `WAITING` status and returns it.
    ///
    /// The overlap condition is re-verified atomically with the insert.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OverlappingBooking`] if a conflicting
    /// booking appeared since the caller's own check, or a store error.
    fn insert_booking(&mut self, draft: &BookingDraft) -> Result<Booking>;

    /// Looks up a booking by id.
    ///
    /// # Errors
    ///
    /// Returns a store error on infrastructure failure.
    fn find_booking(&self, id: BookingId) -> Result<Option<Booking>>;

    /// Updates a booking's status and returns the updated booking.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::BookingNotFound`] if the booking does not
    /// exist, or a store error.
    fn set_booking_status(&mut self, id: BookingId, status: BookingStatus) -> Result<Booking>;

    /// Returns whether any booking for `item` overlaps the window.
    ///
    /// All bookings participate regardless of status.
    ///
    /// # Errors
    ///
    /// Returns a store error on infrastructure failure.
    fn has_overlapping_booking(&self, item: ItemId, window: &BookingWindow) -> Result<bool>;

    /// Lists bookings visible from a viewpoint, filtered and paginated.
    ///
    /// With [`Viewpoint::Booker`] the subject is the booker; with
    /// [`Viewpoint::Owner`] the subject owns the booked items. Results are
    /// ordered by id per `order` and sliced per `page`.
    ///
    /// # Errors
    ///
    /// Returns a store error on infrastructure failure.
    fn list_bookings(
        &self,
        subject: UserId,
        viewpoint: Viewpoint,
        predicate: &StatePredicate,
        order: SortOrder,
        page: &PageRequest,
    ) -> Result<Page<Booking>>;

    /// Returns whether `booker` has at least one booking of `item` whose
    /// window ended before `before`.
    ///
    /// Status is deliberately not consulted.
    ///
    /// # Errors
    ///
    /// Returns a store error on infrastructure failure.
    fn has_completed_booking(
        &self,
        booker: UserId,
        item: ItemId,
        before: DateTime<Utc>,
    ) -> Result<bool>;

    /// Returns the most recent approved booking of `item` that started
    /// strictly before `now`, preferring the latest end instant.
    ///
    /// # Errors
    ///
    /// Returns a store error on infrastructure failure.
    fn last_booking_for_item(&self, item: ItemId, now: DateTime<Utc>) -> Result<Option<Booking>>;

    /// Returns the soonest approved booking of `item` that starts strictly
    /// after `now`.
    ///
    /// # Errors
    ///
    /// Returns a store error on infrastructure failure.
    fn next_booking_for_item(&self, item: ItemId, now: DateTime<Utc>) -> Result<Option<Booking>>;
}
