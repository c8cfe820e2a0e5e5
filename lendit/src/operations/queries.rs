//! Read-side booking operations.
//!
//! Unlike creation and decisions, queries need no plan: they validate the
//! caller, capture "now" once, and delegate to the store. Everything here
//! is visibility-checked; raw store access stays behind [`BookingStore`].

use chrono::{DateTime, Utc};
use log::debug;

use crate::booking::{Booking, BookingId};
use crate::catalog::{ItemId, UserId};
use crate::error::{Error, Result};
use crate::query::{classify, BookingState, Page, PageRequest, Viewpoint};
use crate::store::BookingStore;

/// Fetches a booking by id, visible only to its booker or the item owner.
///
/// # Errors
///
/// Returns [`Error::BookingNotFound`] if the booking does not exist, or
/// [`Error::UnauthorizedAccess`] if the caller is neither the booker nor
/// the owner of the booked item.
pub fn booking_by_id<S: BookingStore>(
    store: &S,
    id: BookingId,
    caller: UserId,
) -> Result<Booking> {
    let booking = store
        .find_booking(id)?
        .ok_or(Error::BookingNotFound { id })?;

    if booking.booker() != caller && booking.owner() != caller {
        debug!("denying view of booking {id} to user {caller}");
        return Err(Error::UnauthorizedAccess {
            details: format!("user {caller} is neither booker nor owner of booking {id}"),
        });
    }

    Ok(booking)
}

/// Lists a user's bookings for a symbolic state, paginated.
///
/// Captures the current instant once, so every time-based comparison in
/// the query sees the same "now".
///
/// # Errors
///
/// Returns [`Error::UserNotFound`] if the subject does not exist, or a
/// store error.
pub fn bookings_for_viewpoint<S: BookingStore>(
    store: &S,
    subject: UserId,
    viewpoint: Viewpoint,
    state: BookingState,
    page: &PageRequest,
) -> Result<Page<Booking>> {
    bookings_for_viewpoint_at(store, subject, viewpoint, state, page, Utc::now())
}

/// Like [`bookings_for_viewpoint`], with an explicit "now" instant.
///
/// # Errors
///
/// Returns [`Error::UserNotFound`] if the subject does not exist, or a
/// store error.
pub fn bookings_for_viewpoint_at<S: BookingStore>(
    store: &S,
    subject: UserId,
    viewpoint: Viewpoint,
    state: BookingState,
    page: &PageRequest,
    now: DateTime<Utc>,
) -> Result<Page<Booking>> {
    if !store.user_exists(subject)? {
        return Err(Error::UserNotFound { id: subject });
    }

    let (predicate, order) = classify(state, viewpoint, now);
    debug!("listing {state} bookings for user {subject} ({viewpoint:?})");
    store.list_bookings(subject, viewpoint, &predicate, order, page)
}

/// Returns whether `booker` completed a booking of `item` before now.
///
/// Gates review-style features: a user may only comment on an item they
/// actually held. Status is not consulted, matching the calendar rules.
///
/// # Errors
///
/// Returns a store error on infrastructure failure.
pub fn has_completed_booking<S: BookingStore>(
    store: &S,
    booker: UserId,
    item: ItemId,
) -> Result<bool> {
    store.has_completed_booking(booker, item, Utc::now())
}

/// Returns the latest approved booking of `item` that has already started.
///
/// # Errors
///
/// Returns [`Error::ItemNotFound`] if the item does not exist, or a
/// store error.
pub fn last_booking_for_item<S: BookingStore>(
    store: &S,
    item: ItemId,
) -> Result<Option<Booking>> {
    if store.find_item(item)?.is_none() {
        return Err(Error::ItemNotFound { id: item });
    }
    store.last_booking_for_item(item, Utc::now())
}

/// Returns the soonest approved booking of `item` that has not started yet.
///
/// # Errors
///
/// Returns [`Error::ItemNotFound`] if the item does not exist, or a
/// store error.
pub fn next_booking_for_item<S: BookingStore>(
    store: &S,
    item: ItemId,
) -> Result<Option<Booking>> {
    if store.find_item(item)?.is_none() {
        return Err(Error::ItemNotFound { id: item });
    }
    store.next_booking_for_item(item, Utc::now())
}
