//! In-memory booking store.
//!
//! Backs tests and lightweight embedding. Mirrors the SQLite store's
//! observable behavior, including id assignment order and the atomic
//! overlap re-check on insert (trivially atomic under `&mut self`).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use log::debug;

use crate::booking::{Booking, BookingDraft, BookingId, BookingStatus, BookingWindow};
use crate::catalog::{Item, ItemId, User, UserId};
use crate::error::{Error, Result};
use crate::query::{Page, PageRequest, SortOrder, StatePredicate, Viewpoint};
use crate::store::BookingStore;

/// An in-memory [`BookingStore`] implementation.
///
/// # Examples
///
/// ```
/// use lendit::{BookingStore, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// let owner = store.create_user("Ada", "ada@example.com").unwrap();
/// let item = store.create_item(owner.id(), "drill", true).unwrap();
/// assert!(item.available());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: BTreeMap<i64, User>,
    items: BTreeMap<i64, Item>,
    bookings: BTreeMap<i64, Booking>,
    next_user_id: i64,
    next_item_id: i64,
    next_booking_id: i64,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: BTreeMap::new(),
            items: BTreeMap::new(),
            bookings: BTreeMap::new(),
            next_user_id: 1,
            next_item_id: 1,
            next_booking_id: 1,
        }
    }

    fn bookings_for_subject(&self, subject: UserId, viewpoint: Viewpoint) -> Vec<&Booking> {
        self.bookings
            .values()
            .filter(|b| match viewpoint {
                Viewpoint::Booker => b.booker() == subject,
                Viewpoint::Owner => b.owner() == subject,
            })
            .collect()
    }
}

impl BookingStore for MemoryStore {
    fn create_user(&mut self, name: &str, email: &str) -> Result<User> {
        if self.users.values().any(|u| u.email() == email) {
            return Err(Error::Validation {
                field: "email".to_string(),
                message: format!("email '{email}' is already registered"),
            });
        }
        let id = self.next_user_id;
        self.next_user_id += 1;
        let user = User::from_parts(UserId::new(id), name.to_string(), email.to_string());
        self.users.insert(id, user.clone());
        Ok(user)
    }

    fn create_item(&mut self, owner: UserId, name: &str, available: bool) -> Result<Item> {
        if !self.users.contains_key(&owner.value()) {
            return Err(Error::UserNotFound { id: owner });
        }
        let id = self.next_item_id;
        self.next_item_id += 1;
        let item = Item::from_parts(ItemId::new(id), owner, name.to_string(), available);
        self.items.insert(id, item.clone());
        Ok(item)
    }

    fn find_user(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.users.get(&id.value()).cloned())
    }

    fn find_item(&self, id: ItemId) -> Result<Option<Item>> {
        Ok(self.items.get(&id.value()).cloned())
    }

    fn insert_booking(&mut self, draft: &BookingDraft) -> Result<Booking> {
        if self.has_overlapping_booking(draft.item, &draft.window)? {
            return Err(Error::OverlappingBooking { item: draft.item });
        }
        let id = self.next_booking_id;
        self.next_booking_id += 1;
        let booking = Booking::from_parts(
            BookingId::new(id),
            draft.item,
            draft.owner,
            draft.booker,
            draft.window,
            BookingStatus::Waiting,
        );
        self.bookings.insert(id, booking.clone());
        debug!("inserted booking {id} for item {}", draft.item);
        Ok(booking)
    }

    fn find_booking(&self, id: BookingId) -> Result<Option<Booking>> {
        Ok(self.bookings.get(&id.value()).cloned())
    }

    fn set_booking_status(&mut self, id: BookingId, status: BookingStatus) -> Result<Booking> {
        let booking = self
            .bookings
            .get(&id.value())
            .ok_or(Error::BookingNotFound { id })?;
        let updated = Booking::from_parts(
            booking.id(),
            booking.item(),
            booking.owner(),
            booking.booker(),
            *booking.window(),
            status,
        );
        self.bookings.insert(id.value(), updated.clone());
        Ok(updated)
    }

    fn has_overlapping_booking(&self, item: ItemId, window: &BookingWindow) -> Result<bool> {
        Ok(self
            .bookings
            .values()
            .any(|b| b.item() == item && b.window().overlaps(window)))
    }

    fn list_bookings(
        &self,
        subject: UserId,
        viewpoint: Viewpoint,
        predicate: &StatePredicate,
        order: SortOrder,
        page: &PageRequest,
    ) -> Result<Page<Booking>> {
        let mut matched: Vec<&Booking> = self
            .bookings_for_subject(subject, viewpoint)
            .into_iter()
            .filter(|b| predicate.matches(b))
            .collect();

        // BTreeMap iteration is already ascending by id.
        if order == SortOrder::Descending {
            matched.reverse();
        }

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let fetch = usize::try_from(page.page_size()).unwrap_or(usize::MAX - 1) + 1;
        let fetched: Vec<Booking> = matched
            .into_iter()
            .skip(offset)
            .take(fetch)
            .cloned()
            .collect();

        Ok(Page::from_fetched(fetched, page))
    }

    fn has_completed_booking(
        &self,
        booker: UserId,
        item: ItemId,
        before: DateTime<Utc>,
    ) -> Result<bool> {
        Ok(self
            .bookings
            .values()
            .any(|b| b.booker() == booker && b.item() == item && b.window().end() < before))
    }

    fn last_booking_for_item(&self, item: ItemId, now: DateTime<Utc>) -> Result<Option<Booking>> {
        Ok(self
            .bookings
            .values()
            .filter(|b| {
                b.item() == item
                    && b.status() == BookingStatus::Approved
                    && b.window().start() < now
            })
            .max_by_key(|b| b.window().end())
            .cloned())
    }

    fn next_booking_for_item(&self, item: ItemId, now: DateTime<Utc>) -> Result<Option<Booking>> {
        Ok(self
            .bookings
            .values()
            .filter(|b| {
                b.item() == item
                    && b.status() == BookingStatus::Approved
                    && b.window().start() > now
            })
            .min_by_key(|b| b.window().start())
            .cloned())
    }
}
