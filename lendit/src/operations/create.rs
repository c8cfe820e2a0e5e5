//! Booking creation planning.
//!
//! This module implements the precondition pipeline for new bookings. The
//! checks run in a fixed order so a request failing several of them always
//! reports the same error: booker existence, item existence, availability,
//! self-booking, overlap.

use chrono::Utc;
use log::{debug, info};

use crate::booking::{BookingDraft, BookingWindow};
use crate::catalog::{ItemId, UserId};
use crate::error::{Error, Result};
use crate::store::BookingStore;

use super::plan::{OperationPlan, PlanAction};

/// Options for a booking creation operation.
#[derive(Debug, Clone, Copy)]
pub struct CreateBookingOptions {
    /// The user requesting the booking.
    pub booker: UserId,

    /// The item to book.
    pub item: ItemId,

    /// The requested half-open time window.
    pub window: BookingWindow,
}

impl CreateBookingOptions {
    /// Creates options for booking `item` over `window` on behalf of
    /// `booker`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Duration, Utc};
    /// use lendit::operations::CreateBookingOptions;
    /// use lendit::{BookingWindow, ItemId, UserId};
    ///
    /// let start = Utc::now() + Duration::days(1);
    /// let window = BookingWindow::new(start, start + Duration::days(1)).unwrap();
    /// let options = CreateBookingOptions::new(UserId::new(2), ItemId::new(3), window);
    /// assert_eq!(options.item, ItemId::new(3));
    /// ```
    #[must_use]
    pub const fn new(booker: UserId, item: ItemId, window: BookingWindow) -> Self {
        Self {
            booker,
            item,
            window,
        }
    }
}

/// A booking creation plan generator.
///
/// This struct is responsible for analyzing a booking request and
/// generating a plan that describes what actions to take.
pub struct CreateBookingPlan {
    options: CreateBookingOptions,
}

impl CreateBookingPlan {
    /// Creates a new booking plan with the given options.
    #[must_use]
    pub const fn new(options: CreateBookingOptions) -> Self {
        Self { options }
    }

    /// Builds the plan by validating the request against the store.
    ///
    /// The preconditions are checked in order; the first failure wins:
    ///
    /// 1. the booker exists
    /// 2. the item exists
    /// 3. the item is available
    /// 4. the booker is not the item's owner
    /// 5. no existing booking overlaps the window (any status)
    ///
    /// # Errors
    ///
    /// Returns [`Error::UserNotFound`], [`Error::ItemNotFound`],
    /// [`Error::ItemNotAvailable`], [`Error::SelfBooking`], or
    /// [`Error::OverlappingBooking`] for the respective failed
    /// precondition, or a store error.
    pub fn build_plan<S: BookingStore>(&self, store: &S) -> Result<OperationPlan> {
        let opts = &self.options;
        debug!(
            "planning booking of item {} for user {} over {}",
            opts.item, opts.booker, opts.window
        );

        if !store.user_exists(opts.booker)? {
            return Err(Error::UserNotFound { id: opts.booker });
        }

        let item = store
            .find_item(opts.item)?
            .ok_or(Error::ItemNotFound { id: opts.item })?;

        if !item.available() {
            info!("rejecting booking: item {} is unavailable", opts.item);
            return Err(Error::ItemNotAvailable { id: opts.item });
        }

        if item.owner() == opts.booker {
            info!("rejecting booking: user {} owns item {}", opts.booker, opts.item);
            return Err(Error::SelfBooking { owner: opts.booker });
        }

        if store.has_overlapping_booking(opts.item, &opts.window)? {
            info!(
                "rejecting booking: item {} calendar conflicts with {}",
                opts.item, opts.window
            );
            return Err(Error::OverlappingBooking { item: opts.item });
        }

        let draft = BookingDraft {
            item: opts.item,
            owner: item.owner(),
            booker: opts.booker,
            window: opts.window,
        };

        let mut plan = OperationPlan::new(format!(
            "Book item {} for user {} over {}",
            opts.item, opts.booker, opts.window
        ))
        .add_action(PlanAction::CreateBooking(draft));

        if opts.window.start() < Utc::now() {
            plan = plan.add_warning(format!(
                "booking window {} starts in the past",
                opts.window
            ));
        }

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingStatus;
    use crate::catalog::{Item, User};
    use crate::operations::PlanExecutor;
    use crate::store::MemoryStore;
    use chrono::{DateTime, TimeZone, Utc};

    fn instant(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, day, 12, 0, 0).unwrap()
    }

    fn window(start_day: u32, end_day: u32) -> BookingWindow {
        BookingWindow::new(instant(start_day), instant(end_day)).unwrap()
    }

    fn setup() -> (MemoryStore, User, User, Item) {
        let mut store = MemoryStore::new();
        let owner = store.create_user("Owner", "owner@example.com").unwrap();
        let booker = store.create_user("Booker", "booker@example.com").unwrap();
        let item = store.create_item(owner.id(), "drill", true).unwrap();
        (store, owner, booker, item)
    }

    #[test]
    fn test_plan_happy_path() {
        let (store, _, booker, item) = setup();
        let options = CreateBookingOptions::new(booker.id(), item.id(), window(1, 2));

        let plan = CreateBookingPlan::new(options).build_plan(&store).unwrap();
        assert_eq!(plan.len(), 1);
        assert!(plan.warnings.is_empty());
        assert!(matches!(plan.actions[0], PlanAction::CreateBooking(_)));
    }

    #[test]
    fn test_plan_unknown_booker() {
        let (store, _, _, item) = setup();
        let options = CreateBookingOptions::new(UserId::new(99), item.id(), window(1, 2));

        let err = CreateBookingPlan::new(options).build_plan(&store).unwrap_err();
        assert!(matches!(err, Error::UserNotFound { id } if id == UserId::new(99)));
    }

    #[test]
    fn test_plan_unknown_item() {
        let (store, _, booker, _) = setup();
        let options = CreateBookingOptions::new(booker.id(), ItemId::new(42), window(1, 2));

        let err = CreateBookingPlan::new(options).build_plan(&store).unwrap_err();
        assert!(matches!(err, Error::ItemNotFound { id } if id == ItemId::new(42)));
    }

    #[test]
    fn test_plan_unavailable_item() {
        let (mut store, owner, booker, _) = setup();
        let broken = store.create_item(owner.id(), "broken saw", false).unwrap();
        let options = CreateBookingOptions::new(booker.id(), broken.id(), window(1, 2));

        let err = CreateBookingPlan::new(options).build_plan(&store).unwrap_err();
        assert!(matches!(err, Error::ItemNotAvailable { id } if id == broken.id()));
    }

    #[test]
    fn test_plan_self_booking() {
        let (store, owner, _, item) = setup();
        let options = CreateBookingOptions::new(owner.id(), item.id(), window(1, 2));

        let err = CreateBookingPlan::new(options).build_plan(&store).unwrap_err();
        assert!(matches!(err, Error::SelfBooking { owner: o } if o == owner.id()));
    }

    #[test]
    fn test_plan_overlap_any_status() {
        let (mut store, _, booker, item) = setup();
        let options = CreateBookingOptions::new(booker.id(), item.id(), window(1, 3));
        let plan = CreateBookingPlan::new(options).build_plan(&store).unwrap();
        let first = PlanExecutor::new(&mut store)
            .execute(&plan)
            .unwrap()
            .booking
            .unwrap();

        // Even a rejected booking keeps blocking the calendar.
        store
            .set_booking_status(first.id(), BookingStatus::Rejected)
            .unwrap();

        let options = CreateBookingOptions::new(booker.id(), item.id(), window(2, 4));
        let err = CreateBookingPlan::new(options).build_plan(&store).unwrap_err();
        assert!(matches!(err, Error::OverlappingBooking { item: i } if i == item.id()));
    }

    #[test]
    fn test_plan_touching_windows_allowed() {
        let (mut store, _, booker, item) = setup();
        let options = CreateBookingOptions::new(booker.id(), item.id(), window(1, 2));
        let plan = CreateBookingPlan::new(options).build_plan(&store).unwrap();
        PlanExecutor::new(&mut store).execute(&plan).unwrap();

        let options = CreateBookingOptions::new(booker.id(), item.id(), window(2, 3));
        assert!(CreateBookingPlan::new(options).build_plan(&store).is_ok());
    }

    #[test]
    fn test_plan_precondition_order() {
        // An unknown booker on an unknown, unavailable everything still
        // reports the booker first.
        let (store, _, _, _) = setup();
        let options = CreateBookingOptions::new(UserId::new(99), ItemId::new(99), window(1, 2));
        let err = CreateBookingPlan::new(options).build_plan(&store).unwrap_err();
        assert!(matches!(err, Error::UserNotFound { .. }));
    }

    #[test]
    fn test_plan_warns_on_past_start() {
        let (store, _, booker, item) = setup();
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap();
        let past = BookingWindow::new(start, end).unwrap();
        let options = CreateBookingOptions::new(booker.id(), item.id(), past);

        let plan = CreateBookingPlan::new(options).build_plan(&store).unwrap();
        assert_eq!(plan.warnings.len(), 1);
        assert!(plan.warnings[0].contains("starts in the past"));
    }
}
