//! Plan execution engine.
//!
//! This module implements the executor that takes operation plans
//! and applies them to a booking store.

use log::info;

use crate::booking::Booking;
use crate::error::Result;
use crate::store::BookingStore;

use super::plan::{OperationPlan, PlanAction};

/// Result of executing a plan.
///
/// This struct provides information about what happened during execution,
/// including whether it was a dry run and what actions were taken.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// The booking produced or updated by the plan (if applicable).
    pub booking: Option<Booking>,
}

impl ExecutionResult {
    /// Creates a successful execution result.
    fn success(plan: &OperationPlan, booking: Option<Booking>) -> Self {
        Self {
            success: true,
            dry_run: false,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            booking,
        }
    }

    /// Creates a dry-run execution result.
    ///
    /// No booking is returned because ids are only assigned by the store.
    fn dry_run(plan: &OperationPlan) -> Self {
        Self {
            success: true,
            dry_run: true,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            booking: None,
        }
    }
}

/// Executes operation plans against a booking store.
///
/// The executor can run in normal mode (applying changes) or dry-run mode
/// (validating without changes).
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use lendit::operations::{CreateBookingOptions, CreateBookingPlan, PlanExecutor};
/// use lendit::{BookingStore, BookingWindow, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// let owner = store.create_user("Ada", "ada@example.com").unwrap();
/// let booker = store.create_user("Grace", "grace@example.com").unwrap();
/// let item = store.create_item(owner.id(), "drill", true).unwrap();
///
/// let start = Utc::now() + Duration::days(1);
/// let window = BookingWindow::new(start, start + Duration::days(2)).unwrap();
/// let options = CreateBookingOptions::new(booker.id(), item.id(), window);
/// let plan = CreateBookingPlan::new(options).build_plan(&store).unwrap();
///
/// let result = PlanExecutor::new(&mut store).execute(&plan).unwrap();
/// assert!(result.success);
/// assert!(result.booking.is_some());
///
/// // Dry-run execution leaves the store untouched.
/// let result = PlanExecutor::new(&mut store).dry_run().execute(&plan);
/// assert!(result.unwrap().dry_run);
/// ```
pub struct PlanExecutor<'a, S: BookingStore> {
    store: &'a mut S,
    dry_run: bool,
}

impl<'a, S: BookingStore> PlanExecutor<'a, S> {
    /// Creates a new plan executor.
    #[must_use]
    pub fn new(store: &'a mut S) -> Self {
        Self {
            store,
            dry_run: false,
        }
    }

    /// Sets the executor to dry-run mode.
    ///
    /// In dry-run mode, the executor validates the plan but does not
    /// modify the store.
    #[must_use]
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// If in dry-run mode, validates the plan but makes no store changes.
    /// Otherwise, applies all actions in the plan to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if any action fails to execute. For booking
    /// creation that includes [`crate::Error::OverlappingBooking`] when a
    /// conflicting booking was committed between planning and execution.
    pub fn execute(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        if self.dry_run {
            return Ok(ExecutionResult::dry_run(plan));
        }

        let mut booking = None;
        for action in &plan.actions {
            booking = Some(self.execute_action(action)?);
        }

        Ok(ExecutionResult::success(plan, booking))
    }

    /// Executes a single action, returning the booking it touched.
    fn execute_action(&mut self, action: &PlanAction) -> Result<Booking> {
        match action {
            PlanAction::CreateBooking(draft) => {
                // The store re-checks the overlap atomically with the
                // insert, catching conflicts committed since planning.
                let booking = self.store.insert_booking(draft)?;
                info!(
                    "created booking {} for item {} ({})",
                    booking.id(),
                    booking.item(),
                    booking.window()
                );
                Ok(booking)
            }
            PlanAction::SetBookingStatus { booking, status } => {
                let updated = self.store.set_booking_status(*booking, *status)?;
                info!("booking {} moved to {}", updated.id(), updated.status());
                Ok(updated)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{BookingDraft, BookingStatus, BookingWindow};
    use crate::store::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn setup() -> (MemoryStore, BookingDraft) {
        let mut store = MemoryStore::new();
        let owner = store.create_user("Owner", "owner@example.com").unwrap();
        let booker = store.create_user("Booker", "booker@example.com").unwrap();
        let item = store.create_item(owner.id(), "drill", true).unwrap();

        let start = Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 9, 3, 0, 0, 0).unwrap();
        let draft = BookingDraft {
            item: item.id(),
            owner: owner.id(),
            booker: booker.id(),
            window: BookingWindow::new(start, end).unwrap(),
        };
        (store, draft)
    }

    #[test]
    fn test_execute_create_booking() {
        let (mut store, draft) = setup();
        let plan = OperationPlan::new("create").add_action(PlanAction::CreateBooking(draft));

        let result = PlanExecutor::new(&mut store).execute(&plan).unwrap();
        assert!(result.success);
        assert!(!result.dry_run);
        assert_eq!(result.actions_taken.len(), 1);

        let booking = result.booking.unwrap();
        assert_eq!(booking.status(), BookingStatus::Waiting);
        assert!(store.find_booking(booking.id()).unwrap().is_some());
    }

    #[test]
    fn test_execute_set_status() {
        let (mut store, draft) = setup();
        let booking = store.insert_booking(&draft).unwrap();

        let plan = OperationPlan::new("approve").add_action(PlanAction::SetBookingStatus {
            booking: booking.id(),
            status: BookingStatus::Approved,
        });

        let result = PlanExecutor::new(&mut store).execute(&plan).unwrap();
        assert_eq!(
            result.booking.unwrap().status(),
            BookingStatus::Approved
        );
    }

    #[test]
    fn test_dry_run_makes_no_changes() {
        let (mut store, draft) = setup();
        let booker = draft.booker;
        let plan = OperationPlan::new("create").add_action(PlanAction::CreateBooking(draft));

        let result = PlanExecutor::new(&mut store).dry_run().execute(&plan).unwrap();
        assert!(result.dry_run);
        assert!(result.success);
        assert!(result.booking.is_none());
        assert_eq!(result.actions_taken.len(), 1);

        // Nothing was written.
        let page = crate::query::PageRequest::new(0, 10).unwrap();
        let listed = store
            .list_bookings(
                booker,
                crate::query::Viewpoint::Booker,
                &crate::query::StatePredicate::Any,
                crate::query::SortOrder::Descending,
                &page,
            )
            .unwrap();
        assert!(listed.is_empty());
    }

    #[test]
    fn test_execute_propagates_warnings() {
        let (mut store, draft) = setup();
        let plan = OperationPlan::new("create")
            .add_action(PlanAction::CreateBooking(draft))
            .add_warning("window starts in the past");

        let result = PlanExecutor::new(&mut store).execute(&plan).unwrap();
        assert_eq!(result.warnings, vec!["window starts in the past"]);
    }

    #[test]
    fn test_execute_overlap_race_fails() {
        let (mut store, draft) = setup();
        let plan = OperationPlan::new("create")
            .add_action(PlanAction::CreateBooking(draft.clone()));

        // Simulate a competing insert between planning and execution.
        store.insert_booking(&draft).unwrap();

        let err = PlanExecutor::new(&mut store).execute(&plan).unwrap_err();
        assert!(matches!(err, crate::Error::OverlappingBooking { .. }));
    }
}
