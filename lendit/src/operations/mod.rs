//! Booking operations using the plan-execute pattern.
//!
//! This module provides a plan-execute pattern for booking operations,
//! separating planning from execution to enable dry-run mode, better
//! testing, and clear error messages.
//!
//! # Architecture
//!
//! Write operations are split into two phases:
//! 1. **Planning**: Analyzes the request, validates preconditions, builds
//!    a plan
//! 2. **Execution**: Takes the plan and performs actual store operations
//!
//! Read operations live in [`queries`] and need no plan.
//!
//! # Examples
//!
//! ```
//! use chrono::{Duration, Utc};
//! use lendit::operations::{
//!     ApproveBookingOptions, ApproveBookingPlan, CreateBookingOptions, CreateBookingPlan,
//!     PlanExecutor,
//! };
//! use lendit::{BookingStatus, BookingStore, BookingWindow, MemoryStore};
//!
//! let mut store = MemoryStore::new();
//! let owner = store.create_user("Ada", "ada@example.com").unwrap();
//! let booker = store.create_user("Grace", "grace@example.com").unwrap();
//! let item = store.create_item(owner.id(), "drill", true).unwrap();
//!
//! // Plan and execute a booking request
//! let start = Utc::now() + Duration::days(1);
//! let window = BookingWindow::new(start, start + Duration::days(2)).unwrap();
//! let options = CreateBookingOptions::new(booker.id(), item.id(), window);
//! let plan = CreateBookingPlan::new(options).build_plan(&store).unwrap();
//! let result = PlanExecutor::new(&mut store).execute(&plan).unwrap();
//! let booking = result.booking.unwrap();
//!
//! // The owner approves it
//! let options = ApproveBookingOptions::new(booking.id(), owner.id(), true);
//! let plan = ApproveBookingPlan::new(options).build_plan(&store).unwrap();
//! let result = PlanExecutor::new(&mut store).execute(&plan).unwrap();
//! assert_eq!(result.booking.unwrap().status(), BookingStatus::Approved);
//! ```

pub mod approve;
pub mod create;
pub mod executor;
pub mod plan;
pub mod queries;

pub use approve::{ApproveBookingOptions, ApproveBookingPlan};
pub use create::{CreateBookingOptions, CreateBookingPlan};
pub use executor::{ExecutionResult, PlanExecutor};
pub use plan::{OperationPlan, PlanAction};
pub use queries::{
    booking_by_id, bookings_for_viewpoint, bookings_for_viewpoint_at, has_completed_booking,
    last_booking_for_item, next_booking_for_item,
};
