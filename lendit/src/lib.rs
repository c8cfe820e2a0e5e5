#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # lendit
//!
//! A library for managing shared-item bookings.
//!
//! This library provides the booking core of an item-sharing service:
//! users request time-bounded bookings of other users' items, owners
//! approve or reject them, and everyone queries their bookings through
//! symbolic states (ALL, WAITING, REJECTED, PAST, FUTURE, CURRENT).
//!
//! ## Core Types
//!
//! - [`User`], [`Item`], and their id types: catalog identities
//! - [`Booking`], [`BookingWindow`], [`BookingStatus`]: the booking domain
//! - [`BookingStore`]: the repository seam, implemented by [`Database`]
//!   (SQLite) and [`MemoryStore`] (in-memory)
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use chrono::{Duration, Utc};
//! use lendit::operations::{CreateBookingOptions, CreateBookingPlan, PlanExecutor};
//! use lendit::{BookingStatus, BookingStore, BookingWindow, MemoryStore};
//!
//! let mut store = MemoryStore::new();
//! let owner = store.create_user("Ada", "ada@example.com").unwrap();
//! let booker = store.create_user("Grace", "grace@example.com").unwrap();
//! let item = store.create_item(owner.id(), "drill", true).unwrap();
//!
//! let start = Utc::now() + Duration::days(1);
//! let window = BookingWindow::new(start, start + Duration::days(2)).unwrap();
//! let options = CreateBookingOptions::new(booker.id(), item.id(), window);
//! let plan = CreateBookingPlan::new(options).build_plan(&store).unwrap();
//! let result = PlanExecutor::new(&mut store).execute(&plan).unwrap();
//!
//! let booking = result.booking.unwrap();
//! assert_eq!(booking.status(), BookingStatus::Waiting);
//! ```

pub mod booking;
pub mod catalog;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod operations;
pub mod query;
pub mod store;

// Re-export key types at crate root for convenience
pub use booking::{Booking, BookingDraft, BookingId, BookingStatus, BookingWindow};
pub use catalog::{Item, ItemId, User, UserId};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    ApproveBookingOptions, ApproveBookingPlan, CreateBookingOptions, CreateBookingPlan,
    ExecutionResult, OperationPlan, PlanAction, PlanExecutor,
};
pub use query::{
    classify, BookingState, Page, PageRequest, SortOrder, StatePredicate, Viewpoint,
};
pub use store::{BookingStore, MemoryStore};
