//! Booking types: the central entity of the lifecycle engine.
//!
//! This module provides the booking status state machine, the half-open
//! time window with its overlap semantics, and the `Booking` entity along
//! with the draft type used before an id has been assigned.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{ItemId, UserId};

/// A unique booking identifier, assigned by the store on creation.
///
/// Ids are never reused, so descending id order is descending creation
/// order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct BookingId(i64);

impl BookingId {
    /// Creates a booking id from its raw value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The status of a booking.
///
/// Every booking starts as `Waiting` and transitions exactly once to either
/// `Approved` or `Rejected`; both are terminal.
///
/// # Examples
///
/// ```
/// use lendit::BookingStatus;
///
/// assert_eq!(BookingStatus::Waiting.as_str(), "WAITING");
/// assert_eq!(BookingStatus::parse("APPROVED"), Some(BookingStatus::Approved));
/// assert_eq!(BookingStatus::parse("bogus"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    /// Created, awaiting the owner's decision.
    Waiting,
    /// Approved by the item owner. Terminal.
    Approved,
    /// Rejected by the item owner. Terminal.
    Rejected,
}

impl BookingStatus {
    /// Returns the canonical string form of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "WAITING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Parses a status from its canonical string form.
    ///
    /// Returns `None` for unrecognized input. Unlike query states, status
    /// strings are an internal storage format and are matched exactly.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "WAITING" => Some(Self::Waiting),
            "APPROVED" => Some(Self::Approved),
            "REJECTED" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns whether the status is terminal (no further transitions).
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Waiting)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A half-open booking interval `[start, end)`.
///
/// The start instant is always strictly before the end instant; this is
/// validated at construction so a window can never be empty or inverted.
/// Two windows overlap iff they share at least one instant under half-open
/// semantics, so touching windows do not overlap.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use lendit::BookingWindow;
///
/// let start = Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2026, 9, 2, 12, 0, 0).unwrap();
///
/// let window = BookingWindow::new(start, end).unwrap();
/// assert_eq!(window.start(), start);
///
/// // Inverted windows are rejected.
/// assert!(BookingWindow::new(end, start).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl BookingWindow {
    /// Creates a new booking window.
    ///
    /// # Errors
    ///
    /// Returns an error if `start` is not strictly before `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError {
                field: "window".into(),
                message: "start must be strictly before end".into(),
            });
        }
        Ok(Self { start, end })
    }

    /// Returns the inclusive start instant.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the exclusive end instant.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Checks whether two windows overlap.
    ///
    /// Overlap is symmetric and follows half-open semantics:
    /// `self.start < other.end && self.end > other.start`. Windows that
    /// merely touch (`self.end == other.start`) do not overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Duration, Utc};
    /// use lendit::BookingWindow;
    ///
    /// let t = Utc::now();
    /// let first = BookingWindow::new(t, t + Duration::hours(2)).unwrap();
    /// let second = BookingWindow::new(t + Duration::hours(1), t + Duration::hours(3)).unwrap();
    /// let third = BookingWindow::new(t + Duration::hours(2), t + Duration::hours(4)).unwrap();
    ///
    /// assert!(first.overlaps(&second));
    /// assert!(!first.overlaps(&third)); // touching, not overlapping
    /// ```
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }
}

impl fmt::Display for BookingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// A booking before persistence, without an assigned id.
///
/// Drafts are produced by the lifecycle engine after all preconditions
/// have passed; the store assigns the id and the initial `Waiting` status
/// on insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    /// The booked item.
    pub item: ItemId,
    /// The item's owner at creation time, denormalized for query
    /// convenience.
    pub owner: UserId,
    /// The requesting user.
    pub booker: UserId,
    /// The requested time window.
    pub window: BookingWindow,
}

/// A persisted booking.
///
/// Bookings are created by the lifecycle engine, mutated only by the
/// approve/reject transition, and never deleted by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    id: BookingId,
    item: ItemId,
    owner: UserId,
    booker: UserId,
    window: BookingWindow,
    status: BookingStatus,
}

impl Booking {
    /// Assembles a booking from stored fields.
    pub(crate) const fn from_parts(
        id: BookingId,
        item: ItemId,
        owner: UserId,
        booker: UserId,
        window: BookingWindow,
        status: BookingStatus,
    ) -> Self {
        Self {
            id,
            item,
            owner,
            booker,
            window,
            status,
        }
    }

    /// Returns the booking id.
    #[must_use]
    pub const fn id(&self) -> BookingId {
        self.id
    }

    /// Returns the booked item's id.
    #[must_use]
    pub const fn item(&self) -> ItemId {
        self.item
    }

    /// Returns the id of the item's owner at creation time.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the id of the user who requested the booking.
    #[must_use]
    pub const fn booker(&self) -> UserId {
        self.booker
    }

    /// Returns the booked time window.
    #[must_use]
    pub const fn window(&self) -> &BookingWindow {
        &self.window
    }

    /// Returns the booking status.
    #[must_use]
    pub const fn status(&self) -> BookingStatus {
        self.status
    }
}

/// Error type for validation failures when constructing domain values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
