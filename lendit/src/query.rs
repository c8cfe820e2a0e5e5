//! Query classification for booking retrieval.
//!
//! This module translates a symbolic booking state (ALL, WAITING, REJECTED,
//! PAST, FUTURE, CURRENT) into a repository predicate and an ordering for a
//! given viewpoint, and provides the pagination types shared by every store
//! implementation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::{Booking, BookingStatus};
use crate::error::Error;

/// A symbolic query state, distinct from [`BookingStatus`].
///
/// `All`, `Waiting`, and `Rejected` filter on status; `Past`, `Future`, and
/// `Current` filter on the booking window relative to a "now" instant
/// captured once per call. Time-based states do not filter on status.
///
/// # Examples
///
/// ```
/// use lendit::BookingState;
///
/// // Parsing is case-insensitive.
/// assert_eq!("current".parse::<BookingState>().unwrap(), BookingState::Current);
/// assert_eq!("ALL".parse::<BookingState>().unwrap(), BookingState::All);
///
/// // Unrecognized states fail.
/// assert!("SOMEDAY".parse::<BookingState>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingState {
    /// No filter.
    All,
    /// Bookings with status `WAITING`.
    Waiting,
    /// Bookings with status `REJECTED`.
    Rejected,
    /// Bookings whose window ended before now.
    Past,
    /// Bookings whose window starts after now.
    Future,
    /// Bookings whose window contains now.
    Current,
}

impl FromStr for BookingState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ALL" => Ok(Self::All),
            "WAITING" => Ok(Self::Waiting),
            "REJECTED" => Ok(Self::Rejected),
            "PAST" => Ok(Self::Past),
            "FUTURE" => Ok(Self::Future),
            "CURRENT" => Ok(Self::Current),
            _ => Err(Error::UnknownState {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BookingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::All => "ALL",
            Self::Waiting => "WAITING",
            Self::Rejected => "REJECTED",
            Self::Past => "PAST",
            Self::Future => "FUTURE",
            Self::Current => "CURRENT",
        };
        f.write_str(s)
    }
}

/// Whether a booking query is scoped by booker identity or owner identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Viewpoint {
    /// Bookings requested by the subject.
    Booker,
    /// Bookings on items owned by the subject.
    Owner,
}

/// Ordering of a booking listing by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Oldest booking first.
    Ascending,
    /// Most recently created booking first.
    Descending,
}

/// A resolved repository predicate for a booking listing.
///
/// Produced by [`classify`]; store implementations evaluate it against
/// their booking sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatePredicate {
    /// Match every booking.
    Any,
    /// Match bookings with the given status.
    WithStatus(BookingStatus),
    /// Match bookings whose window ends strictly before the instant.
    EndsBefore(DateTime<Utc>),
    /// Match bookings whose window starts strictly after the instant.
    StartsAfter(DateTime<Utc>),
    /// Match bookings whose window contains the instant
    /// (`start <= t && end > t`).
    ActiveAt(DateTime<Utc>),
}

impl StatePredicate {
    /// Evaluates the predicate against a booking.
    ///
    /// # Examples
    ///
    /// ```
    /// use lendit::{BookingStatus, StatePredicate};
    ///
    /// let predicate = StatePredicate::WithStatus(BookingStatus::Waiting);
    /// // used by in-memory stores and tests to filter booking sets
    /// let _ = predicate;
    /// ```
    #[must_use]
    pub fn matches(&self, booking: &Booking) -> bool {
        match self {
            Self::Any => true,
            Self::WithStatus(status) => booking.status() == *status,
            Self::EndsBefore(t) => booking.window().end() < *t,
            Self::StartsAfter(t) => booking.window().start() > *t,
            Self::ActiveAt(t) => booking.window().start() <= *t && booking.window().end() > *t,
        }
    }
}

/// Resolves a symbolic state into a repository predicate and ordering.
///
/// The default ordering is descending by id (most recently created first)
/// for all states and both viewpoints, except the booker-viewpoint CURRENT
/// state which is ordered ascending by id. The asymmetry is a carried-over
/// compatibility rule, not a derived one.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use lendit::{classify, BookingState, SortOrder, Viewpoint};
///
/// let now = Utc::now();
/// let (_, order) = classify(BookingState::Current, Viewpoint::Booker, now);
/// assert_eq!(order, SortOrder::Ascending);
///
/// let (_, order) = classify(BookingState::Current, Viewpoint::Owner, now);
/// assert_eq!(order, SortOrder::Descending);
/// ```
#[must_use]
pub fn classify(
    state: BookingState,
    viewpoint: Viewpoint,
    now: DateTime<Utc>,
) -> (StatePredicate, SortOrder) {
    let predicate = match state {
        BookingState::All => StatePredicate::Any,
        BookingState::Waiting => StatePredicate::WithStatus(BookingStatus::Waiting),
        BookingState::Rejected => StatePredicate::WithStatus(BookingStatus::Rejected),
        BookingState::Past => StatePredicate::EndsBefore(now),
        BookingState::Future => StatePredicate::StartsAfter(now),
        BookingState::Current => StatePredicate::ActiveAt(now),
    };

    let order = if viewpoint == Viewpoint::Booker && state == BookingState::Current {
        SortOrder::Ascending
    } else {
        SortOrder::Descending
    };

    (predicate, order)
}

/// A validated pagination request.
///
/// Callers supply a zero-based offset `from` and a positive page size; the
/// pair is converted to a page index via integer division, so `from` values
/// that are not exact multiples of `size` snap to a page boundary. The
/// truncation is part of the observable contract.
///
/// # Examples
///
/// ```
/// use lendit::PageRequest;
///
/// let page = PageRequest::new(20, 10).unwrap();
/// assert_eq!(page.page_index(), 2);
///
/// // Snaps to the containing page rather than an arbitrary offset.
/// let page = PageRequest::new(5, 10).unwrap();
/// assert_eq!(page.page_index(), 0);
///
/// assert!(PageRequest::new(-1, 10).is_err());
/// assert!(PageRequest::new(0, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    from: i64,
    size: i64,
}

impl PageRequest {
    /// Creates a pagination request from raw `(from, size)` parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPagination`] if `from < 0` or `size <= 0`.
    pub const fn new(from: i64, size: i64) -> Result<Self, Error> {
        if from < 0 || size <= 0 {
            return Err(Error::InvalidPagination { from, size });
        }
        Ok(Self { from, size })
    }

    /// Returns the page index (`from / size`, integer division).
    #[must_use]
    pub const fn page_index(&self) -> i64 {
        self.from / self.size
    }

    /// Returns the page size.
    #[must_use]
    pub const fn page_size(&self) -> i64 {
        self.size
    }

    /// Returns the row offset of the page start (`page_index * size`).
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.page_index() * self.size
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The entries on this page, in the requested order.
    pub items: Vec<T>,
    /// The zero-based page index.
    pub page: i64,
    /// The requested page size.
    pub size: i64,
    /// Whether at least one more entry exists beyond this page.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Assembles a page from at most `size + 1` fetched entries.
    ///
    /// Store implementations fetch one row beyond the page size; the extra
    /// row, if present, only signals that more pages exist and is dropped
    /// from the result.
    #[must_use]
    pub fn from_fetched(mut items: Vec<T>, request: &PageRequest) -> Self {
        let size = request.page_size();
        let capacity = usize::try_from(size).unwrap_or(usize::MAX);
        let has_more = items.len() > capacity;
        items.truncate(capacity);
        Self {
            items,
            page: request.page_index(),
            size,
            has_more,
        }
    }

    /// Returns whether the page holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of entries on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
