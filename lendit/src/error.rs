//! Error types for the lendit library.
//!
//! This module provides the error hierarchy for all booking operations,
//! using `thiserror` for ergonomic error handling. Every failure of the
//! lifecycle engine maps to exactly one variant; no recovery is attempted
//! internally and all errors propagate to the caller.

use std::path::PathBuf;

use thiserror::Error;

use crate::booking::{BookingId, BookingStatus};
use crate::catalog::{ItemId, UserId};

/// Result type alias for operations that may fail with a lendit error.
///
/// # Examples
///
/// ```
/// use lendit::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the lendit library.
///
/// This enum encompasses all error conditions that can occur during
/// booking lifecycle operations, plus the infrastructure failures of the
/// underlying store.
#[derive(Debug, Error)]
pub enum Error {
    /// The referenced user does not exist.
    #[error("user {id} not found")]
    UserNotFound {
        /// The user id that could not be resolved.
        id: UserId,
    },

    /// The referenced item does not exist.
    #[error("item {id} not found")]
    ItemNotFound {
        /// The item id that could not be resolved.
        id: ItemId,
    },

    /// The referenced booking does not exist.
    #[error("booking {id} not found")]
    BookingNotFound {
        /// The booking id that could not be resolved.
        id: BookingId,
    },

    /// The item's `available` flag is false at booking time.
    #[error("item {id} is not available")]
    ItemNotAvailable {
        /// The unavailable item.
        id: ItemId,
    },

    /// The booker and the item owner are the same identity.
    #[error("owner {owner} cannot book their own item")]
    SelfBooking {
        /// The user who owns the item and attempted to book it.
        owner: UserId,
    },

    /// The candidate interval conflicts with an existing booking.
    #[error("item {item} has an overlapping booking")]
    OverlappingBooking {
        /// The item whose calendar already holds a conflicting booking.
        item: ItemId,
    },

    /// The caller lacks rights to view, approve, or reject a booking.
    #[error("unauthorized access: {details}")]
    UnauthorizedAccess {
        /// Details about the denied access.
        details: String,
    },

    /// Attempt to approve or reject a booking that is not waiting.
    #[error("booking is {status}: only waiting bookings can be approved or rejected")]
    InvalidStateTransition {
        /// The booking's current (terminal) status.
        status: BookingStatus,
    },

    /// An unrecognized symbolic state string was supplied to a query.
    #[error("unknown state: {value}")]
    UnknownState {
        /// The unrecognized input.
        value: String,
    },

    /// Pagination parameters are out of range.
    #[error("invalid pagination: from={from}, size={size} (from must be >= 0 and size > 0)")]
    InvalidPagination {
        /// The zero-based offset supplied by the caller.
        from: i64,
        /// The page size supplied by the caller.
        size: i64,
    },

    /// A validation error occurred while constructing a domain value.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

impl From<crate::booking::ValidationError> for Error {
    fn from(err: crate::booking::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Check if the error indicates an absent entity.
    ///
    /// Transport layers typically map these to a 404-equivalent response.
    ///
    /// # Examples
    ///
    /// ```
    /// use lendit::{BookingId, Error};
    ///
    /// let err = Error::BookingNotFound { id: BookingId::new(7) };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound { .. } | Self::ItemNotFound { .. } | Self::BookingNotFound { .. }
        )
    }

    /// Check if the error is an authorization failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use lendit::Error;
    ///
    /// let err = Error::UnauthorizedAccess { details: "not the owner".to_string() };
    /// assert!(err.is_unauthorized());
    /// ```
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::UnauthorizedAccess { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_not_found_error() {
        let err = Error::UserNotFound {
            id: UserId::new(42),
        };
        let display = format!("{err}");
        assert!(display.contains("user 42 not found"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_item_not_available_error() {
        let err = Error::ItemNotAvailable {
            id: ItemId::new(3),
        };
        let display = format!("{err}");
        assert!(display.contains("item 3 is not available"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_self_booking_error() {
        let err = Error::SelfBooking {
            owner: UserId::new(1),
        };
        let display = format!("{err}");
        assert!(display.contains("cannot book their own item"));
    }

    #[test]
    fn test_overlapping_booking_error() {
        let err = Error::OverlappingBooking {
            item: ItemId::new(9),
        };
        let display = format!("{err}");
        assert!(display.contains("item 9"));
        assert!(display.contains("overlapping"));
    }

    #[test]
    fn test_unauthorized_access_error() {
        let err = Error::UnauthorizedAccess {
            details: "caller 5 is neither booker nor owner".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("unauthorized access"));
        assert!(display.contains("caller 5"));
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_invalid_state_transition_error() {
        let err = Error::InvalidStateTransition {
            status: BookingStatus::Approved,
        };
        let display = format!("{err}");
        assert!(display.contains("APPROVED"));
        assert!(display.contains("only waiting bookings"));
    }

    #[test]
    fn test_unknown_state_error() {
        let err = Error::UnknownState {
            value: "SOMEDAY".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("unknown state: SOMEDAY"));
    }

    #[test]
    fn test_invalid_pagination_error() {
        let err = Error::InvalidPagination { from: -1, size: 10 };
        let display = format!("{err}");
        assert!(display.contains("from=-1"));
        assert!(display.contains("size=10"));
    }

    #[test]
    fn test_validation_error_conversion() {
        let validation = crate::booking::ValidationError {
            field: "window".to_string(),
            message: "start must be strictly before end".to_string(),
        };
        let err: Error = validation.into();
        let display = format!("{err}");
        assert!(display.contains("window"));
        assert!(display.contains("start must be strictly before end"));
    }

    #[test]
    fn test_unsupported_schema_version_error() {
        let err = Error::UnsupportedSchemaVersion {
            expected: 1,
            found: 2,
        };
        let display = format!("{err}");
        assert!(display.contains("expected 1"));
        assert!(display.contains("found 2"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        let display = format!("{err}");
        assert!(display.contains("I/O error"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<u32> {
            Err(Error::UnknownState {
                value: "nope".to_string(),
            })
        }

        assert!(returns_result().is_err());
    }
}
