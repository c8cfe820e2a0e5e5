//! Booking decision planning (approve or reject).
//!
//! Only the owner of the booked item may decide a waiting booking, and a
//! decision is final: once a booking is approved or rejected it can never
//! be re-decided.

use log::{debug, info};

use crate::booking::{BookingId, BookingStatus};
use crate::catalog::UserId;
use crate::error::{Error, Result};
use crate::store::BookingStore;

use super::plan::{OperationPlan, PlanAction};

/// Options for an approve/reject operation.
#[derive(Debug, Clone, Copy)]
pub struct ApproveBookingOptions {
    /// The booking to decide.
    pub booking: BookingId,

    /// The user making the decision.
    pub caller: UserId,

    /// `true` to approve, `false` to reject.
    pub approve: bool,
}

impl ApproveBookingOptions {
    /// Creates options for deciding `booking` as `caller`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lendit::operations::ApproveBookingOptions;
    /// use lendit::{BookingId, UserId};
    ///
    /// let options = ApproveBookingOptions::new(BookingId::new(1), UserId::new(2), true);
    /// assert!(options.approve);
    /// ```
    #[must_use]
    pub const fn new(booking: BookingId, caller: UserId, approve: bool) -> Self {
        Self {
            booking,
            caller,
            approve,
        }
    }
}

/// A booking decision plan generator.
pub struct ApproveBookingPlan {
    options: ApproveBookingOptions,
}

impl ApproveBookingPlan {
    /// Creates a new decision plan with the given options.
    #[must_use]
    pub const fn new(options: ApproveBookingOptions) -> Self {
        Self { options }
    }

    /// Builds the plan by validating the decision against the store.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [`Error::BookingNotFound`] if the booking does not exist
    /// - [`Error::UnauthorizedAccess`] if the caller does not own the
    ///   booked item
    /// - [`Error::InvalidStateTransition`] if the booking has already
    ///   been decided
    pub fn build_plan<S: BookingStore>(&self, store: &S) -> Result<OperationPlan> {
        let opts = &self.options;
        debug!(
            "planning {} of booking {} by user {}",
            if opts.approve { "approval" } else { "rejection" },
            opts.booking,
            opts.caller
        );

        let booking = store
            .find_booking(opts.booking)?
            .ok_or(Error::BookingNotFound { id: opts.booking })?;

        if booking.owner() != opts.caller {
            info!(
                "denying decision on booking {}: user {} is not the item owner",
                opts.booking, opts.caller
            );
            return Err(Error::UnauthorizedAccess {
                details: format!(
                    "user {} does not own the item of booking {}",
                    opts.caller, opts.booking
                ),
            });
        }

        if booking.status() != BookingStatus::Waiting {
            return Err(Error::InvalidStateTransition {
                status: booking.status(),
            });
        }

        let status = if opts.approve {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };

        Ok(OperationPlan::new(format!(
            "Decide booking {}: {}",
            opts.booking, status
        ))
        .add_action(PlanAction::SetBookingStatus {
            booking: opts.booking,
            status,
        }))
    }
}
