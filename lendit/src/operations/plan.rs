//! Plan types for booking operations.
//!
//! This module defines the plan structures that describe what actions
//! will be taken during an operation, without actually performing them.

use crate::booking::{BookingDraft, BookingId, BookingStatus};

/// A single action to be taken during plan execution.
///
/// Each action corresponds to a specific store operation that will be
/// performed when the plan is executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Insert a new booking in `WAITING` status.
    CreateBooking(BookingDraft),

    /// Move a booking to a terminal status (approve or reject decision).
    SetBookingStatus {
        /// The booking to transition.
        booking: BookingId,
        /// The status to set.
        status: BookingStatus,
    },
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::CreateBooking(draft) => {
                format!(
                    "Create waiting booking of item {} for user {} over {}",
                    draft.item, draft.booker, draft.window
                )
            }
            Self::SetBookingStatus { booking, status } => {
                format!("Set booking {booking} status to {status}")
            }
        }
    }
}

/// A complete operation plan describing all actions to be taken.
///
/// Plans are generated during the planning phase and can be inspected,
/// logged, or executed. They include a description, a sequence of actions,
/// and any warnings that should be communicated to the user.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates a new operation plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use lendit::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Book item 3");
    /// assert_eq!(plan.description, "Book item 3");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use lendit::operations::{OperationPlan, PlanAction};
    /// use lendit::{BookingId, BookingStatus};
    ///
    /// let plan = OperationPlan::new("Test").add_action(PlanAction::SetBookingStatus {
    ///     booking: BookingId::new(1),
    ///     status: BookingStatus::Approved,
    /// });
    ///
    /// assert_eq!(plan.len(), 1);
    /// ```
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingWindow;
    use crate::catalog::{ItemId, UserId};
    use chrono::{TimeZone, Utc};

    fn test_draft() -> BookingDraft {
        let start = Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 9, 2, 0, 0, 0).unwrap();
        BookingDraft {
            item: ItemId::new(3),
            owner: UserId::new(1),
            booker: UserId::new(2),
            window: BookingWindow::new(start, end).unwrap(),
        }
    }

    #[test]
    fn test_plan_action_descriptions() {
        let create = PlanAction::CreateBooking(test_draft());
        let desc = create.description();
        assert!(desc.contains("item 3"));
        assert!(desc.contains("user 2"));

        let decide = PlanAction::SetBookingStatus {
            booking: BookingId::new(7),
            status: BookingStatus::Rejected,
        };
        let desc = decide.description();
        assert!(desc.contains("booking 7"));
        assert!(desc.contains("REJECTED"));
    }

    #[test]
    fn test_operation_plan_new() {
        let plan = OperationPlan::new("Test operation");
        assert_eq!(plan.description, "Test operation");
        assert!(plan.is_empty());
        assert_eq!(plan.len(), 0);
    }

    #[test]
    fn test_operation_plan_builder_pattern() {
        let plan = OperationPlan::new("Test")
            .add_action(PlanAction::CreateBooking(test_draft()))
            .add_warning("Warning 1")
            .add_warning("Warning 2")
            .add_action(PlanAction::SetBookingStatus {
                booking: BookingId::new(1),
                status: BookingStatus::Approved,
            });

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.warnings.len(), 2);
        assert!(!plan.is_empty());
        assert!(matches!(plan.actions[0], PlanAction::CreateBooking(_)));
    }

    // Property-based testing module
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // PROPERTY: Warnings are accumulated in the order added
            #[test]
            fn prop_warnings_preserve_order(
                warning1 in "[a-z]{5,10}",
                warning2 in "[A-Z]{5,10}",
                warning3 in "[0-9]{5,10}",
            ) {
                let plan = OperationPlan::new("test")
                    .add_warning(warning1.clone())
                    .add_warning(warning2.clone())
                    .add_warning(warning3.clone());

                prop_assert_eq!(plan.warnings.len(), 3);
                prop_assert_eq!(&plan.warnings[0], &warning1);
                prop_assert_eq!(&plan.warnings[1], &warning2);
                prop_assert_eq!(&plan.warnings[2], &warning3);
            }
        }

        proptest! {
            // PROPERTY: is_empty() == (len() == 0) after any number of adds
            #[test]
            fn prop_plan_is_empty_invariant(action_count in 0usize..5) {
                let mut plan = OperationPlan::new("test");
                for i in 0..action_count {
                    #[allow(clippy::cast_possible_wrap)]
                    let action = PlanAction::SetBookingStatus {
                        booking: BookingId::new(i as i64),
                        status: BookingStatus::Approved,
                    };
                    plan = plan.add_action(action);
                }

                prop_assert_eq!(plan.is_empty(), plan.len() == 0);
                prop_assert_eq!(plan.len(), action_count);
            }
        }

        proptest! {
            // PROPERTY: All PlanAction descriptions produce non-empty strings
            #[test]
            fn prop_action_descriptions_nonempty(id in 1i64..10_000) {
                let actions = vec![
                    PlanAction::CreateBooking(test_draft()),
                    PlanAction::SetBookingStatus {
                        booking: BookingId::new(id),
                        status: BookingStatus::Rejected,
                    },
                ];

                for action in actions {
                    let desc = action.description();
                    prop_assert!(!desc.is_empty());
                    prop_assert!(desc.len() > 10, "descriptions must be meaningful");
                }
            }
        }
    }
}
