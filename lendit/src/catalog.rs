//! Identity and catalog types.
//!
//! Users and items are owned by external CRUD subsystems; the booking core
//! only needs their identities and the handful of fields the lifecycle
//! engine reads (`owner`, `available`). Bookings reference users and items
//! by id rather than holding live back-pointers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A unique user identifier.
///
/// # Examples
///
/// ```
/// use lendit::UserId;
///
/// let id = UserId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(format!("{id}"), "7");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct UserId(i64);

impl UserId {
    /// Creates a user id from its raw value.
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

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique item identifier.
///
/// # Examples
///
/// ```
/// use lendit::ItemId;
///
/// let id = ItemId::new(3);
/// assert_eq!(id.value(), 3);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ItemId(i64);

impl ItemId {
    /// Creates an item id from its raw value.
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

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered user.
///
/// Users are identified by a unique email; the uniqueness constraint is
/// enforced by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
}

impl User {
    /// Assembles a user from stored fields.
    pub(crate) fn from_parts(id: UserId, name: String, email: String) -> Self {
        Self { id, name, email }
    }

    /// Returns the user id.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the user's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the user's email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// A catalog item that can be booked.
///
/// An item belongs to exactly one owner and carries an `available` flag;
/// unavailable items reject new bookings. Items are immutable with respect
/// to booking logic except through that flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    owner: UserId,
    name: String,
    available: bool,
}

impl Item {
    /// Assembles an item from stored fields.
    pub(crate) fn from_parts(id: ItemId, owner: UserId, name: String, available: bool) -> Self {
        Self {
            id,
            owner,
            name,
            available,
        }
    }

    /// Returns the item id.
    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the id of the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the item's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the item currently accepts bookings.
    #[must_use]
    pub const fn available(&self) -> bool {
        self.available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_display() {
        let id = UserId::new(42);
        assert_eq!(format!("{id}"), "42");
    }

    #[test]
    fn test_item_id_ordering() {
        assert!(ItemId::new(1) < ItemId::new(2));
    }

    #[test]
    fn test_user_accessors() {
        let user = User::from_parts(UserId::new(1), "Ada".to_string(), "ada@example.com".to_string());
        assert_eq!(user.id(), UserId::new(1));
        assert_eq!(user.name(), "Ada");
        assert_eq!(user.email(), "ada@example.com");
    }

    #[test]
    fn test_item_accessors() {
        let item = Item::from_parts(ItemId::new(2), UserId::new(1), "drill".to_string(), true);
        assert_eq!(item.id(), ItemId::new(2));
        assert_eq!(item.owner(), UserId::new(1));
        assert_eq!(item.name(), "drill");
        assert!(item.available());
    }

    #[test]
    fn test_user_serde_round_trip() {
        let user = User::from_parts(UserId::new(1), "Ada".to_string(), "ada@example.com".to_string());
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }
}
