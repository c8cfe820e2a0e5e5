//! Database layer for persistent storage of bookings.
//!
//! This module provides a SQLite-based storage layer for the booking core,
//! including connection management, schema versioning, and the repository
//! operations behind [`crate::BookingStore`].
//!
//! # Examples
//!
//! ```no_run
//! use lendit::database::{Database, DatabaseConfig};
//! use lendit::BookingStore;
//!
//! let config = DatabaseConfig::new("/tmp/lendit.db");
//! let mut db = Database::open(config).unwrap();
//!
//! let owner = db.create_user("Ada", "ada@example.com").unwrap();
//! let item = db.create_item(owner.id(), "drill", true).unwrap();
//! println!("{:?}", item);
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
#[cfg(test)]
pub(crate) mod test_util;

// Re-export public API
pub use config::{default_data_dir, resolve_database_path, DatabaseConfig};
pub use connection::Database;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
