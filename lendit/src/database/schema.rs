//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, and constants
//! related to the database schema for the lendit booking system.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
///
/// The metadata table stores key-value pairs for database configuration
/// and versioning information.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the users table.
///
/// Email carries a UNIQUE constraint so duplicate registrations fail at
/// the database level even under concurrent inserts.
pub const CREATE_USERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE
    )";

/// SQL statement to create the items table.
pub const CREATE_ITEMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_id INTEGER NOT NULL REFERENCES users(id),
        name TEXT NOT NULL,
        available INTEGER NOT NULL
    )";

/// SQL statement to create the bookings table.
///
/// `owner_id` is denormalized from the item so viewpoint queries never
/// need a join. Timestamps are stored as Unix epoch milliseconds; status
/// is stored as its canonical uppercase string.
pub const CREATE_BOOKINGS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS bookings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        item_id INTEGER NOT NULL REFERENCES items(id),
        owner_id INTEGER NOT NULL REFERENCES users(id),
        booker_id INTEGER NOT NULL REFERENCES users(id),
        start_at INTEGER NOT NULL,
        end_at INTEGER NOT NULL,
        status TEXT NOT NULL
    )";

/// SQL statement to create an index on the booking window per item.
///
/// This index backs the overlap check and the last/next projections.
pub const CREATE_ITEM_WINDOW_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bookings_item_window ON bookings(item_id, start_at, end_at)";

/// SQL statement to create an index on the booker column.
///
/// This index speeds up booker-viewpoint listings.
pub const CREATE_BOOKER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bookings_booker ON bookings(booker_id)";

/// SQL statement to create an index on the owner column.
///
/// This index speeds up owner-viewpoint listings.
pub const CREATE_OWNER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bookings_owner ON bookings(owner_id)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to insert a booking.
///
/// Every new booking starts in `WAITING` status; the insert takes the
/// status explicitly so the atomic create and tests share one statement.
pub const INSERT_BOOKING: &str = r"
    INSERT INTO bookings
    (item_id, owner_id, booker_id, start_at, end_at, status)
    VALUES (?, ?, ?, ?, ?, ?)
";

/// SQL statement counting bookings of an item that overlap a half-open
/// window. Status is deliberately not filtered.
pub const COUNT_OVERLAPPING_BOOKINGS: &str = r"
    SELECT COUNT(*) FROM bookings
    WHERE item_id = ? AND start_at < ? AND end_at > ?
";
