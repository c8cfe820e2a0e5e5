//! Database repository operations for bookings.
//!
//! This module implements [`BookingStore`] for [`Database`], covering user
//! and item registration, booking inserts with the atomic overlap re-check,
//! status updates, and the listing and projection queries.

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, TransactionBehavior};

use crate::booking::{
    Booking, BookingDraft, BookingId, BookingStatus, BookingWindow, ValidationError,
};
use crate::catalog::{Item, ItemId, User, UserId};
use crate::error::{Error, Result};
use crate::query::{Page, PageRequest, SortOrder, StatePredicate, Viewpoint};
use crate::store::BookingStore;

use super::connection::Database;
use super::schema::{COUNT_OVERLAPPING_BOOKINGS, INSERT_BOOKING};

/// Converts stored epoch milliseconds back to a UTC instant.
///
/// Values outside chrono's representable range indicate a corrupted row
/// and surface as a column conversion failure.
fn column_to_datetime(ms: i64) -> rusqlite::Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single().ok_or_else(|| {
        rusqlite::Error::ToSqlConversionFailure(Box::new(ValidationError {
            field: "timestamp".to_string(),
            message: format!("epoch milliseconds {ms} out of range"),
        }))
    })
}

/// Helper function to deserialize a booking from a database row.
///
/// Expects row fields in this order: id, `item_id`, `owner_id`,
/// `booker_id`, `start_at`, `end_at`, status.
fn row_to_booking(row: &rusqlite::Row<'_>) -> rusqlite::Result<Booking> {
    let id: i64 = row.get(0)?;
    let item: i64 = row.get(1)?;
    let owner: i64 = row.get(2)?;
    let booker: i64 = row.get(3)?;
    let start_ms: i64 = row.get(4)?;
    let end_ms: i64 = row.get(5)?;
    let status: String = row.get(6)?;

    let start = column_to_datetime(start_ms)?;
    let end = column_to_datetime(end_ms)?;
    let window = BookingWindow::new(start, end)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let status = BookingStatus::parse(&status).ok_or_else(|| {
        rusqlite::Error::ToSqlConversionFailure(Box::new(ValidationError {
            field: "status".to_string(),
            message: format!("unrecognized stored status '{status}'"),
        }))
    })?;

    Ok(Booking::from_parts(
        BookingId::new(id),
        ItemId::new(item),
        UserId::new(owner),
        UserId::new(booker),
        window,
        status,
    ))
}

// SQL statements for repository operations
const INSERT_USER: &str = "INSERT INTO users (name, email) VALUES (?, ?)";

const INSERT_ITEM: &str = "INSERT INTO items (owner_id, name, available) VALUES (?, ?, ?)";

const SELECT_USER: &str = "SELECT id, name, email FROM users WHERE id = ?";

const SELECT_ITEM: &str = "SELECT id, owner_id, name, available FROM items WHERE id = ?";

const BOOKING_COLUMNS: &str = "id, item_id, owner_id, booker_id, start_at, end_at, status";

const SELECT_BOOKING: &str = r"
    SELECT id, item_id, owner_id, booker_id, start_at, end_at, status
    FROM bookings
    WHERE id = ?
";

const UPDATE_BOOKING_STATUS: &str = r"
    UPDATE bookings
    SET status = ?
    WHERE id = ?
";

const CHECK_COMPLETED_BOOKING: &str = r"
    SELECT COUNT(*) FROM bookings
    WHERE booker_id = ? AND item_id = ? AND end_at < ?
";

const SELECT_LAST_BOOKING: &str = r"
    SELECT id, item_id, owner_id, booker_id, start_at, end_at, status
    FROM bookings
    WHERE item_id = ? AND status = 'APPROVED' AND start_at < ?
    ORDER BY end_at DESC
    LIMIT 1
";

const SELECT_NEXT_BOOKING: &str = r"
    SELECT id, item_id, owner_id, booker_id, start_at, end_at, status
    FROM bookings
    WHERE item_id = ? AND status = 'APPROVED' AND start_at > ?
    ORDER BY start_at ASC
    LIMIT 1
";

impl BookingStore for Database {
    fn create_user(&mut self, name: &str, email: &str) -> Result<User> {
        match self.conn.execute(INSERT_USER, params![name, email]) {
            Ok(_) => {
                let id = self.conn.last_insert_rowid();
                Ok(User::from_parts(
                    UserId::new(id),
                    name.to_string(),
                    email.to_string(),
                ))
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(Error::Validation {
                    field: "email".to_string(),
                    message: format!("email '{email}' is already registered"),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    fn create_item(&mut self, owner: UserId, name: &str, available: bool) -> Result<Item> {
        if !self.user_exists(owner)? {
            return Err(Error::UserNotFound { id: owner });
        }
        self.conn
            .execute(INSERT_ITEM, params![owner.value(), name, available])?;
        let id = self.conn.last_insert_rowid();
        Ok(Item::from_parts(
            ItemId::new(id),
            owner,
            name.to_string(),
            available,
        ))
    }

    fn find_user(&self, id: UserId) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(SELECT_USER, params![id.value()], |row| {
                let id: i64 = row.get(0)?;
                let name: String = row.get(1)?;
                let email: String = row.get(2)?;
                Ok(User::from_parts(UserId::new(id), name, email))
            })
            .optional()?;
        Ok(user)
    }

    fn find_item(&self, id: ItemId) -> Result<Option<Item>> {
        let item = self
            .conn
            .query_row(SELECT_ITEM, params![id.value()], |row| {
                let id: i64 = row.get(0)?;
                let owner: i64 = row.get(1)?;
                let name: String = row.get(2)?;
                let available: bool = row.get(3)?;
                Ok(Item::from_parts(
                    ItemId::new(id),
                    UserId::new(owner),
                    name,
                    available,
                ))
            })
            .optional()?;
        Ok(item)
    }

    /// Inserts a booking with the overlap condition re-verified inside an
    /// IMMEDIATE transaction, so a conflicting booking committed between
    /// the caller's check and this insert is still caught.
    fn insert_booking(&mut self, draft: &BookingDraft) -> Result<Booking> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let start_ms = draft.window.start().timestamp_millis();
        let end_ms = draft.window.end().timestamp_millis();

        let conflicts: i64 = tx.query_row(
            COUNT_OVERLAPPING_BOOKINGS,
            params![draft.item.value(), end_ms, start_ms],
            |row| row.get(0),
        )?;
        if conflicts > 0 {
            return Err(Error::OverlappingBooking { item: draft.item });
        }

        tx.execute(
            INSERT_BOOKING,
            params![
                draft.item.value(),
                draft.owner.value(),
                draft.booker.value(),
                start_ms,
                end_ms,
                BookingStatus::Waiting.as_str(),
            ],
        )?;
        let id = tx.last_insert_rowid();

        tx.commit()?;

        Ok(Booking::from_parts(
            BookingId::new(id),
            draft.item,
            draft.owner,
            draft.booker,
            draft.window,
            BookingStatus::Waiting,
        ))
    }

    fn find_booking(&self, id: BookingId) -> Result<Option<Booking>> {
        let booking = self
            .conn
            .query_row(SELECT_BOOKING, params![id.value()], row_to_booking)
            .optional()?;
        Ok(booking)
    }

    fn set_booking_status(&mut self, id: BookingId, status: BookingStatus) -> Result<Booking> {
        let rows = self
            .conn
            .execute(UPDATE_BOOKING_STATUS, params![status.as_str(), id.value()])?;
        if rows == 0 {
            return Err(Error::BookingNotFound { id });
        }
        self.find_booking(id)?.ok_or(Error::BookingNotFound { id })
    }

    fn has_overlapping_booking(&self, item: ItemId, window: &BookingWindow) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            COUNT_OVERLAPPING_BOOKINGS,
            params![
                item.value(),
                window.end().timestamp_millis(),
                window.start().timestamp_millis(),
            ],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn list_bookings(
        &self,
        subject: UserId,
        viewpoint: Viewpoint,
        predicate: &StatePredicate,
        order: SortOrder,
        page: &PageRequest,
    ) -> Result<Page<Booking>> {
        let mut sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE ");
        sql.push_str(match viewpoint {
            Viewpoint::Booker => "booker_id = ?",
            Viewpoint::Owner => "owner_id = ?",
        });
        let mut values: Vec<Value> = vec![Value::Integer(subject.value())];

        match predicate {
            StatePredicate::Any => {}
            StatePredicate::WithStatus(status) => {
                sql.push_str(" AND status = ?");
                values.push(Value::Text(status.as_str().to_string()));
            }
            StatePredicate::EndsBefore(t) => {
                sql.push_str(" AND end_at < ?");
                values.push(Value::Integer(t.timestamp_millis()));
            }
            StatePredicate::StartsAfter(t) => {
                sql.push_str(" AND start_at > ?");
                values.push(Value::Integer(t.timestamp_millis()));
            }
            StatePredicate::ActiveAt(t) => {
                sql.push_str(" AND start_at <= ? AND end_at > ?");
                let ms = t.timestamp_millis();
                values.push(Value::Integer(ms));
                values.push(Value::Integer(ms));
            }
        }

        sql.push_str(match order {
            SortOrder::Ascending => " ORDER BY id ASC",
            SortOrder::Descending => " ORDER BY id DESC",
        });

        // One extra row signals whether further pages exist.
        sql.push_str(" LIMIT ? OFFSET ?");
        values.push(Value::Integer(page.page_size() + 1));
        values.push(Value::Integer(page.offset()));

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values), row_to_booking)?;
        let fetched = rows.collect::<rusqlite::Result<Vec<Booking>>>()?;

        Ok(Page::from_fetched(fetched, page))
    }

    fn has_completed_booking(
        &self,
        booker: UserId,
        item: ItemId,
        before: DateTime<Utc>,
    ) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            CHECK_COMPLETED_BOOKING,
            params![booker.value(), item.value(), before.timestamp_millis()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn last_booking_for_item(&self, item: ItemId, now: DateTime<Utc>) -> Result<Option<Booking>> {
        let booking = self
            .conn
            .query_row(
                SELECT_LAST_BOOKING,
                params![item.value(), now.timestamp_millis()],
                row_to_booking,
            )
            .optional()?;
        Ok(booking)
    }

    fn next_booking_for_item(&self, item: ItemId, now: DateTime<Utc>) -> Result<Option<Booking>> {
        let booking = self
            .conn
            .query_row(
                SELECT_NEXT_BOOKING,
                params![item.value(), now.timestamp_millis()],
                row_to_booking,
            )
            .optional()?;
        Ok(booking)
    }
}
