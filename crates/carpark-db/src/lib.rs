//! Storage layer for the car park manager.
//!
//! Provides persistence for settings, active parking sessions and the
//! transaction log using `rusqlite`.
//!
//! # Lifecycle
//!
//! A [`Database`] owns its `rusqlite::Connection`. It is acquired with
//! [`Database::open`] (or [`Database::open_in_memory`] in tests) and released
//! either by dropping it or, when close errors matter, by
//! [`Database::close`]. The type is `Send` but not `Sync`; the application
//! is single-user and runs every operation to completion before the next.
//!
//! # Schema
//!
//! - `parking`: one row per active session. `plate` is unique and
//!   `(floor, slot)` is unique. `time_in` is local wall-clock time in the form
//!   `YYYY-MM-DD HH:MM:SS`.
//! - `settings`: a single row (`slots`, `rate`, `floors`), seeded with the
//!   defaults the first time the database is opened.
//! - `transactions`: append-only log of closed sessions; `date` is
//!   `YYYY-MM-DD`.
//!
//! Floors are stored by name (`Floor 1`), matching what the front end shows.

use std::path::Path;

use carpark_core::session::{format_date, format_timestamp, parse_date, parse_timestamp};
use carpark_core::{
    Floor, OccupancySummary, ParkRequest, ParkingError, Plate, Session, Settings, SettingsError,
    SlotState, Transaction, VehicleType, allocate, compute_bill, slot_map,
};
use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use thiserror::Error;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A parking rule rejected the operation. Nothing was written.
    #[error(transparent)]
    Parking(#[from] ParkingError),
    /// The settings row is missing.
    #[error("settings row missing")]
    MissingSettings,
    /// The settings row holds out-of-range values.
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] SettingsError),
    /// Failed to parse a stored timestamp or date.
    #[error("invalid {table} timestamp for row {row_id}: {value}")]
    TimestampParse {
        table: &'static str,
        row_id: i64,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    /// A stored row violates the data model.
    #[error("invalid {table} row {row_id}: {message}")]
    InvalidRow {
        table: &'static str,
        row_id: i64,
        message: String,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for lifecycle considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The schema and default settings are initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        tracing::debug!(path = %path.display(), "opened car park database");
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Closes the connection, reporting any error SQLite raises while doing so.
    pub fn close(self) -> Result<(), DbError> {
        self.conn.close().map_err(|(_, err)| DbError::Sqlite(err))
    }

    /// Initializes the schema and seeds default settings.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS parking (
                id INTEGER PRIMARY KEY,
                plate TEXT NOT NULL UNIQUE,
                type TEXT NOT NULL,
                floor TEXT NOT NULL,
                slot INTEGER NOT NULL,
                time_in TEXT NOT NULL,
                UNIQUE (floor, slot)
            );

            CREATE INDEX IF NOT EXISTS idx_parking_floor ON parking(floor);

            CREATE TABLE IF NOT EXISTS settings (
                slots INTEGER NOT NULL,
                rate INTEGER NOT NULL,
                floors INTEGER NOT NULL
            );

            -- Append-only: rows are never updated or deleted.
            CREATE TABLE IF NOT EXISTS transactions (
                plate TEXT NOT NULL,
                floor TEXT NOT NULL,
                slot INTEGER NOT NULL,
                hours INTEGER NOT NULL,
                amount INTEGER NOT NULL,
                date TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
            ",
        )?;

        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM settings", [], |row| row.get(0))?;
        if count == 0 {
            let defaults = Settings::default();
            self.conn.execute(
                "INSERT INTO settings (slots, rate, floors) VALUES (?, ?, ?)",
                params![
                    defaults.slots_per_floor,
                    defaults.hourly_rate,
                    defaults.floor_count
                ],
            )?;
            tracing::info!(?defaults, "seeded default settings");
        }
        Ok(())
    }

    /// Loads the car park settings.
    pub fn settings(&self) -> Result<Settings, DbError> {
        load_settings(&self.conn)
    }

    /// Lists the slot numbers in use on a floor, ascending.
    pub fn occupied_slots(&self, floor: Floor) -> Result<Vec<u32>, DbError> {
        occupied_slots(&self.conn, floor)
    }

    /// Returns the slot a vehicle parked on `floor` now would get.
    pub fn allocate(&self, floor: Floor) -> Result<u32, DbError> {
        let settings = self.settings()?;
        let occupied = self.occupied_slots(floor)?;
        Ok(allocate(floor, occupied, &settings)?)
    }

    /// Parks a vehicle, timestamped with the current local time.
    pub fn park(&mut self, request: &ParkRequest) -> Result<Session, DbError> {
        self.park_at(request, Local::now().naive_local())
    }

    /// Parks a vehicle with an explicit entry time.
    ///
    /// Checks run in order: floor exists, floor has room, plate not already
    /// parked. Any failure leaves the store untouched.
    pub fn park_at(&mut self, request: &ParkRequest, now: NaiveDateTime) -> Result<Session, DbError> {
        let entry_time = now.with_nanosecond(0).unwrap_or(now);
        let tx = self.conn.transaction()?;

        let settings = load_settings(&tx)?;
        let occupied = occupied_slots(&tx, request.floor)?;
        let slot = allocate(request.floor, occupied, &settings)?;

        if find_session_by_plate(&tx, &request.plate)?.is_some() {
            return Err(ParkingError::DuplicatePlate {
                plate: request.plate.clone(),
            }
            .into());
        }

        let inserted = tx.execute(
            "INSERT INTO parking (plate, type, floor, slot, time_in) VALUES (?, ?, ?, ?, ?)",
            params![
                request.plate.as_str(),
                request.vehicle_type.as_str(),
                request.floor.to_string(),
                slot,
                format_timestamp(entry_time),
            ],
        );
        if let Err(err) = inserted {
            return Err(map_plate_conflict(err, &request.plate));
        }
        let id = tx.last_insert_rowid();
        tx.commit()?;

        tracing::info!(
            id,
            plate = %request.plate,
            floor = %request.floor,
            slot,
            "vehicle parked"
        );
        Ok(Session {
            id,
            plate: request.plate.clone(),
            vehicle_type: request.vehicle_type.clone(),
            floor: request.floor,
            slot,
            entry_time,
        })
    }

    /// Closes a session at the current local time and bills it.
    pub fn exit(&mut self, session_id: i64) -> Result<Transaction, DbError> {
        self.exit_at(session_id, Local::now().naive_local())
    }

    /// Closes a session at `now` and bills it.
    ///
    /// The session delete and the transaction insert commit together or not
    /// at all.
    pub fn exit_at(&mut self, session_id: i64, now: NaiveDateTime) -> Result<Transaction, DbError> {
        let tx = self.conn.transaction()?;

        let settings = load_settings(&tx)?;
        let session = find_session(&tx, session_id)?.ok_or_else(|| ParkingError::SessionNotFound {
            session: session_id.to_string(),
        })?;
        let bill = compute_bill(session.entry_time, now, settings.hourly_rate);
        let record = session.close(bill, now.date());

        tx.execute("DELETE FROM parking WHERE id = ?", [session_id])?;
        tx.execute(
            "
            INSERT INTO transactions (plate, floor, slot, hours, amount, date)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
            params![
                record.plate.as_str(),
                record.floor.to_string(),
                record.slot,
                record.billed_hours,
                record.fee,
                format_date(record.date),
            ],
        )?;
        tx.commit()?;

        tracing::info!(
            session_id,
            plate = %record.plate,
            hours = record.billed_hours,
            fee = record.fee,
            "vehicle exited"
        );
        Ok(record)
    }

    /// Looks up an active session by its ID.
    pub fn session(&self, session_id: i64) -> Result<Option<Session>, DbError> {
        find_session(&self.conn, session_id)
    }

    /// Looks up the active session for a plate.
    pub fn session_by_plate(&self, plate: &Plate) -> Result<Option<Session>, DbError> {
        find_session_by_plate(&self.conn, plate)
    }

    /// Returns the session parked in a given slot, if any.
    pub fn session_at(&self, floor: Floor, slot: u32) -> Result<Option<Session>, DbError> {
        let row = self
            .conn
            .query_row(
                &format!("{SESSION_COLUMNS} WHERE floor = ? AND slot = ?"),
                params![floor.to_string(), slot],
                SessionRow::from_row,
            )
            .optional()?;
        row.map(Session::try_from).transpose()
    }

    /// Lists all active sessions ordered by ID.
    pub fn list_active_sessions(&self) -> Result<Vec<Session>, DbError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SESSION_COLUMNS} ORDER BY id ASC"))?;
        let rows = stmt.query_map([], SessionRow::from_row)?;
        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(Session::try_from(row?)?);
        }
        Ok(sessions)
    }

    /// Computes occupancy for one floor from the current sessions.
    pub fn occupancy_summary(&self, floor: Floor) -> Result<OccupancySummary, DbError> {
        let settings = self.settings()?;
        settings.check_floor(floor)?;
        let occupied: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM parking WHERE floor = ?",
            [floor.to_string()],
            |row| row.get(0),
        )?;
        Ok(OccupancySummary::new(floor, &settings, occupied))
    }

    /// Computes occupancy for every configured floor, in floor order.
    pub fn dashboard(&self) -> Result<Vec<OccupancySummary>, DbError> {
        let settings = self.settings()?;
        settings
            .floors()
            .map(|floor| self.occupancy_summary(floor))
            .collect()
    }

    /// Lays out every slot on a floor with the session occupying it.
    pub fn slot_map(&self, floor: Floor) -> Result<Vec<SlotState<Session>>, DbError> {
        let settings = self.settings()?;
        settings.check_floor(floor)?;
        let mut stmt = self
            .conn
            .prepare(&format!("{SESSION_COLUMNS} WHERE floor = ? ORDER BY slot ASC"))?;
        let rows = stmt.query_map([floor.to_string()], SessionRow::from_row)?;
        let mut occupants = Vec::new();
        for row in rows {
            let session = Session::try_from(row?)?;
            occupants.push((session.slot, session));
        }
        Ok(slot_map(settings.slots_per_floor, occupants))
    }

    /// Lists the transaction log in insertion order.
    ///
    /// With `since`, only transactions dated on or after that day are returned.
    pub fn list_transactions(&self, since: Option<NaiveDate>) -> Result<Vec<Transaction>, DbError> {
        let since = since.map_or_else(String::new, format_date);
        let mut stmt = self.conn.prepare(
            "
            SELECT rowid, plate, floor, slot, hours, amount, date
            FROM transactions
            WHERE date >= ?
            ORDER BY rowid ASC
            ",
        )?;
        let rows = stmt.query_map([since], |row| {
            Ok(TransactionRow {
                row_id: row.get(0)?,
                plate: row.get(1)?,
                floor: row.get(2)?,
                slot: row.get(3)?,
                hours: row.get(4)?,
                amount: row.get(5)?,
                date: row.get(6)?,
            })
        })?;
        let mut transactions = Vec::new();
        for row in rows {
            transactions.push(Transaction::try_from(row?)?);
        }
        Ok(transactions)
    }
}

const SESSION_COLUMNS: &str = "SELECT id, plate, type, floor, slot, time_in FROM parking";

#[derive(Debug)]
struct SessionRow {
    id: i64,
    plate: String,
    vehicle_type: String,
    floor: String,
    slot: i64,
    time_in: String,
}

impl SessionRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            plate: row.get(1)?,
            vehicle_type: row.get(2)?,
            floor: row.get(3)?,
            slot: row.get(4)?,
            time_in: row.get(5)?,
        })
    }
}

impl TryFrom<SessionRow> for Session {
    type Error = DbError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        const TABLE: &str = "parking";
        let invalid = |message: String| DbError::InvalidRow {
            table: TABLE,
            row_id: row.id,
            message,
        };
        let entry_time = parse_timestamp(&row.time_in).map_err(|source| DbError::TimestampParse {
            table: TABLE,
            row_id: row.id,
            value: row.time_in.clone(),
            source,
        })?;
        Ok(Self {
            id: row.id,
            plate: Plate::new(row.plate.as_str()).map_err(|e| invalid(e.to_string()))?,
            vehicle_type: VehicleType::new(row.vehicle_type.as_str())
                .map_err(|e| invalid(e.to_string()))?,
            floor: row.floor.parse::<Floor>().map_err(|e| invalid(e.to_string()))?,
            slot: positive_slot(row.slot).ok_or_else(|| invalid(format!("invalid slot {}", row.slot)))?,
            entry_time,
        })
    }
}

#[derive(Debug)]
struct TransactionRow {
    row_id: i64,
    plate: String,
    floor: String,
    slot: i64,
    hours: i64,
    amount: i64,
    date: String,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = DbError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        const TABLE: &str = "transactions";
        let invalid = |message: String| DbError::InvalidRow {
            table: TABLE,
            row_id: row.row_id,
            message,
        };
        let date = parse_date(&row.date).map_err(|source| DbError::TimestampParse {
            table: TABLE,
            row_id: row.row_id,
            value: row.date.clone(),
            source,
        })?;
        Ok(Self {
            plate: Plate::new(row.plate.as_str()).map_err(|e| invalid(e.to_string()))?,
            floor: row.floor.parse::<Floor>().map_err(|e| invalid(e.to_string()))?,
            slot: positive_slot(row.slot).ok_or_else(|| invalid(format!("invalid slot {}", row.slot)))?,
            billed_hours: row.hours,
            fee: row.amount,
            date,
        })
    }
}

fn positive_slot(slot: i64) -> Option<u32> {
    u32::try_from(slot).ok().filter(|s| *s > 0)
}

fn load_settings(conn: &Connection) -> Result<Settings, DbError> {
    let raw: Option<(i64, i64, i64)> = conn
        .query_row(
            "SELECT slots, rate, floors FROM settings ORDER BY rowid ASC LIMIT 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()?;
    let (slots, rate, floors) = raw.ok_or(DbError::MissingSettings)?;
    Ok(Settings::from_raw(slots, rate, floors)?)
}

fn occupied_slots(conn: &Connection, floor: Floor) -> Result<Vec<u32>, DbError> {
    let mut stmt = conn.prepare("SELECT slot FROM parking WHERE floor = ? ORDER BY slot ASC")?;
    let rows = stmt.query_map([floor.to_string()], |row| row.get::<_, i64>(0))?;
    let mut slots = Vec::new();
    for row in rows {
        if let Some(slot) = positive_slot(row?) {
            slots.push(slot);
        }
    }
    Ok(slots)
}

fn find_session(conn: &Connection, session_id: i64) -> Result<Option<Session>, DbError> {
    let row = conn
        .query_row(
            &format!("{SESSION_COLUMNS} WHERE id = ?"),
            [session_id],
            SessionRow::from_row,
        )
        .optional()?;
    row.map(Session::try_from).transpose()
}

fn find_session_by_plate(conn: &Connection, plate: &Plate) -> Result<Option<Session>, DbError> {
    let row = conn
        .query_row(
            &format!("{SESSION_COLUMNS} WHERE plate = ?"),
            [plate.as_str()],
            SessionRow::from_row,
        )
        .optional()?;
    row.map(Session::try_from).transpose()
}

/// Maps a unique-constraint failure on `parking.plate` to [`ParkingError::DuplicatePlate`].
fn map_plate_conflict(err: rusqlite::Error, plate: &Plate) -> DbError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, Some(message))
            if failure.code == ErrorCode::ConstraintViolation && message.contains("parking.plate") =>
        {
            ParkingError::DuplicatePlate {
                plate: plate.clone(),
            }
            .into()
        }
        _ => err.into(),
    }
}
