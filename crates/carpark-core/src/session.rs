//! Parking sessions and the transactions they close into.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::billing::Bill;
use crate::error::ParkingError;
use crate::types::{Floor, Plate, VehicleType};

/// Storage format for entry timestamps (`YYYY-MM-DD HH:MM:SS`, local time).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Storage format for transaction dates (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats an entry timestamp for storage and display.
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a stored entry timestamp.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
}

/// Formats a transaction date.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a stored transaction date.
pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
}

/// Validated input for parking a vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkRequest {
    pub plate: Plate,
    pub vehicle_type: VehicleType,
    pub floor: Floor,
}

impl ParkRequest {
    /// Validates raw form input.
    ///
    /// Fails with [`ParkingError::MissingFields`] when the plate or the
    /// vehicle type is blank.
    pub fn new(plate: &str, vehicle_type: &str, floor: Floor) -> Result<Self, ParkingError> {
        let plate = Plate::new(plate).map_err(|_| ParkingError::MissingFields { field: "plate" })?;
        let vehicle_type = VehicleType::new(vehicle_type)
            .map_err(|_| ParkingError::MissingFields {
                field: "vehicle type",
            })?;
        Ok(Self {
            plate,
            vehicle_type,
            floor,
        })
    }
}

/// An active parking session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Surrogate key used to exit the session.
    pub id: i64,
    pub plate: Plate,
    pub vehicle_type: VehicleType,
    pub floor: Floor,
    pub slot: u32,
    #[serde(with = "timestamp_serde")]
    pub entry_time: NaiveDateTime,
}

impl Session {
    /// Builds the transaction that closes this session.
    pub fn close(&self, bill: Bill, date: NaiveDate) -> Transaction {
        Transaction {
            plate: self.plate.clone(),
            floor: self.floor,
            slot: self.slot,
            billed_hours: bill.hours,
            fee: bill.fee,
            date,
        }
    }
}

/// A completed, billed session. Transactions are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub plate: Plate,
    pub floor: Floor,
    pub slot: u32,
    pub billed_hours: i64,
    pub fee: i64,
    pub date: NaiveDate,
}

mod timestamp_serde {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse_timestamp(&value).map_err(serde::de::Error::custom)
    }
}
