//! Domain errors surfaced by park and exit.

use thiserror::Error;

use crate::types::{Floor, Plate};

/// User-facing failures of the parking operations.
///
/// Every variant leaves the store untouched; the caller reports it and waits
/// for corrected input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParkingError {
    /// A required input (plate or vehicle type) was empty.
    #[error("all fields required: {field} cannot be empty")]
    MissingFields { field: &'static str },

    /// The floor is not one of the configured floors.
    #[error("{floor} does not exist (car park has {floor_count} floors)")]
    UnknownFloor { floor: Floor, floor_count: u32 },

    /// Every slot on the floor is occupied.
    #[error("{floor} is full")]
    FloorFull { floor: Floor },

    /// The plate already has an active session.
    #[error("vehicle already parked: {plate}")]
    DuplicatePlate { plate: Plate },

    /// No active session matches the given identifier.
    #[error("parking session not found: {session}")]
    SessionNotFound { session: String },
}
