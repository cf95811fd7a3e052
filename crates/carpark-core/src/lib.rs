//! Core domain logic for the car park manager.
//!
//! This crate contains the fundamental types and logic for:
//! - Allocation: choosing the lowest free slot on a floor
//! - Billing: turning a stay into billed hours and a fee
//! - Sessions and transactions: the records moved between park and exit

mod allocation;
pub mod billing;
mod error;
pub mod session;
pub mod settings;
mod summary;
pub mod types;

pub use allocation::{SlotState, allocate, first_free_slot, slot_map};
pub use billing::{Bill, compute_bill};
pub use error::ParkingError;
pub use session::{ParkRequest, Session, Transaction};
pub use settings::{Settings, SettingsError};
pub use summary::OccupancySummary;
pub use types::{Floor, Plate, ValidationError, VehicleType};
