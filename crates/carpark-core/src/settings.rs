//! Car park settings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ParkingError;
use crate::types::Floor;

/// Default number of slots on each floor.
pub const DEFAULT_SLOTS_PER_FLOOR: u32 = 10;
/// Default hourly rate in whole currency units.
pub const DEFAULT_HOURLY_RATE: i64 = 50;
/// Default number of floors.
pub const DEFAULT_FLOOR_COUNT: u32 = 3;

/// Settings values that violate their bounds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("slots per floor must be positive, got {0}")]
    NoSlots(i64),
    #[error("floor count must be positive, got {0}")]
    NoFloors(i64),
    #[error("hourly rate cannot be negative, got {0}")]
    NegativeRate(i64),
}

/// Process-wide car park configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Capacity of every floor.
    pub slots_per_floor: u32,
    /// Fee charged per started hour.
    pub hourly_rate: i64,
    /// Number of floors, named `Floor 1` through `Floor N`.
    pub floor_count: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            slots_per_floor: DEFAULT_SLOTS_PER_FLOOR,
            hourly_rate: DEFAULT_HOURLY_RATE,
            floor_count: DEFAULT_FLOOR_COUNT,
        }
    }
}

impl Settings {
    /// Builds settings from raw stored integers, checking their bounds.
    pub fn from_raw(slots: i64, rate: i64, floors: i64) -> Result<Self, SettingsError> {
        let slots_per_floor = u32::try_from(slots)
            .ok()
            .filter(|n| *n > 0)
            .ok_or(SettingsError::NoSlots(slots))?;
        let floor_count = u32::try_from(floors)
            .ok()
            .filter(|n| *n > 0)
            .ok_or(SettingsError::NoFloors(floors))?;
        if rate < 0 {
            return Err(SettingsError::NegativeRate(rate));
        }
        Ok(Self {
            slots_per_floor,
            hourly_rate: rate,
            floor_count,
        })
    }

    /// Returns the configured floors in order.
    pub fn floors(&self) -> impl Iterator<Item = Floor> + use<> {
        (1..=self.floor_count).filter_map(|n| Floor::new(n).ok())
    }

    /// Returns whether `floor` is one of the configured floors.
    #[must_use]
    pub const fn has_floor(&self, floor: Floor) -> bool {
        floor.number() <= self.floor_count
    }

    /// Fails with [`ParkingError::UnknownFloor`] unless `floor` is configured.
    pub fn check_floor(&self, floor: Floor) -> Result<(), ParkingError> {
        if self.has_floor(floor) {
            Ok(())
        } else {
            Err(ParkingError::UnknownFloor {
                floor,
                floor_count: self.floor_count,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_initial_seed() {
        let settings = Settings::default();
        assert_eq!(settings.slots_per_floor, 10);
        assert_eq!(settings.hourly_rate, 50);
        assert_eq!(settings.floor_count, 3);
    }

    #[test]
    fn floors_are_numbered_from_one() {
        let names: Vec<String> = Settings::default().floors().map(|f| f.to_string()).collect();
        assert_eq!(names, vec!["Floor 1", "Floor 2", "Floor 3"]);
    }

    #[test]
    fn check_floor_rejects_floors_above_count() {
        let settings = Settings::default();
        assert!(settings.check_floor(Floor::new(3).unwrap()).is_ok());
        assert_eq!(
            settings.check_floor(Floor::new(4).unwrap()),
            Err(ParkingError::UnknownFloor {
                floor: Floor::new(4).unwrap(),
                floor_count: 3,
            })
        );
    }

    #[test]
    fn from_raw_validates_bounds() {
        assert_eq!(Settings::from_raw(10, 50, 3).unwrap(), Settings::default());
        assert_eq!(Settings::from_raw(0, 50, 3), Err(SettingsError::NoSlots(0)));
        assert_eq!(Settings::from_raw(10, 50, -2), Err(SettingsError::NoFloors(-2)));
        assert_eq!(
            Settings::from_raw(10, -1, 3),
            Err(SettingsError::NegativeRate(-1))
        );
    }

    #[test]
    fn zero_rate_is_allowed() {
        assert_eq!(Settings::from_raw(5, 0, 1).unwrap().hourly_rate, 0);
    }
}
