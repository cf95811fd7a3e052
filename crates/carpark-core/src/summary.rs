//! Per-floor occupancy figures for the dashboard.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::types::Floor;

/// Occupancy of one floor at the moment it was computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancySummary {
    pub floor: Floor,
    pub total: u32,
    pub occupied: u32,
    pub available: u32,
}

impl OccupancySummary {
    /// Builds the summary from the number of active sessions on `floor`.
    pub const fn new(floor: Floor, settings: &Settings, occupied: u32) -> Self {
        let total = settings.slots_per_floor;
        Self {
            floor,
            total,
            occupied,
            available: total.saturating_sub(occupied),
        }
    }

    /// Returns true when no slot is left.
    pub const fn is_full(&self) -> bool {
        self.available == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupied_plus_available_is_capacity() {
        let settings = Settings::default();
        let floor = Floor::new(1).unwrap();
        for occupied in 0..=settings.slots_per_floor {
            let summary = OccupancySummary::new(floor, &settings, occupied);
            assert_eq!(summary.occupied + summary.available, settings.slots_per_floor);
            assert_eq!(summary.total, settings.slots_per_floor);
        }
    }

    #[test]
    fn full_floor_reports_zero_available() {
        let settings = Settings {
            slots_per_floor: 2,
            ..Settings::default()
        };
        let summary = OccupancySummary::new(Floor::new(2).unwrap(), &settings, 2);
        assert!(summary.is_full());
        assert_eq!(summary.available, 0);
    }
}
