//! Slot allocation.
//!
//! A new session always takes the lowest-numbered free slot on its floor.
//! The scan is deterministic: no randomness and no balancing across floors.

use std::collections::BTreeSet;

use crate::error::ParkingError;
use crate::settings::Settings;
use crate::types::Floor;

/// Occupancy state of a single slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotState<T> {
    Free,
    Occupied(T),
}

impl<T> SlotState<T> {
    /// Returns true if nothing is parked in the slot.
    pub const fn is_free(&self) -> bool {
        matches!(self, Self::Free)
    }
}

/// Returns the lowest slot in `1..=capacity` that is not in `occupied`.
pub fn first_free_slot<I>(capacity: u32, occupied: I) -> Option<u32>
where
    I: IntoIterator<Item = u32>,
{
    let taken: BTreeSet<u32> = occupied.into_iter().collect();
    (1..=capacity).find(|slot| !taken.contains(slot))
}

/// Picks the slot for a new session on `floor`.
///
/// `occupied` holds the slot numbers already in use on that floor. Numbers
/// outside the floor's capacity are ignored.
pub fn allocate<I>(floor: Floor, occupied: I, settings: &Settings) -> Result<u32, ParkingError>
where
    I: IntoIterator<Item = u32>,
{
    settings.check_floor(floor)?;
    let slot = first_free_slot(settings.slots_per_floor, occupied)
        .ok_or(ParkingError::FloorFull { floor })?;
    tracing::debug!(%floor, slot, "allocated slot");
    Ok(slot)
}

/// Lays out every slot of a floor, pairing occupied slots with their occupant.
pub fn slot_map<T>(capacity: u32, occupants: impl IntoIterator<Item = (u32, T)>) -> Vec<SlotState<T>> {
    let mut slots: Vec<SlotState<T>> = (1..=capacity).map(|_| SlotState::Free).collect();
    for (slot, occupant) in occupants {
        let Some(index) = slot.checked_sub(1).and_then(|i| usize::try_from(i).ok()) else {
            continue;
        };
        if let Some(entry) = slots.get_mut(index) {
            *entry = SlotState::Occupied(occupant);
        }
    }
    slots
}
