//! Parking fee computation.
//!
//! Every started hour is billed in full: one second bills one hour, exactly
//! 3600 seconds bills one hour, 3601 seconds bills two.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Seconds in a billable hour.
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Billed hours and the fee they cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub hours: i64,
    pub fee: i64,
}

/// Returns the number of hours billed for a stay from `entry` to `now`.
///
/// Partial hours round up. A stay that is not positive (same second, or a
/// clock that moved backwards) still bills one hour so that the billed
/// amount is never zero.
pub fn billed_hours(entry: NaiveDateTime, now: NaiveDateTime) -> i64 {
    let elapsed = now.signed_duration_since(entry).num_seconds();
    if elapsed <= 0 {
        return 1;
    }
    (elapsed + SECONDS_PER_HOUR - 1) / SECONDS_PER_HOUR
}

/// Fee for `hours` at `hourly_rate`, saturating instead of overflowing.
pub const fn fee(hours: i64, hourly_rate: i64) -> i64 {
    hours.saturating_mul(hourly_rate)
}

/// Computes the bill for a stay.
pub fn compute_bill(entry: NaiveDateTime, now: NaiveDateTime, hourly_rate: i64) -> Bill {
    let hours = billed_hours(entry, now);
    Bill {
        hours,
        fee: fee(hours, hourly_rate),
    }
}
