//! Slot grid and slot lookup commands.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use clap::Args;

use carpark_core::session::format_timestamp;
use carpark_core::{Floor, Session, SlotState};
use carpark_db::Database;

use super::util::trim_lines;

/// Slots per grid row.
const GRID_COLUMNS: usize = 5;

#[derive(Debug, Args)]
pub struct SlotsArgs {
    /// Floor to show, as "Floor 2" or just "2".
    #[arg(long, short, default_value = "Floor 1")]
    pub floor: Floor,
}

#[derive(Debug, Args)]
pub struct SlotArgs {
    /// Slot number.
    pub slot: u32,
    /// Floor the slot is on.
    #[arg(long, short, default_value = "Floor 1")]
    pub floor: Floor,
}

pub fn run_grid<W: Write>(writer: &mut W, db: &Database, args: &SlotsArgs) -> Result<()> {
    let slots = db.slot_map(args.floor)?;
    write!(writer, "{}", format_grid(args.floor, &slots))?;
    Ok(())
}

pub fn run_info<W: Write>(writer: &mut W, db: &Database, args: &SlotArgs) -> Result<()> {
    db.settings()?.check_floor(args.floor)?;
    match db.session_at(args.floor, args.slot)? {
        Some(session) => {
            writeln!(writer, "Plate:   {}", session.plate)?;
            writeln!(writer, "Type:    {}", session.vehicle_type)?;
            writeln!(writer, "Time In: {}", format_timestamp(session.entry_time))?;
        }
        None => writeln!(writer, "Slot is empty")?,
    }
    Ok(())
}

/// Renders a floor as rows of slots, showing the plate in each occupied one.
pub fn format_grid(floor: Floor, slots: &[SlotState<Session>]) -> String {
    let occupied = slots.iter().filter(|slot| !slot.is_free()).count();
    let mut output = String::new();
    writeln!(output, "{floor}: {occupied} of {} occupied", slots.len()).unwrap();

    for (row_index, row) in slots.chunks(GRID_COLUMNS).enumerate() {
        for (column, state) in row.iter().enumerate() {
            let number = row_index * GRID_COLUMNS + column + 1;
            let label = match state {
                SlotState::Free => "free",
                SlotState::Occupied(session) => session.plate.as_str(),
            };
            write!(output, "{number:<3}{label:<10}").unwrap();
        }
        writeln!(output).unwrap();
    }

    trim_lines(&output)
}
