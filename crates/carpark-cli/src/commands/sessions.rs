//! Sessions command for listing parked vehicles.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;

use carpark_core::Session;
use carpark_core::session::format_timestamp;
use carpark_db::Database;

use super::util::trim_lines;

pub fn run<W: Write>(writer: &mut W, db: &Database, json: bool) -> Result<()> {
    let sessions = db.list_active_sessions()?;
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&sessions)?)?;
    } else {
        write!(writer, "{}", format_sessions(&sessions))?;
    }
    Ok(())
}

/// Formats active sessions as a table.
pub fn format_sessions(sessions: &[Session]) -> String {
    let mut output = String::new();

    if sessions.is_empty() {
        writeln!(output, "No vehicles parked.").unwrap();
        return output;
    }

    writeln!(
        output,
        "{:<5} {:<12} {:<12} {:<9} {:<5} Time In",
        "ID", "Plate", "Type", "Floor", "Slot"
    )
    .unwrap();
    for session in sessions {
        writeln!(
            output,
            "{:<5} {:<12} {:<12} {:<9} {:<5} {}",
            session.id,
            session.plate.as_str(),
            session.vehicle_type.as_str(),
            session.floor.to_string(),
            session.slot,
            format_timestamp(session.entry_time)
        )
        .unwrap();
    }

    trim_lines(&output)
}
