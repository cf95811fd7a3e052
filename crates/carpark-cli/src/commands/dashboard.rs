//! Dashboard command for per-floor occupancy.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;

use carpark_core::OccupancySummary;
use carpark_db::Database;

pub fn run<W: Write>(writer: &mut W, db: &Database, json: bool) -> Result<()> {
    let summaries = db.dashboard()?;
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&summaries)?)?;
    } else {
        write!(writer, "{}", format_dashboard(&summaries))?;
    }
    Ok(())
}

/// Formats floor summaries as a table with a totals row.
pub fn format_dashboard(summaries: &[OccupancySummary]) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "{:<9}  {:>5}  {:>8}  {:>9}",
        "Floor", "Total", "Occupied", "Available"
    )
    .unwrap();
    writeln!(output, "─────────  ─────  ────────  ─────────").unwrap();

    let (mut total, mut occupied, mut available) = (0_u32, 0_u32, 0_u32);
    for summary in summaries {
        writeln!(
            output,
            "{:<9}  {:>5}  {:>8}  {:>9}",
            summary.floor.to_string(),
            summary.total,
            summary.occupied,
            summary.available
        )
        .unwrap();
        total += summary.total;
        occupied += summary.occupied;
        available += summary.available;
    }

    writeln!(output, "─────────  ─────  ────────  ─────────").unwrap();
    writeln!(
        output,
        "{:<9}  {:>5}  {:>8}  {:>9}",
        "All", total, occupied, available
    )
    .unwrap();

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    use carpark_core::session::parse_timestamp;
    use carpark_core::{Floor, ParkRequest};

    use insta::assert_snapshot;

    #[test]
    fn dashboard_shows_every_floor() {
        let mut db = Database::open_in_memory().unwrap();
        let now = parse_timestamp("2024-01-01 10:00:00").unwrap();
        for (plate, floor) in [("AAA111", 1), ("BBB222", 1), ("CCC333", 3)] {
            let request = ParkRequest::new(plate, "Sedan", Floor::new(floor).unwrap()).unwrap();
            db.park_at(&request, now).unwrap();
        }

        let mut output = Vec::new();
        run(&mut output, &db, false).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Floor      Total  Occupied  Available
        ─────────  ─────  ────────  ─────────
        Floor 1       10         2          8
        Floor 2       10         0         10
        Floor 3       10         1          9
        ─────────  ─────  ────────  ─────────
        All           30         3         27
        ");
    }

    #[test]
    fn dashboard_json_has_one_entry_per_floor() {
        let db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        run(&mut output, &db, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        let floors = value.as_array().unwrap();
        assert_eq!(floors.len(), 3);
        assert_eq!(floors[2]["floor"], "Floor 3");
        assert_eq!(floors[2]["available"], 10);
    }
}
