//! Park command for admitting a vehicle.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use carpark_core::session::format_timestamp;
use carpark_core::{Floor, ParkRequest};
use carpark_db::Database;

#[derive(Debug, Args)]
pub struct ParkArgs {
    /// Licence plate of the vehicle.
    pub plate: String,
    /// Vehicle type (e.g. Sedan, SUV, Motorcycle).
    #[arg(long = "type", short = 't')]
    pub vehicle_type: String,
    /// Floor to park on, as "Floor 2" or just "2".
    #[arg(long, short, default_value = "Floor 1")]
    pub floor: Floor,
}

pub fn run<W: Write>(writer: &mut W, db: &mut Database, args: &ParkArgs) -> Result<()> {
    let request = ParkRequest::new(&args.plate, &args.vehicle_type, args.floor)?;
    let session = db.park(&request)?;

    writeln!(
        writer,
        "Parked {} ({}) on {}, slot {}",
        session.plate, session.vehicle_type, session.floor, session.slot
    )?;
    writeln!(writer, "Session ID: {}", session.id)?;
    writeln!(writer, "Time in:    {}", format_timestamp(session.entry_time))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use carpark_core::ParkingError;
    use carpark_db::DbError;

    fn args(plate: &str, vehicle_type: &str, floor: u32) -> ParkArgs {
        ParkArgs {
            plate: plate.to_string(),
            vehicle_type: vehicle_type.to_string(),
            floor: Floor::new(floor).unwrap(),
        }
    }

    #[test]
    fn park_reports_assigned_slot() {
        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();

        run(&mut output, &mut db, &args("ABC123", "Sedan", 2)).unwrap();

        let output = String::from_utf8(output).unwrap();
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("Parked ABC123 (Sedan) on Floor 2, slot 1"));
        assert_eq!(lines.next(), Some("Session ID: 1"));
        assert!(lines.next().unwrap().starts_with("Time in:    "));
        assert_eq!(db.list_active_sessions().unwrap().len(), 1);
    }

    #[test]
    fn park_rejects_blank_fields() {
        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();

        let err = run(&mut output, &mut db, &args("   ", "Sedan", 1)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ParkingError>(),
            Some(&ParkingError::MissingFields { field: "plate" })
        );
        assert!(output.is_empty());
        assert!(db.list_active_sessions().unwrap().is_empty());
    }

    #[test]
    fn park_rejects_duplicate_plate() {
        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        run(&mut output, &mut db, &args("ABC123", "Sedan", 1)).unwrap();

        let err = run(&mut output, &mut db, &args("ABC123", "Van", 3)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DbError>(),
            Some(DbError::Parking(ParkingError::DuplicatePlate { .. }))
        ));
        assert_eq!(err.to_string(), "vehicle already parked: ABC123");
    }
}
