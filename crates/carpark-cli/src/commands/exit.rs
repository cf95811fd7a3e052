//! Exit command for billing and releasing a parked vehicle.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use carpark_core::{ParkingError, Plate, Transaction};
use carpark_db::Database;

use crate::Config;

#[derive(Debug, Args)]
pub struct ExitArgs {
    /// Session ID shown by `carpark sessions`.
    #[arg(required_unless_present = "plate")]
    pub session_id: Option<i64>,
    /// Exit by licence plate instead of session ID.
    #[arg(long, short, conflicts_with = "session_id")]
    pub plate: Option<String>,
}

pub fn run<W: Write>(writer: &mut W, db: &mut Database, args: &ExitArgs, config: &Config) -> Result<()> {
    let session_id = match (&args.plate, args.session_id) {
        (Some(plate), _) => {
            let plate = Plate::new(plate.as_str())
                .map_err(|_| ParkingError::MissingFields { field: "plate" })?;
            db.session_by_plate(&plate)?
                .ok_or_else(|| ParkingError::SessionNotFound {
                    session: plate.to_string(),
                })?
                .id
        }
        (None, Some(id)) => id,
        (None, None) => anyhow::bail!("specify a session ID or --plate"),
    };

    let receipt = db.exit(session_id)?;
    write_receipt(writer, &receipt, config)
}

/// Writes the receipt handed to the driver on exit.
pub fn write_receipt<W: Write>(writer: &mut W, receipt: &Transaction, config: &Config) -> Result<()> {
    writeln!(writer, "Receipt")?;
    writeln!(writer, "Plate: {}", receipt.plate)?;
    writeln!(writer, "Floor: {}", receipt.floor)?;
    writeln!(writer, "Slot:  {}", receipt.slot)?;
    writeln!(writer, "Hours: {}", receipt.billed_hours)?;
    writeln!(writer, "Fee:   {}", config.money(receipt.fee))?;
    Ok(())
}
