//! Settings command for showing the car park configuration.

use std::io::Write;

use anyhow::Result;

use carpark_db::Database;

use crate::Config;

pub fn run<W: Write>(writer: &mut W, db: &Database, config: &Config) -> Result<()> {
    let settings = db.settings()?;

    writeln!(writer, "Database:        {}", config.database_path.display())?;
    writeln!(writer, "Floors:          {}", settings.floor_count)?;
    writeln!(writer, "Slots per floor: {}", settings.slots_per_floor)?;
    writeln!(writer, "Hourly rate:     {}", config.money(settings.hourly_rate))?;
    Ok(())
}
