use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use carpark_cli::commands::{dashboard, exit, park, sessions, settings, slots, transactions};
use carpark_cli::{Cli, Commands, Config};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(carpark_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = carpark_db::Database::open(&config.database_path).with_context(|| {
        format!("failed to open {}", config.database_path.display())
    })?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let (mut db, config) = open_database(cli.config.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Park(args) => park::run(&mut out, &mut db, args)?,
        Commands::Exit(args) => exit::run(&mut out, &mut db, args, &config)?,
        Commands::Sessions { json } => sessions::run(&mut out, &db, *json)?,
        Commands::Dashboard { json } => dashboard::run(&mut out, &db, *json)?,
        Commands::Slots(args) => slots::run_grid(&mut out, &db, args)?,
        Commands::Slot(args) => slots::run_info(&mut out, &db, args)?,
        Commands::Transactions(args) => transactions::run(&mut out, &db, args, &config)?,
        Commands::Settings => settings::run(&mut out, &db, &config)?,
    }

    out.flush()?;
    db.close().context("failed to close database")?;
    Ok(())
}
