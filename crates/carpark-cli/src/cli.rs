//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::exit::ExitArgs;
use crate::commands::park::ParkArgs;
use crate::commands::slots::{SlotArgs, SlotsArgs};
use crate::commands::transactions::TransactionsArgs;

/// Car park manager.
///
/// Parks vehicles in the lowest free slot of a floor, bills them by the
/// started hour on exit, and shows occupancy per floor.
#[derive(Debug, Parser)]
#[command(name = "carpark", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Park a vehicle in the lowest free slot of a floor.
    Park(ParkArgs),

    /// Exit a parked vehicle and print its receipt.
    Exit(ExitArgs),

    /// List vehicles currently parked.
    Sessions {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show occupancy for every floor.
    Dashboard {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the slot grid of a floor.
    Slots(SlotsArgs),

    /// Show the vehicle parked in a slot.
    Slot(SlotArgs),

    /// List completed, billed sessions.
    Transactions(TransactionsArgs),

    /// Show the car park settings.
    Settings,
}
