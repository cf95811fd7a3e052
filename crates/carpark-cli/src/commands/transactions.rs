//! Transactions command for reviewing the billing log.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Args;

use carpark_core::Transaction;
use carpark_core::session::format_date;
use carpark_db::Database;

use super::util::{parse_since, trim_lines};
use crate::Config;

#[derive(Debug, Args)]
pub struct TransactionsArgs {
    /// Only show transactions on or after this date (YYYY-MM-DD, "today", "7 days ago").
    #[arg(long)]
    pub since: Option<String>,
    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run<W: Write>(writer: &mut W, db: &Database, args: &TransactionsArgs, config: &Config) -> Result<()> {
    run_at(writer, db, args, config, Local::now().date_naive())
}

fn run_at<W: Write>(
    writer: &mut W,
    db: &Database,
    args: &TransactionsArgs,
    config: &Config,
    today: NaiveDate,
) -> Result<()> {
    let since = args
        .since
        .as_deref()
        .map(|s| parse_since(s, today))
        .transpose()
        .context("invalid --since")?;
    let transactions = db.list_transactions(since)?;

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&transactions)?)?;
    } else {
        write!(writer, "{}", format_transactions(&transactions, config))?;
    }
    Ok(())
}

/// Formats the billing log with a revenue total.
pub fn format_transactions(transactions: &[Transaction], config: &Config) -> String {
    let mut output = String::new();

    if transactions.is_empty() {
        writeln!(output, "No transactions recorded.").unwrap();
        return output;
    }

    writeln!(
        output,
        "{:<10}  {:<12}  {:<9}  {:>4}  {:>5}  {:>8}",
        "Date", "Plate", "Floor", "Slot", "Hours", "Fee"
    )
    .unwrap();
    for tx in transactions {
        writeln!(
            output,
            "{:<10}  {:<12}  {:<9}  {:>4}  {:>5}  {:>8}",
            format_date(tx.date),
            tx.plate.as_str(),
            tx.floor.to_string(),
            tx.slot,
            tx.billed_hours,
            config.money(tx.fee)
        )
        .unwrap();
    }

    let revenue = transactions
        .iter()
        .fold(0_i64, |sum, tx| sum.saturating_add(tx.fee));
    writeln!(output).unwrap();
    writeln!(
        output,
        "{} transactions, {} collected",
        transactions.len(),
        config.money(revenue)
    )
    .unwrap();

    trim_lines(&output)
}
