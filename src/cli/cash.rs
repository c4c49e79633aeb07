//! Daily cash CLI commands

use std::io::Write;
use std::path::PathBuf;

use clap::Subcommand;

use crate::display::format_cash_entries;
use crate::error::{AdminError, AdminResult};
use crate::models::CashKind;
use crate::services::parse_amount;
use crate::session::Session;

use super::report::create_output;
use super::{date_or_today, month_or_current};

/// Cash subcommands
#[derive(Subcommand, Debug)]
pub enum CashCommands {
    /// Record the day's movements (zero amounts are skipped)
    Add {
        /// Date (DD/MM/YYYY, defaults to today)
        date: Option<String>,
        /// Money received
        #[arg(long = "in", default_value = "0")]
        inflow: String,
        /// Money paid out
        #[arg(long = "out", default_value = "0")]
        outflow: String,
    },
    /// Replace the day's total for one kind
    Set {
        /// Date (DD/MM/YYYY)
        date: String,
        /// Kind (in, out)
        kind: String,
        amount: String,
    },
    /// List every cash entry
    List,
    /// Delete one entry by id
    Delete {
        /// Entry id (e.g. csh-1a2b3c4d)
        id: String,
    },
    /// Monthly totals and balance
    Summary {
        /// Month (MM/YYYY, defaults to the current month)
        month: Option<String>,
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a cash command
pub fn handle_cash_command(
    session: &mut Session,
    cmd: CashCommands,
    out: &mut dyn Write,
) -> AdminResult<()> {
    match cmd {
        CashCommands::Add {
            date,
            inflow,
            outflow,
        } => {
            let date = date_or_today(session, date.as_deref())?;
            let inflow = parse_amount(&inflow, "Inflow")?;
            let outflow = parse_amount(&outflow, "Outflow")?;

            let recorded = session.cash()?.record_day(date, inflow, outflow)?;

            if recorded.is_empty() {
                writeln!(out, "Nothing to record.")?;
            }
            for entry in recorded {
                writeln!(out, "Recorded {} {} ({})", entry.kind, entry.amount, entry.id)?;
            }
        }

        CashCommands::Set { date, kind, amount } => {
            let date = crate::dates::parse(&date)?;
            let kind = CashKind::parse(&kind).ok_or_else(|| {
                AdminError::Validation(format!("Unknown cash kind: '{}'. Use in or out", kind))
            })?;
            let amount = parse_amount(&amount, "Cash amount")?;

            match session.cash()?.set_day(date, kind, amount)? {
                Some(entry) => writeln!(
                    out,
                    "{} {} set to {} ({})",
                    crate::dates::format(date),
                    kind,
                    entry.amount,
                    entry.id
                )?,
                None => writeln!(out, "{} {} cleared", crate::dates::format(date), kind)?,
            }
        }

        CashCommands::List => {
            let service = session.cash()?;
            writeln!(out, "{}", format_cash_entries(service.list()).trim_end())?;
        }

        CashCommands::Delete { id } => {
            let entry = session.cash()?.delete(&id)?;
            writeln!(out, "Deleted cash entry {}", entry.id)?;
        }

        CashCommands::Summary { month, output } => {
            let month = month_or_current(session, month.as_deref())?;
            let summary = session.cash_summary(month)?;

            if let Some(path) = output {
                let mut writer = create_output(&path)?;
                summary.export_csv(&mut writer)?;
                writer.flush()?;
                writeln!(out, "Cash summary exported to: {}", path.display())?;
            } else {
                write!(out, "{}", summary.format_terminal(&session.settings().currency_symbol))?;
            }
        }
    }

    Ok(())
}
