//! Expense CLI commands

use std::io::Write;

use clap::Subcommand;

use crate::dates;
use crate::display::{format_expense_list, format_standard_expenses};
use crate::error::AdminResult;
use crate::services::parse_amount;
use crate::session::Session;

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record an expense under any label
    Add {
        label: String,
        amount: String,
        /// Due date (DD/MM/YYYY)
        #[arg(short, long)]
        due: String,
    },
    /// Record a standard expense (by name or number); without arguments,
    /// list the standard labels
    Standard {
        label: Option<String>,
        amount: Option<String>,
        /// Due date (DD/MM/YYYY)
        #[arg(short, long)]
        due: Option<String>,
    },
    /// List expenses
    List,
    /// Delete every expense with a label, or one expense by id
    Delete {
        label: Option<String>,
        /// Expense id (e.g. exp-1a2b3c4d)
        #[arg(long, conflicts_with = "label")]
        id: Option<String>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    session: &mut Session,
    cmd: ExpenseCommands,
    out: &mut dyn Write,
) -> AdminResult<()> {
    let mut service = session.expenses()?;

    match cmd {
        ExpenseCommands::Add { label, amount, due } => {
            let amount = parse_amount(&amount, "Expense amount")?;
            let expense = service.add(&label, amount, dates::parse(&due)?)?;
            writeln!(out, "Added expense {}: {}", expense.id, expense)?;
        }

        ExpenseCommands::Standard { label, amount, due } => match (label, amount, due) {
            (Some(label), Some(amount), Some(due)) => {
                let amount = parse_amount(&amount, "Expense amount")?;
                let expense = service.add_standard(&label, amount, dates::parse(&due)?)?;
                writeln!(out, "Added expense {}: {}", expense.id, expense)?;
            }
            _ => {
                writeln!(out, "Standard expenses (expense standard <n> <amount> --due DD/MM/YYYY):")?;
                write!(out, "{}", format_standard_expenses(service.standard_labels()))?;
            }
        },

        ExpenseCommands::List => {
            writeln!(out, "{}", format_expense_list(service.list()).trim_end())?;
        }

        ExpenseCommands::Delete { label, id } => match (label, id) {
            (_, Some(id)) => {
                let expense = service.delete(&id)?;
                writeln!(out, "Deleted expense {}: {}", expense.id, expense)?;
            }
            (Some(label), None) => {
                let removed = service.delete_by_label(&label)?;
                writeln!(out, "Deleted {} expense(s) labelled '{}'", removed.len(), label.trim())?;
            }
            (None, None) => {
                return Err(crate::error::AdminError::Validation(
                    "Give a label or --id".into(),
                ))
            }
        },
    }

    Ok(())
}
