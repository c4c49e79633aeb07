//! Tuition CLI commands

use std::io::Write;

use clap::Subcommand;

use super::date_or_today;
use crate::dates;
use crate::display::format_payment_list;
use crate::error::{AdminError, AdminResult};
use crate::models::PaymentMethod;
use crate::services::parse_amount;
use crate::session::Session;

/// Tuition subcommands
#[derive(Subcommand, Debug)]
pub enum TuitionCommands {
    /// Record a tuition payment
    Pay {
        /// Student name
        student: String,
        /// Amount paid
        amount: String,
        /// Due date of the paid month (DD/MM/YYYY)
        #[arg(short, long)]
        due: String,
        /// Payment date (DD/MM/YYYY, defaults to today)
        #[arg(long)]
        paid: Option<String>,
        /// Payment method (cash, pix, credit, debit, slip)
        #[arg(short, long, default_value = "cash")]
        method: String,
    },
    /// List payments
    List {
        /// Only this student's payments
        #[arg(short, long)]
        student: Option<String>,
    },
}

/// Handle a tuition command
pub fn handle_tuition_command(
    session: &mut Session,
    cmd: TuitionCommands,
    out: &mut dyn Write,
) -> AdminResult<()> {
    match cmd {
        TuitionCommands::Pay {
            student,
            amount,
            due,
            paid,
            method,
        } => {
            let due_date = dates::parse(&due)?;
            let paid_on = date_or_today(session, paid.as_deref())?;
            let amount = parse_amount(&amount, "Amount paid")?;
            let method = PaymentMethod::parse(&method).ok_or_else(|| {
                let valid: Vec<String> = PaymentMethod::ALL.iter().map(|m| m.to_string()).collect();
                AdminError::Validation(format!(
                    "Invalid payment method: '{}'. Valid methods: {}",
                    method,
                    valid.join(", ")
                ))
            })?;

            let payment =
                session
                    .tuition()?
                    .record_payment(&student, due_date, paid_on, amount, method)?;
            writeln!(
                out,
                "Recorded payment {} for {}: {} ({}){}",
                payment.id,
                payment.student,
                payment.amount,
                payment.method,
                if payment.is_late() { " - late" } else { "" }
            )?;
        }

        TuitionCommands::List { student } => {
            let service = session.tuition()?;
            let payments = match student {
                Some(name) => service.payments_for(&name),
                None => service.list().iter().collect(),
            };
            writeln!(out, "{}", format_payment_list(&payments).trim_end())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::run_line;
    use crate::config::Settings;
    use chrono::NaiveDate;

    fn run(session: &mut Session, line: &str) -> String {
        let mut out = Vec::new();
        run_line(session, line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_pay_and_list() {
        let mut session = Session::new(Settings::default());
        session.unlock("phison2025");
        session.set_today(NaiveDate::from_ymd_opt(2025, 6, 12).unwrap());
        run(&mut session, "student add Ana --birth 20/01/1995 --due 10/06/2025");

        let out = run(&mut session, "tuition pay ana 150,00 --due 10/06/2025 --method pix");
        assert!(out.contains("for Ana: 150.00 (Pix) - late"));

        let out = run(&mut session, "tuition pay Ghost 10 --due 10/06/2025");
        assert!(out.starts_with("Warning: Student not found"));

        let out = run(&mut session, "tuition pay Ana 10 --due 10/06/2025 --method cheque");
        assert!(out.contains("Invalid payment method"));

        assert!(run(&mut session, "tuition list --student Ana").contains("12/06/2025"));
    }
}
