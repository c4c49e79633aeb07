//! Schedule CLI commands

use std::io::Write;

use clap::Subcommand;

use crate::display::format_schedule_grid;
use crate::error::{AdminError, AdminResult};
use crate::models::schedule::parse_weekday;
use crate::models::SlotKey;
use crate::session::Session;

/// Schedule subcommands
#[derive(Subcommand, Debug)]
pub enum ScheduleCommands {
    /// Fill a slot (an empty text clears it)
    Set {
        /// Weekday (monday, tue, ...)
        day: String,
        /// Hour of the class (e.g. 7 or 07:00)
        hour: String,
        /// Who is booked in the slot
        #[arg(num_args = 0.., trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Clear one slot, or the whole grid when no slot is given
    Clear {
        day: Option<String>,
        hour: Option<String>,
    },
    /// Show the weekly grid
    Show,
}

/// Handle a schedule command
pub fn handle_schedule_command(
    session: &mut Session,
    cmd: ScheduleCommands,
    out: &mut dyn Write,
) -> AdminResult<()> {
    let mut service = session.schedule()?;

    match cmd {
        ScheduleCommands::Set { day, hour, text } => {
            let day = parse_day(&day)?;
            let hour = parse_hour(&hour)?;
            let text = text.join(" ");
            service.set_slot(day, hour, &text)?;
            let key = SlotKey::new(day, hour);
            match service.slot(day, hour)? {
                Some(current) => writeln!(out, "{}: {}", key, current)?,
                None => writeln!(out, "{} cleared", key)?,
            }
        }

        ScheduleCommands::Clear { day, hour } => match (day, hour) {
            (Some(day), Some(hour)) => {
                let day = parse_day(&day)?;
                let hour = parse_hour(&hour)?;
                service.set_slot(day, hour, "")?;
                writeln!(out, "{} cleared", SlotKey::new(day, hour))?;
            }
            (None, None) => {
                let count = service.clear();
                writeln!(out, "Cleared {} slot(s)", count)?;
            }
            _ => {
                return Err(AdminError::Validation(
                    "Give both a day and an hour, or neither".into(),
                ))
            }
        },

        ScheduleCommands::Show => {
            write!(
                out,
                "{}",
                format_schedule_grid(&service.weekdays(), &service.grid())
            )?;
        }
    }

    Ok(())
}

fn parse_day(text: &str) -> AdminResult<chrono::Weekday> {
    parse_weekday(text)
        .ok_or_else(|| AdminError::Validation(format!("Unknown weekday: '{}'", text)))
}

/// Accept `7`, `07` or `07:00`
fn parse_hour(text: &str) -> AdminResult<u32> {
    let text = text.trim();
    let hours = text.strip_suffix(":00").unwrap_or(text);
    hours
        .parse()
        .map_err(|_| AdminError::Validation(format!("Invalid hour: '{}'", text)))
}
