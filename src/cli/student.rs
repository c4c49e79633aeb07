//! Student CLI commands

use std::io::Write;

use clap::Subcommand;

use crate::display::{format_student_details, format_student_list};
use crate::error::{AdminError, AdminResult};
use crate::services::StudentForm;
use crate::session::Session;

/// Student subcommands
#[derive(Subcommand, Debug)]
pub enum StudentCommands {
    /// Register a new student
    Add {
        /// Full name
        name: String,
        /// Birth date (DD/MM/YYYY)
        #[arg(short, long)]
        birth: String,
        /// Plan due date (DD/MM/YYYY)
        #[arg(short, long)]
        due: String,
        #[arg(short, long, default_value = "")]
        email: String,
        /// National ID (CPF)
        #[arg(long, default_value = "")]
        national_id: String,
        #[arg(short, long, default_value = "")]
        phone: String,
        /// Monthly fee (e.g. "150.00")
        #[arg(short, long, default_value = "")]
        fee: String,
        /// Status (active, inactive)
        #[arg(short, long, default_value = "")]
        status: String,
    },
    /// List all students
    List,
    /// Show a student's details
    Show {
        name: String,
    },
    /// Edit a student; omitted options keep their current value
    Edit {
        /// Current name
        name: String,
        /// New name
        #[arg(long)]
        rename: Option<String>,
        #[arg(short, long)]
        birth: Option<String>,
        #[arg(short, long)]
        due: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(long)]
        national_id: Option<String>,
        #[arg(short, long)]
        phone: Option<String>,
        /// Monthly fee; an empty value clears it
        #[arg(short, long)]
        fee: Option<String>,
        /// Status; an empty value clears it
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Delete a student
    Delete {
        name: String,
    },
}

/// Handle a student command
pub fn handle_student_command(
    session: &mut Session,
    cmd: StudentCommands,
    out: &mut dyn Write,
) -> AdminResult<()> {
    let currency = session.settings().currency_symbol.clone();
    let mut service = session.students()?;

    match cmd {
        StudentCommands::Add {
            name,
            birth,
            due,
            email,
            national_id,
            phone,
            fee,
            status,
        } => {
            let form = StudentForm {
                name,
                email,
                birth_date: birth,
                national_id,
                phone,
                plan_due: due,
                monthly_fee: fee,
                status,
            };
            let student = service.create(&form)?;
            writeln!(out, "Registered student: {}", student.name)?;
            writeln!(out, "  Birthday: {}", student.birthday())?;
        }

        StudentCommands::List => {
            writeln!(out, "{}", format_student_list(service.list()).trim_end())?;
        }

        StudentCommands::Show { name } => {
            let student = service
                .find(&name)
                .ok_or_else(|| AdminError::student_not_found(name.trim()))?;
            write!(out, "{}", format_student_details(student, &currency))?;
        }

        StudentCommands::Edit {
            name,
            rename,
            birth,
            due,
            email,
            national_id,
            phone,
            fee,
            status,
        } => {
            let current = service
                .find(&name)
                .ok_or_else(|| AdminError::student_not_found(name.trim()))?;

            let mut form = StudentForm::from_student(current);
            let changes = [
                (&mut form.name, rename),
                (&mut form.birth_date, birth),
                (&mut form.plan_due, due),
                (&mut form.email, email),
                (&mut form.national_id, national_id),
                (&mut form.phone, phone),
                (&mut form.monthly_fee, fee),
                (&mut form.status, status),
            ];
            let mut changed = false;
            for (field, value) in changes {
                if let Some(value) = value {
                    *field = value;
                    changed = true;
                }
            }

            if !changed {
                writeln!(out, "No changes specified.")?;
                return Ok(());
            }

            let student = service.update(&name, &form)?;
            writeln!(out, "Updated student: {}", student.name)?;
        }

        StudentCommands::Delete { name } => {
            let student = service.delete(&name)?;
            writeln!(out, "Deleted student: {}", student.name)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::run_line;
    use crate::config::Settings;

    fn run(session: &mut Session, line: &str) -> String {
        let mut out = Vec::new();
        run_line(session, line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn session() -> Session {
        let mut session = Session::new(Settings::default());
        session.unlock("phison2025");
        session
    }

    #[test]
    fn test_add_show_edit_delete() {
        let mut session = session();

        let out = run(
            &mut session,
            r#"student add "Ana Souza" --birth 20/01/1995 --due 01/07/2025 --fee 150"#,
        );
        assert!(out.contains("Registered student: Ana Souza"));
        assert!(out.contains("Birthday: 20/01"));

        let out = run(&mut session, r#"student edit "ana souza" --phone "11 5555-0000""#);
        assert!(out.contains("Updated student: Ana Souza"));

        let out = run(&mut session, r#"student show "Ana Souza""#);
        assert!(out.contains("Phone:        11 5555-0000"));
        assert!(out.contains("Monthly fee:  R$150.00"));

        let out = run(&mut session, r#"student edit "Ana Souza""#);
        assert!(out.contains("No changes specified"));

        let out = run(&mut session, r#"student delete "Ana Souza""#);
        assert!(out.contains("Deleted student"));
        assert!(run(&mut session, "student list").contains("No students registered"));
    }

    #[test]
    fn test_edit_missing_student() {
        let mut session = session();
        let out = run(&mut session, "student edit Nobody --phone 1");
        assert!(out.starts_with("Warning: Student not found: Nobody"));
    }
}
