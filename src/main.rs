use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

use phison_admin::cli::{format_menu, run_line, Flow};
use phison_admin::config::Settings;
use phison_admin::dates;
use phison_admin::session::Session;

#[derive(Parser)]
#[command(
    name = "phison",
    author = "Phison Centro de Treinamento",
    version,
    about = "Administrative record-keeper for a small training school",
    long_about = "Keeps the student roster, tuition alerts, birthdays, the weekly \
                  schedule, monthly expenses, daily cash and teaching-load pay for \
                  one session. Records live in memory; export them before leaving."
)]
struct Cli {
    /// Settings file (JSON or YAML)
    #[arg(short, long, env = "PHISON_CONFIG")]
    config: Option<PathBuf>,

    /// Passphrase for the entry gate (prompted when omitted)
    #[arg(long, env = "PHISON_PASSPHRASE", hide_env_values = true)]
    passphrase: Option<String>,

    /// Treat this date (DD/MM/YYYY) as today
    #[arg(long)]
    today: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default settings to a file
    InitConfig {
        /// Destination (.json, .yaml or .yml)
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(Commands::InitConfig { path }) = &cli.command {
        Settings::default().save(path)?;
        println!("Default settings written to: {}", path.display());
        return Ok(());
    }

    let settings = Settings::load_or_default(cli.config.as_deref())
        .context("Failed to load settings")?;
    let mut session = Session::new(settings);

    if let Some(today) = &cli.today {
        session.set_today(dates::parse(today).context("Invalid --today")?);
    }

    let passphrase = match cli.passphrase {
        Some(passphrase) => Zeroizing::new(passphrase),
        None => Zeroizing::new(
            rpassword::prompt_password("Passphrase: ").context("Failed to read passphrase")?,
        ),
    };
    if !session.unlock(&passphrase) {
        bail!("Wrong passphrase");
    }
    drop(passphrase);

    run_shell(&mut session)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("phison_admin={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read commands from stdin until `exit` or end of input
fn run_shell(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "Phison - {}", dates::format(session.today()))?;
    write!(stdout, "{}", format_menu(session.current_section()))?;
    writeln!(stdout, "Type `help` for commands.")?;

    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            write!(stdout, "phison> ")?;
            stdout.flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read input")?;

        if run_line(session, &line, &mut stdout)? == Flow::Exit {
            break;
        }
    }

    if let Ok(storage) = session.storage() {
        info!(rows = storage.row_count(), "session closed");
    }
    Ok(())
}
