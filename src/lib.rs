//! Phison - administrative record-keeper for a small training school
//!
//! One passphrase-gated session keeps the student roster, tuition
//! payments, the weekly class schedule, monthly expenses, daily cash and
//! the teaching load of each teacher. Everything lives in memory for the
//! lifetime of the session; tables can be exported to XLSX or CSV.
//!
//! # Architecture
//!
//! - `config`: Session settings (passphrase, rates, schedule grid)
//! - `dates`: `DD/MM/YYYY` parsing and month arithmetic
//! - `error`: Custom error types
//! - `models`: Records (students, expenses, cash, teaching load, ...)
//! - `storage`: In-memory tables
//! - `services`: Validation and business rules over the tables
//! - `audit`: In-memory audit trail of every change
//! - `reports`: Tuition alerts, birthdays, cash summary, teaching-load pay
//! - `export`: XLSX and CSV output
//! - `session`: Passphrase gate and section navigation
//! - `display`: Terminal formatting
//! - `cli`: The interactive shell
//!
//! # Example
//!
//! ```rust,ignore
//! use phison_admin::config::Settings;
//! use phison_admin::session::Session;
//!
//! let mut session = Session::new(Settings::default());
//! session.unlock("phison2025");
//! let alerts = session.tuition_alerts()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod dates;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod session;
pub mod storage;

pub use error::{AdminError, AdminResult};
