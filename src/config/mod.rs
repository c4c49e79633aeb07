//! Configuration module
//!
//! This module provides the session settings: the shared passphrase, the
//! accepted birth-year range, the per-class pay rate, the standard expense
//! labels and the schedule grid dimensions.

pub mod settings;

pub use settings::{ScheduleSettings, Settings, YearRange};
