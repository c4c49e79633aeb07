//! Weekly class schedule
//!
//! A grid of weekday x hour slots, each holding free text (usually the
//! names of the students booked in that slot).

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One cell of the schedule grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    /// Days from Monday (0 = Monday)
    pub day: u32,
    /// Hour of day, 0-23
    pub hour: u32,
}

impl SlotKey {
    pub fn new(weekday: Weekday, hour: u32) -> Self {
        Self {
            day: weekday.num_days_from_monday(),
            hour,
        }
    }

    pub fn weekday(&self) -> Weekday {
        weekday_from_index(self.day)
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {:02}:00", weekday_name(self.weekday()), self.hour)
    }
}

/// Parse a weekday from its English name or abbreviation
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    s.trim().parse::<Weekday>().ok()
}

/// Full English name of a weekday
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn weekday_from_index(index: u32) -> Weekday {
    match index % 7 {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}

/// The weekly schedule: only filled slots are stored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    slots: BTreeMap<SlotKey, String>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text of a slot; empty text clears it
    ///
    /// Returns the previous text, if any.
    pub fn set(&mut self, key: SlotKey, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            self.slots.remove(&key)
        } else {
            self.slots.insert(key, text.to_string())
        }
    }

    pub fn get(&self, key: SlotKey) -> Option<&str> {
        self.slots.get(&key).map(String::as_str)
    }

    /// Filled slots ordered by weekday then hour
    pub fn filled(&self) -> impl Iterator<Item = (&SlotKey, &String)> {
        self.slots.iter()
    }

    pub fn filled_count(&self) -> usize {
        self.slots.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
