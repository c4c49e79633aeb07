//! Ordered in-memory table
//!
//! Every record collection is a `Table`: rows keep insertion order, edits
//! replace a row in place, and deletes close the gap.

use crate::models::{
    CashEntry, CashEntryId, Expense, ExpenseId, LoadEntryId, PaymentId, Student, Teacher,
    TeachingLoadEntry, TuitionPayment,
};

/// Records looked up by a display name
pub trait Named {
    fn name(&self) -> &str;

    /// Case-insensitive, whitespace-trimmed name comparison
    fn matches_name(&self, name: &str) -> bool {
        normalize_name(self.name()) == normalize_name(name)
    }
}

/// Records carrying a surrogate identifier
pub trait Identified {
    type Id: Copy + Eq + std::fmt::Display;

    fn id(&self) -> Self::Id;

    /// Match the id against user-typed text (short display form or UUID prefix)
    fn matches_id(&self, text: &str) -> bool;
}

/// Normalize a name for matching
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// An ordered collection of records
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T> Table<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row at the end
    pub fn add(&mut self, row: T) {
        self.rows.push(row);
    }

    /// Snapshot of all rows in insertion order
    pub fn list(&self) -> &[T] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Remove every row matching a predicate, keeping the order of the rest
    pub fn remove_where<P>(&mut self, mut predicate: P) -> Vec<T>
    where
        P: FnMut(&T) -> bool,
    {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.rows.len());
        for row in self.rows.drain(..) {
            if predicate(&row) {
                removed.push(row);
            } else {
                kept.push(row);
            }
        }
        self.rows = kept;
        removed
    }
}

impl<T: Named> Table<T> {
    /// First row with the given name
    pub fn find_by_name(&self, name: &str) -> Option<&T> {
        self.rows.iter().find(|row| row.matches_name(name))
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.find_by_name(name).is_some()
    }

    /// Replace the first row with the given name, keeping its position
    ///
    /// Returns false (and changes nothing) when no row matches.
    pub fn update(&mut self, name: &str, row: T) -> bool {
        match self.rows.iter().position(|r| r.matches_name(name)) {
            Some(index) => {
                self.rows[index] = row;
                true
            }
            None => false,
        }
    }

    /// Remove the first row with the given name; a miss is a no-op
    pub fn remove(&mut self, name: &str) -> Option<T> {
        let index = self.rows.iter().position(|r| r.matches_name(name))?;
        Some(self.rows.remove(index))
    }
}

impl<T: Identified> Table<T> {
    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// Rows whose id matches user-typed text
    pub fn find_by_id_text(&self, text: &str) -> Vec<&T> {
        self.rows.iter().filter(|row| row.matches_id(text)).collect()
    }

    pub fn remove_id(&mut self, id: T::Id) -> Option<T> {
        let index = self.rows.iter().position(|r| r.id() == id)?;
        Some(self.rows.remove(index))
    }
}

impl Named for Student {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Teacher {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Expense {
    fn name(&self) -> &str {
        &self.label
    }
}

macro_rules! impl_identified {
    ($record:ty, $id:ty) => {
        impl Identified for $record {
            type Id = $id;

            fn id(&self) -> $id {
                self.id
            }

            fn matches_id(&self, text: &str) -> bool {
                self.id.matches_short(text)
            }
        }
    };
}

impl_identified!(Expense, ExpenseId);
impl_identified!(CashEntry, CashEntryId);
impl_identified!(TeachingLoadEntry, LoadEntryId);
impl_identified!(TuitionPayment, PaymentId);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CashKind, Money};
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn student(name: &str) -> Student {
        Student::new(name, ymd(1995, 1, 20), ymd(2025, 7, 1))
    }

    fn names(table: &Table<Student>) -> Vec<&str> {
        table.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut table = Table::new();
        table.add(student("Ana"));
        table.add(student("Bruno"));
        table.add(student("Carla"));

        assert_eq!(names(&table), vec!["Ana", "Bruno", "Carla"]);
        assert_eq!(table.list().last().unwrap().name, "Carla");
    }

    #[test]
    fn test_find_by_name() {
        let mut table = Table::new();
        table.add(student("Ana"));

        assert!(table.find_by_name(" ana ").is_some());
        assert!(table.find_by_name("Bruno").is_none());
    }

    #[test]
    fn test_update_keeps_position() {
        let mut table = Table::new();
        table.add(student("Ana"));
        table.add(student("Bruno"));
        table.add(student("Carla"));

        assert!(table.update("Bruno", student("Beatriz")));
        assert_eq!(names(&table), vec!["Ana", "Beatriz", "Carla"]);

        assert!(!table.update("Nobody", student("Zoe")));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_remove_compacts() {
        let mut table = Table::new();
        table.add(student("Ana"));
        table.add(student("Bruno"));
        table.add(student("Carla"));

        assert_eq!(table.remove("Ana").unwrap().name, "Ana");
        assert_eq!(names(&table), vec!["Bruno", "Carla"]);
        assert_eq!(table.list()[0].name, "Bruno");
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut table = Table::new();
        table.add(student("Ana"));
        let before = table.list().to_vec();

        assert!(table.remove("Nobody").is_none());
        assert_eq!(table.list(), before.as_slice());
    }

    #[test]
    fn test_first_match_wins_on_duplicates() {
        let mut table = Table::new();
        let mut first = student("Ana");
        first.phone = "1".into();
        let mut second = student("Ana");
        second.phone = "2".into();
        table.add(first);
        table.add(second);

        assert_eq!(table.find_by_name("Ana").unwrap().phone, "1");
        table.remove("Ana");
        assert_eq!(table.find_by_name("Ana").unwrap().phone, "2");
    }

    #[test]
    fn test_remove_where_by_label() {
        let mut table = Table::new();
        table.add(Expense::new("Rent", Money::from_cents(100), ymd(2025, 5, 5)));
        table.add(Expense::new("Water", Money::from_cents(50), ymd(2025, 5, 10)));
        table.add(Expense::new("Rent", Money::from_cents(100), ymd(2025, 6, 5)));

        let removed = table.remove_where(|e| e.matches_name("rent"));
        assert_eq!(removed.len(), 2);
        assert_eq!(table.len(), 1);
        assert_eq!(table.list()[0].label, "Water");
    }

    #[test]
    fn test_identified_lookup() {
        let mut table = Table::new();
        let entry = CashEntry::new(ymd(2025, 6, 5), CashKind::Inflow, Money::from_cents(100));
        let id = entry.id;
        table.add(entry);

        assert!(table.get(id).is_some());
        assert_eq!(table.find_by_id_text(&id.to_string()).len(), 1);
        assert!(table.remove_id(id).is_some());
        assert!(table.is_empty());
        assert!(table.remove_id(id).is_none());
    }
}
