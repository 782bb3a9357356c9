//! Record generation.
//!
//! Produces fully populated candidate records: random name, department,
//! salary, and a calendar-correct birth date, plus an email address that
//! is unique among the existing records.

use std::collections::BTreeMap;

use chrono::{Datelike, Local, NaiveDate};
use rand::Rng;
use uuid::Uuid;

use crate::error::{Result, RosterError};
use crate::record::names::{BuiltinNames, NameSource};
use crate::record::Record;

/// Youngest age (in years) a generated record can have
const MIN_AGE_YEARS: i32 = 18;

/// Oldest age (in years) a generated record can have
const MAX_AGE_YEARS: i32 = 65;

/// Generates candidate records
pub struct RecordFactory {
    names: Box<dyn NameSource>,
}

impl Default for RecordFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordFactory {
    /// Create a factory backed by the built-in name tables
    pub fn new() -> Self {
        Self {
            names: Box::new(BuiltinNames),
        }
    }

    /// Create a factory with a custom name source
    pub fn with_source(names: Box<dyn NameSource>) -> Self {
        Self { names }
    }

    /// Generate a record for `id`.
    ///
    /// `existing` is consulted twice: to reject an `id` collision, and to
    /// derive an email address that does not clash with any record that
    /// shares the same name. The factory never mutates `existing`; the
    /// caller decides whether the candidate is kept.
    pub fn generate(
        &self,
        id: Uuid,
        existing: &BTreeMap<Uuid, Record>,
        email_suffix: &str,
    ) -> Result<Record> {
        if existing.contains_key(&id) {
            return Err(RosterError::DuplicateId(id));
        }

        let first_name = self.names.first_name();
        let last_name = self.names.last_name();

        let mut rng = rand::thread_rng();
        let department = rng.gen_range(1..=10).to_string();
        let salary = format!("{:.2}", rng.gen_range(10_000..=20_000) as f64);
        let birth_date = random_birth_date(&mut rng, Local::now().date_naive());
        let email = derive_email(&first_name, &last_name, email_suffix, existing);

        Ok(Record {
            id,
            first_name,
            last_name,
            department,
            salary,
            birth_date,
            email,
        })
    }
}

/// Pick a uniform birth date for someone between `MIN_AGE_YEARS` and
/// `MAX_AGE_YEARS` years old, clamping the day to the month's real length.
fn random_birth_date<R: Rng>(rng: &mut R, today: NaiveDate) -> String {
    let year = rng.gen_range(today.year() - MAX_AGE_YEARS..=today.year() - MIN_AGE_YEARS);
    let month = rng.gen_range(1u32..=12);
    let day = rng.gen_range(1..=days_in_month(year, month));
    format!("{:04}-{:02}-{:02}", year, month, day)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        // February: let chrono decide whether the year is a leap year
        _ => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
    }
}

/// Derive a unique email address from a name.
///
/// The base address is `first.last@suffix.com`, lowercased. If any
/// existing record already carries the same name (case-insensitive),
/// a numeric suffix is appended to the local part: one greater than the
/// highest suffix currently in use, where the bare address counts as 0.
/// Suffixes freed by deleted records become available again.
fn derive_email(
    first: &str,
    last: &str,
    suffix: &str,
    existing: &BTreeMap<Uuid, Record>,
) -> String {
    let first_lower = first.to_lowercase();
    let last_lower = last.to_lowercase();
    let local = format!("{}.{}", first_lower, last_lower);

    let same_name: Vec<&Record> = existing
        .values()
        .filter(|r| {
            r.first_name.to_lowercase() == first_lower && r.last_name.to_lowercase() == last_lower
        })
        .collect();

    if same_name.is_empty() {
        return format!("{}@{}.com", local, suffix);
    }

    let highest = same_name
        .iter()
        .filter_map(|r| numeric_suffix(&r.email, &local))
        .max()
        .unwrap_or(0);

    format!("{}{}@{}.com", local, highest + 1, suffix)
}

/// Extract the numeric suffix of an email whose local part starts with
/// `local`: `jane.doe2@...` yields `Some(2)`, `jane.doe@...` yields
/// `Some(0)`, anything else yields `None`.
fn numeric_suffix(email: &str, local: &str) -> Option<u32> {
    let head = email.split('@').next()?;
    let digits = head.strip_prefix(local)?;
    if digits.is_empty() {
        return Some(0);
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28); // century, not a leap year
        assert_eq!(days_in_month(2000, 2), 29); // quadricentennial
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 12), 31);
    }

    #[test]
    fn numeric_suffix_parses_local_parts() {
        assert_eq!(numeric_suffix("jane.doe@x.com", "jane.doe"), Some(0));
        assert_eq!(numeric_suffix("jane.doe7@x.com", "jane.doe"), Some(7));
        assert_eq!(numeric_suffix("jane.doe12@x.com", "jane.doe"), Some(12));
        assert_eq!(numeric_suffix("john.doe@x.com", "jane.doe"), None);
        assert_eq!(numeric_suffix("jane.doeX@x.com", "jane.doe"), None);
    }
}
