//! Database metadata.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Metadata section of a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub company_name: String,

    /// Normalized email domain (see [`normalize_suffix`])
    pub email_suffix: String,

    /// Date the database was first created. Preserved verbatim across
    /// reloads; never regenerated for an existing database.
    pub creation_date: NaiveDate,

    pub max_employees: u32,

    /// Recomputed from the record count on every load and save; the
    /// stored value is never trusted.
    pub total_employees: u32,
}

/// Normalize a raw company name or domain override into an email domain:
/// lowercase it, then keep only the characters that are already ASCII
/// letters. Digits, punctuation, whitespace, and accented letters are
/// all dropped ("Café Müller" becomes "cafmller").
pub fn normalize_suffix(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_strips() {
        assert_eq!(normalize_suffix("ACME Corp"), "acmecorp");
        assert_eq!(normalize_suffix("Company Name"), "companyname");
        assert_eq!(normalize_suffix("K7 Systems, Inc."), "ksystemsinc");
    }

    #[test]
    fn normalize_drops_accented_letters() {
        assert_eq!(normalize_suffix("Café Müller"), "cafmller");
    }

    #[test]
    fn normalize_passes_clean_input_through() {
        assert_eq!(normalize_suffix("acmecorp"), "acmecorp");
        assert_eq!(normalize_suffix(""), "");
    }
}
