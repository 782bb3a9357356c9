//! Configuration for rosterdb
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a rosterdb instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Path of the database file. Two siblings are managed next to it:
    ///   {db_path}.bak    (last-known-good backup)
    ///   {db_path}.tmp    (staging file for atomic saves)
    pub db_path: PathBuf,

    // -------------------------------------------------------------------------
    // Company Configuration
    // -------------------------------------------------------------------------
    /// Company name stamped into the metadata of a freshly created database
    pub company_name: String,

    /// Email domain override. When `None`, the domain is derived from the
    /// normalized company name.
    pub email_suffix: Option<String>,

    /// Maximum number of employees a freshly created database accepts
    pub max_employees: u32,
}

impl Config {
    /// Default capacity of a new database
    pub const DEFAULT_MAX_EMPLOYEES: u32 = 9999;

    /// Default company name of a new database
    pub const DEFAULT_COMPANY_NAME: &'static str = "Company Name";

    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./roster.db"),
            company_name: Self::DEFAULT_COMPANY_NAME.to_string(),
            email_suffix: None,
            max_employees: Self::DEFAULT_MAX_EMPLOYEES,
        }
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the database file path
    pub fn db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.db_path = path.into();
        self
    }

    /// Set the company name used when creating a new database
    pub fn company_name(mut self, name: impl Into<String>) -> Self {
        self.config.company_name = name.into();
        self
    }

    /// Set the email domain (normalized before use)
    pub fn email_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.email_suffix = Some(suffix.into());
        self
    }

    /// Set the maximum employee count for a new database
    pub fn max_employees(mut self, count: u32) -> Self {
        self.config.max_employees = count;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
