//! Snapshot manager
//!
//! Owns the database file and its siblings, and implements the
//! load/recover/initialize protocol.
//!
//! ## Load Protocol
//! 1. Missing or zero-length file: initialize a fresh database
//! 2. Decodable file: adopt it, recompute totals, refresh the backup
//! 3. Format mismatch: the file is not a database; reinitialize
//! 4. Corruption: copy the backup over the primary and retry once;
//!    if that also fails (or no backup exists), reinitialize
//!
//! The backup is refreshed only after a snapshot has parsed, so it
//! always holds the last state that was known to load.
//!
//! ## Save Protocol
//! Encode to a staging file, fsync, then rename over the primary. A
//! crash mid-save leaves the previous file intact.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{Result, RosterError};
use crate::snapshot::{codec, Metadata, Snapshot};

/// Manages the snapshot file, its staging sibling, and its backup
pub struct SnapshotManager {
    /// Primary database file
    path: PathBuf,

    // Defaults applied when creating a fresh database
    company_name: String,
    email_suffix: String,
    max_employees: u32,
}

impl SnapshotManager {
    /// Create a manager for the database file named by `config`.
    ///
    /// The email suffix is normalized here, once: either the configured
    /// override or, absent that, the company name.
    pub fn new(config: &Config) -> Self {
        let email_suffix = match &config.email_suffix {
            Some(suffix) => super::normalize_suffix(suffix),
            None => super::normalize_suffix(&config.company_name),
        };

        Self {
            path: config.db_path.clone(),
            company_name: config.company_name.clone(),
            email_suffix,
            max_employees: config.max_employees,
        }
    }

    /// Primary database file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Backup sibling: `<path>.bak`
    pub fn backup_path(&self) -> PathBuf {
        append_extension(&self.path, ".bak")
    }

    /// Staging sibling used for atomic saves: `<path>.tmp`
    pub fn temp_path(&self) -> PathBuf {
        append_extension(&self.path, ".tmp")
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Load the database, recovering or reinitializing as needed.
    ///
    /// This only fails on real filesystem errors; unreadable content is
    /// handled by recovery or reinitialization and never surfaces.
    pub fn load(&self) -> Result<Snapshot> {
        self.load_inner(true)
    }

    fn load_inner(&self, allow_restore: bool) -> Result<Snapshot> {
        if !self.path.exists() {
            warn!("No database file at {}", self.path.display());
            return self.initialize_fresh();
        }

        if fs::metadata(&self.path)?.len() == 0 {
            warn!("Database file {} is empty", self.path.display());
            return self.initialize_fresh();
        }

        let bytes = fs::read(&self.path)?;

        match codec::decode_snapshot(&bytes) {
            Ok(mut snapshot) => {
                snapshot.recount();
                self.refresh_backup();
                info!(
                    "Database loaded from {} ({} records)",
                    self.path.display(),
                    snapshot.records.len()
                );
                Ok(snapshot)
            }
            Err(RosterError::Format(reason)) => {
                error!("Data validation error: {}", reason);
                self.initialize_fresh()
            }
            Err(RosterError::Corrupted(reason)) => {
                error!("Error loading database file: {}", reason);
                if allow_restore {
                    match self.copy_backup_over_primary() {
                        Ok(true) => {
                            info!("Backup restored, retrying load");
                            return self.load_inner(false);
                        }
                        Ok(false) => warn!("No backup file found to restore"),
                        Err(e) => error!("{}", e),
                    }
                }
                self.initialize_fresh()
            }
            Err(other) => Err(other),
        }
    }

    /// Create, persist, and return an empty database
    fn initialize_fresh(&self) -> Result<Snapshot> {
        info!("Initializing empty database at {}", self.path.display());
        let metadata = Metadata {
            company_name: self.company_name.clone(),
            email_suffix: self.email_suffix.clone(),
            creation_date: Local::now().date_naive(),
            max_employees: self.max_employees,
            total_employees: 0,
        };
        let snapshot = Snapshot::empty(metadata);
        self.save(&snapshot)?;
        Ok(snapshot)
    }

    // -------------------------------------------------------------------------
    // Saving
    // -------------------------------------------------------------------------

    /// Persist a snapshot atomically.
    ///
    /// `total_employees` is recomputed from the record count before
    /// encoding; the value carried by `snapshot` is ignored.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let mut metadata = snapshot.metadata.clone();
        metadata.total_employees = snapshot.records.len() as u32;

        let bytes = codec::encode_snapshot(&metadata, &snapshot.records)?;

        let staging = self.temp_path();
        {
            let mut file = File::create(&staging)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        fs::rename(&staging, &self.path)?;

        debug!(
            "Snapshot saved to {} ({} bytes, {} records)",
            self.path.display(),
            bytes.len(),
            snapshot.records.len()
        );
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Backup
    // -------------------------------------------------------------------------

    /// Replace the primary file with the backup and reload.
    ///
    /// Returns whether the backup existed and was copied. Problems with
    /// the reloaded content are normalized by the load protocol and do
    /// not count as failure.
    pub fn restore_backup(&self) -> bool {
        match self.copy_backup_over_primary() {
            Ok(true) => {
                info!("Backup restored from {}", self.backup_path().display());
                if let Err(e) = self.load() {
                    error!("Reload after restore failed: {}", e);
                }
                true
            }
            Ok(false) => {
                warn!("No backup file found to restore");
                false
            }
            Err(e) => {
                error!("{}", e);
                false
            }
        }
    }

    /// Copy `<path>.bak` over the primary. `Ok(false)` means no backup
    /// exists; an error means the copy itself failed.
    fn copy_backup_over_primary(&self) -> Result<bool> {
        let backup = self.backup_path();
        if !backup.exists() {
            return Ok(false);
        }
        fs::copy(&backup, &self.path).map_err(|e| {
            RosterError::Recovery(format!(
                "Could not copy {} over {}: {}",
                backup.display(),
                self.path.display(),
                e
            ))
        })?;
        Ok(true)
    }

    /// Copy the primary over `<path>.bak`. Best effort: a failed
    /// refresh is logged and the stale backup is kept.
    fn refresh_backup(&self) {
        let backup = self.backup_path();
        match fs::copy(&self.path, &backup) {
            Ok(_) => debug!("Backup refreshed at {}", backup.display()),
            Err(e) => warn!("Could not refresh backup at {}: {}", backup.display(), e),
        }
    }
}

/// Append a literal suffix to a path: `roster.db` -> `roster.db.bak`
fn append_extension(path: &Path, suffix: &str) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(suffix);
    PathBuf::from(os)
}
