//! Store Module
//!
//! The core record store that coordinates all components.
//!
//! ## Responsibilities
//! - Coordinate factory, in-memory state, and snapshot persistence
//! - Handle concurrent read/write access
//! - Persist every mutation, rolling back in memory when a save fails
//! - Run field queries with typed coercion

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use parking_lot::{MappedRwLockReadGuard, Mutex, RwLock, RwLockReadGuard};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{Result, RosterError};
use crate::query::{Operator, Value};
use crate::record::{Record, RecordFactory};
use crate::snapshot::{Metadata, Snapshot, SnapshotManager};

/// The main record store
///
/// ## Concurrency Model: Single-Writer / Multiple-Reader (SWMR)
///
/// - **Writes** (add/remove/update/reset/restore): Serialized by `write_lock`
///   - Only ONE mutation at a time
///   - Must acquire: write_lock → state (write) → snapshot save
///
/// - **Reads** (get/get_all/query/metadata): Concurrent
///   - No write_lock needed
///   - State uses an internal RwLock (many concurrent readers)
///
/// A reader running between a mutation and its save can observe state
/// that a failing save subsequently rolls back. Within one writer the
/// guarantee holds: when a mutation returns Ok, memory and disk agree.
pub struct RecordStore {
    /// Snapshot persistence (file, backup, staging)
    manager: SnapshotManager,

    /// Full database state (metadata + records)
    state: RwLock<Snapshot>,

    /// Serializes mutations (add/remove/update/reset/restore)
    write_lock: Mutex<()>,
}

impl RecordStore {
    /// Open or create a store with the given config
    ///
    /// On startup:
    /// 1. Ensure the parent directory exists
    /// 2. Load the database file, recovering from the backup or
    ///    initializing fresh as needed
    /// 3. Ready to serve requests
    pub fn open(config: Config) -> Result<Self> {
        // Step 1: Create the parent directory if it doesn't exist
        if let Some(parent) = config.db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Step 2: Build the snapshot manager (normalizes the email suffix)
        let manager = SnapshotManager::new(&config);

        // Step 3: Load, recover, or initialize the database file
        let snapshot = manager.load()?;

        Ok(Self {
            manager,
            state: RwLock::new(snapshot),
            write_lock: Mutex::new(()),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified database file
    pub fn open_path(path: &Path) -> Result<Self> {
        let mut config = Config::default();
        config.db_path = path.to_path_buf();
        Self::open(config)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Generate and insert a new employee, returning its id
    ///
    /// Steps:
    /// 1. Acquire write lock
    /// 2. Check capacity against the database's own metadata
    /// 3. Generate a candidate record and insert it
    /// 4. Persist, rolling back the insert if the save fails
    pub fn add(&self, factory: &RecordFactory) -> Result<Uuid> {
        let _write_guard = self.write_lock.lock();

        let id = Uuid::new_v4();
        {
            let mut state = self.state.write();

            // Step 1: Capacity gate, before any generation work
            let max = state.metadata.max_employees;
            if state.records.len() as u32 >= max {
                warn!("Maximum number of employees reached ({})", max);
                return Err(RosterError::CapacityReached(max));
            }

            // Step 2: Generate against the current records (email uniqueness)
            let record = factory.generate(id, &state.records, &state.metadata.email_suffix)?;

            // Step 3: Insert into memory
            state.records.insert(id, record);
        }

        // Step 4: Persist or roll back
        self.persist_or_reload()?;
        info!("Employee {} added", id);
        Ok(id)
    }

    /// Remove an employee by id
    pub fn remove(&self, id: Uuid) -> Result<()> {
        let _write_guard = self.write_lock.lock();

        {
            let mut state = self.state.write();
            if state.records.is_empty() {
                warn!("Employee database is empty");
                return Err(RosterError::NotFound(id));
            }
            if state.records.remove(&id).is_none() {
                error!("Cannot remove employee: id {} not found", id);
                return Err(RosterError::NotFound(id));
            }
        }

        self.persist_or_reload()?;
        info!("Employee {} removed", id);
        Ok(())
    }

    /// Overwrite one field of one employee
    ///
    /// Diagnosis order: read-only field, then unknown id, then unknown
    /// field name. The read-only check runs before the id is looked up.
    pub fn update_field(&self, id: Uuid, field: &str, value: &str) -> Result<()> {
        let _write_guard = self.write_lock.lock();

        if Record::is_read_only(field) {
            error!("Field '{}' is read-only", field);
            return Err(RosterError::ReadOnlyField(field.to_string()));
        }

        {
            let mut state = self.state.write();
            let Some(record) = state.records.get_mut(&id) else {
                error!("Cannot update employee: id {} not found", id);
                return Err(RosterError::NotFound(id));
            };
            if let Err(err) = record.set_field(field, value.to_string()) {
                error!("{}", err);
                return Err(err);
            }
        }

        self.persist_or_reload()?;
        info!("Field '{}' updated for employee {}", field, id);
        Ok(())
    }

    /// Delete every record, keeping the metadata
    pub fn reset(&self) -> Result<()> {
        let _write_guard = self.write_lock.lock();

        self.state.write().records.clear();

        self.persist_or_reload()?;
        info!("Employee database reset");
        Ok(())
    }

    /// Replace the database file with its backup and resync.
    ///
    /// Returns whether the backup existed and was copied; content
    /// problems in the restored file are normalized by the load
    /// protocol and do not count as failure.
    pub fn restore_backup(&self) -> bool {
        let _write_guard = self.write_lock.lock();

        let restored = self.manager.restore_backup();
        if restored {
            match self.manager.load() {
                Ok(snapshot) => *self.state.write() = snapshot,
                Err(err) => error!("Could not resync store after restore: {}", err),
            }
        }
        restored
    }

    /// Save the current state; on failure, resync memory from disk so
    /// the uncommitted mutation disappears, then report the original
    /// save error.
    fn persist_or_reload(&self) -> Result<()> {
        let save_result = {
            let state = self.state.read();
            self.manager.save(&state)
        };

        if let Err(err) = save_result {
            error!("Error updating database file: {}", err);
            match self.manager.load() {
                Ok(snapshot) => *self.state.write() = snapshot,
                Err(reload_err) => {
                    error!("Could not resync from disk after failed save: {}", reload_err)
                }
            }
            return Err(err);
        }
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Fetch a copy of one record
    pub fn get(&self, id: Uuid) -> Option<Record> {
        let found = self.state.read().records.get(&id).cloned();
        if found.is_none() {
            warn!("Employee {} not found", id);
        }
        found
    }

    /// Borrow the full record map without copying.
    ///
    /// Holds a read lock for the guard's lifetime; drop it before
    /// calling any mutation.
    pub fn get_all(&self) -> MappedRwLockReadGuard<'_, BTreeMap<Uuid, Record>> {
        RwLockReadGuard::map(self.state.read(), |state| &state.records)
    }

    /// Whether an employee with this id exists
    pub fn exists(&self, id: Uuid) -> bool {
        self.state.read().records.contains_key(&id)
    }

    /// Records whose `field` stands in the given relation to `value`.
    ///
    /// Both sides are coerced before comparison, so numeric strings
    /// compare numerically. Querying an empty database or a name that
    /// is not a record field fails with `UnknownQueryField`; comparing
    /// incompatible coerced types fails with `IncomparableTypes`.
    pub fn query_by_field(
        &self,
        field: &str,
        operator: &str,
        value: &str,
    ) -> Result<BTreeMap<Uuid, Record>> {
        let op = match Operator::parse(operator) {
            Ok(op) => op,
            Err(err) => {
                error!("Invalid operator '{}'", operator);
                return Err(err);
            }
        };

        let state = self.state.read();
        if state.records.is_empty() || !Record::is_field(field) {
            error!("Field '{}' does not exist in any record", field);
            return Err(RosterError::UnknownQueryField(field.to_string()));
        }

        let target = Value::coerce(value);
        let mut matches = BTreeMap::new();
        for (id, record) in &state.records {
            let Some(raw) = record.field(field) else { continue };
            if op.evaluate(&Value::coerce(&raw), &target)? {
                matches.insert(*id, record.clone());
            }
        }
        Ok(matches)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The database file path
    pub fn db_path(&self) -> &Path {
        self.manager.path()
    }

    /// Current metadata, with `total_employees` freshly recomputed
    pub fn metadata(&self) -> Metadata {
        let state = self.state.read();
        let mut metadata = state.metadata.clone();
        metadata.total_employees = state.records.len() as u32;
        metadata
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.state.read().records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.state.read().records.is_empty()
    }
}
