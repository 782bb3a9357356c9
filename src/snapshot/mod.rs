//! Snapshot Module
//!
//! Whole-database persistence: the entire database is one snapshot,
//! written and read as a unit.
//!
//! ## Responsibilities
//! - Encode/decode snapshots with integrity checksums
//! - Atomic saves (staging file + rename)
//! - Backup maintenance and corruption recovery
//! - Fresh initialization when nothing loadable exists
//!
//! ## Data Structure Choice
//! Records live in a BTreeMap keyed by id:
//! - Deterministic iteration and serialization order
//! - Saving the same state twice produces identical bytes
//! - Lookup cost is irrelevant at this scale

mod codec;
mod manager;
mod metadata;

pub use codec::{decode_snapshot, encode_snapshot, FORMAT_VERSION, HEADER_SIZE, MAGIC};
pub use manager::SnapshotManager;
pub use metadata::{normalize_suffix, Metadata};

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::record::Record;

/// The full in-memory state of a database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub metadata: Metadata,

    pub records: BTreeMap<Uuid, Record>,
}

impl Snapshot {
    /// An empty snapshot carrying the given metadata
    pub fn empty(metadata: Metadata) -> Self {
        Self {
            metadata,
            records: BTreeMap::new(),
        }
    }

    /// Recompute `total_employees` from the actual record count
    pub fn recount(&mut self) {
        self.metadata.total_employees = self.records.len() as u32;
    }
}
