//! # rosterdb
//!
//! A single-file employee record store with:
//! - Whole-database snapshot persistence with checksummed framing
//! - Automatic backup maintenance and corruption recovery
//! - Atomic saves with in-memory rollback on failure
//! - Typed field queries over string-stored records
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       RecordStore                            │
//! │              (Single Writer / Multi Reader)                  │
//! └──────┬──────────────────────┬───────────────────────┬───────┘
//!        │ add                  │ every mutation        │ query
//!        ▼                      ▼                       ▼
//! ┌─────────────┐       ┌───────────────┐       ┌─────────────┐
//! │RecordFactory│       │SnapshotManager│       │  Operator   │
//! │ (candidate  │       │ (save/load/   │       │  + Value    │
//! │  records)   │       │  recover)     │       │ (coercion)  │
//! └─────────────┘       └───────┬───────┘       └─────────────┘
//!                               │
//!                  ┌────────────┴────────────┐
//!                  ▼                         ▼
//!           ┌─────────────┐          ┌─────────────┐
//!           │  roster.db  │          │roster.db.bak│
//!           │  (primary)  │          │  (backup)   │
//!           └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod snapshot;
pub mod query;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, RosterError};
pub use config::Config;
pub use query::{Operator, Value};
pub use record::{BuiltinNames, NameSource, Record, RecordFactory};
pub use snapshot::{Metadata, Snapshot, SnapshotManager};
pub use store::RecordStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of rosterdb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
