//! Snapshot codec
//!
//! Encoding and decoding of the on-disk snapshot format.
//!
//! ## File Format
//!
//! ```text
//! ┌───────────┬─────────────┬──────────┬──────────────┬─────────────────┐
//! │ Magic (4) │ Version (2) │ CRC (4)  │ PayloadLen(8)│     Payload     │
//! └───────────┴─────────────┴──────────┴──────────────┴─────────────────┘
//! ```
//!
//! - Magic: `b"RSDB"`
//! - Version: format version, little-endian u16
//! - CRC: CRC32 over version + payload length + payload, little-endian u32
//! - PayloadLen: payload byte count, little-endian u64
//! - Payload: bincode document `{ metadata, records }`, both optional
//!
//! Covering the version and length fields with the checksum means a
//! flipped header byte reads as corruption (recoverable from backup),
//! while a coherent file written at another version reads as a format
//! mismatch (not recoverable, triggers reinitialization).
//!
//! ## Error Classification
//! - [`RosterError::Corrupted`]: bad magic, truncation, checksum
//!   mismatch, or an undecodable payload
//! - [`RosterError::Format`]: valid bytes that do not describe a
//!   database (unsupported version, missing document sections)

use std::collections::BTreeMap;

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, RosterError};
use crate::record::Record;
use crate::snapshot::{Metadata, Snapshot};

/// Magic bytes identifying a snapshot file
pub const MAGIC: &[u8; 4] = b"RSDB";

/// Current snapshot format version
pub const FORMAT_VERSION: u16 = 1;

/// Header size: 4 magic + 2 version + 4 crc + 8 payload length
pub const HEADER_SIZE: usize = 18;

/// Serialized document shape. Both sections are optional on the wire so
/// that a structurally incomplete file can be diagnosed by name.
#[derive(Serialize)]
struct DocumentRef<'a> {
    metadata: Option<&'a Metadata>,
    records: Option<&'a BTreeMap<Uuid, Record>>,
}

#[derive(Deserialize)]
struct Document {
    metadata: Option<Metadata>,
    records: Option<BTreeMap<Uuid, Record>>,
}

/// Encode a snapshot to its on-disk byte form
pub fn encode_snapshot(metadata: &Metadata, records: &BTreeMap<Uuid, Record>) -> Result<Vec<u8>> {
    let document = DocumentRef {
        metadata: Some(metadata),
        records: Some(records),
    };
    let payload =
        bincode::serialize(&document).map_err(|e| RosterError::Serialization(e.to_string()))?;

    let payload_len = (payload.len() as u64).to_le_bytes();
    let version = FORMAT_VERSION.to_le_bytes();

    let mut hasher = Hasher::new();
    hasher.update(&version);
    hasher.update(&payload_len);
    hasher.update(&payload);
    let crc = hasher.finalize();

    let mut bytes = Vec::with_capacity(HEADER_SIZE + payload.len());
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&version);
    bytes.extend_from_slice(&crc.to_le_bytes());
    bytes.extend_from_slice(&payload_len);
    bytes.extend_from_slice(&payload);

    Ok(bytes)
}

/// Decode a snapshot from its on-disk byte form
pub fn decode_snapshot(bytes: &[u8]) -> Result<Snapshot> {
    if bytes.len() < HEADER_SIZE {
        return Err(RosterError::Corrupted(format!(
            "Incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    if &bytes[0..4] != MAGIC {
        return Err(RosterError::Corrupted(format!(
            "Bad magic: {:02x?}",
            &bytes[0..4]
        )));
    }

    // Parse header
    let stored_crc = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]);
    let payload_len = u64::from_le_bytes(bytes[10..18].try_into().unwrap()) as usize;

    let payload = &bytes[HEADER_SIZE..];
    if payload.len() != payload_len {
        return Err(RosterError::Corrupted(format!(
            "Payload length mismatch: header says {} bytes, file has {}",
            payload_len,
            payload.len()
        )));
    }

    // Verify checksum over everything after the magic except the CRC itself
    let mut hasher = Hasher::new();
    hasher.update(&bytes[4..6]);
    hasher.update(&bytes[10..18]);
    hasher.update(payload);
    let computed_crc = hasher.finalize();

    if computed_crc != stored_crc {
        return Err(RosterError::Corrupted(format!(
            "Checksum mismatch: stored {:#010x}, computed {:#010x}",
            stored_crc, computed_crc
        )));
    }

    // Only now is the version field trustworthy
    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != FORMAT_VERSION {
        return Err(RosterError::Format(format!(
            "Unsupported snapshot version {} (expected {})",
            version, FORMAT_VERSION
        )));
    }

    let document: Document = bincode::deserialize(payload)
        .map_err(|e| RosterError::Corrupted(format!("Payload decode failed: {}", e)))?;

    let metadata = document
        .metadata
        .ok_or_else(|| RosterError::Format("Missing metadata section".to_string()))?;
    let records = document
        .records
        .ok_or_else(|| RosterError::Format("Missing records section".to_string()))?;

    Ok(Snapshot { metadata, records })
}
