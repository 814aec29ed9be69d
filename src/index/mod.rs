//! Corpus color-signature index
//!
//! This module contains:
//! - Signature averaging and the signature file record format
//! - Corpus entries with cooldown and cached rendering
//! - The loaded index and the batch signature file builder

/// Batch signature file construction
pub mod builder;
/// In-memory index and path resolution
pub mod corpus;
/// Corpus entries and entry handles
pub mod entry;
/// Averaged color descriptors
pub mod signature;

pub use corpus::ColorIndex;
pub use entry::{ColorEntry, EntryId};
pub use signature::Signature;
