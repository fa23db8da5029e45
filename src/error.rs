//! Load-time error kinds.
//!
//! Queries on a loaded structure are total: every failure mode in this crate
//! happens while deserializing an artifact, never while answering a lookup.

use std::fmt;

/// Why loading a serialized structure failed.
#[derive(Debug)]
pub enum LoadError {
    /// The byte stream was truncated, or a length field implied a read or
    /// allocation past what the remaining input could possibly justify.
    CorruptArtifact(String),
    /// The backing store for the array could not be provisioned (e.g. the
    /// huge-page mapping requested via [`crate::backing::BackingStoreStrategy`]
    /// was refused by the OS).
    AllocationFailure(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::CorruptArtifact(msg) => write!(f, "corrupt artifact: {msg}"),
            LoadError::AllocationFailure(msg) => write!(f, "allocation failure: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

/// A conservative ceiling on the number of elements we are willing to
/// allocate for a single length-prefixed array while loading. Real artifacts
/// are at most a few hundred million words; this only exists to turn a
/// corrupt or adversarial length field into an immediate `CorruptArtifact`
/// instead of an OOM abort.
pub(crate) const MAX_ARRAY_LEN: u64 = 1 << 34;

pub(crate) fn check_len(len: u64, what: &str) -> anyhow::Result<usize> {
    if len > MAX_ARRAY_LEN {
        anyhow::bail!(LoadError::CorruptArtifact(format!(
            "{what} length {len} exceeds sanity ceiling {MAX_ARRAY_LEN}"
        )));
    }
    Ok(len as usize)
}
