//! Deserialization helpers shared by every variant's loader. Field order,
//! scalar width (always little-endian `u64`), and array-element width are
//! variant-specific and live in each variant's `load` function; this module
//! only owns the mechanical "read N bytes or fail with `CorruptArtifact`"
//! plumbing.
//!
//! Grounded in the `read!`/`read_array!` macros of `webgraph-rs`'s
//! `mph.rs`, reworked to avoid that file's `Vec::set_len` over
//! uninitialized memory.

use crate::error::{check_len, LoadError};
use anyhow::Context;
use std::io::Read;

/// Reads one little-endian `u64` scalar.
pub(crate) fn read_u64<R: Read>(r: &mut R) -> anyhow::Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)
        .map_err(|e| anyhow::anyhow!(LoadError::CorruptArtifact(format!("short read: {e}"))))?;
    Ok(u64::from_le_bytes(buf))
}

/// Reads a length-prefixed array of `u64` words (the array's own length was
/// already read by the caller as `len`).
pub(crate) fn read_array_u64<R: Read>(r: &mut R, len: u64) -> anyhow::Result<Vec<u64>> {
    let len = check_len(len, "u64 array")?;
    let mut out = vec![0u64; len];
    let mut buf = [0u8; 8];
    for slot in out.iter_mut() {
        r.read_exact(&mut buf)
            .with_context(|| "truncated u64 array".to_string())
            .map_err(|e| anyhow::anyhow!(LoadError::CorruptArtifact(e.to_string())))?;
        *slot = u64::from_le_bytes(buf);
    }
    Ok(out)
}

/// Reads a length-prefixed array of `u32` words, little-endian (used by
/// CSF3's `how_many_up_to_block`/`shift` decoding-table columns).
pub(crate) fn read_array_u32<R: Read>(r: &mut R, len: u64) -> anyhow::Result<Vec<u32>> {
    let len = check_len(len, "u32 array")?;
    let mut out = vec![0u32; len];
    let mut buf = [0u8; 4];
    for slot in out.iter_mut() {
        r.read_exact(&mut buf)
            .map_err(|e| anyhow::anyhow!(LoadError::CorruptArtifact(format!("truncated u32 array: {e}"))))?;
        *slot = u32::from_le_bytes(buf);
    }
    Ok(out)
}
