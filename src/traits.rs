//! Capability traits a queryable structure exposes.
//!
//! The C sources in Sux4J/Sux4C instantiate one test harness per variant via
//! preprocessor macros. Here that indirection becomes two small traits:
//! callers, and test harnesses, are generic over "a queryable static
//! function" rather than over a macro parameter.

/// A structure that answers point queries from a key.
///
/// Return semantics are variant-specific: MPH returns a value in `[0, n)`
/// for any key and garbage for non-members; SF returns `-1` only for an
/// empty bucket and the stored value (or garbage, for non-members)
/// otherwise; CSF3 returns the decoded symbol for members and garbage for
/// non-members. None of these return `Result` — queries are total on a
/// successfully loaded structure.
pub trait StaticFunction {
    /// Looks up an arbitrary byte-string key.
    fn lookup_bytes(&self, key: &[u8]) -> i64;

    /// Looks up an 8-byte-little-endian-encoded `u64` key.
    fn lookup_u64(&self, key: u64) -> i64 {
        self.lookup_bytes(&key.to_le_bytes())
    }
}

/// A structure whose query can be replayed from a precomputed 256-bit
/// signature, bypassing the hash step entirely. Implemented by every
/// multiplier-discipline-bucketed construction in this crate.
pub trait SignatureQueryable: StaticFunction {
    fn lookup_signature(&self, signature: &[u64; 4]) -> i64;
}
