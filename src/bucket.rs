//! Bucket assignment and 3-/4-hyperedge derivation.

use crate::spooky::spooky_short_rehash;

/// The discipline by which a signature's high bits select a bucket in
/// `[0, B)`. `Shift` is the older, power-of-two-bucket-count scheme;
/// `Multiplier` is the current fixed-point scheme, used whenever the bucket
/// count need not be a power of two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucketing {
    /// `bucket = h0 >> chunk_shift`. Requires the bucket count to be a power
    /// of two.
    Shift { chunk_shift: u32 },
    /// `bucket = ((h0 >> 1) * multiplier) >> 64`, a fixed-point mapping from
    /// `[0, 2^63)` into `[0, B)`.
    Multiplier { multiplier: u64 },
}

impl Bucketing {
    #[inline(always)]
    pub fn bucket(&self, h0: u64) -> u64 {
        match *self {
            Bucketing::Shift { chunk_shift } => h0 >> chunk_shift,
            Bucketing::Multiplier { multiplier } => {
                (((h0 >> 1) as u128 * multiplier as u128) >> 64) as u64
            }
        }
    }
}

/// Derives three independent, uniform-in-`[0, num_variables)` edge endpoints
/// from a signature, a per-bucket seed, and the bucket's variable count.
#[inline(always)]
pub fn signature_to_equation3(signature: &[u64; 4], seed: u64, num_variables: u64) -> [u64; 3] {
    let hash = spooky_short_rehash(signature, seed);
    let shift = num_variables.leading_zeros();
    let mask = (1u64 << shift) - 1;
    [
        ((hash[0] & mask) * num_variables) >> shift,
        ((hash[1] & mask) * num_variables) >> shift,
        ((hash[2] & mask) * num_variables) >> shift,
    ]
}

/// As [`signature_to_equation3`], but derives a fourth endpoint from the
/// rehash's fourth lane, for SF4's 4-uniform hyperedges.
#[inline(always)]
pub fn signature_to_equation4(signature: &[u64; 4], seed: u64, num_variables: u64) -> [u64; 4] {
    let hash = spooky_short_rehash(signature, seed);
    let shift = num_variables.leading_zeros();
    let mask = (1u64 << shift) - 1;
    [
        ((hash[0] & mask) * num_variables) >> shift,
        ((hash[1] & mask) * num_variables) >> shift,
        ((hash[2] & mask) * num_variables) >> shift,
        ((hash[3] & mask) * num_variables) >> shift,
    ]
}
