//! Minimal perfect hash function over a random 3-hypergraph.
//!
//! Ported from Sux4J/Sux4C's C MPH embedding
//! (<https://github.com/vigna/Sux4J/blob/master/c/mph.c>), generalized here
//! with this crate's shared `bits`/`bucket`/`io` modules. `OFFSET_MASK` is a
//! true 56-bit all-ones mask (`(1u64 << 56) - 1`), matching the C source's
//! `OFFSET_MASK (UINT64_C(-1) >> 8)`.
//!
//! # Reference
//! Marco Genuzio, Giuseppe Ottaviano, and Sebastiano Vigna, [Fast Scalable
//! Construction of (Minimal Perfect Hash)
//! Functions](https://arxiv.org/pdf/1603.04330.pdf).

use crate::backing::{BackingStore, BackingStoreStrategy};
use crate::bits::{count_nonzero_pairs, get_2bit_value};
use crate::bucket::signature_to_equation3;
use crate::io::{read_array_u64, read_u64};
use crate::spooky::spooky_short;
use crate::traits::{SignatureQueryable, StaticFunction};
use std::io::Read;

const OFFSET_MASK: u64 = (1u64 << 56) - 1;
const C_TIMES_256: u64 = 281; // floor((1.09 + 0.01) * 256)

/// A minimal perfect hash function over a key set of size `size()`.
///
/// For any key in the key set it was built over, [`Mph::lookup_bytes`]
/// returns a distinct integer in `[0, size())`; the image over the whole key
/// set is exactly `{0, ..., size()-1}`. For a key outside that set the
/// return value is an arbitrary integer in the same range, not a sentinel —
/// MPH implements no membership test.
#[derive(Debug)]
pub struct Mph {
    size: u64,
    multiplier: u64,
    global_seed: u64,
    edge_offset_and_seed: Vec<u64>,
    array: BackingStore,
}

impl Mph {
    /// Deserializes a MPH artifact: `size, multiplier, global_seed,
    /// edge_offset_and_seed_length, edge_offset_and_seed[*], array_length,
    /// array[*]`.
    pub fn load<R: Read>(reader: R, strategy: BackingStoreStrategy) -> anyhow::Result<Self> {
        let mut r = reader;
        let size = read_u64(&mut r)?;
        let multiplier = read_u64(&mut r)?;
        let global_seed = read_u64(&mut r)?;
        let edge_offset_and_seed_length = read_u64(&mut r)?;
        let edge_offset_and_seed = read_array_u64(&mut r, edge_offset_and_seed_length)?;
        let array_length = read_u64(&mut r)?;
        let array = read_array_u64(&mut r, array_length)?;
        let array = BackingStore::provision(array, strategy)?;

        log::debug!(
            "loaded MPH: size={size} buckets={} array_words={array_length}",
            edge_offset_and_seed.len().saturating_sub(1)
        );

        Ok(Self {
            size,
            multiplier,
            global_seed,
            edge_offset_and_seed,
            array,
        })
    }

    /// The number of keys in the underlying key set; also the exclusive
    /// upper bound on every lookup's return value for a member key.
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline(always)]
    fn get_from_signature(&self, signature: &[u64; 4]) -> u64 {
        let bucket = (((signature[0] >> 1) as u128 * self.multiplier as u128) >> 64) as u64;
        let edge_offset_seed = self.edge_offset_and_seed[bucket as usize];
        let bucket_offset = vertex_offset(edge_offset_seed);
        let next_vertex_offset = vertex_offset(self.edge_offset_and_seed[bucket as usize + 1]);
        let num_variables = next_vertex_offset - bucket_offset;
        let e = signature_to_equation3(signature, edge_offset_seed & !OFFSET_MASK, num_variables);
        let side = ((get_2bit_value(&self.array, e[0] + bucket_offset)
            + get_2bit_value(&self.array, e[1] + bucket_offset)
            + get_2bit_value(&self.array, e[2] + bucket_offset))
            % 3) as usize;
        (edge_offset_seed & OFFSET_MASK)
            + count_nonzero_pairs(bucket_offset, bucket_offset + e[side], &self.array)
    }

    /// Looks up a 128-bit little-endian-encoded key, mirroring
    /// `mph_get_uint128_t` in Sux4J's `mph.h`.
    pub fn lookup_u128(&self, key: u128) -> i64 {
        self.lookup_bytes(&key.to_le_bytes()) as i64
    }
}

impl StaticFunction for Mph {
    fn lookup_bytes(&self, key: &[u8]) -> i64 {
        let signature = spooky_short(key, self.global_seed);
        self.get_from_signature(&signature) as i64
    }
}

impl SignatureQueryable for Mph {
    fn lookup_signature(&self, signature: &[u64; 4]) -> i64 {
        self.get_from_signature(signature) as i64
    }
}

#[inline(always)]
const fn vertex_offset(edge_offset_seed: u64) -> u64 {
    ((edge_offset_seed & OFFSET_MASK) * C_TIMES_256) >> 8
}
