//! Static function of arbitrary width `w`.
//!
//! Ported from Sux4J/Sux4C's `sf.h` (the on-disk layout) and `sf3.c` (the
//! multiplier-discipline query): <https://github.com/vigna/Sux4J/blob/master/c/sf3.c>.
//! The C struct stores one `multiplier` field reused as a `chunk_shift` in
//! the shift-discipline build selected at compile time via preprocessor
//! macros; here that single stored field is read once and wrapped in a
//! [`Bucketing`] chosen by which loader constructor was called.

use crate::backing::{BackingStore, BackingStoreStrategy};
use crate::bits::get_value_units;
use crate::bucket::{signature_to_equation3, Bucketing};
use crate::error::LoadError;
use crate::io::{read_array_u64, read_u64};
use crate::spooky::spooky_short;
use crate::traits::{SignatureQueryable, StaticFunction};
use std::io::Read;

const OFFSET_MASK: u64 = (1u64 << 56) - 1;

/// A static function: for any key in the key set it was built over,
/// [`Sf::lookup_bytes`] returns the `width`-bit value associated with it;
/// for a key outside that set the return value is arbitrary (no membership
/// test), except that an empty bucket always returns `-1`.
#[derive(Debug)]
pub struct Sf {
    #[allow(dead_code)]
    size: u64,
    width: u32,
    bucketing: Bucketing,
    global_seed: u64,
    offset_and_seed: Vec<u64>,
    array: BackingStore,
}

/// The multiplier-discipline member of this family. Built via
/// [`Sf::load_multiplier`]; structurally identical to [`Sf`], which is why
/// this is a type alias rather than a separate type.
pub type Sf3 = Sf;

impl Sf {
    /// Deserializes a shift-discipline SF artifact: `size, width, chunk_shift,
    /// global_seed, offset_and_seed_length, offset_and_seed[*], array_length,
    /// array[*]`.
    pub fn load_shift<R: Read>(reader: R, strategy: BackingStoreStrategy) -> anyhow::Result<Self> {
        Self::load_with_discipline(reader, strategy, false)
    }

    /// Deserializes a multiplier-discipline SF (a.k.a. "SF3") artifact with
    /// the same field order as [`Sf::load_shift`], the stored scalar read as
    /// a `multiplier` instead of a `chunk_shift`.
    pub fn load_multiplier<R: Read>(reader: R, strategy: BackingStoreStrategy) -> anyhow::Result<Self> {
        Self::load_with_discipline(reader, strategy, true)
    }

    fn load_with_discipline<R: Read>(
        mut reader: R,
        strategy: BackingStoreStrategy,
        multiplier_discipline: bool,
    ) -> anyhow::Result<Self> {
        let size = read_u64(&mut reader)?;
        let width_raw = read_u64(&mut reader)?;
        if !(1..=64).contains(&width_raw) {
            anyhow::bail!(LoadError::CorruptArtifact(format!(
                "sf width {width_raw} out of range 1..=64"
            )));
        }
        let width = width_raw as u32;
        let discipline_param = read_u64(&mut reader)?;
        let global_seed = read_u64(&mut reader)?;
        let offset_and_seed_length = read_u64(&mut reader)?;
        let offset_and_seed = read_array_u64(&mut reader, offset_and_seed_length)?;
        let array_length = read_u64(&mut reader)?;
        let array = read_array_u64(&mut reader, array_length)?;
        let array = BackingStore::provision(array, strategy)?;

        let bucketing = if multiplier_discipline {
            Bucketing::Multiplier { multiplier: discipline_param }
        } else {
            Bucketing::Shift { chunk_shift: discipline_param as u32 }
        };

        log::debug!(
            "loaded SF: size={size} width={width} buckets={}",
            offset_and_seed.len().saturating_sub(1)
        );

        Ok(Self {
            size,
            width,
            bucketing,
            global_seed,
            offset_and_seed,
            array,
        })
    }

    /// The number of keys this structure was built over.
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline(always)]
    fn get_from_signature(&self, signature: &[u64; 4]) -> i64 {
        let bucket = self.bucketing.bucket(signature[0]);
        let offset_seed = self.offset_and_seed[bucket as usize];
        let bucket_offset = offset_seed & OFFSET_MASK;
        let num_variables =
            (self.offset_and_seed[bucket as usize + 1] & OFFSET_MASK) - bucket_offset;
        if num_variables == 0 {
            return -1;
        }
        let e = signature_to_equation3(signature, offset_seed & !OFFSET_MASK, num_variables);

        if self.width == 8 {
            // Byte-indexed fast path; must agree with `get_value_units` at
            // width 8, verified by a test below.
            (self.byte_at(e[0] + bucket_offset)
                ^ self.byte_at(e[1] + bucket_offset)
                ^ self.byte_at(e[2] + bucket_offset)) as i64
        } else {
            (get_value_units(&self.array, e[0] + bucket_offset, self.width)
                ^ get_value_units(&self.array, e[1] + bucket_offset, self.width)
                ^ get_value_units(&self.array, e[2] + bucket_offset, self.width)) as i64
        }
    }

    #[inline(always)]
    fn byte_at(&self, index: u64) -> u8 {
        let word = self.array[(index / 8) as usize];
        (word >> ((index % 8) * 8)) as u8
    }
}

impl StaticFunction for Sf {
    fn lookup_bytes(&self, key: &[u8]) -> i64 {
        let signature = spooky_short(key, self.global_seed);
        self.get_from_signature(&signature)
    }
}

impl SignatureQueryable for Sf {
    fn lookup_signature(&self, signature: &[u64; 4]) -> i64 {
        self.get_from_signature(signature)
    }
}
