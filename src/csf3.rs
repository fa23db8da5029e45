//! Compressed static function with canonical-Huffman decoding and an escape
//! path for rare values.
//!
//! Ported from Sux4J/Sux4C's `csf3.c` and `csf.h`:
//! <https://github.com/vigna/Sux4J/blob/master/c/csf3.c>. Two wire details
//! come directly from that source: the `OFFSET_MASK` reserves 10 high bits
//! (`>> 10`), not the 8 every other variant reserves, and the bucket's
//! `num_variables` is computed by subtracting the codeword width `w` from
//! the raw boundary difference (`next - bucket_offset - w`), reserving
//! exactly `w` bit positions' worth of the multiplier-discipline bucketing
//! math without adding any array slots — it is the escape payload that
//! borrows unused low-order bits of the same `w`-wide slot a codeword lives
//! in, not a separate region (see [`Csf3::get_from_signature`]).

use crate::backing::{BackingStore, BackingStoreStrategy};
use crate::bits::{get_value, get_value_units};
use crate::bucket::signature_to_equation3;
use crate::error::LoadError;
use crate::io::{read_array_u32, read_array_u64, read_u64};
use crate::spooky::spooky_short;
use crate::traits::{SignatureQueryable, StaticFunction};
use std::io::Read;

const OFFSET_MASK: u64 = (1u64 << 54) - 1;

/// The four parallel arrays of a canonical-Huffman decoding table:
/// `last_codeword_plus_one[block]` is the exclusive upper bound of
/// every codeword of the block's length (codewords are left-justified in a
/// `w`-bit field); `shift[block]` is `w` minus that length; and
/// `how_many_up_to_block[block]` is the count of symbols in every shorter
/// block, so `symbol[(value >> shift) - (last_codeword_plus_one >> shift) +
/// how_many_up_to_block]` recovers the decoded symbol's index.
#[derive(Debug, Clone)]
pub(crate) struct DecoderTables {
    pub(crate) last_codeword_plus_one: Vec<u64>,
    pub(crate) how_many_up_to_block: Vec<u32>,
    pub(crate) shift: Vec<u32>,
}

/// A compressed static function: for any key in the key set it was built
/// over, [`Csf3::lookup_bytes`] returns the associated value, decoded either
/// through the canonical-Huffman table or, for values too rare to have
/// earned a codeword, through the escape path. Behavior on a non-member key
/// is unconstrained, as for every other variant in this crate.
#[derive(Debug)]
pub struct Csf3 {
    #[allow(dead_code)]
    size: u64,
    multiplier: u64,
    w: u64,
    global_seed: u64,
    offset_and_seed: Vec<u64>,
    array: BackingStore,
    decoder: DecoderTables,
    symbol: Vec<i64>,
    escape_length: u64,
    escaped_symbol_length: u64,
}

impl Csf3 {
    /// Deserializes a CSF3 artifact: `size, multiplier,
    /// global_max_codeword_length, global_seed, offset_and_seed_length,
    /// offset_and_seed[*], array_length, array[*], decoding_table_length,
    /// last_codeword_plus_one[*] (u64), how_many_up_to_block[*] (u32),
    /// shift[*] (u32), symbol_length, symbol[*] (i64), escape_length,
    /// escaped_symbol_length`.
    pub fn load<R: Read>(reader: R, strategy: BackingStoreStrategy) -> anyhow::Result<Self> {
        let mut r = reader;
        let size = read_u64(&mut r)?;
        let multiplier = read_u64(&mut r)?;
        let w = read_u64(&mut r)?;
        if !(1..=64).contains(&w) {
            anyhow::bail!(LoadError::CorruptArtifact(format!(
                "csf3 global_max_codeword_length {w} out of range 1..=64"
            )));
        }
        let global_seed = read_u64(&mut r)?;
        let offset_and_seed_length = read_u64(&mut r)?;
        let offset_and_seed = read_array_u64(&mut r, offset_and_seed_length)?;
        let array_length = read_u64(&mut r)?;
        let array = read_array_u64(&mut r, array_length)?;
        let array = BackingStore::provision(array, strategy)?;

        let decoding_table_length = read_u64(&mut r)?;
        let last_codeword_plus_one = read_array_u64(&mut r, decoding_table_length)?;
        let how_many_up_to_block = read_array_u32(&mut r, decoding_table_length)?;
        let shift = read_array_u32(&mut r, decoding_table_length)?;

        let symbol_length = read_u64(&mut r)?;
        let symbol_raw = read_array_u64(&mut r, symbol_length)?;
        let symbol: Vec<i64> = symbol_raw.into_iter().map(|x| x as i64).collect();

        let escape_length = read_u64(&mut r)?;
        let escaped_symbol_length = read_u64(&mut r)?;

        log::debug!(
            "loaded CSF3: size={size} w={w} buckets={} decoding_blocks={decoding_table_length}",
            offset_and_seed.len().saturating_sub(1)
        );

        Ok(Self {
            size,
            multiplier,
            w,
            global_seed,
            offset_and_seed,
            array,
            decoder: DecoderTables {
                last_codeword_plus_one,
                how_many_up_to_block,
                shift,
            },
            symbol,
            escape_length,
            escaped_symbol_length,
        })
    }

    /// The number of keys this structure was built over.
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline(always)]
    fn get_from_signature(&self, signature: &[u64; 4]) -> i64 {
        let bucket = (((signature[0] >> 1) as u128 * self.multiplier as u128) >> 64) as u64;
        let offset_seed = self.offset_and_seed[bucket as usize];
        let bucket_offset = offset_seed & OFFSET_MASK;
        let w = self.w;
        let num_variables =
            (self.offset_and_seed[bucket as usize + 1] & OFFSET_MASK) - bucket_offset - w;
        let e = signature_to_equation3(signature, offset_seed & !OFFSET_MASK, num_variables);

        let codeword = get_value_units(&self.array, e[0] + bucket_offset, w as u32)
            ^ get_value_units(&self.array, e[1] + bucket_offset, w as u32)
            ^ get_value_units(&self.array, e[2] + bucket_offset, w as u32);

        let decoded = decode(&self.decoder, &self.symbol, codeword);
        if decoded != -1 {
            return decoded;
        }

        // Escape path: the codeword's own low-order bits, below the bits
        // `decode` actually inspected, carry the raw value.
        // They were never part of any real codeword's prefix, so reusing
        // them costs no extra array space.
        let end = w - self.escape_length;
        let start = end - self.escaped_symbol_length;
        let width = self.escaped_symbol_length as u32;
        let mut value = 0u64;
        for &ei in &e {
            let bit_pos = (ei + bucket_offset) * w + start;
            value ^= get_value(&self.array, bit_pos, width);
        }
        value as i64
    }
}

impl StaticFunction for Csf3 {
    fn lookup_bytes(&self, key: &[u8]) -> i64 {
        let signature = spooky_short(key, self.global_seed);
        self.get_from_signature(&signature)
    }
}

impl SignatureQueryable for Csf3 {
    fn lookup_signature(&self, signature: &[u64; 4]) -> i64 {
        self.get_from_signature(signature)
    }
}

/// Decodes one `w`-bit codeword into its symbol index, or `-1` if the
/// codeword belongs to the escape symbol. Ported from Sux4J/Sux4C's
/// `csf3.c`'s `decode`; the last block's `last_codeword_plus_one` is always
/// `1 << w`, so the loop is guaranteed to terminate.
#[inline(always)]
fn decode(tables: &DecoderTables, symbol: &[i64], value: u64) -> i64 {
    for curr in 0..tables.last_codeword_plus_one.len() {
        if value < tables.last_codeword_plus_one[curr] {
            let s = tables.shift[curr];
            let idx = (value >> s) - (tables.last_codeword_plus_one[curr] >> s)
                + tables.how_many_up_to_block[curr] as u64;
            return symbol[idx as usize];
        }
    }
    unreachable!("the decoding table's last block must cover every w-bit value")
}
