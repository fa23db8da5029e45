//! Succinct bit-packed array accessors.
//!
//! The shared backing array is a flat sequence of 64-bit words; every
//! variant addresses it at an arbitrary bit offset. Ported from the
//! `get_value`/`get_2bit_value`/`count_nonzero_pairs` functions duplicated
//! across Sux4J/Sux4C's `mph.c`, `sf3.c`, `sf4.c` and `csf3.c`
//! (<https://github.com/vigna/Sux4J/tree/master/c>), and from
//! `webgraph-rs`'s Rust port of the MPH half.

/// Reads a `width`-bit (1..=64) unsigned value at absolute bit position
/// `bit_pos` in `array`. May read one word past the one containing
/// `bit_pos` if the value straddles a word boundary; never further. The
/// caller must ensure `array` has that word.
#[inline(always)]
pub fn get_value(array: &[u64], bit_pos: u64, width: u32) -> u64 {
    debug_assert!((1..=64).contains(&width));
    if width == 64 {
        debug_assert_eq!(bit_pos % 64, 0);
        return array[(bit_pos / 64) as usize];
    }
    let l = 64 - width;
    let start_word = (bit_pos / 64) as usize;
    let start_bit = (bit_pos % 64) as u32;
    if start_bit <= l {
        (array[start_word] << (l - start_bit)) >> l
    } else {
        (array[start_word] >> start_bit) | ((array[start_word + 1] << (64 + l - start_bit)) >> l)
    }
}

/// `get_value` addressed in `width`-bit units rather than absolute bits, as
/// used by the SF-family accessors: the bit position is `pos * width`.
#[inline(always)]
pub fn get_value_units(array: &[u64], pos: u64, width: u32) -> u64 {
    get_value(array, pos * width as u64, width)
}

/// Reads the 2-bit value at pair index `pair_pos` (bit positions
/// `2*pair_pos`, `2*pair_pos + 1`). Used only by MPH.
#[inline(always)]
pub const fn get_2bit_value(array: &[u64], pair_pos: u64) -> u64 {
    let pos = pair_pos * 2;
    (array[(pos / 64) as usize] >> (pos % 64)) & 3
}

#[inline(always)]
const fn count_nonzero_pairs_in_word(x: u64) -> u64 {
    ((x | (x >> 1)) & 0x5555_5555_5555_5555).count_ones() as u64
}

/// Counts the 2-bit pairs in `[start_pair, end_pair)` (pair indices, i.e.
/// bit range `[2*start_pair, 2*end_pair)`) whose value is non-zero.
/// MPH-only.
pub fn count_nonzero_pairs(start_pair: u64, end_pair: u64, array: &[u64]) -> u64 {
    let start = start_pair;
    let end = end_pair;
    let mut block = start / 32;
    let end_block = end / 32;
    let start_offset = start % 32;
    let end_offset = end % 32;

    if block == end_block {
        return count_nonzero_pairs_in_word(
            (array[block as usize] & ((1u64 << (end_offset * 2)) - 1)) >> (start_offset * 2),
        );
    }

    let mut pairs = 0u64;
    if start_offset != 0 {
        pairs += count_nonzero_pairs_in_word(array[block as usize] >> (start_offset * 2));
        block += 1;
    }
    while block < end_block {
        pairs += count_nonzero_pairs_in_word(array[block as usize]);
        block += 1;
    }
    if end_offset != 0 {
        pairs += count_nonzero_pairs_in_word(
            array[block as usize] & ((1u64 << (end_offset * 2)) - 1),
        );
    }
    pairs
}
