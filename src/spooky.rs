//! SpookyHash v2 "Short", ported from Sux4J/Sux4C's `spooky.c`
//! (<https://github.com/vigna/Sux4J/blob/master/c/spooky.c>), itself a C
//! conversion of Bob Jenkins' public-domain reference
//! (<https://burtleburtle.net/bob/hash/spooky.html>).
//!
//! Only the 256-bit "short" variant and its signature rehash are needed here:
//! the full SpookyHash API (streaming state, `SC_NUMVARS`-block long hash) is
//! out of scope, since every key this crate ever hashes is loaded fully into
//! memory before hashing starts.

const SC_CONST: u64 = 0x9e3779b97f4a7c13;

#[inline(always)]
const fn rotl64(x: u64, k: u32) -> u64 {
    x.rotate_left(k)
}

#[inline(always)]
fn short_mix(h: &mut [u64; 4]) {
    h[2] = rotl64(h[2], 50);
    h[2] = h[2].wrapping_add(h[3]);
    h[0] ^= h[2];
    h[3] = rotl64(h[3], 52);
    h[3] = h[3].wrapping_add(h[0]);
    h[1] ^= h[3];
    h[0] = rotl64(h[0], 30);
    h[0] = h[0].wrapping_add(h[1]);
    h[2] ^= h[0];
    h[1] = rotl64(h[1], 41);
    h[1] = h[1].wrapping_add(h[2]);
    h[3] ^= h[1];
    h[2] = rotl64(h[2], 54);
    h[2] = h[2].wrapping_add(h[3]);
    h[0] ^= h[2];
    h[3] = rotl64(h[3], 48);
    h[3] = h[3].wrapping_add(h[0]);
    h[1] ^= h[3];
    h[0] = rotl64(h[0], 38);
    h[0] = h[0].wrapping_add(h[1]);
    h[2] ^= h[0];
    h[1] = rotl64(h[1], 37);
    h[1] = h[1].wrapping_add(h[2]);
    h[3] ^= h[1];
    h[2] = rotl64(h[2], 62);
    h[2] = h[2].wrapping_add(h[3]);
    h[0] ^= h[2];
    h[3] = rotl64(h[3], 34);
    h[3] = h[3].wrapping_add(h[0]);
    h[1] ^= h[3];
    h[0] = rotl64(h[0], 5);
    h[0] = h[0].wrapping_add(h[1]);
    h[2] ^= h[0];
    h[1] = rotl64(h[1], 36);
    h[1] = h[1].wrapping_add(h[2]);
    h[3] ^= h[1];
}

#[inline(always)]
fn short_end(h: &mut [u64; 4]) {
    h[3] ^= h[2];
    h[2] = rotl64(h[2], 15);
    h[3] = h[3].wrapping_add(h[2]);
    h[0] ^= h[3];
    h[3] = rotl64(h[3], 52);
    h[0] = h[0].wrapping_add(h[3]);
    h[1] ^= h[0];
    h[0] = rotl64(h[0], 26);
    h[1] = h[1].wrapping_add(h[0]);
    h[2] ^= h[1];
    h[1] = rotl64(h[1], 51);
    h[2] = h[2].wrapping_add(h[1]);
    h[3] ^= h[2];
    h[2] = rotl64(h[2], 28);
    h[3] = h[3].wrapping_add(h[2]);
    h[0] ^= h[3];
    h[3] = rotl64(h[3], 9);
    h[0] = h[0].wrapping_add(h[3]);
    h[1] ^= h[0];
    h[0] = rotl64(h[0], 47);
    h[1] = h[1].wrapping_add(h[0]);
    h[2] ^= h[1];
    h[1] = rotl64(h[1], 54);
    h[2] = h[2].wrapping_add(h[1]);
    h[3] ^= h[2];
    h[2] = rotl64(h[2], 32);
    h[3] = h[3].wrapping_add(h[2]);
    h[0] ^= h[3];
    h[3] = rotl64(h[3], 25);
    h[0] = h[0].wrapping_add(h[3]);
    h[1] ^= h[0];
    h[0] = rotl64(h[0], 63);
    h[1] = h[1].wrapping_add(h[0]);
}

#[inline(always)]
fn read_le64(bytes: &[u8]) -> u64 {
    u64::from_le_bytes(bytes[..8].try_into().unwrap())
}

/// Hashes `message` with `seed`, returning the four 64-bit lanes of the
/// 256-bit signature. Bit-exact with `spooky_short` in Sux4J/Sux4C's
/// `spooky.c`; the byte-wise tail switch there (cases 0..15, with
/// fall-through) is reproduced faithfully below.
pub fn spooky_short(message: &[u8], seed: u64) -> [u64; 4] {
    let length = message.len();
    let mut left = length % 32;
    let mut h = [seed, seed, SC_CONST, SC_CONST];

    let mut pos = 0usize;

    if length > 15 {
        let end = (length / 32) * 32;
        while pos < end {
            h[2] = h[2].wrapping_add(read_le64(&message[pos..]));
            h[3] = h[3].wrapping_add(read_le64(&message[pos + 8..]));
            short_mix(&mut h);
            h[0] = h[0].wrapping_add(read_le64(&message[pos + 16..]));
            h[1] = h[1].wrapping_add(read_le64(&message[pos + 24..]));
            pos += 32;
        }

        if left >= 16 {
            h[2] = h[2].wrapping_add(read_le64(&message[pos..]));
            h[3] = h[3].wrapping_add(read_le64(&message[pos + 8..]));
            short_mix(&mut h);
            pos += 16;
            left -= 16;
        }
    }

    let p = &message[pos..];
    match left {
        15 => {
            h[3] = h[3].wrapping_add((p[14] as u64) << 48);
            h[3] = h[3].wrapping_add((p[13] as u64) << 40);
            h[3] = h[3].wrapping_add((p[12] as u64) << 32);
            h[3] = h[3].wrapping_add((p[11] as u64) << 24);
            h[3] = h[3].wrapping_add((p[10] as u64) << 16);
            h[3] = h[3].wrapping_add((p[9] as u64) << 8);
            h[3] = h[3].wrapping_add(p[8] as u64);
            h[2] = h[2].wrapping_add(read_le64(p));
        }
        14 => {
            h[3] = h[3].wrapping_add((p[13] as u64) << 40);
            h[3] = h[3].wrapping_add((p[12] as u64) << 32);
            h[3] = h[3].wrapping_add((p[11] as u64) << 24);
            h[3] = h[3].wrapping_add((p[10] as u64) << 16);
            h[3] = h[3].wrapping_add((p[9] as u64) << 8);
            h[3] = h[3].wrapping_add(p[8] as u64);
            h[2] = h[2].wrapping_add(read_le64(p));
        }
        13 => {
            h[3] = h[3].wrapping_add((p[12] as u64) << 32);
            h[3] = h[3].wrapping_add((p[11] as u64) << 24);
            h[3] = h[3].wrapping_add((p[10] as u64) << 16);
            h[3] = h[3].wrapping_add((p[9] as u64) << 8);
            h[3] = h[3].wrapping_add(p[8] as u64);
            h[2] = h[2].wrapping_add(read_le64(p));
        }
        12 => {
            h[3] = h[3].wrapping_add((p[11] as u64) << 24);
            h[3] = h[3].wrapping_add((p[10] as u64) << 16);
            h[3] = h[3].wrapping_add((p[9] as u64) << 8);
            h[3] = h[3].wrapping_add(p[8] as u64);
            h[2] = h[2].wrapping_add(read_le64(p));
        }
        11 => {
            h[3] = h[3].wrapping_add((p[10] as u64) << 16);
            h[3] = h[3].wrapping_add((p[9] as u64) << 8);
            h[3] = h[3].wrapping_add(p[8] as u64);
            h[2] = h[2].wrapping_add(read_le64(p));
        }
        10 => {
            h[3] = h[3].wrapping_add((p[9] as u64) << 8);
            h[3] = h[3].wrapping_add(p[8] as u64);
            h[2] = h[2].wrapping_add(read_le64(p));
        }
        9 => {
            h[3] = h[3].wrapping_add(p[8] as u64);
            h[2] = h[2].wrapping_add(read_le64(p));
        }
        8 => {
            h[2] = h[2].wrapping_add(read_le64(p));
        }
        7 => {
            h[2] = h[2].wrapping_add((p[6] as u64) << 48);
            h[2] = h[2].wrapping_add((p[5] as u64) << 40);
            h[2] = h[2].wrapping_add((p[4] as u64) << 32);
            h[2] = h[2].wrapping_add((p[3] as u64) << 24);
            h[2] = h[2].wrapping_add((p[2] as u64) << 16);
            h[2] = h[2].wrapping_add((p[1] as u64) << 8);
            h[2] = h[2].wrapping_add(p[0] as u64);
        }
        6 => {
            h[2] = h[2].wrapping_add((p[5] as u64) << 40);
            h[2] = h[2].wrapping_add((p[4] as u64) << 32);
            h[2] = h[2].wrapping_add((p[3] as u64) << 24);
            h[2] = h[2].wrapping_add((p[2] as u64) << 16);
            h[2] = h[2].wrapping_add((p[1] as u64) << 8);
            h[2] = h[2].wrapping_add(p[0] as u64);
        }
        5 => {
            h[2] = h[2].wrapping_add((p[4] as u64) << 32);
            h[2] = h[2].wrapping_add((p[3] as u64) << 24);
            h[2] = h[2].wrapping_add((p[2] as u64) << 16);
            h[2] = h[2].wrapping_add((p[1] as u64) << 8);
            h[2] = h[2].wrapping_add(p[0] as u64);
        }
        4 => {
            h[2] = h[2].wrapping_add((p[3] as u64) << 24);
            h[2] = h[2].wrapping_add((p[2] as u64) << 16);
            h[2] = h[2].wrapping_add((p[1] as u64) << 8);
            h[2] = h[2].wrapping_add(p[0] as u64);
        }
        3 => {
            h[2] = h[2].wrapping_add((p[2] as u64) << 16);
            h[2] = h[2].wrapping_add((p[1] as u64) << 8);
            h[2] = h[2].wrapping_add(p[0] as u64);
        }
        2 => {
            h[2] = h[2].wrapping_add((p[1] as u64) << 8);
            h[2] = h[2].wrapping_add(p[0] as u64);
        }
        1 => {
            h[2] = h[2].wrapping_add(p[0] as u64);
        }
        0 => {
            h[2] = h[2].wrapping_add(SC_CONST);
            h[3] = h[3].wrapping_add(SC_CONST);
        }
        _ => unreachable!("length % 32 - [0,16) is always in 0..16"),
    }

    h[0] = h[0].wrapping_add((length as u64).wrapping_mul(8));

    short_end(&mut h);

    h
}

/// Rehashes a 256-bit signature with a fresh 64-bit seed. Only the first
/// three lanes of `signature` feed the result; the fourth is unused by
/// design, matching `spooky_short_rehash` in the reference.
pub fn spooky_short_rehash(signature: &[u64; 4], seed: u64) -> [u64; 4] {
    let mut h = [
        seed,
        SC_CONST.wrapping_add(signature[0]),
        SC_CONST.wrapping_add(signature[1]),
        SC_CONST.wrapping_add(signature[2]),
    ];
    short_mix(&mut h);
    h
}
