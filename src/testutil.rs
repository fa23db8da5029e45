//! Synthetic-artifact generation for tests.
//!
//! Construction ("solving the sparse GF(2)/GF(3) system, assigning edges,
//! building codeword tables") is explicitly out of scope for this crate: it
//! is the job of an external, non-Rust builder. But the query-side
//! round-trip tests in `mph.rs`/`sf.rs`/`sf4.rs`/`csf3.rs` need *some* valid
//! artifact to query, and this repository has no prebuilt fixture files
//! (unlike `webgraph-rs`'s `tests/test_mph.rs`, which reads one from disk).
//!
//! This module plugs that gap with the simplest construction that is
//! provably correct and easy to verify by hand: unweighted hypergraph
//! peeling (leaf removal) followed by back-substitution, generalized to
//! 3- or 4-uniform hyperedges. It deliberately does *not* try to reproduce
//! the real GOV3 space bound (`num_variables ≈ 1.10 × count`, which needs an
//! actual GF(2) linear-system solve to stay correct below the ~1.22 peeling
//! threshold) — it instead picks a generous expansion factor so that
//! peeling succeeds with overwhelming probability, and then *verifies* the
//! resulting artifact end-to-end by running the real query path over every
//! key before handing it back. A test fixture that fails verification is
//! regenerated with a fresh seed; nothing here is trusted blindly.

#![cfg(test)]

use crate::backing::BackingStoreStrategy;
use crate::bucket::{signature_to_equation3, signature_to_equation4};
use crate::csf3::Csf3;
use crate::mph::Mph;
use crate::sf::Sf;
use crate::sf4::Sf4;
use crate::spooky::spooky_short;
use crate::traits::StaticFunction;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use std::io::Cursor;

const OFFSET_MASK_56: u64 = (1u64 << 56) - 1;

/// Turns on `log::debug!` output for local test runs (`RUST_LOG=debug cargo
/// test -- --nocapture`); a no-op if a logger is already installed.
fn init_test_logging() {
    let _ = env_logger::try_init();
}

/// Generates `count` distinct synthetic keys of varying length, seeded
/// deterministically from `seed` so a failing test reproduces. Used instead
/// of a counter-to-string encoding so key bytes don't all share one
/// alignment and length.
pub(crate) fn synthetic_keys(count: u32, seed: u64) -> Vec<Vec<u8>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::with_capacity(count as usize);
    while out.len() < count as usize {
        let len = 8 + (rng.next_u32() % 9) as usize;
        let mut buf = vec![0u8; len];
        rng.fill_bytes(&mut buf);
        if seen.insert(buf.clone()) {
            out.push(buf);
        }
    }
    out
}

/// Attempts to peel a hypergraph with `edges.len()` hyperedges (each of
/// arity `edges[i].len()`, either 3 or 4) over `num_variables` vertices.
/// Returns the peel order (forward: leaves first) as `(edge_idx, hinge_vertex,
/// side)` triples, or `None` if some edges remain un-peelable (a non-empty
/// 2-core) or an edge has a repeated vertex.
fn peel_hypergraph(edges: &[Vec<u64>], num_variables: u64) -> Option<Vec<(usize, u64, usize)>> {
    let n = num_variables as usize;
    let m = edges.len();
    for e in edges {
        let mut sorted = e.clone();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != e.len() {
            return None;
        }
    }

    let mut degree = vec![0u32; n];
    let mut xor_edge = vec![0u64; n];
    for (i, e) in edges.iter().enumerate() {
        for &v in e {
            degree[v as usize] += 1;
            xor_edge[v as usize] ^= i as u64;
        }
    }

    let mut queue: Vec<u64> = (0..n as u64).filter(|&v| degree[v as usize] == 1).collect();
    let mut edge_done = vec![false; m];
    let mut order = Vec::with_capacity(m);

    while let Some(v) = queue.pop() {
        if degree[v as usize] != 1 {
            continue;
        }
        let e_idx = xor_edge[v as usize] as usize;
        if edge_done[e_idx] {
            continue;
        }
        edge_done[e_idx] = true;
        let edge = &edges[e_idx];
        let side = edge.iter().position(|&x| x == v).expect("hinge must be in its own edge");
        order.push((e_idx, v, side));
        for &u in edge {
            if u == v {
                continue;
            }
            degree[u as usize] -= 1;
            xor_edge[u as usize] ^= e_idx as u64;
            if degree[u as usize] == 1 {
                queue.push(u);
            }
        }
    }

    if order.len() == m {
        Some(order)
    } else {
        None
    }
}

/// Ternary (mod-3) back-substitution for MPH: assigns each vertex a value
/// in `{0,1,2}` such that, for every edge, the sum of its three vertices'
/// values mod 3 equals the hinge's `side`. Processes the peel order in
/// reverse, which is the order that guarantees every non-hinge vertex
/// referenced already has its final value (see module docs and DESIGN.md
/// for the proof sketch).
fn assign_ternary(edges: &[Vec<u64>], order: &[(usize, u64, usize)], num_variables: u64) -> Vec<u8> {
    let mut value = vec![0u8; num_variables as usize];
    for &(e_idx, v, side) in order.iter().rev() {
        let edge = &edges[e_idx];
        let sum_others: i64 = edge
            .iter()
            .filter(|&&u| u != v)
            .map(|&u| value[u as usize] as i64)
            .sum();
        let v_val = (side as i64 - sum_others).rem_euclid(3);
        value[v as usize] = v_val as u8;
    }
    value
}

/// XOR back-substitution for the SF family: assigns each vertex a
/// `width`-bit value such that, for every edge, the XOR of its vertices'
/// values equals that key's target value. Same reverse-peel-order
/// requirement as [`assign_ternary`].
fn assign_xor(
    edges: &[Vec<u64>],
    order: &[(usize, u64, usize)],
    targets: &[u64],
    num_variables: u64,
) -> Vec<u64> {
    let mut value = vec![0u64; num_variables as usize];
    for &(e_idx, v, _side) in order.iter().rev() {
        let edge = &edges[e_idx];
        let xor_others = edge
            .iter()
            .filter(|&&u| u != v)
            .fold(0u64, |acc, &u| acc ^ value[u as usize]);
        value[v as usize] = targets[e_idx] ^ xor_others;
    }
    value
}

fn pack_ternary(values: &[u8]) -> Vec<u64> {
    let words = values.len().div_ceil(32) + 1;
    let mut array = vec![0u64; words];
    for (i, &v) in values.iter().enumerate() {
        let pos = i as u64 * 2;
        array[(pos / 64) as usize] |= (v as u64) << (pos % 64);
    }
    array
}

fn pack_width(values: &[u64], width: u32) -> Vec<u64> {
    let total_bits = values.len() as u64 * width as u64;
    let words = total_bits.div_ceil(64) as usize + 1;
    let mut array = vec![0u64; words];
    for (i, &v) in values.iter().enumerate() {
        let bit_pos = i as u64 * width as u64;
        let mut remaining_bits = width;
        let mut remaining_val = v;
        let mut pos = bit_pos;
        while remaining_bits > 0 {
            let word = (pos / 64) as usize;
            let off = pos % 64;
            let room = 64 - off;
            let take = remaining_bits.min(room as u32);
            let mask = if take == 64 { u64::MAX } else { (1u64 << take) - 1 };
            array[word] |= (remaining_val & mask) << off;
            remaining_val >>= take;
            remaining_bits -= take;
            pos += take as u64;
        }
    }
    array
}

/// `x` such that `(x * 281) >> 8 == target`, found by local search around
/// the analytic inverse (the forward map is monotone non-decreasing and
/// increases by at most 1 per unit step of `x`, so this always terminates
/// quickly).
fn inverse_vertex_offset(target: u64) -> u64 {
    let mut x = (target << 8) / 281;
    loop {
        let got = (x * 281) >> 8;
        if got == target {
            return x;
        }
        x += if got < target { 1 } else { 0 };
        if got > target {
            // Overshot due to rounding; step back down.
            x = x.saturating_sub(1);
        }
    }
}

fn build_edges3(
    signatures: &[[u64; 4]],
    seed: u64,
    num_variables: u64,
) -> Vec<Vec<u64>> {
    signatures
        .iter()
        .map(|sig| signature_to_equation3(sig, seed, num_variables).to_vec())
        .collect()
}

fn build_edges4(signatures: &[[u64; 4]], seed: u64, num_variables: u64) -> Vec<Vec<u64>> {
    signatures
        .iter()
        .map(|sig| signature_to_equation4(sig, seed, num_variables).to_vec())
        .collect()
}

/// Builds a single-bucket, multiplier-discipline (bucket always 0) MPH over
/// `keys`, verified end-to-end before being returned.
pub(crate) fn build_synthetic_mph(keys: &[&[u8]]) -> Mph {
    init_test_logging();
    let global_seed = 0u64;
    let n = keys.len() as u64;
    let signatures: Vec<[u64; 4]> = keys.iter().map(|k| spooky_short(k, global_seed)).collect();

    let mut expansion = 3.0f64;
    for attempt in 0u64.. {
        let num_variables = ((n as f64 * expansion).ceil() as u64).max(3);
        let per_bucket_seed = attempt;
        let edges = build_edges3(&signatures, per_bucket_seed << 56, num_variables);
        let Some(order) = peel_hypergraph(&edges, num_variables) else {
            if attempt % 50 == 49 {
                expansion += 0.5;
            }
            continue;
        };
        let values = assign_ternary(&edges, &order, num_variables);
        let array = pack_ternary(&values);

        let sentinel_offset = inverse_vertex_offset(num_variables);
        let edge_offset_and_seed = vec![per_bucket_seed << 56, sentinel_offset];

        let mph = load_mph_from_parts(n, 0, global_seed, edge_offset_and_seed, array);
        if verify_mph(&mph, keys) {
            return mph;
        }
        if attempt > 2000 {
            panic!("could not build a verified synthetic MPH after 2000 attempts");
        }
    }
    unreachable!()
}

fn load_mph_from_parts(
    size: u64,
    multiplier: u64,
    global_seed: u64,
    edge_offset_and_seed: Vec<u64>,
    array: Vec<u64>,
) -> Mph {
    let mut buf = Vec::new();
    buf.extend_from_slice(&size.to_le_bytes());
    buf.extend_from_slice(&multiplier.to_le_bytes());
    buf.extend_from_slice(&global_seed.to_le_bytes());
    buf.extend_from_slice(&(edge_offset_and_seed.len() as u64).to_le_bytes());
    for w in &edge_offset_and_seed {
        buf.extend_from_slice(&w.to_le_bytes());
    }
    buf.extend_from_slice(&(array.len() as u64).to_le_bytes());
    for w in &array {
        buf.extend_from_slice(&w.to_le_bytes());
    }
    Mph::load(Cursor::new(buf), BackingStoreStrategy::Heap).expect("well-formed synthetic MPH")
}

fn verify_mph(mph: &Mph, keys: &[&[u8]]) -> bool {
    let mut ranks: Vec<i64> = keys.iter().map(|k| mph.lookup_bytes(k)).collect();
    ranks.sort_unstable();
    ranks.iter().enumerate().all(|(i, &r)| r == i as i64)
}

/// Builds a single-bucket, multiplier-discipline, width-`width` static
/// function mapping `keys[i]` to `values[i]`.
pub(crate) fn build_synthetic_sf(keys: &[&[u8]], values: &[u64], width: u32) -> Sf {
    init_test_logging();
    let global_seed = 0u64;
    let n = keys.len() as u64;
    let signatures: Vec<[u64; 4]> = keys.iter().map(|k| spooky_short(k, global_seed)).collect();

    for per_bucket_seed in 0u64.. {
        let num_variables = (n * 2).max(3);
        let edges = build_edges3(&signatures, per_bucket_seed << 56, num_variables);
        let Some(order) = peel_hypergraph(&edges, num_variables) else {
            continue;
        };
        let packed_values = assign_xor(&edges, &order, values, num_variables);
        let array = pack_width(&packed_values, width);
        let offset_and_seed = vec![per_bucket_seed << 56, num_variables];

        let sf = load_sf_from_parts(n, width, 0, global_seed, offset_and_seed, array);
        if keys.iter().zip(values.iter()).all(|(k, &v)| sf.lookup_bytes(k) as u64 == v) {
            return sf;
        }
        if per_bucket_seed > 2000 {
            panic!("could not build a verified synthetic SF after 2000 attempts");
        }
    }
    unreachable!()
}

fn load_sf_from_parts(
    size: u64,
    width: u32,
    multiplier: u64,
    global_seed: u64,
    offset_and_seed: Vec<u64>,
    array: Vec<u64>,
) -> Sf {
    let mut buf = Vec::new();
    buf.extend_from_slice(&size.to_le_bytes());
    buf.extend_from_slice(&(width as u64).to_le_bytes());
    buf.extend_from_slice(&multiplier.to_le_bytes());
    buf.extend_from_slice(&global_seed.to_le_bytes());
    buf.extend_from_slice(&(offset_and_seed.len() as u64).to_le_bytes());
    for w in &offset_and_seed {
        buf.extend_from_slice(&w.to_le_bytes());
    }
    buf.extend_from_slice(&(array.len() as u64).to_le_bytes());
    for w in &array {
        buf.extend_from_slice(&w.to_le_bytes());
    }
    Sf::load_multiplier(Cursor::new(buf), BackingStoreStrategy::Heap)
        .expect("well-formed synthetic SF3")
}

/// Builds a 4-edge static function mapping `keys[i]` to `values[i]`.
pub(crate) fn build_synthetic_sf4(keys: &[&[u8]], values: &[u64], width: u32) -> Sf4 {
    init_test_logging();
    let global_seed = 0u64;
    let n = keys.len() as u64;
    let signatures: Vec<[u64; 4]> = keys.iter().map(|k| spooky_short(k, global_seed)).collect();

    for per_bucket_seed in 0u64.. {
        let num_variables = (n * 2).max(4);
        let edges = build_edges4(&signatures, per_bucket_seed << 56, num_variables);
        let Some(order) = peel_hypergraph(&edges, num_variables) else {
            continue;
        };
        let packed_values = assign_xor(&edges, &order, values, num_variables);
        let array = pack_width(&packed_values, width);
        let offset_and_seed = vec![per_bucket_seed << 56, num_variables];

        let sf4 = load_sf4_from_parts(n, width, 0, global_seed, offset_and_seed, array);
        if keys.iter().zip(values.iter()).all(|(k, &v)| sf4.lookup_bytes(k) as u64 == v) {
            return sf4;
        }
        if per_bucket_seed > 2000 {
            panic!("could not build a verified synthetic SF4 after 2000 attempts");
        }
    }
    unreachable!()
}

fn load_sf4_from_parts(
    size: u64,
    width: u32,
    multiplier: u64,
    global_seed: u64,
    offset_and_seed: Vec<u64>,
    array: Vec<u64>,
) -> Sf4 {
    let mut buf = Vec::new();
    buf.extend_from_slice(&size.to_le_bytes());
    buf.extend_from_slice(&(width as u64).to_le_bytes());
    buf.extend_from_slice(&multiplier.to_le_bytes());
    buf.extend_from_slice(&global_seed.to_le_bytes());
    buf.extend_from_slice(&(offset_and_seed.len() as u64).to_le_bytes());
    for w in &offset_and_seed {
        buf.extend_from_slice(&w.to_le_bytes());
    }
    buf.extend_from_slice(&(array.len() as u64).to_le_bytes());
    for w in &array {
        buf.extend_from_slice(&w.to_le_bytes());
    }
    Sf4::load_multiplier(Cursor::new(buf), BackingStoreStrategy::Heap)
        .expect("well-formed synthetic SF4")
}

/// Canonical-Huffman table plus a verified CSF3 artifact over `keys[i] ->
/// values[i]`. Every value in `escaped_values` is routed down the escape
/// path instead of getting its own codeword, exercising that branch.
///
/// The escape marker is modeled as one more pseudo-symbol in the same
/// canonical alphabet as the real values (so it naturally gets *some*
/// unused codeword with no special-casing in the decoder), and every
/// escaped key's XOR target is that marker's codeword with the raw escaped
/// value spliced into its low-order bits — the same single-system XOR
/// back-substitution as every other key, not a second independent solve.
pub(crate) fn build_synthetic_csf3(
    keys: &[&[u8]],
    values: &[u64],
    escaped_values: &[u64],
) -> Csf3 {
    use std::collections::BTreeMap;

    init_test_logging();
    let global_seed = 0u64;
    let n = keys.len() as u64;
    let signatures: Vec<[u64; 4]> = keys.iter().map(|k| spooky_short(k, global_seed)).collect();
    let has_escapes = !escaped_values.is_empty();

    // `None` is the escape pseudo-symbol; `Some(v)` is a real value.
    let mut freq: BTreeMap<Option<u64>, u64> = BTreeMap::new();
    for &v in values {
        if escaped_values.contains(&v) {
            *freq.entry(None).or_insert(0) += 1;
        } else {
            *freq.entry(Some(v)).or_insert(0) += 1;
        }
    }
    let (lengths, canonical_order) = build_canonical_lengths(&freq);

    let escaped_symbol_length = if has_escapes {
        (64 - escaped_values.iter().copied().max().unwrap_or(0).leading_zeros()).max(1) as u64
    } else {
        0
    };
    let escape_length = if has_escapes { lengths[&None] as u64 } else { 0 };
    let max_len = lengths.values().copied().max().unwrap_or(1);
    let w = max_len.max((escape_length + escaped_symbol_length) as u32).max(1);

    let (decoder_tables, symbol_table) = build_decoder_tables(&lengths, &canonical_order, w);

    for per_bucket_seed in 0u64.. {
        let num_variables = (n * 2).max(3);
        let edges = build_edges3(&signatures, per_bucket_seed << 56, num_variables);
        let Some(order) = peel_hypergraph(&edges, num_variables) else {
            continue;
        };

        let targets: Vec<u64> = values
            .iter()
            .map(|&v| {
                if escaped_values.contains(&v) {
                    let marker = codeword_for(&lengths, &canonical_order, None, w);
                    marker | v
                } else {
                    codeword_for(&lengths, &canonical_order, Some(v), w)
                }
            })
            .collect();
        let packed_values = assign_xor(&edges, &order, &targets, num_variables);
        let array = pack_width(&packed_values, w);
        let offset_and_seed = vec![per_bucket_seed << 56, num_variables + w as u64];

        let csf3 = load_csf3_from_parts(
            n,
            0,
            w as u64,
            global_seed,
            offset_and_seed,
            array,
            decoder_tables.clone(),
            symbol_table.clone(),
            escape_length,
            escaped_symbol_length,
        );

        if keys.iter().zip(values.iter()).all(|(k, &v)| csf3.lookup_bytes(k) as u64 == v) {
            return csf3;
        }
        if per_bucket_seed > 2000 {
            panic!("could not build a verified synthetic CSF3 after 2000 attempts");
        }
    }
    unreachable!()
}

fn build_canonical_lengths(
    freq: &std::collections::BTreeMap<Option<u64>, u64>,
) -> (std::collections::BTreeMap<Option<u64>, u32>, Vec<Option<u64>>) {
    use std::cmp::Reverse;
    use std::collections::BinaryHeap;

    if freq.len() == 1 {
        let only = *freq.keys().next().unwrap();
        let mut m = std::collections::BTreeMap::new();
        m.insert(only, 1u32);
        return (m, vec![only]);
    }

    struct Node {
        weight: u64,
        leaves: Vec<(Option<u64>, u32)>,
    }

    let mut heap: BinaryHeap<Reverse<(u64, usize)>> = BinaryHeap::new();
    let mut nodes: Vec<Node> = Vec::new();
    for (&sym, &freq) in freq.iter() {
        nodes.push(Node { weight: freq, leaves: vec![(sym, 0)] });
        heap.push(Reverse((freq, nodes.len() - 1)));
    }

    while heap.len() > 1 {
        let Reverse((w1, i1)) = heap.pop().unwrap();
        let Reverse((w2, i2)) = heap.pop().unwrap();
        let mut leaves = std::mem::take(&mut nodes[i1].leaves);
        for (_, d) in leaves.iter_mut() {
            *d += 1;
        }
        let mut leaves2 = std::mem::take(&mut nodes[i2].leaves);
        for (_, d) in leaves2.iter_mut() {
            *d += 1;
        }
        leaves.extend(leaves2);
        nodes.push(Node { weight: w1 + w2, leaves });
        heap.push(Reverse((w1 + w2, nodes.len() - 1)));
    }

    let Reverse((_, root)) = heap.pop().unwrap();
    let mut lengths: std::collections::BTreeMap<Option<u64>, u32> = std::collections::BTreeMap::new();
    for &(sym, depth) in &nodes[root].leaves {
        lengths.insert(sym, depth.max(1));
    }
    let mut symbols: Vec<Option<u64>> = lengths.keys().copied().collect();
    symbols.sort_by_key(|s| (lengths[s], *s));
    (lengths, symbols)
}

fn codeword_for(
    lengths: &std::collections::BTreeMap<Option<u64>, u32>,
    canonical_order: &[Option<u64>],
    symbol: Option<u64>,
    w: u32,
) -> u64 {
    // Canonical assignment: symbols sorted by (length, symbol); codeword
    // increments by 1 within a length, shifts left by 1 bit when length
    // increases.
    let mut code: u64 = 0;
    let mut prev_len = lengths[&canonical_order[0]];
    let mut result = None;
    for &s in canonical_order {
        let len = lengths[&s];
        if len > prev_len {
            code <<= len - prev_len;
            prev_len = len;
        }
        if s == symbol {
            result = Some((code, len));
        }
        code += 1;
    }
    let (code, len) = result.expect("symbol must be in the canonical alphabet");
    code << (w - len)
}

/// Builds the three canonical-decoder parallel arrays from a length
/// assignment, plus the symbol table (escape stored as `-1`).
fn build_decoder_tables(
    lengths: &std::collections::BTreeMap<Option<u64>, u32>,
    canonical_order: &[Option<u64>],
    w: u32,
) -> (crate::csf3::DecoderTables, Vec<i64>) {
    let mut distinct_lengths: Vec<u32> = lengths.values().copied().collect();
    distinct_lengths.sort_unstable();
    distinct_lengths.dedup();

    let mut last_codeword_plus_one = Vec::new();
    let mut how_many_up_to_block = Vec::new();
    let mut shift = Vec::new();
    let mut symbol_table = Vec::new();

    let mut code: u64 = 0;
    let mut prev_len = 0u32;
    let mut cumulative = 0u32;
    for &len in &distinct_lengths {
        if prev_len != 0 {
            code <<= len - prev_len;
        }
        how_many_up_to_block.push(cumulative);
        let symbols_at_len: Vec<Option<u64>> = canonical_order
            .iter()
            .copied()
            .filter(|s| lengths[s] == len)
            .collect();
        for &s in &symbols_at_len {
            symbol_table.push(s.map(|v| v as i64).unwrap_or(-1));
            code += 1;
        }
        cumulative += symbols_at_len.len() as u32;
        last_codeword_plus_one.push(code << (w - len));
        shift.push(w - len);
        prev_len = len;
    }

    (
        crate::csf3::DecoderTables {
            last_codeword_plus_one,
            how_many_up_to_block,
            shift,
        },
        symbol_table,
    )
}

#[allow(clippy::too_many_arguments)]
fn load_csf3_from_parts(
    size: u64,
    multiplier: u64,
    global_max_codeword_length: u64,
    global_seed: u64,
    offset_and_seed: Vec<u64>,
    array: Vec<u64>,
    decoder: crate::csf3::DecoderTables,
    symbol: Vec<i64>,
    escape_length: u64,
    escaped_symbol_length: u64,
) -> Csf3 {
    let mut buf = Vec::new();
    buf.extend_from_slice(&size.to_le_bytes());
    buf.extend_from_slice(&multiplier.to_le_bytes());
    buf.extend_from_slice(&global_max_codeword_length.to_le_bytes());
    buf.extend_from_slice(&global_seed.to_le_bytes());
    buf.extend_from_slice(&(offset_and_seed.len() as u64).to_le_bytes());
    for w in &offset_and_seed {
        buf.extend_from_slice(&w.to_le_bytes());
    }
    buf.extend_from_slice(&(array.len() as u64).to_le_bytes());
    for w in &array {
        buf.extend_from_slice(&w.to_le_bytes());
    }
    let decoding_table_length = decoder.last_codeword_plus_one.len() as u64;
    buf.extend_from_slice(&decoding_table_length.to_le_bytes());
    for w in &decoder.last_codeword_plus_one {
        buf.extend_from_slice(&w.to_le_bytes());
    }
    for w in &decoder.how_many_up_to_block {
        buf.extend_from_slice(&w.to_le_bytes());
    }
    for w in &decoder.shift {
        buf.extend_from_slice(&w.to_le_bytes());
    }
    buf.extend_from_slice(&(symbol.len() as u64).to_le_bytes());
    for &s in &symbol {
        buf.extend_from_slice(&(s as u64).to_le_bytes());
    }
    buf.extend_from_slice(&escape_length.to_le_bytes());
    buf.extend_from_slice(&escaped_symbol_length.to_le_bytes());

    Csf3::load(Cursor::new(buf), BackingStoreStrategy::Heap).expect("well-formed synthetic CSF3")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peel_small_hypergraph() {
        // 3 edges, 6 vertices: {0,1,2}, {1,3,4}, {3,4,5} -- peelable.
        let edges = vec![vec![0, 1, 2], vec![1, 3, 4], vec![3, 4, 5]];
        let order = peel_hypergraph(&edges, 6).expect("should peel");
        assert_eq!(order.len(), 3);
    }

    #[test]
    fn peel_rejects_repeated_vertex_edge() {
        let edges = vec![vec![0, 0, 1]];
        assert!(peel_hypergraph(&edges, 2).is_none());
    }
}
