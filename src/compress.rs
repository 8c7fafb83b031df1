// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The block compressor (§4.2) and the top-level framing that drives it
//! across successive `BLOCK_SIZE` fragments (§4.5).

use crate::constants::*;
use crate::error::{Error, Result};
use crate::primitives::{load32_le, load64_le, log2_floor};
use crate::varint::encode_varint32;

/// Upper bound on the compressed size of an `n`-byte input, valid for any
/// number of internal `BLOCK_SIZE` fragments.
pub fn max_compressed_length(n: usize) -> Result<usize> {
    if n > u32::MAX as usize {
        return Err(Error::InvalidArgument("source too large to compress"));
    }
    Ok(32 + n + n / 6)
}

/// Compress `src`, returning a newly allocated buffer holding
/// `varint32(src.len()) || items*`.
pub fn compress(src: &[u8]) -> Vec<u8> {
    let max_len = max_compressed_length(src.len()).expect("source too large to compress");
    let mut dst = vec![0u8; max_len];
    let n = compress_into(&mut dst, src).expect("dst sized by max_compressed_length");
    dst.truncate(n);
    dst
}

/// Compress `src` into `dst`, returning the number of bytes written.
/// `dst` must be at least `max_compressed_length(src.len())` bytes.
pub fn compress_into(dst: &mut [u8], src: &[u8]) -> Result<usize> {
    if dst.len() < max_compressed_length(src.len())? {
        return Err(Error::OutputOverrun);
    }

    let mut d = encode_varint32(dst, src.len() as u32);

    if src.is_empty() {
        return Ok(d);
    }

    // Working memory is sized once, for the first fragment, and reused
    // (re-zeroed) across every subsequent fragment of this call.
    let table_len = hash_table_size(src.len().min(BLOCK_SIZE));
    let mut table = vec![0u16; table_len];

    for fragment in src.chunks(BLOCK_SIZE) {
        for slot in table.iter_mut() {
            *slot = 0;
        }
        d += compress_block(&mut dst[d..], fragment, &mut table);
    }

    Ok(d)
}

fn hash_table_size(fragment_len: usize) -> usize {
    let bits = if fragment_len <= 1 {
        MIN_HASH_TABLE_BITS
    } else {
        log2_floor((fragment_len - 1) as u32) + 1
    };
    1usize << bits.clamp(MIN_HASH_TABLE_BITS, MAX_HASH_TABLE_BITS)
}

#[inline]
fn hash(v: u32, shift: u32) -> usize {
    (v.wrapping_mul(0x1e35a7bd) >> shift) as usize
}

/// Longest common prefix of `src[a..]` and `src[b..]`, neither reading
/// past `end`. `b` is the forward (more advanced) pointer, so bounding on
/// it also bounds `a`, which always trails behind it.
fn find_match_length(src: &[u8], a: usize, b: usize, end: usize) -> usize {
    let mut n = 0;
    while b + n + 8 <= end {
        let xa = load64_le(src, a + n);
        let xb = load64_le(src, b + n);
        if xa != xb {
            return n + ((xa ^ xb).trailing_zeros() / 8) as usize;
        }
        n += 8;
    }
    while b + n < end && src[a + n] == src[b + n] {
        n += 1;
    }
    n
}

/// Compress one fragment of at most `BLOCK_SIZE` bytes using an already
/// zeroed `table` (a power-of-two length in `[MIN_HASH_TABLE_SIZE,
/// MAX_HASH_TABLE_SIZE]`), writing into `dst` and returning bytes written.
fn compress_block(dst: &mut [u8], src: &[u8], table: &mut [u16]) -> usize {
    if src.len() < MIN_NON_LITERAL_BLOCK_SIZE {
        return emit_literal(dst, src);
    }

    let shift = 32 - log2_floor(table.len() as u32);
    let ip_limit = src.len() - INPUT_MARGIN;

    let mut next_emit = 0usize;
    let mut ip = 1usize;
    let mut d = 0usize;

    'outer: loop {
        let mut candidate;
        let mut skip = 32usize;

        // Step 1: find a 4-byte match, growing the probe stride every miss.
        loop {
            let next_ip = ip + (skip >> 5);
            skip += 1;
            if next_ip > ip_limit {
                break 'outer;
            }
            let h = hash(load32_le(src, ip), shift);
            candidate = table[h] as usize;
            table[h] = ip as u16;
            if load32_le(src, ip) == load32_le(src, candidate) {
                break;
            }
            ip = next_ip;
        }

        // Step 2: emit the pending literal run.
        d += emit_literal(&mut dst[d..], &src[next_emit..ip]);

        // Step 3: extend the match and emit copies, trying to continue
        // with a contiguous run of matches before re-entering step 1.
        loop {
            let base = ip;
            let matched = 4 + find_match_length(src, candidate + 4, ip + 4, src.len());
            ip += matched;
            let offset = base - candidate;
            d += emit_copy(&mut dst[d..], offset, matched);
            next_emit = ip;

            if ip >= ip_limit {
                break 'outer;
            }

            let insert_tail = ip - 1;
            let h_tail = hash(load32_le(src, insert_tail), shift);
            table[h_tail] = insert_tail as u16;

            let h_cur = hash(load32_le(src, ip), shift);
            candidate = table[h_cur] as usize;
            table[h_cur] = ip as u16;

            if load32_le(src, ip) != load32_le(src, candidate) {
                ip += 1;
                break;
            }
        }
    }

    if next_emit < src.len() {
        d += emit_literal(&mut dst[d..], &src[next_emit..]);
    }

    d
}

/// Emit a literal item carrying `lit` verbatim.
fn emit_literal(dst: &mut [u8], lit: &[u8]) -> usize {
    if lit.is_empty() {
        return 0;
    }

    let n = lit.len() - 1;
    let i = match n {
        0..=59 => {
            dst[0] = ((n as u8) << 2) | TAG_LITERAL;
            1
        }
        60..=255 => {
            dst[0] = (60 << 2) | TAG_LITERAL;
            dst[1] = n as u8;
            2
        }
        256..=65535 => {
            dst[0] = (61 << 2) | TAG_LITERAL;
            let bytes = (n as u16).to_le_bytes();
            dst[1] = bytes[0];
            dst[2] = bytes[1];
            3
        }
        65536..=16_777_215 => {
            dst[0] = (62 << 2) | TAG_LITERAL;
            dst[1] = n as u8;
            dst[2] = (n >> 8) as u8;
            dst[3] = (n >> 16) as u8;
            4
        }
        _ => {
            dst[0] = (63 << 2) | TAG_LITERAL;
            let bytes = (n as u32).to_le_bytes();
            dst[1] = bytes[0];
            dst[2] = bytes[1];
            dst[3] = bytes[2];
            dst[4] = bytes[3];
            5
        }
    };

    dst[i..i + lit.len()].copy_from_slice(lit);
    i + lit.len()
}

/// Emit a copy of `length` bytes at `offset`, splitting into multiple
/// copy-2 tags when `length > 64` so every emitted copy stays within its
/// tag's representable range.
fn emit_copy(dst: &mut [u8], offset: usize, length: usize) -> usize {
    debug_assert!(offset > 0 && offset < 65536);
    debug_assert!(length >= 4);

    if length > 64 {
        let written = emit_copy2(dst, offset, 60);
        return written + emit_copy(&mut dst[written..], offset, length - 60);
    }
    if length >= 12 || offset >= 2048 {
        return emit_copy2(dst, offset, length);
    }
    emit_copy1(dst, offset, length)
}

fn emit_copy1(dst: &mut [u8], offset: usize, length: usize) -> usize {
    dst[0] = (((offset >> 8) << 5) | ((length - 4) << 2) | TAG_COPY1 as usize) as u8;
    dst[1] = offset as u8;
    2
}

fn emit_copy2(dst: &mut [u8], offset: usize, length: usize) -> usize {
    dst[0] = (((length - 1) << 2) | TAG_COPY2 as usize) as u8;
    let bytes = (offset as u16).to_le_bytes();
    dst[1] = bytes[0];
    dst[2] = bytes[1];
    3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decompress;

    fn roundtrip(data: &[u8]) {
        let compressed = compress(data);
        assert!(compressed.len() <= max_compressed_length(data.len()).unwrap());
        let decompressed = decompress(&compressed).expect("decompress failed");
        assert_eq!(decompressed, data);
    }

    #[test]
    fn test_find_match_length_to_end_of_buffer() {
        // b (the forward pointer) sits past a (the behind pointer); a match
        // that runs all the way to the end of `src` must not read past it
        // from either pointer.
        let src = b"aaaaaaaaaaaaaaaaaaaa";
        assert_eq!(find_match_length(src, 0, 4, src.len()), src.len() - 4);
    }

    #[test]
    fn test_empty() {
        let compressed = compress(b"");
        assert_eq!(compressed, vec![0x00]);
        roundtrip(b"");
    }

    #[test]
    fn test_single_byte() {
        roundtrip(b"a");
    }

    #[test]
    fn test_short_literal() {
        roundtrip(b"abc");
    }

    #[test]
    fn test_small_copy() {
        for i in 0..32 {
            let mut s = b"aaaa".to_vec();
            s.extend(vec![b'b'; i]);
            s.extend(b"aaaabbbb");
            roundtrip(&s);
        }
    }

    #[test]
    fn test_repeating_pattern() {
        let data: Vec<u8> = b"abc".iter().cycle().take(100_000).copied().collect();
        roundtrip(&data);
    }

    #[test]
    fn test_all_identical() {
        roundtrip(&vec![b'A'; 100_000]);
    }

    #[test]
    fn test_pseudo_random() {
        use std::collections::hash_map::RandomState;
        use std::hash::{BuildHasher, Hash, Hasher};
        let rs = RandomState::new();
        let mut hasher = rs.build_hasher();
        1u64.hash(&mut hasher);
        let mut state = hasher.finish();
        let mut next_byte = move || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            (state >> 32) as u8
        };
        let data: Vec<u8> = (0..100_000).map(|_| next_byte()).collect();
        roundtrip(&data);
    }

    #[test]
    fn test_crosses_block_boundary() {
        let mut data = b"abc".to_vec();
        data.extend(vec![b'b'; BLOCK_SIZE]);
        data.extend(b"aaaaaabc");
        roundtrip(&data);
    }

    #[test]
    fn test_upper_bound_holds() {
        for len in [0usize, 1, 59, 60, 61, 62, 63, 300, 65536, 65537, 200_000] {
            let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
            let compressed = compress(&data);
            assert!(compressed.len() <= max_compressed_length(len).unwrap());
        }
    }

    #[test]
    fn test_deterministic() {
        let data: Vec<u8> = (0..5000).map(|i| ((i * 7919) % 256) as u8).collect();
        assert_eq!(compress(&data), compress(&data));
    }
}
