// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Unaligned little-endian loads.
//!
//! Snappy's throughput depends on reading multi-byte words without regard
//! to alignment. Rust's `[u8]` indexing already guarantees this is
//! well-defined (no alignment requirement), so these are thin wrappers
//! around `from_le_bytes` rather than raw pointer casts — safe on
//! strict-alignment targets by construction.

/// Load a little-endian `u32` starting at `p[offset]`.
#[inline]
pub fn load32_le(p: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(p[offset..offset + 4].try_into().unwrap())
}

/// Load a little-endian `u64` starting at `p[offset]`.
#[inline]
pub fn load64_le(p: &[u8], offset: usize) -> u64 {
    u64::from_le_bytes(p[offset..offset + 8].try_into().unwrap())
}

/// Position of the highest set bit in a nonzero `u32`.
#[inline]
pub fn log2_floor(x: u32) -> u32 {
    debug_assert!(x > 0);
    31 - x.leading_zeros()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load32_le() {
        let buf = [0u8, 0, 0, 0x04, 0x03, 0x02, 0x01];
        assert_eq!(load32_le(&buf, 3), 0x0102_0304);
    }

    #[test]
    fn test_load64_le() {
        let buf = [0xffu8, 0, 1, 2, 3, 4, 5, 6, 7];
        assert_eq!(load64_le(&buf, 1), 0x0706_0504_0302_0100);
    }

    #[test]
    fn test_log2_floor() {
        assert_eq!(log2_floor(1), 0);
        assert_eq!(log2_floor(2), 1);
        assert_eq!(log2_floor(3), 1);
        assert_eq!(log2_floor(255), 7);
        assert_eq!(log2_floor(256), 8);
    }
}
