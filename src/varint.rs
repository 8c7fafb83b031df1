// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::error::{Error, Result};

/// Decode a base-128 little-endian varint from the start of `src`.
///
/// At most 5 bytes are consumed (enough for a full `u32`); a 6th
/// continuation bit, or a 5th byte whose value would not fit in the
/// remaining 4 bits, is a hard error.
pub fn decode_varint32(src: &[u8]) -> Result<(u32, usize)> {
    let mut value: u32 = 0;

    for (i, &byte) in src.iter().take(5).enumerate() {
        if i == 4 && byte > 0x0f {
            return Err(Error::MalformedInput("varint overflows 32 bits"));
        }
        value |= ((byte & 0x7f) as u32) << (7 * i);
        if byte < 0x80 {
            return Ok((value, i + 1));
        }
    }

    if src.len() < 5 {
        Err(Error::MalformedInput("truncated varint"))
    } else {
        Err(Error::MalformedInput("varint does not terminate within 5 bytes"))
    }
}

/// Encode `value` as a base-128 little-endian varint into `dst`.
/// Returns the number of bytes written (1..=5). `dst` must have room for
/// at least 5 bytes.
pub fn encode_varint32(dst: &mut [u8], mut value: u32) -> usize {
    let mut i = 0;
    while value >= 0x80 {
        dst[i] = (value as u8) | 0x80;
        value >>= 7;
        i += 1;
    }
    dst[i] = value as u8;
    i + 1
}

/// Number of bytes `encode_varint32` would write for `value`.
pub fn varint_size32(value: u32) -> usize {
    match value {
        0..=0x7f => 1,
        0x80..=0x3fff => 2,
        0x4000..=0x1f_ffff => 3,
        0x20_0000..=0xfff_ffff => 4,
        _ => 5,
    }
}
