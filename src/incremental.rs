// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Incremental copy: the decoder's copy-from-already-produced-output
//! primitive, including pattern replication for `offset < length`.

use crate::error::{Error, Result};

/// Copy `length` bytes from `dst[cursor - offset..]` to `dst[cursor..]`,
/// returning the new cursor.
///
/// When `offset < length` the source and destination ranges overlap and a
/// flat `memmove` is the wrong operation: the copy must *replicate* the
/// `offset`-byte pattern forward, byte by byte, so that later bytes can
/// copy from bytes written earlier in this same call. For example
/// `offset=1, length=10` over a buffer ending in `"a"` writes `"aaaaaaaaaa"`.
pub fn append_from_self(
    dst: &mut [u8],
    cursor: usize,
    offset: usize,
    length: usize,
) -> Result<usize> {
    if offset == 0 || offset > cursor {
        return Err(Error::MalformedInput(
            "copy offset is zero or refers before the start of produced output",
        ));
    }
    if length > dst.len() - cursor {
        return Err(Error::OutputOverrun);
    }

    let end = cursor + length;

    if offset >= length {
        // Source and destination ranges cannot overlap; a plain move
        // suffices regardless of how the output buffer is backed.
        dst.copy_within(cursor - offset..cursor - offset + length, cursor);
        return Ok(end);
    }

    // Pattern replication. Expand the `offset`-byte pattern by repeated
    // doubling until it covers at least 8 bytes (or the copy is already
    // done), then finish with plain (now non-overlapping) moves of the
    // widened pattern.
    let mut d = cursor;
    let mut off = offset;
    while off < 8 && d < end {
        let n = off.min(end - d);
        for i in 0..n {
            dst[d + i] = dst[d + i - off];
        }
        d += n;
        off *= 2;
    }
    while d < end {
        let n = (end - d).min(off);
        dst.copy_within(d - off..d - off + n, d);
        d += n;
    }

    Ok(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_replication_offset_one() {
        let mut buf = vec![b'a', 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let cursor = append_from_self(&mut buf, 1, 1, 10).unwrap();
        assert_eq!(cursor, 11);
        assert_eq!(&buf, b"aaaaaaaaaaa");
    }

    #[test]
    fn test_pattern_replication_offset_three() {
        // "abc" repeated: offset=3, length=9 after the initial 3 bytes.
        let mut buf = b"abc\0\0\0\0\0\0\0\0\0".to_vec();
        let cursor = append_from_self(&mut buf, 3, 3, 9).unwrap();
        assert_eq!(cursor, 12);
        assert_eq!(&buf, b"abcabcabcabc");
    }

    #[test]
    fn test_non_overlapping_copy() {
        let mut buf = b"hello world\0\0\0\0\0".to_vec();
        let cursor = append_from_self(&mut buf, 12, 11, 5).unwrap();
        assert_eq!(cursor, 17);
        assert_eq!(&buf[12..17], b"hello");
    }

    #[test]
    fn test_rejects_offset_zero() {
        let mut buf = vec![0u8; 8];
        assert!(append_from_self(&mut buf, 4, 0, 2).is_err());
    }

    #[test]
    fn test_rejects_offset_before_start() {
        let mut buf = vec![0u8; 8];
        assert!(append_from_self(&mut buf, 2, 5, 2).is_err());
    }

    #[test]
    fn test_rejects_overrun() {
        let mut buf = vec![0u8; 8];
        assert!(append_from_self(&mut buf, 4, 1, 10).is_err());
    }
}
