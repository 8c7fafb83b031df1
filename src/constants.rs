// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

/// Tag for literal chunks.
pub const TAG_LITERAL: u8 = 0x00;

/// Tag for copy with an 11-bit offset (1-byte payload).
pub const TAG_COPY1: u8 = 0x01;

/// Tag for copy with a 16-bit offset (2-byte payload).
pub const TAG_COPY2: u8 = 0x02;

/// Tag for copy with a 32-bit offset (4-byte payload).
pub const TAG_COPY4: u8 = 0x03;

/// Maximum size of a source fragment handed to the block compressor in one
/// call. The hash table stores 16-bit relative positions, which is why this
/// cannot grow past 65536.
pub const BLOCK_SIZE: usize = 1 << 16;

/// Smallest hash table the block compressor will allocate.
pub const MIN_HASH_TABLE_BITS: u32 = 8;
pub const MIN_HASH_TABLE_SIZE: usize = 1 << MIN_HASH_TABLE_BITS;

/// Largest hash table the block compressor will allocate.
pub const MAX_HASH_TABLE_BITS: u32 = 14;
pub const MAX_HASH_TABLE_SIZE: usize = 1 << MAX_HASH_TABLE_BITS;

/// Bytes of input slack required past `ip_limit` for the main loop's
/// unchecked wide reads.
pub const INPUT_MARGIN: usize = 15;

/// Below this many bytes, the compressor does not bother looking for
/// matches and just emits one literal.
pub const MIN_NON_LITERAL_BLOCK_SIZE: usize = 32;

/// Size of the decoder's tag refill scratch buffer.
pub const MAX_TAG_LENGTH: usize = 5;
