// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Byte-source capability consumed by the decoder, modeled on Snappy's
//! `Source` abstraction: the decoder never assumes the whole compressed
//! stream is one contiguous slice.

/// A source of bytes the decoder can peek into without copying, and skip
/// past once consumed.
pub trait Source {
    /// Return a view of the currently available bytes. May be shorter
    /// than the total remaining input; the decoder will call `peek` again
    /// after `skip`ping past what it already consumed.
    fn peek(&self) -> &[u8];

    /// Advance past `n` bytes previously returned by `peek`.
    fn skip(&mut self, n: usize);

    /// Total bytes left across all future `peek` calls, for diagnostics.
    fn available(&self) -> usize;
}

/// The common case: the whole compressed stream already lives in memory
/// as one contiguous slice.
pub struct SliceSource<'a> {
    data: &'a [u8],
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        SliceSource { data }
    }
}

impl<'a> Source for SliceSource<'a> {
    fn peek(&self) -> &[u8] {
        self.data
    }

    fn skip(&mut self, n: usize) {
        self.data = &self.data[n..];
    }

    fn available(&self) -> usize {
        self.data.len()
    }
}
