// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Byte-sink capability consumed by compressor entry points that do not
//! want to assume a flat, pre-sized output buffer.

/// A destination for compressed (or otherwise produced) bytes.
pub trait Sink {
    /// Fully consume `bytes`, appending them to the sink.
    fn append(&mut self, bytes: &[u8]);

    /// Return a writable buffer of at least `min_size` bytes. Callers fill
    /// it and then call `append` with the filled prefix. Sinks without a
    /// zero-copy region may hand back `scratch` instead.
    fn get_append_buffer<'a>(&mut self, min_size: usize, scratch: &'a mut Vec<u8>) -> &'a mut Vec<u8> {
        scratch.clear();
        scratch.resize(min_size, 0);
        scratch
    }
}

impl Sink for Vec<u8> {
    fn append(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}
