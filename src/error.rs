// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt;

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for compression/decompression failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The compressed stream is structurally invalid: a truncated or
    /// overflowing varint, a missing tag byte, an offset-0 copy, an offset
    /// beyond already-produced bytes, or a literal that would overrun the
    /// declared length.
    MalformedInput(&'static str),

    /// Decoding reached a clean end of input but produced a different
    /// number of bytes than the stream's declared length.
    LengthMismatch { expected: usize, actual: usize },

    /// A fixed-capacity writer's output buffer was exceeded.
    OutputOverrun,

    /// A caller-supplied argument was invalid for the operation requested,
    /// e.g. a source fragment larger than `BLOCK_SIZE`.
    InvalidArgument(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedInput(reason) => write!(f, "malformed input: {}", reason),
            Error::LengthMismatch { expected, actual } => write!(
                f,
                "length mismatch: expected {} bytes, got {}",
                expected, actual
            ),
            Error::OutputOverrun => write!(f, "output buffer too small"),
            Error::InvalidArgument(reason) => write!(f, "invalid argument: {}", reason),
        }
    }
}

impl std::error::Error for Error {}
