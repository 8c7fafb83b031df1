// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! # snapper
//!
//! A byte-oriented, general-purpose lossless compression codec compatible
//! with the Snappy wire format: `varint32(uncompressed_len) || items*`,
//! where each item is a literal run or a back-reference copy.
//!
//! The block compressor and tag-dispatch decoder are the core; around them
//! sit the `Source`/`Sink`/`Writer` capabilities that let callers target a
//! flat buffer, a scatter-gather vector, or a growable sink without
//! changing the decode loop itself.
//!
//! ## Example
//!
//! ```rust
//! use snapper::{compress, decompress};
//!
//! let data = b"Hello, World! This is a test of compression.";
//! let compressed = compress(data);
//! let decompressed = decompress(&compressed).expect("decompression failed");
//! assert_eq!(data, &decompressed[..]);
//! ```

mod compress;
mod constants;
mod decode;
mod error;
mod incremental;
mod primitives;
mod sink;
mod source;
mod tag_table;
mod varint;
mod writer;

pub use compress::{compress, compress_into, max_compressed_length};
pub use decode::{decode, decompress, decompress_into, get_uncompressed_length, is_valid_compressed};
pub use error::{Error, Result};
pub use sink::Sink;
pub use source::{Source, SliceSource};
pub use writer::{FlatWriter, IoVecWriter, ScatteredWriter, ValidatorWriter, Writer};
