//! Packed pixel records and their decoder
//!
//! This module provides the wire layout of a pixel record and the decoder
//! that copies records out of engine memory.

mod decoder;
mod record;

pub use decoder::{DecoderConfig, PixelDecoder, decode_batch};
pub use record::{ByteOrder, Pixel, encode_batch};

/// Size of one encoded pixel record in bytes
pub const RECORD_SIZE: usize = 12;

/// Size of the coordinate pair (x, y) in bytes
pub const COORDS_SIZE: usize = 8;

/// Offset of the color channels within a record
pub const COLOR_OFFSET: usize = COORDS_SIZE;

/// Size of the color channels (r, g, b, a) in bytes
pub const COLOR_SIZE: usize = 4;
