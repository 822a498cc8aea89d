//! Pixel record layout
//!
//! # Wire Format
//!
//! ```text
//! 0                   1                   2                   3
//! 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                         X (i32, 4)                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                         Y (i32, 4)                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |    Red (1)    |   Green (1)   |   Blue (1)    |   Alpha (1)   |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Coordinates use the producing engine's byte order ([`ByteOrder`]).
//! Color channels are single bytes and have no byte order.

use super::{COLOR_OFFSET, COLOR_SIZE, COORDS_SIZE, RECORD_SIZE};

/// Byte order of the coordinate fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ByteOrder {
    /// Little-endian (WebAssembly linear memory)
    Little,
    /// Big-endian
    Big,
    /// Whatever the host platform uses
    #[default]
    Native,
}

impl ByteOrder {
    /// Interpret four bytes as a signed 32-bit integer
    #[must_use]
    pub const fn read_i32(self, bytes: [u8; 4]) -> i32 {
        match self {
            Self::Little => i32::from_le_bytes(bytes),
            Self::Big => i32::from_be_bytes(bytes),
            Self::Native => i32::from_ne_bytes(bytes),
        }
    }

    /// Encode a signed 32-bit integer as four bytes
    #[must_use]
    pub const fn write_i32(self, value: i32) -> [u8; 4] {
        match self {
            Self::Little => value.to_le_bytes(),
            Self::Big => value.to_be_bytes(),
            Self::Native => value.to_ne_bytes(),
        }
    }

    /// Resolve [`ByteOrder::Native`] to the concrete order of this host
    #[must_use]
    pub const fn resolve(self) -> Self {
        match self {
            Self::Native if cfg!(target_endian = "big") => Self::Big,
            Self::Native => Self::Little,
            other => other,
        }
    }
}

/// Decoded pixel update
///
/// Owned by the caller; holds no reference back into engine memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pixel {
    /// Horizontal coordinate
    pub x: i32,
    /// Vertical coordinate
    pub y: i32,
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Pixel {
    /// Create a pixel from its coordinates and RGBA channels
    #[must_use]
    pub const fn new(x: i32, y: i32, [r, g, b, a]: [u8; 4]) -> Self {
        Self { x, y, r, g, b, a }
    }

    /// Coordinates as `(x, y)`
    #[must_use]
    pub const fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Channels as `[r, g, b, a]`
    #[must_use]
    pub const fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build a pixel from the 8-byte coordinate pair and 4-byte color
    #[must_use]
    pub fn from_parts(coords: &[u8; COORDS_SIZE], color: &[u8; COLOR_SIZE], order: ByteOrder) -> Self {
        let [x0, x1, x2, x3, y0, y1, y2, y3] = *coords;
        Self::new(
            order.read_i32([x0, x1, x2, x3]),
            order.read_i32([y0, y1, y2, y3]),
            *color,
        )
    }

    /// Decode a record that has already been copied out of memory
    #[must_use]
    pub fn from_record(record: &[u8; RECORD_SIZE], order: ByteOrder) -> Self {
        let [x0, x1, x2, x3, y0, y1, y2, y3, r, g, b, a] = *record;
        Self::from_parts(&[x0, x1, x2, x3, y0, y1, y2, y3], &[r, g, b, a], order)
    }

    /// Encode into a record buffer
    pub fn encode_into(&self, out: &mut [u8; RECORD_SIZE], order: ByteOrder) {
        out[0..4].copy_from_slice(&order.write_i32(self.x));
        out[4..COORDS_SIZE].copy_from_slice(&order.write_i32(self.y));
        out[COLOR_OFFSET..].copy_from_slice(&self.rgba());
    }

    /// Encode to a fresh record
    #[must_use]
    pub fn to_record(&self, order: ByteOrder) -> [u8; RECORD_SIZE] {
        let mut record = [0u8; RECORD_SIZE];
        self.encode_into(&mut record, order);
        record
    }
}

/// Encode pixels as contiguous records, in order
#[must_use]
pub fn encode_batch(pixels: &[Pixel], order: ByteOrder) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(pixels.len() * RECORD_SIZE);
    for pixel in pixels {
        bytes.extend_from_slice(&pixel.to_record(order));
    }
    bytes
}
