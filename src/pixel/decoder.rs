//! Pixel record decoder
//!
//! Walks a batch of contiguous records in engine memory and copies each one
//! out into an owned [`Pixel`]. Decoding is eager: views over engine memory
//! are only valid until the engine runs again, so the whole batch is copied
//! before returning.

use tracing::{debug, trace};

use super::{ByteOrder, COLOR_OFFSET, COLOR_SIZE, COORDS_SIZE, Pixel, RECORD_SIZE};
use crate::memory::{MemoryRegion, view, view_array};
use crate::{Error, Result};

/// Decoder settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecoderConfig {
    /// Byte order the producing engine writes coordinates in
    pub byte_order: ByteOrder,
}

/// Decodes batches of pixel records out of a memory region
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelDecoder {
    config: DecoderConfig,
}

impl PixelDecoder {
    /// Create a decoder with the provided configuration
    #[must_use]
    pub const fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Create a decoder for the given coordinate byte order
    #[must_use]
    pub const fn with_byte_order(byte_order: ByteOrder) -> Self {
        Self::new(DecoderConfig { byte_order })
    }

    /// Coordinate byte order used by this decoder
    #[must_use]
    pub const fn byte_order(&self) -> ByteOrder {
        self.config.byte_order
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode the single record starting at `offset`
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the record does not fit in the region.
    pub fn decode_record<R: MemoryRegion + ?Sized>(&self, region: &R, offset: usize) -> Result<Pixel> {
        let coords = view_array::<COORDS_SIZE, R>(region, offset)?;
        let color_offset = offset.checked_add(COLOR_OFFSET).ok_or(Error::OutOfBounds {
            offset,
            length: RECORD_SIZE,
            region_len: region.len(),
        })?;
        let color = view_array::<COLOR_SIZE, R>(region, color_offset)?;

        Ok(Pixel::from_parts(coords, color, self.config.byte_order))
    }

    /// Decode `count` contiguous records starting at `base_offset`
    ///
    /// Record `i` is read from `base_offset + 12 * i`; the output preserves
    /// record order. A `count` of zero yields an empty batch without touching
    /// the region.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `base_offset + 12 * count` exceeds the
    /// region. The full span is checked up front, so no pixel is decoded from
    /// a batch that does not fit.
    pub fn decode_batch<R: MemoryRegion + ?Sized>(
        &self,
        region: &R,
        base_offset: usize,
        count: usize,
    ) -> Result<Vec<Pixel>> {
        if count == 0 {
            trace!(base_offset, "empty pixel batch");
            return Ok(Vec::new());
        }

        let span = count.checked_mul(RECORD_SIZE).ok_or_else(|| {
            debug!(base_offset, count, "pixel batch span overflows");
            Error::OutOfBounds {
                offset: base_offset,
                length: usize::MAX,
                region_len: region.len(),
            }
        })?;
        view(region, base_offset, span)?;

        let mut pixels = Vec::with_capacity(count);
        for index in 0..count {
            let record_offset = base_offset + index * RECORD_SIZE;
            pixels.push(self.decode_record(region, record_offset)?);
        }

        trace!(base_offset, count, order = ?self.config.byte_order, "decoded pixel batch");
        Ok(pixels)
    }
}

/// Decode a batch written in the host's native byte order
///
/// # Errors
///
/// See [`PixelDecoder::decode_batch`].
pub fn decode_batch<R: MemoryRegion + ?Sized>(
    region: &R,
    base_offset: usize,
    count: usize,
) -> Result<Vec<Pixel>> {
    PixelDecoder::default().decode_batch(region, base_offset, count)
}
