//! Reference engine: keeps a list of pixels and publishes them as records.

use tracing::trace;

use super::{BatchDescriptor, PixelEngine};
use crate::memory::{LinearMemory, MemoryRegion};
use crate::pixel::{ByteOrder, Pixel, RECORD_SIZE};
use crate::{Error, Result};

/// In-process engine that writes its pixel list into a [`LinearMemory`].
///
/// Each [`PixelEngine::produce`] call rewrites the whole list at the base
/// offset, growing memory as needed.
#[derive(Debug)]
pub struct Canvas {
    pixels: Vec<Pixel>,
    memory: LinearMemory,
    base_offset: usize,
    byte_order: ByteOrder,
}

impl Canvas {
    /// Create an empty canvas writing coordinates in `byte_order`.
    ///
    /// Memory starts with no pages and grows on the first batch.
    #[must_use]
    pub fn new(byte_order: ByteOrder) -> Self {
        Self::with_memory(LinearMemory::default(), byte_order)
    }

    /// Create an empty canvas over an existing memory.
    #[must_use]
    pub fn with_memory(memory: LinearMemory, byte_order: ByteOrder) -> Self {
        Self {
            pixels: Vec::new(),
            memory,
            base_offset: 0,
            byte_order,
        }
    }

    /// Canvas seeded with the three start-of-day test pixels.
    #[must_use]
    pub fn with_demo_pixels() -> Self {
        let mut canvas = Self::new(ByteOrder::Native);
        canvas.extend([
            Pixel::new(-1111, 101, [251, 1, 11, 201]),
            Pixel::new(222, 202, [252, 2, 22, 202]),
            Pixel::new(333, 303, [253, 3, 33, 203]),
        ]);
        canvas
    }

    /// Place records starting at `base_offset` instead of zero.
    #[must_use]
    pub fn at_offset(mut self, base_offset: usize) -> Self {
        self.base_offset = base_offset;
        self
    }

    /// Byte order coordinates are written in.
    #[must_use]
    pub const fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Offset of the first record.
    #[must_use]
    pub const fn base_offset(&self) -> usize {
        self.base_offset
    }

    /// Pixels that the next batch will contain.
    #[must_use]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Queue a pixel for the next batch.
    pub fn push(&mut self, pixel: Pixel) {
        self.pixels.push(pixel);
    }

    /// Drop all queued pixels.
    pub fn clear(&mut self) {
        self.pixels.clear();
    }

    /// Backing memory.
    #[must_use]
    pub const fn linear_memory(&self) -> &LinearMemory {
        &self.memory
    }
}

impl Extend<Pixel> for Canvas {
    fn extend<I: IntoIterator<Item = Pixel>>(&mut self, iter: I) {
        self.pixels.extend(iter);
    }
}

impl PixelEngine for Canvas {
    type Memory = LinearMemory;

    fn memory(&self) -> &LinearMemory {
        &self.memory
    }

    fn produce(&mut self) -> Result<BatchDescriptor> {
        let descriptor = BatchDescriptor::new(self.base_offset, self.pixels.len());
        let end = descriptor
            .byte_len()
            .and_then(|len| len.checked_add(self.base_offset))
            .ok_or_else(|| Error::Engine(format!("{} pixels do not fit in memory", self.pixels.len())))?;
        self.memory.ensure_len(end)?;

        let mut record = [0u8; RECORD_SIZE];
        for (index, pixel) in self.pixels.iter().enumerate() {
            pixel.encode_into(&mut record, self.byte_order);
            self.memory.write(self.base_offset + index * RECORD_SIZE, &record)?;
        }

        trace!(
            region = %self.memory.id(),
            base_offset = self.base_offset,
            count = descriptor.count,
            memory_len = self.memory.len(),
            "canvas produced batch"
        );
        Ok(descriptor)
    }
}
