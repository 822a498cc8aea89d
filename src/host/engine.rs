//! Seams between the host and the engine on one side, the consumer on the other.

use crate::Result;
use crate::memory::MemoryRegion;
use crate::pixel::{Pixel, RECORD_SIZE};

/// Location of a batch of pixel records inside engine memory.
///
/// This pair is the whole wire contract between engine and host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchDescriptor {
    /// Offset of the first record.
    pub base_offset: usize,
    /// Number of records.
    pub count: usize,
}

impl BatchDescriptor {
    /// Create a descriptor.
    #[must_use]
    pub const fn new(base_offset: usize, count: usize) -> Self {
        Self { base_offset, count }
    }

    /// Size of the batch in bytes, or `None` on overflow.
    #[must_use]
    pub const fn byte_len(&self) -> Option<usize> {
        self.count.checked_mul(RECORD_SIZE)
    }

    /// Check whether the batch holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// An external computation engine that writes pixel records into its own memory.
///
/// Engine and host alternate strictly: [`PixelEngine::produce`] takes
/// `&mut self`, so no view borrowed through [`PixelEngine::memory`] can be
/// alive while the engine runs.
pub trait PixelEngine {
    /// Region the engine writes its records into.
    type Memory: MemoryRegion + ?Sized;

    /// Engine memory as it is right now.
    fn memory(&self) -> &Self::Memory;

    /// Compute the next batch, write it, and report where it lives.
    ///
    /// # Errors
    ///
    /// Implementations report their own failures as [`crate::Error::Engine`].
    fn produce(&mut self) -> Result<BatchDescriptor>;
}

/// Consumer notified once per decoded batch.
///
/// The slice is a snapshot; consumers copy what they keep.
pub trait PixelSink {
    /// Handle a freshly decoded batch.
    fn refresh(&mut self, pixels: &[Pixel]);
}

impl<F> PixelSink for F
where
    F: FnMut(&[Pixel]),
{
    fn refresh(&mut self, pixels: &[Pixel]) {
        self(pixels);
    }
}

/// Sink that keeps every batch it receives, in delivery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshots {
    batches: Vec<Vec<Pixel>>,
}

impl Snapshots {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Batches received so far.
    #[must_use]
    pub fn batches(&self) -> &[Vec<Pixel>] {
        &self.batches
    }

    /// Most recent batch, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&[Pixel]> {
        self.batches.last().map(Vec::as_slice)
    }

    /// Take all collected batches, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Vec<Pixel>> {
        std::mem::take(&mut self.batches)
    }
}

impl PixelSink for Snapshots {
    fn refresh(&mut self, pixels: &[Pixel]) {
        self.batches.push(pixels.to_vec());
    }
}
