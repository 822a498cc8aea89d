//! Page-granular growable memory, shaped like a WebAssembly linear memory.

use std::fmt;

use bytes::BytesMut;
use tracing::{debug, trace};

use super::{MemoryRegion, RegionId};
use crate::{Error, Result};

/// Size of one linear memory page in bytes (64 KiB).
pub const PAGE_SIZE: usize = 64 * 1024;

/// Largest page count any memory may reach (4 GiB, the wasm32 limit).
///
/// Capped further on targets whose address space cannot hold that much.
pub const MAX_PAGES: usize = max_pages_for_target();

const fn max_pages_for_target() -> usize {
    let addressable = isize::MAX.unsigned_abs() / PAGE_SIZE;
    if addressable < 65_536 { addressable } else { 65_536 }
}

/// Growable, engine-owned byte region.
///
/// Only the owning engine writes or grows it. Growing may move the backing
/// storage, which invalidates every outstanding [`super::MemoryView`]; both
/// [`LinearMemory::grow`] and [`LinearMemory::write`] take `&mut self`, so
/// the borrow checker rejects a view held across either call.
pub struct LinearMemory {
    id: RegionId,
    data: BytesMut,
    max_pages: usize,
}

impl LinearMemory {
    /// Create a memory with `initial_pages` zeroed pages, growable up to [`MAX_PAGES`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `initial_pages` exceeds [`MAX_PAGES`].
    pub fn new(initial_pages: usize) -> Result<Self> {
        Self::with_max_pages(initial_pages, MAX_PAGES)
    }

    /// Create a memory that may never grow beyond `max_pages`.
    ///
    /// Limits above [`MAX_PAGES`] are lowered to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `initial_pages` already exceeds the limit.
    pub fn with_max_pages(initial_pages: usize, max_pages: usize) -> Result<Self> {
        let max_pages = max_pages.min(MAX_PAGES);
        if initial_pages > max_pages {
            return Err(Error::OutOfBounds {
                offset: 0,
                length: initial_pages.saturating_mul(PAGE_SIZE),
                region_len: max_pages * PAGE_SIZE,
            });
        }

        Ok(Self {
            id: RegionId::generate(),
            data: BytesMut::zeroed(initial_pages * PAGE_SIZE),
            max_pages,
        })
    }

    /// Identifier used to tell regions apart in logs.
    #[must_use]
    pub const fn id(&self) -> RegionId {
        self.id
    }

    /// Current size in pages.
    #[must_use]
    pub fn pages(&self) -> usize {
        self.data.len() / PAGE_SIZE
    }

    /// Growth limit in pages.
    #[must_use]
    pub const fn max_pages(&self) -> usize {
        self.max_pages
    }

    /// Grow by `delta` zeroed pages, returning the previous page count.
    ///
    /// Existing contents are preserved, but the backing storage may move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the new size exceeds the growth limit
    /// or overflows.
    pub fn grow(&mut self, delta: usize) -> Result<usize> {
        let previous = self.pages();
        let limit = self.max_pages;
        let requested = previous
            .checked_add(delta)
            .filter(|pages| *pages <= limit)
            .ok_or(Error::OutOfBounds {
                offset: self.data.len(),
                length: delta.saturating_mul(PAGE_SIZE),
                region_len: limit * PAGE_SIZE,
            })?;

        if delta > 0 {
            self.data.resize(requested * PAGE_SIZE, 0);
            debug!(region = %self.id, previous, pages = requested, "linear memory grew");
        }

        Ok(previous)
    }

    /// Grow just enough that `len` bytes fit, returning the page count afterwards.
    ///
    /// # Errors
    ///
    /// Same as [`LinearMemory::grow`].
    pub fn ensure_len(&mut self, len: usize) -> Result<usize> {
        if len > self.data.len() {
            let needed_pages = len.div_ceil(PAGE_SIZE);
            self.grow(needed_pages - self.pages())?;
        }
        Ok(self.pages())
    }

    /// Copy `bytes` into the memory at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the write would run past the end;
    /// nothing is written in that case.
    pub fn write(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        let region_len = self.data.len();
        let target = offset
            .checked_add(bytes.len())
            .and_then(|end| self.data.get_mut(offset..end))
            .ok_or(Error::OutOfBounds {
                offset,
                length: bytes.len(),
                region_len,
            })?;

        target.copy_from_slice(bytes);
        trace!(region = %self.id, offset, len = bytes.len(), "linear memory write");
        Ok(())
    }
}

impl Default for LinearMemory {
    /// Empty memory with no pages, growable up to [`MAX_PAGES`].
    fn default() -> Self {
        Self {
            id: RegionId::generate(),
            data: BytesMut::new(),
            max_pages: MAX_PAGES,
        }
    }
}

impl fmt::Debug for LinearMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearMemory")
            .field("id", &self.id)
            .field("pages", &self.pages())
            .field("max_pages", &self.max_pages)
            .finish_non_exhaustive()
    }
}

impl MemoryRegion for LinearMemory {
    fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
