//! Read-only views over a memory region
//!
//! # Validity window
//!
//! A [`MemoryView`] aliases the region it was taken from; it does not copy.
//! It is valid only until the owning engine next reallocates that region
//! (for example when a linear memory grows). The view borrows the region, so
//! any engine call that could reallocate (which needs `&mut` access) cannot
//! run while a view is still alive. Callers copy bytes out (see
//! [`crate::pixel`]) before handing control back to the engine.

use tracing::debug;

use super::MemoryRegion;
use crate::{Error, Result};

/// Non-owning, bounds-checked window over a byte range of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryView<'a> {
    offset: usize,
    region_len: usize,
    bytes: &'a [u8],
}

impl<'a> MemoryView<'a> {
    /// Offset of the view within its region
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the view in bytes
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check whether the view covers no bytes
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Region size observed when the view was taken
    #[must_use]
    pub const fn region_len(&self) -> usize {
        self.region_len
    }

    /// Bytes covered by the view
    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Narrow the view to `length` bytes starting `offset` bytes into it
    ///
    /// The range must stay inside this view. Errors carry the region-relative
    /// offset and the region size recorded when the view was taken, so they
    /// read the same as a failed [`view`] call.
    pub fn slice(&self, offset: usize, length: usize) -> Result<MemoryView<'a>> {
        let bytes = checked_range(self.bytes, offset, length).ok_or(Error::OutOfBounds {
            offset: self.offset.saturating_add(offset),
            length,
            region_len: self.region_len,
        })?;

        Ok(MemoryView {
            offset: self.offset + offset,
            region_len: self.region_len,
            bytes,
        })
    }
}

impl AsRef<[u8]> for MemoryView<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

/// Borrow `length` bytes of `region` starting at `offset`
///
/// The bound is checked against the region's size at the instant of the
/// call. Overflowing `offset + length` counts as out of bounds.
///
/// # Errors
///
/// Returns [`Error::OutOfBounds`] if `offset + length` exceeds the region.
pub fn view<R: MemoryRegion + ?Sized>(
    region: &R,
    offset: usize,
    length: usize,
) -> Result<MemoryView<'_>> {
    let bytes = region.as_bytes();

    match checked_range(bytes, offset, length) {
        Some(view_bytes) => Ok(MemoryView {
            offset,
            region_len: bytes.len(),
            bytes: view_bytes,
        }),
        None => {
            debug!(offset, length, region_len = bytes.len(), "view out of bounds");
            Err(Error::OutOfBounds {
                offset,
                length,
                region_len: bytes.len(),
            })
        }
    }
}

/// Borrow exactly `N` bytes of `region` starting at `offset`
///
/// # Errors
///
/// Returns [`Error::OutOfBounds`] if `offset + N` exceeds the region.
pub fn view_array<const N: usize, R: MemoryRegion + ?Sized>(
    region: &R,
    offset: usize,
) -> Result<&[u8; N]> {
    let view = view(region, offset, N)?;
    view.as_bytes().try_into().map_err(|_| Error::OutOfBounds {
        offset,
        length: N,
        region_len: region.len(),
    })
}

fn checked_range(bytes: &[u8], offset: usize, length: usize) -> Option<&[u8]> {
    let end = offset.checked_add(length)?;
    bytes.get(offset..end)
}
