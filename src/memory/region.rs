//! Region handle abstraction

use std::fmt;

use bytes::{Bytes, BytesMut};
use uuid::Uuid;

/// A contiguous byte buffer owned by an engine and exposed read-only to the host
///
/// Implementations must report their *current* contents on every call. The
/// host re-reads the length for each view and never caches it.
pub trait MemoryRegion {
    /// Current contents of the region
    fn as_bytes(&self) -> &[u8];

    /// Current size of the region in bytes
    fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Check whether the region holds no bytes
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MemoryRegion for [u8] {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl<const N: usize> MemoryRegion for [u8; N] {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl MemoryRegion for Vec<u8> {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl MemoryRegion for Bytes {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl MemoryRegion for BytesMut {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl<R: MemoryRegion + ?Sized> MemoryRegion for &R {
    fn as_bytes(&self) -> &[u8] {
        (**self).as_bytes()
    }
}

impl<R: MemoryRegion + ?Sized> MemoryRegion for Box<R> {
    fn as_bytes(&self) -> &[u8] {
        (**self).as_bytes()
    }
}

/// Identifier distinguishing coexisting regions in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionId(u64);

impl RegionId {
    /// Generate a random region ID
    #[must_use]
    pub fn generate() -> Self {
        let uuid = Uuid::new_v4();
        let bytes = uuid.as_bytes();
        Self(u64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    /// Wrap a raw identifier
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    /// Raw identifier value
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
