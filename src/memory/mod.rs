//! Engine-owned memory regions and bounds-checked views over them
//!
//! The host never owns the bytes it decodes. An engine hands out a
//! [`MemoryRegion`]; the host borrows short-lived [`MemoryView`]s from it.

mod linear;
mod region;
mod view;

pub use linear::{LinearMemory, MAX_PAGES, PAGE_SIZE};
pub use region::{MemoryRegion, RegionId};
pub use view::{MemoryView, view, view_array};
