//! Deepfield - decode packed pixel updates out of engine-owned memory
//!
//! A computation engine (typically a WebAssembly module) writes pixel updates
//! into its own memory as fixed 12-byte records and reports where they live.
//! This crate gives the host bounds-checked, zero-copy views over that memory
//! and decodes the records into owned [`Pixel`] values ready for rendering.
//!
//! # Quick Start
//!
//! ```rust
//! use deepfield::{ByteOrder, Pixel, PixelDecoder, encode_batch};
//!
//! // Engine side: records written into a region
//! let region = encode_batch(&[Pixel::new(-5, 10, [255, 0, 128, 255])], ByteOrder::Little);
//!
//! // Host side: decode (offset, count) from that region
//! let decoder = PixelDecoder::with_byte_order(ByteOrder::Little);
//! let pixels = decoder.decode_batch(&region, 0, 1)?;
//! assert_eq!(pixels[0].position(), (-5, 10));
//! # Ok::<(), deepfield::Error>(())
//! ```
//!
//! # Features
//!
//! - **Zero-copy views** - [`MemoryView`] borrows engine memory and is
//!   bounds-checked against its live size on every access
//! - **Explicit byte order** - coordinates are read in a configured [`ByteOrder`]
//! - **Host loop** - [`Host`] alternates engine steps and decoding, so views can
//!   never outlive a memory reallocation
//! - **`serde`** - optional serialization of pixels and configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod error;
pub mod host;
pub mod memory;
pub mod pixel;

pub use error::{Error, Result};
pub use host::{BatchDescriptor, Canvas, Host, HostConfig, PixelEngine, PixelSink, Snapshots};
pub use memory::{LinearMemory, MemoryRegion, MemoryView, RegionId, view};
pub use pixel::{
    ByteOrder, DecoderConfig, Pixel, PixelDecoder, RECORD_SIZE, decode_batch, encode_batch,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
