//! Host loop: step the engine, decode its batch, hand it to the consumer.

mod canvas;
mod engine;
mod metrics;

pub use canvas::Canvas;
pub use engine::{BatchDescriptor, PixelEngine, PixelSink, Snapshots};
pub use metrics::{HostMetrics, MetricsSnapshot};

use tracing::debug;

use crate::memory::MemoryRegion;
use crate::pixel::{DecoderConfig, Pixel, PixelDecoder};
use crate::{Error, Result};

/// Host settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HostConfig {
    /// Decoder settings, including the engine's byte order.
    pub decoder: DecoderConfig,
    /// Do not notify the sink about batches with no records.
    pub skip_empty_batches: bool,
}

/// Drives one engine and forwards its decoded batches to one sink.
#[derive(Debug)]
pub struct Host<E, S> {
    engine: E,
    sink: S,
    decoder: PixelDecoder,
    skip_empty_batches: bool,
    metrics: HostMetrics,
}

impl<E: PixelEngine, S: PixelSink> Host<E, S> {
    /// Create a host with default settings.
    pub fn new(engine: E, sink: S) -> Self {
        Self::with_config(engine, sink, HostConfig::default())
    }

    /// Create a host with the provided configuration.
    pub fn with_config(engine: E, sink: S, config: HostConfig) -> Self {
        Self {
            engine,
            sink,
            decoder: PixelDecoder::new(config.decoder),
            skip_empty_batches: config.skip_empty_batches,
            metrics: HostMetrics::default(),
        }
    }

    /// Run one engine step and deliver the batch it produced.
    ///
    /// Returns the number of pixels forwarded to the sink.
    ///
    /// # Errors
    ///
    /// Propagates engine failures and [`Error::OutOfBounds`] from decoding
    /// unchanged. The sink is not called when decoding fails.
    pub fn pump(&mut self) -> Result<usize> {
        let descriptor = self.engine.produce().inspect_err(|err| {
            debug!(error = %err, "engine step failed");
            self.metrics.record_engine_error();
        })?;
        self.deliver(descriptor)
    }

    /// Decode a batch the engine reported through other means and deliver it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the descriptor does not fit in the
    /// engine's current memory.
    pub fn deliver(&mut self, descriptor: BatchDescriptor) -> Result<usize> {
        let pixels = self.decode(descriptor)?;
        self.metrics.record_batch(pixels.len());

        if pixels.is_empty() && self.skip_empty_batches {
            debug!(base_offset = descriptor.base_offset, "skipping empty batch");
            return Ok(0);
        }

        debug!(
            base_offset = descriptor.base_offset,
            count = pixels.len(),
            "forwarding pixel batch"
        );
        self.sink.refresh(&pixels);
        Ok(pixels.len())
    }

    /// Decode a batch against the engine's current memory without notifying the sink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the descriptor does not fit.
    pub fn decode(&self, descriptor: BatchDescriptor) -> Result<Vec<Pixel>> {
        let memory = self.engine.memory();
        self.decoder
            .decode_batch(memory, descriptor.base_offset, descriptor.count)
            .inspect_err(|err| {
                if let Error::OutOfBounds { .. } = err {
                    debug!(
                        base_offset = descriptor.base_offset,
                        count = descriptor.count,
                        memory_len = memory.len(),
                        "batch does not fit engine memory"
                    );
                    self.metrics.record_bounds_error();
                }
            })
    }

    /// Engine driven by this host.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable access to the engine, e.g. to queue work between steps.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Sink receiving decoded batches.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Decoder in use.
    pub fn decoder(&self) -> &PixelDecoder {
        &self.decoder
    }

    /// Counters for this host.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Split the host back into its engine and sink.
    pub fn into_parts(self) -> (E, S) {
        (self.engine, self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::{ByteOrder, RECORD_SIZE};

    struct FailingEngine {
        memory: Vec<u8>,
    }

    impl PixelEngine for FailingEngine {
        type Memory = Vec<u8>;

        fn memory(&self) -> &Vec<u8> {
            &self.memory
        }

        fn produce(&mut self) -> Result<BatchDescriptor> {
            Err(Error::Engine("out of stars".to_string()))
        }
    }

    #[test]
    fn test_pump_forwards_batch() {
        let mut host = Host::new(Canvas::with_demo_pixels(), Snapshots::new());

        assert_eq!(host.pump().unwrap(), 3);
        let latest = host.sink().latest().unwrap();
        assert_eq!(latest, host.engine().pixels());
        assert_eq!(host.metrics().pixels, 3);
    }

    #[test]
    fn test_empty_batch_is_forwarded_by_default() {
        let mut host = Host::new(Canvas::new(ByteOrder::Native), Snapshots::new());

        assert_eq!(host.pump().unwrap(), 0);
        assert_eq!(host.sink().batches().len(), 1);
        assert_eq!(host.metrics().empty_batches, 1);
    }

    #[test]
    fn test_empty_batch_skipped_when_configured() {
        let config = HostConfig {
            skip_empty_batches: true,
            ..HostConfig::default()
        };
        let mut host = Host::with_config(Canvas::new(ByteOrder::Native), Snapshots::new(), config);

        assert_eq!(host.pump().unwrap(), 0);
        assert!(host.sink().batches().is_empty());
    }

    #[test]
    fn test_deliver_out_of_bounds_does_not_notify() {
        let mut host = Host::new(Canvas::with_demo_pixels(), Snapshots::new());
        host.pump().unwrap();

        let len = host.engine().memory().len();
        let err = host
            .deliver(BatchDescriptor::new(len - RECORD_SIZE + 1, 1))
            .unwrap_err();

        assert!(err.is_out_of_bounds());
        assert_eq!(host.sink().batches().len(), 1);
        assert_eq!(host.metrics().bounds_errors, 1);
    }

    #[test]
    fn test_engine_error_propagates() {
        let mut host = Host::new(FailingEngine { memory: vec![] }, Snapshots::new());

        let err = host.pump().unwrap_err();
        assert_eq!(err, Error::Engine("out of stars".to_string()));
        assert_eq!(host.metrics().engine_errors, 1);
        assert!(host.sink().batches().is_empty());
    }

    #[test]
    fn test_byte_order_mismatch_is_visible() {
        let engine = Canvas::with_demo_pixels();
        let swapped = match ByteOrder::Native.resolve() {
            ByteOrder::Big => ByteOrder::Little,
            _ => ByteOrder::Big,
        };
        let config = HostConfig {
            decoder: DecoderConfig { byte_order: swapped },
            ..HostConfig::default()
        };
        let mut host = Host::with_config(engine, Snapshots::new(), config);
        host.pump().unwrap();

        let decoded = host.sink().latest().unwrap()[0];
        assert_eq!(decoded.x, (-1111i32).swap_bytes());
        assert_eq!(decoded.rgba(), [251, 1, 11, 201]);
    }

    #[test]
    fn test_into_parts() {
        let mut host = Host::new(Canvas::with_demo_pixels(), Snapshots::new());
        host.pump().unwrap();
        host.engine_mut().clear();
        host.pump().unwrap();

        let (engine, mut sink) = host.into_parts();
        assert!(engine.pixels().is_empty());
        assert_eq!(sink.take().len(), 2);
    }
}
