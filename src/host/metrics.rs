use std::sync::atomic::{AtomicU64, Ordering};

/// Per-host decode counters.
///
/// Each [`super::Host`] owns its own counters so several hosts (one per
/// engine) can run side by side.
#[derive(Debug, Default)]
pub struct HostMetrics {
    batches: AtomicU64,
    pixels: AtomicU64,
    empty_batches: AtomicU64,
    bounds_errors: AtomicU64,
    engine_errors: AtomicU64,
}

impl HostMetrics {
    #[inline]
    pub(crate) fn record_batch(&self, pixels: usize) {
        self.batches.fetch_add(1, Ordering::Relaxed);
        self.pixels
            .fetch_add(u64::try_from(pixels).unwrap_or(u64::MAX), Ordering::Relaxed);
        if pixels == 0 {
            self.empty_batches.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub(crate) fn record_bounds_error(&self) {
        self.bounds_errors.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_engine_error(&self) {
        self.engine_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Current counter values.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            batches: self.batches.load(Ordering::Relaxed),
            pixels: self.pixels.load(Ordering::Relaxed),
            empty_batches: self.empty_batches.load(Ordering::Relaxed),
            bounds_errors: self.bounds_errors.load(Ordering::Relaxed),
            engine_errors: self.engine_errors.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`HostMetrics`].
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Batches decoded successfully, including empty ones.
    pub batches: u64,
    /// Pixels decoded across all batches.
    pub pixels: u64,
    /// Batches that held no records.
    pub empty_batches: u64,
    /// Batches rejected by a bounds check.
    pub bounds_errors: u64,
    /// Failed engine steps.
    pub engine_errors: u64,
}

impl MetricsSnapshot {
    /// Average batch size, if any batch has been decoded.
    #[must_use]
    pub fn avg_batch_len(&self) -> Option<u64> {
        if self.batches == 0 {
            return None;
        }
        Some(self.pixels / self.batches)
    }
}
