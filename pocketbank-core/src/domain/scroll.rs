//! Shared vertical scroll offset

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Vertical scroll offset shared between the transaction list (the writer)
/// and the card presentation (the readers).
///
/// Clones share the same value. Reads and writes are single atomic
/// operations, so a scroll tick never blocks or allocates.
#[derive(Debug, Clone, Default)]
pub struct ScrollProgress {
    bits: Arc<AtomicU64>,
}

impl ScrollProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest offset. Negative values (overscroll) are kept as is.
    pub fn set(&self, offset: f64) {
        self.bits.store(offset.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    /// Back to the top of the list
    pub fn reset(&self) {
        self.set(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_top() {
        assert_eq!(ScrollProgress::new().get(), 0.0);
    }

    #[test]
    fn test_clones_share_value() {
        let writer = ScrollProgress::new();
        let reader = writer.clone();

        writer.set(123.5);
        assert_eq!(reader.get(), 123.5);

        writer.set(-12.0);
        assert_eq!(reader.get(), -12.0);

        reader.reset();
        assert_eq!(writer.get(), 0.0);
    }
}
