//! Synchronization primitives for search control.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A thread-safe stop flag shared between the session and one search.
///
/// Each search gets a fresh flag, so a stop aimed at an old search can
/// never cancel a newer one.
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// Create a new stop flag (initially not stopped).
    #[must_use]
    pub fn new() -> Self {
        StopFlag(Arc::new(AtomicBool::new(false)))
    }

    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_flag_is_shared_between_clones() {
        let flag1 = StopFlag::new();
        let flag2 = flag1.clone();
        assert!(!flag2.is_stopped());

        flag1.stop();
        assert!(flag2.is_stopped());
    }

    #[test]
    fn test_fresh_flags_are_independent() {
        let old = StopFlag::new();
        old.stop();
        assert!(!StopFlag::new().is_stopped());
    }
}
