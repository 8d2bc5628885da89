//! Cooperative cancellation for long-running grid operations.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cooperative-cancellation token backed by an [`AtomicBool`].
///
/// Clones share the same flag, so a UI can hold one handle while a search
/// polls another.
#[derive(Clone, Debug)]
pub struct CancelToken {
    done: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }

    /// Clear a previous request so the token can guard another run.
    #[inline]
    pub fn reset(&self) {
        self.done.store(false, Ordering::Relaxed);
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let a = CancelToken::new();
        let b = a.clone();
        assert!(!b.is_done());
        a.cancel();
        assert!(b.is_done());
        b.reset();
        assert!(!a.is_done());
    }
}
