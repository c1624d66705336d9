use core::sync::atomic::{AtomicBool, Ordering};

/// One-shot "a reset just happened" notice.
///
/// Raising an already pending signal does nothing, there is no queue. The
/// renderer takes it, which clears it in the same atomic step.
pub struct ResetSignal {
    pending: AtomicBool,
}

impl ResetSignal {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    pub fn raise(&self) {
        self.pending.store(true, Ordering::Release);
    }

    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}

impl Default for ResetSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_clears() {
        let signal = ResetSignal::new();
        signal.raise();

        assert!(signal.take());
        assert!(!signal.take());
    }

    #[test]
    fn test_raising_twice_does_not_queue() {
        let signal = ResetSignal::new();
        signal.raise();
        signal.raise();

        assert!(signal.take());
        assert!(!signal.take());
    }
}
