//! A simple counter for tracking extraction results.
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering::SeqCst;

/// A counter for tracking extraction results.
pub struct Counter {
    ok: AtomicUsize,
    skipped: AtomicUsize,
    error: AtomicUsize,
}

impl Counter {
    pub fn new() -> Self {
        Self {
            ok: AtomicUsize::new(0),
            skipped: AtomicUsize::new(0),
            error: AtomicUsize::new(0),
        }
    }

    pub fn inc_ok(&self) {
        self.ok.fetch_add(1, SeqCst);
    }

    pub fn inc_skipped(&self) {
        self.skipped.fetch_add(1, SeqCst);
    }

    pub fn inc_error(&self) {
        self.error.fetch_add(1, SeqCst);
    }

    pub fn has_error(&self) -> bool {
        self.error.load(SeqCst) > 0
    }
}

impl std::fmt::Display for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "OK: {}, Skipped: {}, Error: {}",
            self.ok.load(SeqCst),
            self.skipped.load(SeqCst),
            self.error.load(SeqCst)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_display() {
        let counter = Counter::new();
        counter.inc_ok();
        counter.inc_ok();
        counter.inc_skipped();
        assert!(!counter.has_error());
        counter.inc_error();
        assert!(counter.has_error());
        assert_eq!(counter.to_string(), "OK: 2, Skipped: 1, Error: 1");
    }
}
