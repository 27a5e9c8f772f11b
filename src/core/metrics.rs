//! Logger metrics for observability
//!
//! The processor never logs its own failures (that would recurse into the
//! queue it is draining), so these counters are the only record of them.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared between producers and the processor thread
///
/// # Example
///
/// ```
/// use module_log_system::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_enqueued();
/// metrics.record_written();
///
/// assert_eq!(metrics.enqueued(), 1);
/// assert_eq!(metrics.pending(), 0);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Messages accepted by the queue
    enqueued: AtomicU64,

    /// Messages fully processed by the worker
    written: AtomicU64,

    /// Messages refused because the subsystem was shutting down
    rejected: AtomicU64,

    /// Individual sink writes that failed (one message can fail several sinks)
    sink_failures: AtomicU64,

    /// Module directory resolutions (at most one per distinct module)
    directories_resolved: AtomicU64,

    /// Log files opened by the processor
    files_opened: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            enqueued: AtomicU64::new(0),
            written: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
            directories_resolved: AtomicU64::new(0),
            files_opened: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn written(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn directories_resolved(&self) -> u64 {
        self.directories_resolved.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn files_opened(&self) -> u64 {
        self.files_opened.load(Ordering::Relaxed)
    }

    /// Messages accepted but not yet processed
    pub fn pending(&self) -> u64 {
        self.enqueued().saturating_sub(self.written())
    }

    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rejected(&self) -> u64 {
        self.rejected.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_directory_resolved(&self) -> u64 {
        self.directories_resolved.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_file_opened(&self) -> u64 {
        self.files_opened.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.enqueued(), 0);
        assert_eq!(metrics.written(), 0);
        assert_eq!(metrics.rejected(), 0);
        assert_eq!(metrics.sink_failures(), 0);
        assert_eq!(metrics.directories_resolved(), 0);
        assert_eq!(metrics.files_opened(), 0);
    }

    #[test]
    fn test_pending_never_underflows() {
        let metrics = LoggerMetrics::new();
        metrics.record_written();
        assert_eq!(metrics.pending(), 0);

        metrics.record_enqueued();
        metrics.record_enqueued();
        metrics.record_enqueued();
        assert_eq!(metrics.pending(), 2);
    }

    #[test]
    fn test_concurrent_updates() {
        let metrics = Arc::new(LoggerMetrics::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let metrics = Arc::clone(&metrics);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        metrics.record_enqueued();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(metrics.enqueued(), 8000);
    }
}
