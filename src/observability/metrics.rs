use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::domain::{Severity, Verdict};

/// Metrics registry for the application.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Total transaction checks processed
    pub checks_total: AtomicU64,

    /// Verdicts by severity
    pub verdicts_approved: AtomicU64,
    pub verdicts_warned: AtomicU64,
    pub verdicts_rejected: AtomicU64,
    pub verdicts_blocked: AtomicU64,

    /// Check latency buckets (microseconds)
    pub latency_under_100us: AtomicU64,
    pub latency_100us_1ms: AtomicU64,
    pub latency_1_10ms: AtomicU64,
    pub latency_over_10ms: AtomicU64,

    /// Store classifications
    pub classifications_total: AtomicU64,
    pub classifications_other: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry.
    pub fn new() -> Self {
        MetricsRegistry::default()
    }

    /// Record a verdict.
    pub fn record_verdict(&self, verdict: &Verdict) {
        self.checks_total.fetch_add(1, Ordering::Relaxed);

        let counter = match verdict.severity() {
            Severity::Approved => &self.verdicts_approved,
            Severity::Warned => &self.verdicts_warned,
            Severity::Rejected => &self.verdicts_rejected,
            Severity::Blocked => &self.verdicts_blocked,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record check latency.
    pub fn record_latency(&self, start: Instant) {
        let micros = start.elapsed().as_micros() as u64;

        if micros < 100 {
            self.latency_under_100us.fetch_add(1, Ordering::Relaxed);
        } else if micros < 1000 {
            self.latency_100us_1ms.fetch_add(1, Ordering::Relaxed);
        } else if micros < 10000 {
            self.latency_1_10ms.fetch_add(1, Ordering::Relaxed);
        } else {
            self.latency_over_10ms.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a store classification; `matched` is false for `Other`.
    pub fn record_classification(&self, matched: bool) {
        self.classifications_total.fetch_add(1, Ordering::Relaxed);
        if !matched {
            self.classifications_other.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Export metrics in Prometheus format.
    pub fn to_prometheus(&self) -> String {
        format!(
            r#"# HELP spendguard_checks_total Total number of transaction checks
# TYPE spendguard_checks_total counter
spendguard_checks_total {}

# HELP spendguard_verdicts Transaction checks by verdict severity
# TYPE spendguard_verdicts counter
spendguard_verdicts{{severity="approved"}} {}
spendguard_verdicts{{severity="warned"}} {}
spendguard_verdicts{{severity="rejected"}} {}
spendguard_verdicts{{severity="blocked"}} {}

# HELP spendguard_check_latency_bucket Check latency histogram
# TYPE spendguard_check_latency_bucket counter
spendguard_check_latency_bucket{{le="0.0001"}} {}
spendguard_check_latency_bucket{{le="0.001"}} {}
spendguard_check_latency_bucket{{le="0.01"}} {}
spendguard_check_latency_bucket{{le="+Inf"}} {}

# HELP spendguard_classifications_total Store classifications performed
# TYPE spendguard_classifications_total counter
spendguard_classifications_total {}

# HELP spendguard_classifications_other_total Classifications that fell back to Other
# TYPE spendguard_classifications_other_total counter
spendguard_classifications_other_total {}
"#,
            self.checks_total.load(Ordering::Relaxed),
            self.verdicts_approved.load(Ordering::Relaxed),
            self.verdicts_warned.load(Ordering::Relaxed),
            self.verdicts_rejected.load(Ordering::Relaxed),
            self.verdicts_blocked.load(Ordering::Relaxed),
            self.latency_under_100us.load(Ordering::Relaxed),
            self.latency_100us_1ms.load(Ordering::Relaxed),
            self.latency_1_10ms.load(Ordering::Relaxed),
            self.latency_over_10ms.load(Ordering::Relaxed),
            self.classifications_total.load(Ordering::Relaxed),
            self.classifications_other.load(Ordering::Relaxed),
        )
    }
}

/// Guard for timing operations.
pub struct TimingGuard<'a> {
    registry: &'a MetricsRegistry,
    start: Instant,
}

impl<'a> TimingGuard<'a> {
    pub fn new(registry: &'a MetricsRegistry) -> Self {
        TimingGuard {
            registry,
            start: Instant::now(),
        }
    }
}

impl<'a> Drop for TimingGuard<'a> {
    fn drop(&mut self) {
        self.registry.record_latency(self.start);
    }
}
