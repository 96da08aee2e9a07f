//! Served-job counters.

/// Count of completed services and their accumulated service time.
///
/// Single-discipline centers keep one; multi-server centers keep one per
/// server for the current batch window plus a running total for warm-up and
/// replication accounting.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceSum {
    pub served:  u64,
    pub service: f64,
}

impl ServiceSum {
    /// Account one completed service.
    #[inline]
    pub fn record(&mut self, service_time: f64) {
        debug_assert!(service_time >= 0.0);
        self.served += 1;
        self.service += service_time;
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = ServiceSum::default();
    }

    /// Fold another sum into this one (aggregating per-server sums).
    #[inline]
    pub fn merge(&mut self, other: &ServiceSum) {
        self.served += other.served;
        self.service += other.service;
    }
}
