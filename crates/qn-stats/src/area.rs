//! Time-weighted population integrals.
//!
//! # Design
//!
//! The rectangle rule over event gaps is exact here: population counts are
//! piecewise constant between events, so integrating `count · width` at every
//! event reproduces the integral with no discretization error.  The one rule
//! callers must respect is ordering — integrate over the staged clock width
//! *before* applying the event's state transition.

/// Accumulated `∫ population dt` for one measurement window.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Area {
    /// `∫ jobs-in-node dt` (waiting + in service).
    pub node: f64,
    /// `∫ jobs-waiting dt`.
    pub queue: f64,
    /// `∫ 1{node non-empty} dt` — time the center was serving anyone at all.
    pub service: f64,
}

impl Area {
    /// Add one rectangle of the given width.
    ///
    /// An empty node contributes nothing — not even to the service integral —
    /// so idle stretches can never pollute the window.
    #[inline]
    pub fn integrate(&mut self, width: f64, jobs_in_node: u64, in_service: u64) {
        debug_assert!(width >= 0.0, "negative width {width}");
        debug_assert!(in_service <= jobs_in_node);
        if jobs_in_node == 0 {
            return;
        }
        self.node += width * jobs_in_node as f64;
        self.queue += width * (jobs_in_node - in_service) as f64;
        self.service += width;
    }

    /// Zero all three integrals (batch close, warm-up end, replication reset).
    #[inline]
    pub fn reset(&mut self) {
        *self = Area::default();
    }
}
