//! Welch's graphical warm-up detection.
//!
//! # Design
//!
//! Finite-horizon runs record one observation row per replication (the
//! center's running response-time estimate at each snapshot).  Welch's
//! procedure averages the rows column-wise into an ensemble curve, then
//! smooths it with a centered moving average; the point where the smoothed
//! curve levels off is the warm-up truncation point.  The smoothing window
//! shrinks symmetrically at both ends so the curve is defined over the whole
//! horizon.

/// Replication-by-snapshot observation matrix for one center.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservationSet {
    name: String,
    rows: Vec<Vec<f64>>,
}

impl ObservationSet {
    pub fn new(name: impl Into<String>) -> Self {
        ObservationSet {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append one replication's observation row.  Empty rows (a center that
    /// never produced an estimate) are dropped.
    pub fn push_row(&mut self, row: Vec<f64>) {
        if !row.is_empty() {
            self.rows.push(row);
        }
    }

    #[inline]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Length of the shortest row — the ensemble is defined over this prefix.
    pub fn common_len(&self) -> usize {
        self.rows.iter().map(Vec::len).min().unwrap_or(0)
    }

    /// Column-wise mean over the common prefix of all rows.
    pub fn ensemble_average(&self) -> Vec<f64> {
        let len = self.common_len();
        if len == 0 {
            return Vec::new();
        }
        let n = self.rows.len() as f64;
        (0..len)
            .map(|col| self.rows.iter().map(|row| row[col]).sum::<f64>() / n)
            .collect()
    }

    /// The smoothed ensemble curve (see [`moving_average`]).
    pub fn welch_curve(&self, max_window: usize) -> Vec<f64> {
        moving_average(&self.ensemble_average(), max_window)
    }
}

/// Centered moving average with half-window `w = min(len/4, max_window)`,
/// shrinking at the boundaries: point `i` averages over
/// `min(w, i, len−1−i)` neighbors on each side.
pub fn moving_average(xs: &[f64], max_window: usize) -> Vec<f64> {
    let len = xs.len();
    if len == 0 {
        return Vec::new();
    }
    let w = (len / 4).min(max_window);
    (0..len)
        .map(|i| {
            let half = w.min(i).min(len - 1 - i);
            let window = &xs[i - half..=i + half];
            window.iter().sum::<f64>() / window.len() as f64
        })
        .collect()
}
