//! The job payload: a loan applicant's file.

use qn_core::{RngStreams, dists};

/// Lane on which applicant profiles are sampled.
pub const PROFILE_STREAM: usize = 10;

// Population profile probabilities.
pub const P_WORK_SENIORITY: f64 = 0.889;
pub const P_INCOME_OK: f64 = 0.75;
pub const P_RECENT_REJECTIONS: f64 = 0.1;
pub const P_PERMANENT_CONTRACT: f64 = 0.84989;
pub const P_BUREAU_MATCH: f64 = 0.82;

/// One applicant flowing through the pipeline.
///
/// The profile flags are fixed at arrival; the centers read them for routing
/// but never mutate them.  `resubmission` marks files sent back by the
/// committee for another intake pass, which distinguishes feedback arrivals
/// from external ones.
#[derive(Clone, Debug)]
pub struct Applicant {
    pub entrance_time: f64,
    pub work_seniority_ok: bool,
    pub income_ok: bool,
    pub recent_rejections: bool,
    pub permanent_contract: bool,
    pub bureau_match: bool,
    pub resubmission: bool,
}

impl Applicant {
    /// Sample a fresh applicant arriving at `t` on the profile lane.
    pub fn sample(t: f64, streams: &mut RngStreams) -> Applicant {
        streams.select_stream(PROFILE_STREAM);
        Applicant {
            entrance_time:      t,
            work_seniority_ok:  dists::bernoulli(P_WORK_SENIORITY, streams),
            income_ok:          dists::bernoulli(P_INCOME_OK, streams),
            recent_rejections:  dists::bernoulli(P_RECENT_REJECTIONS, streams),
            permanent_contract: dists::bernoulli(P_PERMANENT_CONTRACT, streams),
            bureau_match:       dists::bernoulli(P_BUREAU_MATCH, streams),
            resubmission:       false,
        }
    }

    /// Whether the file is complete enough to score.
    pub fn has_valid_data(&self) -> bool {
        self.work_seniority_ok
            && self.income_ok
            && self.permanent_contract
            && !self.recent_rejections
    }
}
