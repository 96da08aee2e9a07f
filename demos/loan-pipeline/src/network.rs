//! The four-center loan-approval pipeline.
//!
//! Topology:
//!
//!   external ──► intake (M/M/3) ──► scoring (M/M/1) ──► committee (M/M/1) ──► payout (M/G/∞)
//!                   ▲                    │ reject            │ reject
//!                   └────────────────────┼────── resubmit ◄──┤
//!                                        ▼                   ▼
//!                                       out                 out
//!
//! Scoring forwards only complete files whose credit-bureau record matches;
//! the committee accepts most of those, sends a share of its rejections back
//! to intake for resubmission, and the rest leave.  Payout is a pure delay
//! for disbursement processing.

use qn_center::{
    ArrivalProcess, Center, Exponential, InfiniteServer, MultiServer, SingleServer, Sink,
};
use qn_core::{CenterId, Event, EventKind, EventQueue, RngStreams, SimConfig, dists};

use qn_sim::NetworkModel;

use crate::applicant::Applicant;

// ── Center IDs ────────────────────────────────────────────────────────────────

pub const INTAKE: CenterId = CenterId(0);
pub const SCORING: CenterId = CenterId(1);
pub const COMMITTEE: CenterId = CenterId(2);
pub const PAYOUT: CenterId = CenterId(3);

// ── RNG lanes ─────────────────────────────────────────────────────────────────

const ARRIVAL_STREAM: usize = 0;
const INTAKE_STREAM: usize = 1;
const SCORING_STREAM: usize = 2;
const COMMITTEE_STREAM: usize = 3;
const PAYOUT_STREAM: usize = 4;
const DECISION_STREAM: usize = 5;

// ── Model parameters ──────────────────────────────────────────────────────────

pub const MEAN_INTERARRIVAL: f64 = 5.0;
pub const INTAKE_SERVERS: usize = 3;
const INTAKE_SERVICE_MEAN: f64 = 4.0;
const SCORING_SERVICE_MEAN: f64 = 3.0;
const COMMITTEE_SERVICE_MEAN: f64 = 8.0;
const PAYOUT_SERVICE_MEAN: f64 = 30.0;

/// Committee acceptance probability for a scored file.
pub const P_COMMITTEE_ACCEPT: f64 = 0.78;
/// Share of committee rejections sent back for resubmission.
pub const P_RESUBMIT: f64 = 0.35;

/// Which driver the network is being built for.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RunMode {
    /// One long run, unlimited arrivals, batch-means output.
    Batch,
    /// Replicated runs with the configured arrival cutoff.
    Finite,
}

// ── LoanPipeline ──────────────────────────────────────────────────────────────

pub struct LoanPipeline {
    intake:    MultiServer<Applicant>,
    scoring:   SingleServer<Applicant>,
    committee: SingleServer<Applicant>,
    payout:    InfiniteServer<Applicant>,
    arrivals:  ArrivalProcess<Applicant>,
}

impl LoanPipeline {
    pub fn new(cfg: &SimConfig, mode: RunMode) -> Self {
        let (num_batches, stop_time) = match mode {
            RunMode::Batch => (cfg.num_batches, f64::INFINITY),
            RunMode::Finite => (0, cfg.stop_time),
        };
        let reps = cfg.num_replications;

        // Every processed file moves on to scoring.
        let intake_routing = |job: Applicant, now: f64, queue: &mut EventQueue<Applicant>, _streams: &mut RngStreams| {
            queue.push(Event::arrival(SCORING, now, job));
        };

        // Incomplete or mismatched files are rejected on the spot.
        let scoring_routing = |job: Applicant, now: f64, queue: &mut EventQueue<Applicant>, _streams: &mut RngStreams| {
            if job.has_valid_data() && job.bureau_match {
                queue.push(Event::arrival(COMMITTEE, now, job));
            }
        };

        // Accept to payout; send a share of rejections back to intake.
        let committee_routing = |mut job: Applicant, now: f64, queue: &mut EventQueue<Applicant>, streams: &mut RngStreams| {
            streams.select_stream(DECISION_STREAM);
            if dists::bernoulli(P_COMMITTEE_ACCEPT, streams) {
                queue.push(Event::arrival(PAYOUT, now, job));
            } else if dists::bernoulli(P_RESUBMIT, streams) {
                job.resubmission = true;
                queue.push(Event::arrival(INTAKE, now, job));
            }
        };

        LoanPipeline {
            intake: MultiServer::new(
                INTAKE,
                "intake",
                INTAKE_SERVERS,
                Box::new(Exponential::new(INTAKE_SERVICE_MEAN, INTAKE_STREAM)),
                Box::new(intake_routing),
                cfg.batch_size,
                num_batches,
                reps,
            ),
            scoring: SingleServer::new(
                SCORING,
                "scoring",
                Box::new(Exponential::new(SCORING_SERVICE_MEAN, SCORING_STREAM)),
                Box::new(scoring_routing),
                cfg.batch_size,
                num_batches,
                reps,
            ),
            committee: SingleServer::new(
                COMMITTEE,
                "committee",
                Box::new(Exponential::new(COMMITTEE_SERVICE_MEAN, COMMITTEE_STREAM)),
                Box::new(committee_routing),
                cfg.batch_size,
                num_batches,
                reps,
            ),
            payout: InfiniteServer::new(
                PAYOUT,
                "payout",
                Box::new(Exponential::new(PAYOUT_SERVICE_MEAN, PAYOUT_STREAM)),
                Box::new(Sink),
                cfg.batch_size,
                num_batches,
                reps,
            ),
            arrivals: ArrivalProcess::new(
                INTAKE,
                MEAN_INTERARRIVAL,
                ARRIVAL_STREAM,
                stop_time,
                Box::new(Applicant::sample),
            ),
        }
    }

    fn center_mut(&mut self, id: CenterId) -> &mut dyn Center<Applicant> {
        match id {
            INTAKE    => &mut self.intake,
            SCORING   => &mut self.scoring,
            COMMITTEE => &mut self.committee,
            PAYOUT    => &mut self.payout,
            other     => panic!("event for unknown center {other}"),
        }
    }
}

impl NetworkModel for LoanPipeline {
    type Job = Applicant;

    fn reset(&mut self, start: f64) {
        for center in self.centers_mut() {
            center.reset(start);
        }
    }

    fn start(&mut self, now: f64, queue: &mut EventQueue<Applicant>, streams: &mut RngStreams) {
        self.arrivals.start(now, queue, streams);
    }

    fn dispatch(&mut self, event: Event<Applicant>, queue: &mut EventQueue<Applicant>, streams: &mut RngStreams) {
        if event.kind == EventKind::Arrival && event.center == INTAKE {
            // Only external arrivals re-arm the source; resubmissions don't.
            let external = event.job.as_ref().is_some_and(|a| !a.resubmission);
            if external {
                self.arrivals.schedule_next(event.time, queue, streams);
            }
        }
        let center = self.center_mut(event.center);
        match event.kind {
            EventKind::Arrival => center.process_arrival(event, queue, streams),
            EventKind::Completion => center.process_completion(event, queue, streams),
            EventKind::Snapshot => {}
        }
    }

    fn centers(&self) -> Vec<&dyn Center<Applicant>> {
        vec![&self.intake, &self.scoring, &self.committee, &self.payout]
    }

    fn centers_mut(&mut self) -> Vec<&mut dyn Center<Applicant>> {
        vec![
            &mut self.intake,
            &mut self.scoring,
            &mut self.committee,
            &mut self.payout,
        ]
    }

    fn arrivals_exhausted(&self) -> bool {
        self.arrivals.exhausted()
    }
}
