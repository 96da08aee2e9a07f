//! Single-server FCFS center.

use std::collections::VecDeque;

use qn_core::{CenterId, Event, EventQueue, RngStreams};
use qn_stats::{ServiceSum, StatisticsLog};

use crate::center::{Center, CenterState};
use crate::routing::Routing;
use crate::service::ServiceTime;

/// One server, first-come-first-served.
///
/// Payloads of waiting jobs live in an explicit FIFO deque owned by the
/// center, so a job's data goes in on arrival and comes back out — intact —
/// when its service completes and it is routed onward.
pub struct SingleServer<J> {
    state:   CenterState,
    service: Box<dyn ServiceTime>,
    routing: Box<dyn Routing<J>>,
    waiting: VecDeque<J>,
    /// Current batch window's completions.
    sum: ServiceSum,
    /// All completions since the last reset (warm-up and replication rows).
    total: ServiceSum,
}

impl<J> SingleServer<J> {
    pub fn new(
        id:               CenterId,
        name:             impl Into<String>,
        service:          Box<dyn ServiceTime>,
        routing:          Box<dyn Routing<J>>,
        batch_size:       u64,
        num_batches:      usize,
        num_replications: usize,
    ) -> Self {
        SingleServer {
            state: CenterState::new(id, name, batch_size, num_batches, num_replications),
            service,
            routing,
            waiting: VecDeque::new(),
            sum: ServiceSum::default(),
            total: ServiceSum::default(),
        }
    }

    /// Sample a demand and schedule `job`'s completion.
    fn start_service(&mut self, job: J, now: f64, queue: &mut EventQueue<J>, streams: &mut RngStreams) {
        let s = self.service.sample(streams);
        queue.push(Event::completion(self.state.id, now + s, s, None, job));
    }
}

impl<J> Center<J> for SingleServer<J> {
    fn id(&self) -> CenterId {
        self.state.id
    }

    fn name(&self) -> &str {
        &self.state.name
    }

    fn process_arrival(&mut self, event: Event<J>, queue: &mut EventQueue<J>, streams: &mut RngStreams) {
        let job = event.job.expect("arrival event without job payload");
        self.state.record_arrival(event.time);
        if self.state.jobs_in_node == 1 {
            self.start_service(job, event.time, queue, streams);
        } else {
            self.waiting.push_back(job);
        }
    }

    fn process_completion(&mut self, event: Event<J>, queue: &mut EventQueue<J>, streams: &mut RngStreams) {
        let job = event.job.expect("completion event without job payload");
        self.state.record_completion(event.time);
        if !self.state.batch_log.is_done() {
            self.sum.record(event.service);
        }
        self.total.record(event.service);

        if self.state.batch_due() {
            self.state.close_batch(event.time, self.sum.served, self.sum.service);
            self.sum.reset();
        }

        self.routing.route(job, event.time, queue, streams);

        if let Some(next) = self.waiting.pop_front() {
            self.start_service(next, event.time, queue, streams);
        }
    }

    fn integrate_area(&mut self, width: f64) {
        let jobs = self.state.jobs_in_node;
        self.state.area.integrate(width, jobs, jobs.min(1));
    }

    fn reset(&mut self, start: f64) {
        self.state.reset(start);
        self.waiting.clear();
        self.sum.reset();
        self.total.reset();
    }

    fn stop_warmup(&mut self, now: f64) {
        self.state.stop_warmup(now);
        self.sum.reset();
    }

    fn is_done(&self) -> bool {
        self.state.batch_log.is_done()
    }

    fn jobs_in_node(&self) -> u64 {
        self.state.jobs_in_node
    }

    fn total_served(&self) -> u64 {
        self.total.served
    }

    fn batch_log(&self) -> &StatisticsLog {
        &self.state.batch_log
    }

    fn replication_log(&self) -> &StatisticsLog {
        &self.state.replication_log
    }

    fn save_replication_row(&mut self) {
        self.state.save_replication_row(self.total.served, self.total.service);
    }

    fn response_time_estimate(&self) -> Option<f64> {
        if self.total.served == 0 {
            return None;
        }
        Some(self.state.area.node / self.total.served as f64)
    }
}
