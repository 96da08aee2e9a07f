//! Multi-server FCFS center with longest-idle server selection.

use std::collections::VecDeque;

use qn_core::{CenterId, Event, EventQueue, RngStreams};
use qn_stats::{ServiceSum, StatisticsLog};

use crate::center::{Center, CenterState};
use crate::routing::Routing;
use crate::service::ServiceTime;

/// One server slot.
///
/// `last_completion` is updated only when the server transitions to idle, so
/// comparing it across idle servers ranks them by how long they have been
/// idle.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct ServerSlot {
    pub(crate) running:         bool,
    pub(crate) last_completion: f64,
}

/// `c` identical servers, one FIFO waiting line.
///
/// Arrivals beyond capacity wait; an arriving job that finds a free server is
/// placed on the idle server with the smallest `last_completion` (the one
/// idle longest), ties going to the lowest index.  When a service completes
/// and the line is non-empty, the next job starts on the *same* server.
pub struct MultiServer<J> {
    state:   CenterState,
    service: Box<dyn ServiceTime>,
    routing: Box<dyn Routing<J>>,
    waiting: VecDeque<J>,
    pub(crate) servers: Vec<ServerSlot>,
    /// Per-server batch-window completions, aggregated at batch close.
    sums: Vec<ServiceSum>,
    /// All completions since the last reset.
    total: ServiceSum,
}

impl<J> MultiServer<J> {
    pub fn new(
        id:               CenterId,
        name:             impl Into<String>,
        servers:          usize,
        service:          Box<dyn ServiceTime>,
        routing:          Box<dyn Routing<J>>,
        batch_size:       u64,
        num_batches:      usize,
        num_replications: usize,
    ) -> Self {
        assert!(servers > 0, "a multi-server center needs at least one server");
        MultiServer {
            state: CenterState::new(id, name, batch_size, num_batches, num_replications),
            service,
            routing,
            waiting: VecDeque::new(),
            servers: vec![ServerSlot::default(); servers],
            sums: vec![ServiceSum::default(); servers],
            total: ServiceSum::default(),
        }
    }

    /// Number of server slots.
    pub fn capacity(&self) -> usize {
        self.servers.len()
    }

    /// Pick the idle server that has been idle longest.
    ///
    /// Scan order: the first idle server is the candidate; each later idle
    /// server with a strictly smaller `last_completion` replaces it.  The
    /// scan is total-order deterministic, which keeps runs reproducible.
    pub(crate) fn find_idle(&self) -> usize {
        let mut candidate = None;
        for (i, slot) in self.servers.iter().enumerate() {
            if slot.running {
                continue;
            }
            match candidate {
                None => candidate = Some(i),
                Some(c) => {
                    if slot.last_completion < self.servers[c].last_completion {
                        candidate = Some(i);
                    }
                }
            }
        }
        let Some(c) = candidate else {
            unreachable!("{}: job dispatched with all servers busy", self.state.name)
        };
        c
    }

    fn start_service(
        &mut self,
        server:  usize,
        job:     J,
        now:     f64,
        queue:   &mut EventQueue<J>,
        streams: &mut RngStreams,
    ) {
        self.servers[server].running = true;
        let s = self.service.sample(streams);
        queue.push(Event::completion(self.state.id, now + s, s, Some(server), job));
    }
}

impl<J> Center<J> for MultiServer<J> {
    fn id(&self) -> CenterId {
        self.state.id
    }

    fn name(&self) -> &str {
        &self.state.name
    }

    fn process_arrival(&mut self, event: Event<J>, queue: &mut EventQueue<J>, streams: &mut RngStreams) {
        let job = event.job.expect("arrival event without job payload");
        self.state.record_arrival(event.time);
        if self.state.jobs_in_node <= self.servers.len() as u64 {
            let server = self.find_idle();
            self.start_service(server, job, event.time, queue, streams);
        } else {
            self.waiting.push_back(job);
        }
    }

    fn process_completion(&mut self, event: Event<J>, queue: &mut EventQueue<J>, streams: &mut RngStreams) {
        let job = event.job.expect("completion event without job payload");
        let server = event.server.expect("completion event without server index");
        self.state.record_completion(event.time);
        if !self.state.batch_log.is_done() {
            self.sums[server].record(event.service);
        }
        self.total.record(event.service);

        if self.state.batch_due() {
            let mut window = ServiceSum::default();
            for sum in &self.sums {
                window.merge(sum);
            }
            self.state.close_batch(event.time, window.served, window.service);
            for sum in &mut self.sums {
                sum.reset();
            }
        }

        self.routing.route(job, event.time, queue, streams);

        if let Some(next) = self.waiting.pop_front() {
            // Keep the line moving on the server that just freed up.
            self.start_service(server, next, event.time, queue, streams);
        } else {
            self.servers[server].running = false;
            self.servers[server].last_completion = event.time;
        }
    }

    fn integrate_area(&mut self, width: f64) {
        let jobs = self.state.jobs_in_node;
        self.state.area.integrate(width, jobs, jobs.min(self.servers.len() as u64));
    }

    fn reset(&mut self, start: f64) {
        self.state.reset(start);
        self.waiting.clear();
        for slot in &mut self.servers {
            *slot = ServerSlot::default();
        }
        for sum in &mut self.sums {
            sum.reset();
        }
        self.total.reset();
    }

    fn stop_warmup(&mut self, now: f64) {
        self.state.stop_warmup(now);
        for sum in &mut self.sums {
            sum.reset();
        }
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
