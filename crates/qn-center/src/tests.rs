//! Unit tests for the center disciplines.

use std::cell::RefCell;
use std::rc::Rc;

use qn_core::{EventKind, EventQueue, RngStreams, SimClock};

use crate::center::Center;
use crate::routing::Routing;
use crate::service::ServiceTime;

/// Deterministic service demands for scenario tests.
struct Fixed(f64);

impl ServiceTime for Fixed {
    fn sample(&self, _streams: &mut RngStreams) -> f64 {
        self.0
    }
}

/// Routing that records departing jobs instead of forwarding them.
fn capture<J: 'static>() -> (Rc<RefCell<Vec<J>>>, Box<dyn Routing<J>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let routing = Box::new(
        move |job: J, _now: f64, _queue: &mut EventQueue<J>, _streams: &mut RngStreams| {
            sink.borrow_mut().push(job);
        },
    );
    (seen, routing)
}

/// Minimal single-center event loop: integrate, advance, dispatch; record
/// every completion's `(time, server)` as it is popped.
fn drive<J>(
    center:  &mut dyn Center<J>,
    queue:   &mut EventQueue<J>,
    streams: &mut RngStreams,
) -> Vec<(f64, Option<usize>)> {
    let mut clock = SimClock::new(0.0);
    let mut completions = Vec::new();
    while let Some(event) = queue.pop() {
        clock.set_next(event.time);
        center.integrate_area(clock.width());
        clock.advance();
        match event.kind {
            EventKind::Arrival => center.process_arrival(event, queue, streams),
            EventKind::Completion => {
                completions.push((event.time, event.server));
                center.process_completion(event, queue, streams);
            }
            EventKind::Snapshot => {}
        }
    }
    completions
}

mod single {
    use qn_core::{CenterId, Event, EventKind, EventQueue, RngStreams};
    use qn_stats::MetricKind;

    use super::{Fixed, capture, drive};
    use crate::center::Center;
    use crate::routing::Sink;
    use crate::single::SingleServer;

    fn server(batch_size: u64, num_batches: usize) -> SingleServer<u32> {
        SingleServer::new(
            CenterId(0),
            "single",
            Box::new(Fixed(1.0)),
            Box::new(Sink),
            batch_size,
            num_batches,
            8,
        )
    }

    #[test]
    fn population_tracks_arrivals_minus_completions() {
        let mut center = server(100, 2);
        let mut queue = EventQueue::new();
        let mut streams = RngStreams::default();

        for t in 0..3 {
            queue.push(Event::arrival(CenterId(0), t as f64 * 0.25, t));
        }
        // Three arrivals land before the first service (length 1.0) ends.
        let mut max_seen = 0;
        let mut clock = qn_core::SimClock::new(0.0);
        while let Some(event) = queue.pop() {
            clock.set_next(event.time);
            center.integrate_area(clock.width());
            clock.advance();
            match event.kind {
                qn_core::EventKind::Arrival => center.process_arrival(event, &mut queue, &mut streams),
                _ => center.process_completion(event, &mut queue, &mut streams),
            }
            max_seen = max_seen.max(center.jobs_in_node());
        }
        assert_eq!(max_seen, 3);
        assert_eq!(center.jobs_in_node(), 0);
        assert_eq!(center.total_served(), 3);
    }

    #[test]
    fn payloads_route_in_fifo_order() {
        let (seen, routing) = capture::<u32>();
        let mut center = SingleServer::new(
            CenterId(0), "single", Box::new(Fixed(1.0)), routing, 100, 2, 8,
        );
        let mut queue = EventQueue::new();
        let mut streams = RngStreams::default();

        for t in 0..5u32 {
            queue.push(Event::arrival(CenterId(0), t as f64 * 0.1, t));
        }
        drive(&mut center, &mut queue, &mut streams);
        assert_eq!(*seen.borrow(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn batch_rows_close_on_schedule() {
        let mut center = server(2, 2);
        center.stop_warmup(0.0);
        let mut queue = EventQueue::new();
        let mut streams = RngStreams::default();

        // Arrivals spaced out so each job is served alone.
        for (i, t) in [0.0, 10.0, 20.0, 30.0].into_iter().enumerate() {
            queue.push(Event::arrival(CenterId(0), t, i as u32));
        }
        drive(&mut center, &mut queue, &mut streams);

        let log = center.batch_log();
        assert_eq!(log.rows(), 2);
        assert!(center.is_done());

        // First batch window [0, 11]: two unit services, node area 2.
        assert_eq!(log.series(MetricKind::ResponseTime), &[1.0, 1.0]);
        assert_eq!(log.series(MetricKind::ServiceTime), &[1.0, 1.0]);
        assert!((log.series(MetricKind::Utilization)[0] - 2.0 / 11.0).abs() < 1e-12);
        assert!((log.series(MetricKind::Throughput)[1] - 2.0 / 20.0).abs() < 1e-12);
    }

    #[test]
    fn warming_center_closes_no_batches() {
        let mut center = server(1, 4);
        let mut queue = EventQueue::new();
        let mut streams = RngStreams::default();
        for t in 0..4 {
            queue.push(Event::arrival(CenterId(0), t as f64 * 5.0, t));
        }
        drive(&mut center, &mut queue, &mut streams);
        assert_eq!(center.batch_log().rows(), 0);
        assert_eq!(center.total_served(), 4);
    }

    #[test]
    fn idle_center_skips_replication_row() {
        let mut center = server(100, 2);
        center.save_replication_row();
        assert_eq!(center.replication_log().rows(), 0);
    }

    #[test]
    #[should_panic(expected = "completion event without job payload")]
    fn completion_without_payload_panics() {
        let mut center = server(100, 2);
        let mut queue = EventQueue::new();
        let mut streams = RngStreams::default();
        let event = Event {
            kind:    EventKind::Completion,
            center:  CenterId(0),
            time:    1.0,
            service: 1.0,
            server:  None,
            job:     None,
        };
        center.process_completion(event, &mut queue, &mut streams);
    }

    #[test]
    fn reset_clears_state_but_not_rows() {
        let mut center = server(1, 8);
        center.stop_warmup(0.0);
        let mut queue = EventQueue::new();
        let mut streams = RngStreams::default();
        queue.push(Event::arrival(CenterId(0), 1.0, 0u32));
        drive(&mut center, &mut queue, &mut streams);
        assert_eq!(center.batch_log().rows(), 1);

        center.reset(0.0);
        assert_eq!(center.jobs_in_node(), 0);
        assert_eq!(center.total_served(), 0);
        assert_eq!(center.batch_log().rows(), 1);
    }
}

mod multi {
    use qn_core::{CenterId, Event, EventKind, EventQueue, RngStreams};

    use super::{Fixed, drive};
    use crate::center::Center;
    use crate::multi::MultiServer;
    use crate::routing::Sink;

    fn server(capacity: usize) -> MultiServer<u32> {
        MultiServer::new(
            CenterId(0),
            "multi",
            capacity,
            Box::new(Fixed(5.0)),
            Box::new(Sink),
            100,
            2,
            8,
        )
    }

    #[test]
    fn excess_arrivals_wait_and_restart_on_same_server() {
        let mut center = server(2);
        let mut queue = EventQueue::new();
        let mut streams = RngStreams::default();

        for (i, t) in [0.0, 1.0, 2.0, 12.0].into_iter().enumerate() {
            queue.push(Event::arrival(CenterId(0), t, i as u32));
        }
        let completions = drive(&mut center, &mut queue, &mut streams);

        // Job 0 → server 0, job 1 → server 1, job 2 waits and restarts on
        // server 0 when it frees at t=5.  Job 3 arrives at t=12 and picks
        // server 1, idle since t=6, over server 0, idle since t=10.
        assert_eq!(
            completions,
            vec![
                (5.0, Some(0)),
                (6.0, Some(1)),
                (10.0, Some(0)),
                (17.0, Some(1)),
            ]
        );
        assert_eq!(center.jobs_in_node(), 0);
        assert_eq!(center.total_served(), 4);
    }

    #[test]
    fn longest_idle_server_wins() {
        let mut center = server(3);
        center.servers[0].running = true;
        center.servers[1].last_completion = 4.0;
        center.servers[2].last_completion = 2.0;
        assert_eq!(center.find_idle(), 2);
    }

    #[test]
    fn idle_ties_go_to_lowest_index() {
        let mut center = server(3);
        center.servers[0].running = true;
        center.servers[1].last_completion = 2.0;
        center.servers[2].last_completion = 2.0;
        assert_eq!(center.find_idle(), 1);
    }

    #[test]
    fn all_idle_fresh_center_picks_first() {
        let center = server(4);
        assert_eq!(center.find_idle(), 0);
    }

    #[test]
    #[should_panic(expected = "completion event without server index")]
    fn completion_without_server_index_panics() {
        let mut center = server(2);
        let mut queue = EventQueue::new();
        let mut streams = RngStreams::default();
        let event = Event {
            kind:    EventKind::Completion,
            center:  CenterId(0),
            time:    5.0,
            service: 5.0,
            server:  None,
            job:     Some(0u32),
        };
        center.process_completion(event, &mut queue, &mut streams);
    }
}

mod infinite {
    use qn_core::{CenterId, Event, EventQueue, RngStreams};
    use qn_stats::MetricKind;

    use super::{Fixed, drive};
    use crate::center::Center;
    use crate::infinite::InfiniteServer;
    use crate::routing::Sink;

    #[test]
    fn overlapping_jobs_never_queue() {
        let mut center: InfiniteServer<u32> = InfiniteServer::new(
            CenterId(0),
            "delay",
            Box::new(Fixed(10.0)),
            Box::new(Sink),
            100,
            0,
            8,
        );
        center.stop_warmup(0.0);
        let mut queue = EventQueue::new();
        let mut streams = RngStreams::default();
        queue.push(Event::arrival(CenterId(0), 0.0, 0u32));
        queue.push(Event::arrival(CenterId(0), 1.0, 1u32));
        let completions = drive(&mut center, &mut queue, &mut streams);

        // Both services run concurrently; nothing waits for anything.
        assert_eq!(completions.len(), 2);
        assert_eq!(completions[0].0, 10.0);
        assert_eq!(completions[1].0, 11.0);

        center.save_replication_row();
        let log = center.replication_log();
        assert_eq!(log.series(MetricKind::QueueTime), &[0.0]);
        assert_eq!(log.series(MetricKind::QueuePopulation), &[0.0]);
        assert_eq!(log.series(MetricKind::ResponseTime), &[10.0]);
    }
}

mod arrivals {
    use qn_core::{CenterId, EventQueue, RngStreams};

    use crate::arrivals::ArrivalProcess;

    fn process(stop_time: f64) -> ArrivalProcess<u64> {
        let mut counter = 0u64;
        ArrivalProcess::new(
            CenterId(0),
            2.0,
            0,
            stop_time,
            Box::new(move |_t, _streams| {
                counter += 1;
                counter
            }),
        )
    }

    #[test]
    fn arrival_times_are_reproducible() {
        let mut times_a = Vec::new();
        let mut times_b = Vec::new();
        for times in [&mut times_a, &mut times_b] {
            let mut arrivals = process(f64::INFINITY);
            let mut queue = EventQueue::new();
            let mut streams = RngStreams::new(777);
            arrivals.start(0.0, &mut queue, &mut streams);
            for _ in 0..20 {
                let event = queue.pop().unwrap();
                times.push(event.time);
                arrivals.schedule_next(event.time, &mut queue, &mut streams);
            }
        }
        assert_eq!(times_a, times_b);
        assert!(times_a.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn cutoff_exhausts_the_process() {
        let mut arrivals = process(50.0);
        let mut queue = EventQueue::new();
        let mut streams = RngStreams::new(1);
        arrivals.start(0.0, &mut queue, &mut streams);
        let mut last = 0.0;
        while let Some(event) = queue.pop() {
            last = event.time;
            arrivals.schedule_next(event.time, &mut queue, &mut streams);
        }
        assert!(arrivals.exhausted());
        assert!(last <= 50.0);
        // Once exhausted, further calls schedule nothing.
        arrivals.schedule_next(last, &mut queue, &mut streams);
        assert!(queue.is_empty());
    }
}
