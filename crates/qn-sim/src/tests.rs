//! Driver tests over a minimal M/M/1 network.

use qn_center::{ArrivalProcess, Center, Exponential, SingleServer, Sink};
use qn_core::{CenterId, Event, EventKind, EventQueue, RngStreams, SimConfig};

use crate::network::NetworkModel;

const NODE: CenterId = CenterId(0);
const ARRIVAL_STREAM: usize = 0;
const SERVICE_STREAM: usize = 1;

/// Single exponential server fed by a Poisson source; jobs carry their
/// arrival time.
struct Mm1 {
    server:   SingleServer<f64>,
    arrivals: ArrivalProcess<f64>,
}

impl Mm1 {
    /// `rho = service_mean / interarrival_mean`.
    fn new(interarrival_mean: f64, service_mean: f64, cfg: &SimConfig, finite: bool) -> Self {
        let (num_batches, stop_time) = if finite {
            (0, cfg.stop_time)
        } else {
            (cfg.num_batches, f64::INFINITY)
        };
        Mm1 {
            server: SingleServer::new(
                NODE,
                "mm1",
                Box::new(Exponential::new(service_mean, SERVICE_STREAM)),
                Box::new(Sink),
                cfg.batch_size,
                num_batches,
                cfg.num_replications,
            ),
            arrivals: ArrivalProcess::new(
                NODE,
                interarrival_mean,
                ARRIVAL_STREAM,
                stop_time,
                Box::new(|t, _streams| t),
            ),
        }
    }
}

impl NetworkModel for Mm1 {
    type Job = f64;

    fn reset(&mut self, start: f64) {
        self.server.reset(start);
    }

    fn start(&mut self, now: f64, queue: &mut EventQueue<f64>, streams: &mut RngStreams) {
        self.arrivals.start(now, queue, streams);
    }

    fn dispatch(&mut self, event: Event<f64>, queue: &mut EventQueue<f64>, streams: &mut RngStreams) {
        match event.kind {
            EventKind::Arrival => {
                self.arrivals.schedule_next(event.time, queue, streams);
                self.server.process_arrival(event, queue, streams);
            }
            EventKind::Completion => self.server.process_completion(event, queue, streams),
            EventKind::Snapshot => {}
        }
    }

    fn centers(&self) -> Vec<&dyn Center<f64>> {
        vec![&self.server]
    }

    fn centers_mut(&mut self) -> Vec<&mut dyn Center<f64>> {
        vec![&mut self.server]
    }

    fn arrivals_exhausted(&self) -> bool {
        self.arrivals.exhausted()
    }
}

mod batch {
    use qn_core::SimConfig;
    use qn_stats::MetricKind;

    use super::Mm1;
    use crate::batch::BatchRunner;
    use crate::observer::NoopObserver;

    fn config() -> SimConfig {
        SimConfig {
            batch_size: 1024,
            num_batches: 64,
            ..SimConfig::default()
        }
    }

    #[test]
    fn mm1_utilization_converges() {
        let cfg = config();
        let mut net = Mm1::new(10.0, 6.0, &cfg, false);
        let runner = BatchRunner::new(&cfg).unwrap();
        let outcome = runner.run(&mut net, &mut NoopObserver).unwrap();

        let log = &outcome.logs()[0];
        assert_eq!(log.rows(), 64);

        let report = &outcome.mean_reports()[0];
        let rho = report.mean(MetricKind::Utilization);
        assert!((rho - 0.6).abs() < 0.03, "utilization {rho}");
        let lambda = report.mean(MetricKind::Throughput);
        assert!((lambda - 0.1).abs() < 0.005, "throughput {lambda}");
        // Little's law cross-check on the estimates themselves.
        let n = report.mean(MetricKind::SystemPopulation);
        let ts = report.mean(MetricKind::ResponseTime);
        assert!((n - lambda * ts).abs() < 0.05 * n, "E[Ns]={n} λE[Ts]={}", lambda * ts);
    }

    #[test]
    fn identical_seeds_give_identical_rows() {
        let cfg = config();
        let runner = BatchRunner::new(&cfg).unwrap();

        let mut first = Mm1::new(10.0, 6.0, &cfg, false);
        let a = runner.run(&mut first, &mut NoopObserver).unwrap();
        let mut second = Mm1::new(10.0, 6.0, &cfg, false);
        let b = runner.run(&mut second, &mut NoopObserver).unwrap();

        for metric in MetricKind::ALL {
            assert_eq!(a.logs()[0].series(metric), b.logs()[0].series(metric));
        }
    }

    #[test]
    fn confidence_and_acf_cover_all_metrics() {
        let cfg = SimConfig {
            batch_size: 256,
            num_batches: 32,
            ..SimConfig::default()
        };
        let mut net = Mm1::new(10.0, 6.0, &cfg, false);
        let outcome = BatchRunner::new(&cfg)
            .unwrap()
            .run(&mut net, &mut NoopObserver)
            .unwrap();

        let cis = outcome.confidence_reports();
        assert_eq!(cis[0].intervals.len(), 7);
        for (_, ci) in &cis[0].intervals {
            assert!(ci.half_width > 0.0);
        }

        let verdicts = outcome.acf_verdicts(0.2);
        assert_eq!(verdicts[0].1.len(), 7);
        for v in &verdicts[0].1 {
            assert!(v.lag1.is_some(), "{} inconclusive", v.metric);
        }
    }

    #[test]
    fn warmup_observer_fires_once() {
        struct CountWarmups(usize);
        impl crate::observer::RunObserver for CountWarmups {
            fn on_warmup_end(&mut self, _now: f64, _served: u64) {
                self.0 += 1;
            }
        }

        let cfg = SimConfig {
            batch_size: 128,
            num_batches: 8,
            ..SimConfig::default()
        };
        let mut net = Mm1::new(10.0, 6.0, &cfg, false);
        let mut observer = CountWarmups(0);
        BatchRunner::new(&cfg).unwrap().run(&mut net, &mut observer).unwrap();
        assert_eq!(observer.0, 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = SimConfig {
            num_batches: 1,
            ..SimConfig::default()
        };
        assert!(BatchRunner::new(&cfg).is_err());
    }
}

mod finite {
    use qn_core::SimConfig;
    use qn_stats::MetricKind;

    use super::Mm1;
    use crate::finite::FiniteRunner;
    use crate::observer::NoopObserver;

    fn config() -> SimConfig {
        SimConfig {
            num_replications: 4,
            stop_time: 2_000.0,
            observation_interval: 50.0,
            ..SimConfig::default()
        }
    }

    #[test]
    fn replications_drain_and_log_one_row_each() {
        let cfg = config();
        let mut net = Mm1::new(10.0, 6.0, &cfg, true);
        let outcome = FiniteRunner::new(&cfg)
            .unwrap()
            .run(&mut net, &mut NoopObserver)
            .unwrap();

        let log = &outcome.logs()[0];
        assert_eq!(log.rows(), 4);
        for rho in log.series(MetricKind::Utilization) {
            assert!(*rho > 0.0 && *rho < 1.0);
        }
    }

    #[test]
    fn chained_seeds_decorrelate_replications() {
        let cfg = config();
        let mut net = Mm1::new(10.0, 6.0, &cfg, true);
        let outcome = FiniteRunner::new(&cfg)
            .unwrap()
            .run(&mut net, &mut NoopObserver)
            .unwrap();

        let ts = outcome.logs()[0].series(MetricKind::ResponseTime);
        assert_ne!(ts[0], ts[1]);
        assert_ne!(ts[1], ts[2]);
    }

    #[test]
    fn observations_feed_a_welch_curve() {
        let cfg = config();
        let mut net = Mm1::new(10.0, 6.0, &cfg, true);
        let outcome = FiniteRunner::new(&cfg)
            .unwrap()
            .run(&mut net, &mut NoopObserver)
            .unwrap();

        let set = &outcome.observations()[0];
        assert_eq!(set.rows().len(), 4);
        assert!(set.common_len() > 10);

        let curves = outcome.welch_curves(5);
        assert_eq!(curves[0].0, "mm1");
        assert_eq!(curves[0].1.len(), set.common_len());
        for v in &curves[0].1 {
            assert!(v.is_finite() && *v > 0.0);
        }
    }

    #[test]
    fn whole_run_is_reproducible() {
        let cfg = config();
        let runner = FiniteRunner::new(&cfg).unwrap();
        let mut first = Mm1::new(10.0, 6.0, &cfg, true);
        let a = runner.run(&mut first, &mut NoopObserver).unwrap();
        let mut second = Mm1::new(10.0, 6.0, &cfg, true);
        let b = runner.run(&mut second, &mut NoopObserver).unwrap();
        for metric in MetricKind::ALL {
            assert_eq!(a.logs()[0].series(metric), b.logs()[0].series(metric));
        }
    }
}

mod verify {
    use qn_stats::{ConfidenceReport, MetricKind, RowSample, StatisticsLog};

    use crate::verify::verify_center;

    fn log_with_rows(values: &[f64]) -> StatisticsLog {
        let mut log = StatisticsLog::new("v", values.len());
        for &v in values {
            // One job served over a unit window with node area v.
            log.save_row(RowSample {
                area: qn_stats::Area {
                    node:    v,
                    queue:   0.0,
                    service: 0.5,
                },
                served:          1,
                total_service:   0.5,
                last_completion: 1.0,
                window_start:    0.0,
            });
        }
        log
    }

    #[test]
    fn covered_reference_passes() {
        let log = log_with_rows(&[3.9, 4.0, 4.1]);
        let report = log.mean_report();
        let cis = ConfidenceReport::from_log(&log, 0.95);
        let results = verify_center(&report, &cis, &[(MetricKind::ResponseTime, 4.05)]);
        assert_eq!(results.len(), 1);
        assert!(results[0].within);
        assert!((results[0].diff - 0.05).abs() < 1e-12);
    }

    #[test]
    fn distant_reference_fails() {
        let log = log_with_rows(&[3.9, 4.0, 4.1]);
        let report = log.mean_report();
        let cis = ConfidenceReport::from_log(&log, 0.95);
        let results = verify_center(&report, &cis, &[(MetricKind::ResponseTime, 6.0)]);
        assert!(!results[0].within);
        assert_eq!(results[0].analytical, 6.0);
    }
}
