//! Loan-approval pipeline demo.
//!
//! Usage:
//!
//!   loan-pipeline [batch|finite] [output-dir]
//!
//! `batch` (default) runs one long batch-means simulation and prints point
//! estimates, confidence intervals, and batch-independence verdicts for each
//! center.  `finite` runs replicated bounded days and additionally emits
//! Welch observation data for warm-up analysis.  All results also land as
//! CSV files under the output directory (default `out/`).

mod applicant;
mod network;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use qn_core::SimConfig;
use qn_out::{CsvWriter, OutputWriter, StatsRow};
use qn_sim::{BatchRunner, FiniteRunner, NoopObserver, verify_center};
use qn_stats::{MetricKind, StatisticsLog, validity::DEFAULT_ACF_THRESHOLD};

use crate::network::{LoanPipeline, RunMode};

// ── Run parameters ────────────────────────────────────────────────────────────

const WELCH_MAX_WINDOW: usize = 20;

fn config() -> SimConfig {
    SimConfig {
        batch_size:           512,
        num_batches:          64,
        num_replications:     32,
        warmup_fraction:      0.15,
        stop_time:            14_400.0, // arrival cutoff per replication
        observation_interval: 120.0,
        ..SimConfig::default()
    }
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let mode = match args.next().as_deref() {
        None | Some("batch") => RunMode::Batch,
        Some("finite") => RunMode::Finite,
        Some(other) => bail!("unknown mode {other:?} (expected \"batch\" or \"finite\")"),
    };
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "out".into()));
    fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let cfg = config();
    match mode {
        RunMode::Batch => run_batch(&cfg, &out_dir),
        RunMode::Finite => run_finite(&cfg, &out_dir),
    }
}

fn run_batch(cfg: &SimConfig, out_dir: &std::path::Path) -> Result<()> {
    println!(
        "batch-means run: {} batches x {} jobs, seed {}",
        cfg.num_batches, cfg.batch_size, cfg.seed
    );

    let mut net = LoanPipeline::new(cfg, RunMode::Batch);
    let runner = BatchRunner::new(cfg)?;
    let outcome = runner.run(&mut net, &mut NoopObserver)?;

    for report in outcome.mean_reports() {
        println!("\n{report}");
    }

    println!("confidence intervals ({:.0}%):", cfg.confidence_level * 100.0);
    for cis in outcome.confidence_reports() {
        println!("  {}", cis.name);
        for (metric, ci) in &cis.intervals {
            println!(
                "    {:<7} {:>10.4} ± {:.4}",
                metric.label(),
                ci.mean,
                ci.half_width
            );
        }
    }

    println!("\nbatch independence (|lag-1 ACF| < {DEFAULT_ACF_THRESHOLD}):");
    for (center, verdicts) in outcome.acf_verdicts(DEFAULT_ACF_THRESHOLD) {
        let failing: Vec<_> = verdicts
            .iter()
            .filter(|v| !v.passes)
            .map(|v| v.metric.label())
            .collect();
        if failing.is_empty() {
            println!("  {center}: ok");
        } else {
            println!("  {center}: correlated [{}]", failing.join(", "));
        }
    }

    verify_intake_throughput(&outcome)?;

    let mut writer = CsvWriter::new(out_dir)?;
    for log in outcome.logs() {
        writer.write_stats_rows(&StatsRow::from_log(log))?;
    }
    writer.finish()?;
    println!("\nresults written to {}", out_dir.display());
    Ok(())
}

fn run_finite(cfg: &SimConfig, out_dir: &std::path::Path) -> Result<()> {
    println!(
        "finite-horizon run: {} replications, arrivals until t={}, seed {}",
        cfg.num_replications, cfg.stop_time, cfg.seed
    );

    let mut net = LoanPipeline::new(cfg, RunMode::Finite);
    let runner = FiniteRunner::new(cfg)?;
    let outcome = runner.run(&mut net, &mut NoopObserver)?;

    for report in outcome.mean_reports() {
        println!("\n{report}");
    }

    println!("confidence intervals ({:.0}%):", cfg.confidence_level * 100.0);
    for cis in outcome.confidence_reports() {
        println!("  {}", cis.name);
        for (metric, ci) in &cis.intervals {
            println!(
                "    {:<7} {:>10.4} ± {:.4}",
                metric.label(),
                ci.mean,
                ci.half_width
            );
        }
    }

    let mut writer = CsvWriter::new(out_dir)?;
    for log in outcome.logs() {
        writer.write_stats_rows(&StatsRow::from_log(log))?;
    }
    for set in outcome.observations() {
        writer.write_observations(set)?;
    }
    for (center, curve) in outcome.welch_curves(WELCH_MAX_WINDOW) {
        writer.write_welch_curve(&center, &curve)?;
    }
    writer.finish()?;
    println!("\nresults written to {}", out_dir.display());
    Ok(())
}

/// Expected intake throughput from flow balance.
///
/// A fresh external file reaches the committee with probability `p_scored`;
/// a resubmitted file keeps its profile flags, so it re-passes the scoring
/// filter deterministically and every committee visit loops back to intake
/// with probability `q = (1 − accept) · resubmit`.  Each scored file thus
/// makes `q/(1 − q)` extra intake passes on average.
fn expected_intake_throughput() -> f64 {
    let p_valid = applicant::P_WORK_SENIORITY
        * applicant::P_INCOME_OK
        * (1.0 - applicant::P_RECENT_REJECTIONS)
        * applicant::P_PERMANENT_CONTRACT;
    let p_scored = p_valid * applicant::P_BUREAU_MATCH;
    let q = (1.0 - network::P_COMMITTEE_ACCEPT) * network::P_RESUBMIT;
    (1.0 / network::MEAN_INTERARRIVAL) * (1.0 + p_scored * q / (1.0 - q))
}

/// Flow-balance check: intake throughput must match the external rate plus
/// the resubmission feedback, which is known in closed form.
fn verify_intake_throughput(outcome: &qn_sim::BatchOutcome) -> Result<()> {
    let expected = expected_intake_throughput();

    let intake = outcome
        .logs()
        .iter()
        .find(|log| log.name() == "intake")
        .map(StatisticsLog::mean_report)
        .context("intake log missing")?;
    let cis = &outcome.confidence_reports()[0];
    let results = verify_center(&intake, cis, &[(MetricKind::Throughput, expected)]);

    println!("\nflow-balance verification (intake):");
    for r in &results {
        println!(
            "  {:<7} simulated {:.5}  analytical {:.5}  |diff| {:.5} {} half-width {:.5}",
            r.metric.label(),
            r.simulated,
            r.analytical,
            r.diff,
            if r.within { "<=" } else { ">" },
            r.half_width
        );
    }
    Ok(())
}
