//! Unit tests for the CSV backend.

use std::fs;

use qn_stats::{Area, ObservationSet, RowSample, StatisticsLog};

use crate::row::StatsRow;
use crate::writer::OutputWriter;
use crate::CsvWriter;

fn sample_log() -> StatisticsLog {
    let mut log = StatisticsLog::new("intake", 2);
    for i in 0..2 {
        log.save_row(RowSample {
            area: Area {
                node:    10.0 + i as f64,
                queue:   2.0,
                service: 5.0,
            },
            served:          4,
            total_service:   5.0,
            last_completion: 10.0,
            window_start:    0.0,
        });
    }
    log
}

#[test]
fn stats_rows_round_trip_through_csv() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = CsvWriter::new(dir.path()).unwrap();
    let rows = StatsRow::from_log(&sample_log());
    assert_eq!(rows.len(), 2);
    writer.write_stats_rows(&rows).unwrap();
    writer.finish().unwrap();

    let contents = fs::read_to_string(dir.path().join("stats.csv")).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "center,row,E[Ts],E[Tq],E[s],E[Ns],E[Nq],rho,lambda"
    );
    let first = lines.next().unwrap();
    assert!(first.starts_with("intake,0,2.5,0.5,1.25,1,0.2,0.5,0.4"));
    assert_eq!(lines.count(), 1);
}

#[test]
fn finish_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = CsvWriter::new(dir.path()).unwrap();
    writer.finish().unwrap();
    writer.finish().unwrap();
}

#[test]
fn observations_and_welch_files_per_center() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = CsvWriter::new(dir.path()).unwrap();

    let mut set = ObservationSet::new("Payout Desk");
    set.push_row(vec![1.0, 2.0]);
    set.push_row(vec![3.0, 4.0]);
    writer.write_observations(&set).unwrap();
    writer.write_welch_curve(set.name(), &[2.0, 3.0]).unwrap();
    writer.finish().unwrap();

    let obs = fs::read_to_string(dir.path().join("payout_desk_observations.csv")).unwrap();
    assert_eq!(obs.lines().count(), 5);
    assert!(obs.contains("1,1,4"));

    let welch = fs::read_to_string(dir.path().join("payout_desk_welch.csv")).unwrap();
    assert_eq!(welch.lines().count(), 3);
    assert!(welch.lines().nth(1).unwrap().starts_with("0,2"));
}
