//! Fixture rows through the whole pipeline: decode, aggregate, map to chart
//! coordinates, render SVG. No network.

use xpboard::aggregate;
use xpboard::chart::{self, Frame, LineChart};
use xpboard::model::{ProgressEnvelope, TransactionEnvelope};
use xpboard::profile::{self, ProfileData};
use xpboard::svg;

const XP_FIXTURE: &str = r#"{
  "transaction": [
    {"id": 1, "amount": 100, "createdAt": "2024-01-10T09:00:00+00:00",
     "path": "/bh/module/go-reloaded", "type": "xp"},
    {"id": 2, "amount": 250, "createdAt": "2024-02-02T14:30:00+00:00",
     "path": "/bh/module/ascii-art", "type": "xp"}
  ]
}"#;

const PROGRESS_FIXTURE: &str = r#"{
  "progress": [
    {"id": 1, "grade": 1, "createdAt": "2024-01-12T00:00:00+00:00", "path": "/bh/module/go-reloaded"},
    {"id": 2, "grade": 1, "createdAt": "2024-02-05T00:00:00+00:00", "path": "/bh/module/ascii-art"},
    {"id": 3, "grade": 0, "createdAt": "2024-02-20T00:00:00+00:00", "path": "/bh/module/tetris"}
  ]
}"#;

fn frame() -> Frame {
    Frame::new(400.0, 200.0, 20.0)
}

#[test]
fn xp_rows_flow_into_the_line_chart() {
    let env: TransactionEnvelope = serde_json::from_str(XP_FIXTURE).unwrap();
    assert_eq!(aggregate::total_xp(&env.transaction), 350);

    let cumulative: Vec<f64> = aggregate::cumulative_xp(&env.transaction)
        .into_iter()
        .map(|v| v as f64)
        .collect();
    assert_eq!(cumulative, vec![100.0, 350.0]);

    let LineChart::Plot { points, max } = chart::line_series(&cumulative, &frame()) else {
        panic!("expected a plot");
    };
    // The final point carries the full cumulative total, mapped to the top
    // padding of the frame.
    assert_eq!(max, 350.0);
    assert_eq!(points.last().unwrap().y, 20.0);

    let rendered = svg::xp_line_svg(&cumulative, &frame());
    assert!(rendered.contains("<polyline"));
    assert!(rendered.contains("350"));
}

#[test]
fn progress_rows_flow_into_the_pass_fail_donut() {
    let env: ProgressEnvelope = serde_json::from_str(PROGRESS_FIXTURE).unwrap();
    let counts = aggregate::pass_fail(&env.progress);
    assert_eq!(counts.pass, 2);
    assert_eq!(counts.fail, 1);
    assert!((counts.rate_pct() - 66.666).abs() < 0.01);

    let slices = [("Pass", counts.pass as f64), ("Fail", counts.fail as f64)];
    let chart::DonutChart::Wedges(wedges) = chart::donut_wedges(&slices) else {
        panic!("expected wedges");
    };
    assert!((wedges[0].sweep_deg - 240.0).abs() < 1e-9);
    assert!((wedges[1].sweep_deg - 120.0).abs() < 1e-9);

    let rendered = svg::donut_svg(&slices, &frame(), "Pass rate");
    assert!(rendered.contains("66.7%"));
}

#[test]
fn empty_dashboard_degrades_to_no_data_everywhere() {
    let data = ProfileData::default();
    let stats = profile::build_stats(&data, 3, 5);

    assert_eq!(stats.total_xp, 0);
    assert_eq!(stats.pass_fail.rate_pct(), 0.0);
    assert_eq!(stats.audits.ratio_pct(), 0.0);

    let cumulative: Vec<f64> = stats.cumulative.iter().map(|v| *v as f64).collect();
    assert_eq!(chart::line_series(&cumulative, &frame()), LineChart::NoData);
    assert!(svg::xp_line_svg(&cumulative, &frame()).contains("Not enough XP data"));
    assert!(svg::donut_svg(&[("Pass", 0.0), ("Fail", 0.0)], &frame(), "Pass rate")
        .contains("No data"));
    assert!(svg::bars_svg(&[], &frame(), "Amount").contains("No data"));
}

#[test]
fn report_reflects_fixture_numbers() {
    let xp: TransactionEnvelope = serde_json::from_str(XP_FIXTURE).unwrap();
    let progress: ProgressEnvelope = serde_json::from_str(PROGRESS_FIXTURE).unwrap();
    let data = ProfileData {
        xp: xp.transaction,
        progress: progress.progress,
        ..ProfileData::default()
    };
    let stats = profile::build_stats(&data, 3, 5);
    let report = profile::render_report(&stats);

    assert!(report.contains("Total XP: 350"));
    assert!(report.contains("- top project #1: ascii-art (250)"));
    assert!(report.contains("2 passed, 1 failed (66.7% pass rate)"));
    assert!(report.contains("- Jan: 100"));
    assert!(report.contains("- Feb: 250"));
}
