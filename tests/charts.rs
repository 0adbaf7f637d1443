mod common;

use axum_ecommerce_dashboard::{
    dto::dashboard::{DensityPoint, HistogramBin},
    routes::params::DashboardQuery,
    services::{dashboard_service::render, filter_service::resolve_selection},
    ui::chart::{ChartKind, EMPTY_MESSAGE, bar_chart, charts_for, histogram_chart, line_chart},
};
use plotters::style::RGBColor;

const COLOR: RGBColor = RGBColor(135, 206, 235);

#[test]
fn charts_follow_dashboard_order() {
    let context = common::toys_context();
    let (selection, _) = resolve_selection(&context, &DashboardQuery::default()).unwrap();
    let view = render(&context, &selection).unwrap();

    let charts = charts_for(&view).unwrap();

    let kinds: Vec<ChartKind> = charts.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        [
            ChartKind::Line,
            ChartKind::Bar,
            ChartKind::Histogram,
            ChartKind::Histogram,
            ChartKind::Bar
        ]
    );
    assert_eq!(charts[0].title, "Total Orders by Month (Category: toys)");
    for chart in &charts {
        assert!(chart.svg.starts_with("<svg"), "{} is not an svg document", chart.title);
        assert!(chart.svg.contains(&chart.title));
    }
}

#[test]
fn empty_series_render_a_placeholder() {
    let charts = [
        line_chart("Orders", "x", "y", COLOR, &[]).unwrap(),
        bar_chart("Payments", "x", "y", COLOR, &[]).unwrap(),
        histogram_chart("Days", "x", "y", COLOR, &[], &[]).unwrap(),
    ];

    for chart in charts {
        assert!(chart.svg.contains(EMPTY_MESSAGE));
        assert!(chart.svg.contains(&chart.title));
        assert!(!chart.svg.contains("<circle"));
    }
}

#[test]
fn bar_chart_labels_each_bar() {
    let chart = bar_chart(
        "Payments",
        "Payment Type",
        "Count",
        COLOR,
        &[("credit_card".into(), 4.0), ("boleto".into(), 2.0)],
    )
    .unwrap();

    assert_eq!(chart.kind, ChartKind::Bar);
    assert!(chart.svg.contains("credit_card"));
    assert!(chart.svg.contains("boleto"));
    assert!(chart.svg.contains("Payment Type"));
    assert!(!chart.svg.contains(EMPTY_MESSAGE));
    // background plus one rect per bar
    assert!(chart.svg.matches("<rect").count() >= 3);
}

#[test]
fn line_chart_marks_every_point() {
    let points = [(1, 1.0), (2, 3.0), (3, 2.0)];

    let chart = line_chart("Orders", "Month", "Number of Orders", COLOR, &points).unwrap();

    assert_eq!(chart.kind, ChartKind::Line);
    assert_eq!(chart.svg.matches("<circle").count(), 3);
    assert!(chart.svg.contains("Number of Orders"));
}

#[test]
fn density_line_is_drawn_over_the_bins() {
    let bins = [
        HistogramBin { start: 0.0, end: 1.0, count: 2 },
        HistogramBin { start: 1.0, end: 2.0, count: 1 },
    ];
    let density: Vec<DensityPoint> = (0..=10)
        .map(|i| DensityPoint {
            x: i as f64 / 5.0,
            y: 2.0 - i as f64 / 10.0,
        })
        .collect();

    let plain = histogram_chart("Days", "Days", "Frequency", COLOR, &bins, &[]).unwrap();
    let smoothed = histogram_chart("Days", "Days", "Frequency", COLOR, &bins, &density).unwrap();

    assert_eq!(plain.kind, ChartKind::Histogram);
    assert!(plain.svg.matches("<rect").count() > bins.len());
    assert_eq!(
        smoothed.svg.matches("<polyline").count(),
        plain.svg.matches("<polyline").count() + 1
    );
}
