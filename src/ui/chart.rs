use plotters::{coord::Shift, prelude::*};
use serde::Serialize;

use crate::dto::dashboard::{CategoryCount, DensityPoint, HistogramBin, RenderedView};

pub const WIDTH: u32 = 640;
pub const HEIGHT: u32 = 360;
pub const EMPTY_MESSAGE: &str = "No data for this selection";

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const LIGHT_GREEN: RGBColor = RGBColor(144, 238, 144);
const CORAL: RGBColor = RGBColor(255, 127, 80);
const PURPLE: RGBColor = RGBColor(128, 0, 128);
const GOLD: RGBColor = RGBColor(255, 215, 0);
const MUTED: RGBColor = RGBColor(136, 136, 136);

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    Histogram,
}

/// One rendered chart; `svg` is a complete `<svg>` document.
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub title: String,
    pub kind: ChartKind,
    pub svg: String,
}

/// Line chart over integer x positions, one marker per point.
pub fn line_chart(
    title: &str,
    x_desc: &str,
    y_desc: &str,
    color: RGBColor,
    points: &[(i32, f64)],
) -> anyhow::Result<Chart> {
    let svg = draw_svg(|root| {
        let (Some(x_min), Some(x_max)) = (
            points.iter().map(|(x, _)| *x).min(),
            points.iter().map(|(x, _)| *x).max(),
        ) else {
            return draw_empty(root, title);
        };
        let y_max = y_ceiling(points.iter().map(|(_, y)| *y));

        let mut chart = ChartBuilder::on(root)
            .caption(title, ("sans-serif", 18))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(56)
            .build_cartesian_2d((x_min - 1)..(x_max + 1), 0f64..y_max)?;
        chart
            .configure_mesh()
            .x_desc(x_desc)
            .y_desc(y_desc)
            .y_label_formatter(&|y| format_value(*y))
            .draw()?;
        chart.draw_series(
            LineSeries::new(points.iter().copied(), color.stroke_width(2)).point_size(4),
        )?;
        Ok(())
    })?;
    Ok(Chart {
        title: title.to_string(),
        kind: ChartKind::Line,
        svg,
    })
}

/// One bar per labelled value, in the given order.
pub fn bar_chart(
    title: &str,
    x_desc: &str,
    y_desc: &str,
    color: RGBColor,
    series: &[(String, f64)],
) -> anyhow::Result<Chart> {
    let svg = draw_svg(|root| {
        if series.is_empty() {
            return draw_empty(root, title);
        }
        let y_max = y_ceiling(series.iter().map(|(_, v)| *v));

        let mut chart = ChartBuilder::on(root)
            .caption(title, ("sans-serif", 18))
            .margin(12)
            .x_label_area_size(48)
            .y_label_area_size(56)
            .build_cartesian_2d((0u32..series.len() as u32).into_segmented(), 0f64..y_max)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(x_desc)
            .y_desc(y_desc)
            .x_labels(series.len() + 1)
            .x_label_style(("sans-serif", 11))
            .x_label_formatter(&|segment: &SegmentValue<u32>| match segment {
                SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => series
                    .get(*i as usize)
                    .map(|(label, _)| label.clone())
                    .unwrap_or_default(),
                SegmentValue::Last => String::new(),
            })
            .y_label_formatter(&|y| format_value(*y))
            .draw()?;
        chart.draw_series(
            Histogram::vertical(&chart)
                .style(color.filled())
                .margin(8)
                .data(series.iter().enumerate().map(|(i, (_, v))| (i as u32, *v))),
        )?;
        Ok(())
    })?;
    Ok(Chart {
        title: title.to_string(),
        kind: ChartKind::Bar,
        svg,
    })
}

/// Contiguous outlined bars over the bin edges, with an optional density line on top.
pub fn histogram_chart(
    title: &str,
    x_desc: &str,
    y_desc: &str,
    color: RGBColor,
    bins: &[HistogramBin],
    density: &[DensityPoint],
) -> anyhow::Result<Chart> {
    let svg = draw_svg(|root| {
        let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
            return draw_empty(root, title);
        };
        let y_max = y_ceiling(
            bins.iter()
                .map(|bin| bin.count as f64)
                .chain(density.iter().map(|p| p.y)),
        );

        let mut chart = ChartBuilder::on(root)
            .caption(title, ("sans-serif", 18))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(56)
            .build_cartesian_2d(first.start..last.end, 0f64..y_max)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(x_desc)
            .y_desc(y_desc)
            .x_label_formatter(&|x| format_value(*x))
            .y_label_formatter(&|y| format_value(*y))
            .draw()?;

        let corners = |bin: &HistogramBin| [(bin.start, 0.0), (bin.end, bin.count as f64)];
        chart.draw_series(
            bins.iter()
                .map(|bin| Rectangle::new(corners(bin), color.filled())),
        )?;
        chart.draw_series(
            bins.iter()
                .map(|bin| Rectangle::new(corners(bin), BLACK.stroke_width(1))),
        )?;
        if !density.is_empty() {
            chart.draw_series(LineSeries::new(
                density.iter().map(|p| (p.x, p.y)),
                BLACK.stroke_width(2),
            ))?;
        }
        Ok(())
    })?;
    Ok(Chart {
        title: title.to_string(),
        kind: ChartKind::Histogram,
        svg,
    })
}

/// The dashboard's charts in display order. Conditional charts are left out when their data is.
pub fn charts_for(view: &RenderedView) -> anyhow::Result<Vec<Chart>> {
    let category = view.selection.category.as_deref().unwrap_or("-");
    let monthly: Vec<(i32, f64)> = view
        .monthly_orders
        .iter()
        .map(|p| (p.month as i32, p.orders as f64))
        .collect();

    let mut charts = vec![
        line_chart(
            &format!("Total Orders by Month (Category: {category})"),
            "Month",
            "Number of Orders",
            SKY_BLUE,
            &monthly,
        )?,
        bar_chart(
            "Payment Methods Distribution",
            "Payment Type",
            "Count",
            LIGHT_GREEN,
            &count_series(&view.payment_distribution),
        )?,
    ];
    if let Some(bins) = &view.review_distribution {
        charts.push(histogram_chart(
            "Product Review Distribution",
            "Review Score",
            "Frequency",
            CORAL,
            bins,
            &[],
        )?);
    }
    if let Some(bins) = &view.delivery_time_distribution {
        charts.push(histogram_chart(
            "Delivery Time Distribution",
            "Days",
            "Frequency",
            PURPLE,
            bins,
            view.delivery_time_density.as_deref().unwrap_or_default(),
        )?);
    }
    charts.push(bar_chart(
        "Top 10 Customer Cities",
        "City",
        "Number of Customers",
        GOLD,
        &count_series(&view.city_distribution),
    )?);
    Ok(charts)
}

fn draw_svg(draw: impl FnOnce(&Area<'_>) -> anyhow::Result<()>) -> anyhow::Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;
        draw(&root)?;
        root.present()?;
    }
    Ok(svg)
}

fn draw_empty(root: &Area<'_>, title: &str) -> anyhow::Result<()> {
    root.draw(&Text::new(
        title.to_string(),
        (16, 28),
        ("sans-serif", 18).into_font(),
    ))?;
    root.draw(&Text::new(
        EMPTY_MESSAGE,
        (WIDTH as i32 / 2 - 96, HEIGHT as i32 / 2),
        ("sans-serif", 14).into_font().color(&MUTED),
    ))?;
    Ok(())
}

fn y_ceiling(values: impl Iterator<Item = f64>) -> f64 {
    (values.fold(0.0, f64::max) * 1.1).ceil().max(1.0)
}

fn count_series(points: &[CategoryCount]) -> Vec<(String, f64)> {
    points
        .iter()
        .map(|p| (p.label.clone(), p.count as f64))
        .collect()
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
