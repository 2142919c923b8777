use chrono::{Duration, NaiveDate};
use image::{DynamicImage, RgbImage, RgbaImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::error::Error;

use super::styles::{series_color, ChartStyle, ChartTheme};
use crate::types::{DateInterval, SalesBucket};

pub type PlotError = Box<dyn Error + Send + Sync>;

/// Points of one parent customer's line, x in days since the interval start.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSeries {
    pub group: String,
    pub points: Vec<(f64, f64)>,
}

/// Split chart rows into one date-ordered series per parent customer.
pub fn build_series(rows: &[SalesBucket], origin: NaiveDate) -> Vec<GroupSeries> {
    let mut by_group: BTreeMap<&str, Vec<(f64, f64)>> = BTreeMap::new();
    for row in rows {
        let x = (row.week - origin).num_days() as f64;
        by_group
            .entry(row.group.as_str())
            .or_default()
            .push((x, row.amount as f64));
    }

    by_group
        .into_iter()
        .map(|(group, mut points)| {
            points.sort_by(|a, b| a.0.total_cmp(&b.0));
            GroupSeries {
                group: group.to_string(),
                points,
            }
        })
        .collect()
}

/// Y axis range covering every point, with headroom above the peak.
pub fn value_range(series: &[GroupSeries]) -> (f64, f64) {
    let values = series.iter().flat_map(|s| s.points.iter().map(|(_, y)| *y));
    let (min, max) = values.fold((0.0f64, 0.0f64), |(lo, hi), y| (lo.min(y), hi.max(y)));

    let min = if min < 0.0 { min * 1.1 } else { 0.0 };
    let max = if max > 0.0 { max * 1.1 } else { 1.0 };
    (min, max)
}

/// Axis label with K/M suffixes for large numbers
pub fn format_axis_value(y: &f64) -> String {
    if y.abs() >= 1_000_000.0 {
        format!("{:.1}M", y / 1_000_000.0)
    } else if y.abs() >= 1_000.0 {
        format!("{:.1}K", y / 1_000.0)
    } else {
        format!("{:.0}", y)
    }
}

/// Render the sales-over-time line chart to an RGBA image.
pub fn render_chart(
    rows: &[SalesBucket],
    interval: DateInterval,
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<RgbaImage, PlotError> {
    let (width, height) = (style.width, style.height);
    let mut buffer = vec![0u8; (width as usize) * (height as usize) * 3];
    let series = build_series(rows, interval.from);

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_chart(&root, &series, interval, theme, style)?;
        root.present()?;
    }

    let bitmap = RgbImage::from_raw(width, height, buffer).ok_or("chart buffer has the wrong size")?;
    Ok(DynamicImage::ImageRgb8(bitmap).to_rgba8())
}

fn draw_chart(
    root: &DrawingArea<BitMapBackend, Shift>,
    series: &[GroupSeries],
    interval: DateInterval,
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    root.fill(&theme.background_color)?;

    let x_max = (interval.span_days() as f64).max(1.0);
    let (y_min, y_max) = value_range(series);

    let mut chart = ChartBuilder::on(root)
        .margin(style.margin)
        .set_all_label_area_size(style.label_area_size)
        .build_cartesian_2d(0f64..x_max, y_min..y_max)?;

    let origin = interval.from;
    let x_label_formatter = move |x: &f64| {
        (origin + Duration::days(x.round() as i64))
            .format("%Y-%m-%d")
            .to_string()
    };

    chart
        .configure_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(theme.grid_color)
        .axis_style(theme.axis_color)
        .x_labels(6)
        .x_desc("date")
        .y_desc("amount")
        .label_style(
            (style.font_family, style.font_size)
                .into_font()
                .color(&theme.text_color),
        )
        .x_label_formatter(&x_label_formatter)
        .y_label_formatter(&format_axis_value)
        .draw()?;

    for group_series in series {
        let color = series_color(&group_series.group);
        chart.draw_series(LineSeries::new(
            group_series.points.iter().copied(),
            color.stroke_width(style.line_width),
        ))?;
        chart.draw_series(
            group_series
                .points
                .iter()
                .map(|&point| Circle::new(point, style.point_radius, color.filled())),
        )?;
    }

    Ok(())
}
