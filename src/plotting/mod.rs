mod chart;
pub mod styles;

#[cfg(test)]
mod tests;

pub use chart::{build_series, format_axis_value, render_chart, value_range, GroupSeries, PlotError};
pub use styles::{series_color, ChartStyle, ChartTheme};
