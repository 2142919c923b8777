use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;
use tracing::warn;

use crate::types::{
    DateInterval, DeltaEmphasis, FilteredSales, GrowthMetric, SalesBucket, SelectionWarning,
};
use crate::utils::{format_signed, sum_by_group, sum_matching};

/// Placeholder for a value that cannot be computed: the growth when either
/// end of the interval has no data, and a card value when the last week has none.
pub const UNDEFINED: &str = "n/a";

/// Parent customers with the highest sales in weeks after `year_threshold`.
///
/// Sorted by total descending; equal totals are ordered by name.
pub fn top_groups_by_recent_volume(
    buckets: &[SalesBucket],
    year_threshold: i32,
    limit: usize,
) -> Vec<String> {
    let totals = sum_by_group(buckets, |b| b.week.year() > year_threshold);

    let mut ranked: Vec<(&str, i64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(group, _)| group.to_string())
        .collect()
}

/// Buckets of the selected parent customers inside `interval`.
pub fn filter_for_chart(
    buckets: &[SalesBucket],
    selected: &BTreeSet<String>,
    interval: DateInterval,
) -> FilteredSales {
    if selected.is_empty() {
        warn!("No parent customer selected");
        return FilteredSales {
            rows: Vec::new(),
            warning: Some(SelectionWarning::EmptySelection),
        };
    }

    let rows = buckets
        .iter()
        .filter(|b| selected.contains(&b.group) && interval.contains(b.week))
        .cloned()
        .collect();

    FilteredSales { rows, warning: None }
}

/// Compare a parent customer's sales in the first and last week of `interval`.
///
/// Sales are divided by `divisor` before comparison. The metric is undefined
/// when either week has no bucket for the group.
pub fn growth_metric(
    buckets: &[SalesBucket],
    group: &str,
    interval: DateInterval,
    divisor: f64,
) -> GrowthMetric {
    let week_total = |week: NaiveDate| {
        sum_matching(buckets, |b| b.week == week && b.group == group)
            .map(|amount| amount as f64 / divisor)
    };
    let start = week_total(interval.from);
    let end = week_total(interval.to);

    let (growth, emphasis) = match (start, end) {
        (Some(start), Some(end)) => (format!("{}x", format_signed(end - start)), DeltaEmphasis::Normal),
        _ => (UNDEFINED.to_string(), DeltaEmphasis::Off),
    };

    GrowthMetric {
        group: group.to_string(),
        start,
        end,
        growth,
        emphasis,
    }
}

/// One growth metric per selected parent customer.
pub fn growth_metrics(
    buckets: &[SalesBucket],
    selected: &BTreeSet<String>,
    interval: DateInterval,
    divisor: f64,
) -> Vec<GrowthMetric> {
    selected
        .iter()
        .map(|group| growth_metric(buckets, group, interval, divisor))
        .collect()
}

/// Sorted, de-duplicated parent customer names.
pub fn group_names(buckets: &[SalesBucket]) -> Vec<String> {
    buckets
        .iter()
        .map(|b| b.group.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// The first and last week present in the data.
pub fn date_bounds(buckets: &[SalesBucket]) -> Option<DateInterval> {
    let from = buckets.iter().map(|b| b.week).min()?;
    let to = buckets.iter().map(|b| b.week).max()?;
    Some(DateInterval::new(from, to))
}
