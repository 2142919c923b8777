use chrono::{Datelike, Days, NaiveDate};
use std::collections::BTreeMap;

use crate::types::SalesBucket;

/// Sunday that closes the calendar week containing `date`.
///
/// A Sunday maps to itself, every other day to the following Sunday.
pub fn week_ending(date: NaiveDate) -> NaiveDate {
    let offset = 6 - date.weekday().num_days_from_monday();
    date.checked_add_days(Days::new(u64::from(offset)))
        .unwrap_or(date)
}

/// Total amount per group, for the buckets accepted by `keep`.
pub fn sum_by_group<F>(buckets: &[SalesBucket], keep: F) -> BTreeMap<&str, i64>
where
    F: Fn(&SalesBucket) -> bool,
{
    let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
    for bucket in buckets.iter().filter(|b| keep(b)) {
        let total = totals.entry(bucket.group.as_str()).or_insert(0);
        *total = total.saturating_add(bucket.amount);
    }
    totals
}

/// Sum of the amounts matching `keep`, or `None` if nothing matches.
pub fn sum_matching<F>(buckets: &[SalesBucket], keep: F) -> Option<i64>
where
    F: Fn(&SalesBucket) -> bool,
{
    buckets
        .iter()
        .filter(|b| keep(b))
        .fold(None, |acc, b| Some(acc.unwrap_or(0i64).saturating_add(b.amount)))
}
