//! # Common Types
//!
//! This module contains the common types used throughout the application for
//! representing raw transactions, aggregated weekly sales, the user's filter
//! state and the metrics derived from it.

use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::time::SystemTime;

/// Status value of a transaction that counts towards sales.
pub const CLOSED_STATUS: &str = "closed";

/// A single row of the source transaction file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Calendar date of the transaction (any time component is dropped)
    pub date: NaiveDate,
    /// Free-form status; only [`CLOSED_STATUS`] is significant
    pub status: String,
    /// Parent customer the amount is attributed to
    pub cust_parent_name: String,
    /// Amount in currency subunits, `None` when the cell was empty
    pub amount: Option<i64>,
}

impl Transaction {
    pub fn is_closed(&self) -> bool {
        self.status == CLOSED_STATUS
    }
}

/// Weekly sales of one parent customer.
///
/// `week` is the Sunday that ends the calendar week the transactions fall in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SalesBucket {
    pub week: NaiveDate,
    pub group: String,
    pub amount: i64,
}

impl SalesBucket {
    pub fn new(week: NaiveDate, group: impl Into<String>, amount: i64) -> Self {
        Self {
            week,
            group: group.into(),
            amount,
        }
    }
}

/// Statistics collected while loading the transaction file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadStats {
    /// Total number of data rows read
    pub rows_read: usize,
    /// Rows with a `closed` status that contributed to a bucket
    pub closed_rows: usize,
    /// Closed rows dropped because the parent customer was empty
    pub skipped_rows: usize,
    /// Number of (week, group) buckets produced
    pub bucket_count: usize,
    /// Wall time spent loading and aggregating, in seconds
    pub elapsed_time: f64,
}

impl fmt::Display for LoadStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed {} rows in {:.2}s\nClosed rows: {}\nSkipped rows: {}\nWeekly buckets: {}",
            self.rows_read, self.elapsed_time, self.closed_rows, self.skipped_rows, self.bucket_count
        )
    }
}

/// The result of aggregating a transaction file.
#[derive(Debug, Clone, Default)]
pub struct AggregatedSales {
    /// Buckets sorted by week, then group
    pub buckets: Vec<SalesBucket>,
    pub stats: LoadStats,
}

/// Identity of a source file, used as the cache key for aggregated sales.
///
/// Two fingerprints compare equal only if the path, size and modification
/// time all match, so any rewrite of the file invalidates the cache.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct FileFingerprint {
    pub path: PathBuf,
    pub len: u64,
    pub modified: Option<SystemTime>,
}

/// An inclusive range of week dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateInterval {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateInterval {
    /// Create an interval; the bounds are swapped if given out of order.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        if from <= to {
            Self { from, to }
        } else {
            Self { from: to, to: from }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Number of days between the two bounds.
    pub fn span_days(&self) -> i64 {
        (self.to - self.from).num_days()
    }
}

/// Per-session state of the dashboard controls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub interval: Option<DateInterval>,
    pub selected_groups: BTreeSet<String>,
}

/// Non-fatal conditions surfaced to the user next to the controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionWarning {
    /// No parent customer is selected; chart and cards are empty.
    EmptySelection,
}

impl fmt::Display for SelectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionWarning::EmptySelection => write!(f, "Select at least one parent customer"),
        }
    }
}

/// Rows that survive the chart filter, plus any warning raised while filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredSales {
    pub rows: Vec<SalesBucket>,
    pub warning: Option<SelectionWarning>,
}

/// Whether a metric card should colour its delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaEmphasis {
    /// Green for growth, red for decline
    Normal,
    /// Greyed out, used when the metric is undefined
    Off,
}

impl DeltaEmphasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeltaEmphasis::Normal => "normal",
            DeltaEmphasis::Off => "off",
        }
    }
}

/// Growth of one parent customer between the two ends of the selected interval.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthMetric {
    pub group: String,
    /// Scaled sales in the first week, `None` when that week has no data
    pub start: Option<f64>,
    /// Scaled sales in the last week, `None` when that week has no data
    pub end: Option<f64>,
    /// Formatted delta, e.g. `+150.00x` or `n/a`
    pub growth: String,
    pub emphasis: DeltaEmphasis,
}

impl GrowthMetric {
    pub fn is_defined(&self) -> bool {
        self.emphasis == DeltaEmphasis::Normal
    }
}
