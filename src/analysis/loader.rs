use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use crate::error::{Result, SalesError};
use crate::types::{AggregatedSales, LoadStats, SalesBucket, Transaction};
use crate::utils::week_ending;

const DATE_COLUMN: &str = "date";
const STATUS_COLUMN: &str = "status";
const GROUP_COLUMN: &str = "cust_parent_name";
const AMOUNT_COLUMN: &str = "amount";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// Column positions of the required fields in the header row.
struct ColumnIndex {
    date: usize,
    status: usize,
    group: usize,
    amount: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{FEFF}').trim() == name)
                .ok_or(SalesError::MissingColumn(name))
        };

        Ok(Self {
            date: find(DATE_COLUMN)?,
            status: find(STATUS_COLUMN)?,
            group: find(GROUP_COLUMN)?,
            amount: find(AMOUNT_COLUMN)?,
        })
    }
}

/// Load a transaction file and aggregate it into weekly sales per parent customer.
pub fn load_sales(path: &Path) -> Result<AggregatedSales> {
    let file = File::open(path).map_err(|source| SalesError::DataLoad {
        path: path.to_path_buf(),
        source,
    })?;

    let sales = aggregate_sales(BufReader::new(file))?;
    info!(
        path = %path.display(),
        rows = sales.stats.rows_read,
        closed = sales.stats.closed_rows,
        buckets = sales.stats.bucket_count,
        elapsed = sales.stats.elapsed_time,
        "Loaded sales data"
    );
    Ok(sales)
}

/// Read CSV transactions from `reader` and aggregate them.
pub fn aggregate_sales<R: Read>(reader: R) -> Result<AggregatedSales> {
    let start_time = Instant::now();
    let transactions = read_transactions(reader)?;
    let mut sales = aggregate_transactions(&transactions)?;
    sales.stats.elapsed_time = start_time.elapsed().as_secs_f64();
    Ok(sales)
}

/// Parse every row of a transaction CSV.
///
/// Dates are validated on every row. Amounts are only parsed for closed
/// transactions and are `None` for all others. Status and customer fields
/// are kept verbatim, so ` closed` is not a closed transaction.
pub fn read_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let columns = ColumnIndex::from_headers(reader.headers()?)?;
    let mut transactions = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let row = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 2);
        let field = |i: usize| record.get(i).unwrap_or("");

        let raw_date = field(columns.date);
        let date = parse_date(raw_date).ok_or_else(|| SalesError::InvalidDate {
            row,
            value: raw_date.to_string(),
        })?;

        let mut transaction = Transaction {
            date,
            status: field(columns.status).to_string(),
            cust_parent_name: field(columns.group).to_string(),
            amount: None,
        };
        if transaction.is_closed() {
            transaction.amount = parse_amount(field(columns.amount), row)?;
        }
        transactions.push(transaction);
    }

    Ok(transactions)
}

/// Sum closed transactions per (week, parent customer).
pub fn aggregate_transactions(transactions: &[Transaction]) -> Result<AggregatedSales> {
    let mut stats = LoadStats {
        rows_read: transactions.len(),
        ..Default::default()
    };
    let mut totals: BTreeMap<(NaiveDate, &str), i64> = BTreeMap::new();

    for transaction in transactions.iter().filter(|t| t.is_closed()) {
        if transaction.cust_parent_name.is_empty() {
            debug!(date = %transaction.date, "Skipping closed transaction without parent customer");
            stats.skipped_rows += 1;
            continue;
        }
        stats.closed_rows += 1;

        let week = week_ending(transaction.date);
        let total = totals
            .entry((week, transaction.cust_parent_name.as_str()))
            .or_insert(0);
        *total = total
            .checked_add(transaction.amount.unwrap_or(0))
            .ok_or_else(|| SalesError::AmountOverflow {
                group: transaction.cust_parent_name.clone(),
                week,
            })?;
    }

    let buckets: Vec<SalesBucket> = totals
        .into_iter()
        .map(|((week, group), amount)| SalesBucket::new(week, group, amount))
        .collect();
    stats.bucket_count = buckets.len();

    Ok(AggregatedSales { buckets, stats })
}

/// Parse a calendar date, ignoring any time of day.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

fn parse_amount(value: &str, row: usize) -> Result<Option<i64>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if let Ok(amount) = value.parse::<i64>() {
        return Ok(Some(amount));
    }

    // Integer-valued decimals such as `1200.0`
    match value.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount.fract() == 0.0 && amount.abs() < i64::MAX as f64 => {
            Ok(Some(amount as i64))
        }
        _ => Err(SalesError::InvalidAmount {
            row,
            value: value.to_string(),
        }),
    }
}
