//! # Sales Dashboard Library
//!
//! `salesdash` loads a CSV file of sales transactions, aggregates closed
//! transactions into weekly totals per parent customer and shows them in an
//! interactive dashboard: a sales-over-time line chart and a grid of
//! growth cards comparing the first and last week of the selected range.
//!
//! ## Features
//!
//! - Weekly (Sunday-ending) aggregation of closed transactions
//! - Single-entry cache invalidated when the data file changes
//! - Default selection of the top customers by recent volume
//! - Date range and customer filtering
//! - Growth metrics with explicit handling of missing weeks
//!
//! ## Example
//!
//! ```no_run
//! use salesdash::analysis::{filter_for_chart, load_sales, top_groups_by_recent_volume};
//! use salesdash::analysis::date_bounds;
//! use std::path::Path;
//!
//! let sales = load_sales(Path::new("true_sales_cust.csv")).unwrap();
//! let selected = top_groups_by_recent_volume(&sales.buckets, 2024, 10)
//!     .into_iter()
//!     .collect();
//! if let Some(interval) = date_bounds(&sales.buckets) {
//!     let filtered = filter_for_chart(&sales.buckets, &selected, interval);
//!     println!("{} chart rows", filtered.rows.len());
//! }
//! ```

pub mod analysis;
pub mod app;
pub mod config;
pub mod error;
pub mod plotting;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use app::App as SalesDashApp;
pub use config::DashboardConfig;
pub use error::{Result, SalesError};
pub use types::{AggregatedSales, DateInterval, GrowthMetric, SalesBucket};
