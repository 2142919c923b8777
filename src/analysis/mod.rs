mod cache;
pub mod loader;
pub mod metrics;


pub use cache::{fingerprint, CacheManager, LoadResult};
pub use loader::{aggregate_sales, aggregate_transactions, load_sales, read_transactions};
pub use metrics::{
    date_bounds, filter_for_chart, group_names, growth_metric, growth_metrics,
    top_groups_by_recent_volume,
};
