mod aggregation;
pub mod format;

pub use aggregation::{sum_by_group, sum_matching, week_ending};
pub use format::{format_signed, format_thousands_k};
