mod state;
mod ui;

pub use state::{App, MetricCard};
