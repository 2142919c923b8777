use eframe::App as EApp;
use egui::TextureHandle;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{error, info};

use crate::analysis::metrics::UNDEFINED;
use crate::analysis::{
    date_bounds, filter_for_chart, group_names, growth_metrics, top_groups_by_recent_volume,
    CacheManager,
};
use crate::config::DashboardConfig;
use crate::plotting::{ChartStyle, ChartTheme};
use crate::types::{
    AggregatedSales, DateInterval, DeltaEmphasis, FilterState, FilteredSales, GrowthMetric,
    SelectionWarning,
};
use crate::utils::format_thousands_k;

/// What a metric card shows for one parent customer
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    pub delta: String,
    pub emphasis: DeltaEmphasis,
}

impl From<&GrowthMetric> for MetricCard {
    fn from(metric: &GrowthMetric) -> Self {
        Self {
            label: metric.group.clone(),
            value: metric
                .end
                .map(format_thousands_k)
                .unwrap_or_else(|| UNDEFINED.to_string()),
            delta: metric.growth.clone(),
            emphasis: metric.emphasis,
        }
    }
}

/// Main application state, one per window session
pub struct App {
    pub config: DashboardConfig,
    cache: CacheManager,
    pub sales: Option<Arc<AggregatedSales>>,
    pub all_groups: Vec<String>,
    pub default_groups: Vec<String>,
    pub bounds: Option<DateInterval>,
    pub filter: FilterState,
    pub filtered: FilteredSales,
    pub metrics: Vec<GrowthMetric>,
    pub chart_texture: Option<TextureHandle>,
    pub chart_theme: ChartTheme,
    pub chart_style: ChartStyle,
    pub update_needed: bool,
    pub error_message: Option<String>,
}

impl App {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            cache: CacheManager::new(),
            sales: None,
            all_groups: Vec::new(),
            default_groups: Vec::new(),
            bounds: None,
            filter: FilterState::default(),
            filtered: FilteredSales::default(),
            metrics: Vec::new(),
            chart_texture: None,
            chart_theme: ChartTheme::default(),
            chart_style: ChartStyle::default(),
            update_needed: false,
            error_message: None,
        }
    }

    /// Make sure the aggregated sales match the data file on disk.
    ///
    /// Cheap when nothing changed. On failure the dashboard is cleared and
    /// the error is kept for display; the same broken file is not parsed
    /// again until it changes or [`App::reload`] is called.
    pub fn refresh_data(&mut self) {
        match self.cache.get_or_load(&self.config.data_file) {
            Ok(sales) => {
                let unchanged = self
                    .sales
                    .as_ref()
                    .is_some_and(|current| Arc::ptr_eq(current, &sales));
                if !unchanged {
                    self.update_with_sales(sales);
                }
            }
            Err(e) => {
                if self.error_message.is_none() {
                    error!(error = %e, "Failed to load sales data");
                }
                self.clear();
                self.error_message = Some(e.to_string());
            }
        }
    }

    /// Drop the cached data and load the file again
    pub fn reload(&mut self) {
        self.cache.invalidate();
        self.error_message = None;
        self.refresh_data();
    }

    /// Install freshly aggregated sales.
    ///
    /// The first load selects the default customers and the full date range;
    /// later loads keep the user's choices where they still apply.
    pub fn update_with_sales(&mut self, sales: Arc<AggregatedSales>) {
        self.all_groups = group_names(&sales.buckets);
        self.default_groups = top_groups_by_recent_volume(
            &sales.buckets,
            self.config.recent_year_threshold,
            self.config.top_groups,
        );
        self.bounds = date_bounds(&sales.buckets);

        match (self.filter.interval, self.bounds) {
            (Some(current), Some(bounds)) => {
                self.filter.interval = Some(DateInterval::new(
                    current.from.clamp(bounds.from, bounds.to),
                    current.to.clamp(bounds.from, bounds.to),
                ));
                let known: BTreeSet<&String> = self.all_groups.iter().collect();
                self.filter.selected_groups.retain(|g| known.contains(g));
            }
            _ => {
                self.filter.interval = self.bounds;
                self.filter.selected_groups = self.default_groups.iter().cloned().collect();
            }
        }

        info!(
            groups = self.all_groups.len(),
            selected = self.filter.selected_groups.len(),
            "Dashboard data updated"
        );
        self.error_message = None;
        self.sales = Some(sales);
        self.recompute();
    }

    /// Re-run the chart filter and metrics for the current filter state
    pub fn recompute(&mut self) {
        let (Some(sales), Some(interval)) = (&self.sales, self.filter.interval) else {
            self.filtered = FilteredSales::default();
            self.metrics.clear();
            self.update_needed = true;
            return;
        };

        self.filtered = filter_for_chart(&sales.buckets, &self.filter.selected_groups, interval);
        self.metrics = growth_metrics(
            &sales.buckets,
            &self.filter.selected_groups,
            interval,
            self.config.amount_divisor,
        );
        self.update_needed = true;
    }

    pub fn set_interval(&mut self, interval: DateInterval) {
        if self.filter.interval != Some(interval) {
            self.filter.interval = Some(interval);
            self.recompute();
        }
    }

    pub fn set_group_selected(&mut self, group: &str, selected: bool) {
        let changed = if selected {
            self.filter.selected_groups.insert(group.to_string())
        } else {
            self.filter.selected_groups.remove(group)
        };
        if changed {
            self.recompute();
        }
    }

    /// Go back to the top customers by recent volume
    pub fn reset_selection(&mut self) {
        self.filter.selected_groups = self.default_groups.iter().cloned().collect();
        self.recompute();
    }

    pub fn clear_selection(&mut self) {
        self.filter.selected_groups.clear();
        self.recompute();
    }

    pub fn selection_warning(&self) -> Option<SelectionWarning> {
        self.filtered.warning
    }

    pub fn metric_cards(&self) -> Vec<MetricCard> {
        self.metrics.iter().map(MetricCard::from).collect()
    }

    pub fn format_stats(&self) -> Option<String> {
        self.sales.as_ref().map(|sales| sales.stats.to_string())
    }

    fn clear(&mut self) {
        self.sales = None;
        self.all_groups.clear();
        self.default_groups.clear();
        self.bounds = None;
        self.filtered = FilteredSales::default();
        self.metrics.clear();
        self.chart_texture = None;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl EApp for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.refresh_data();
        super::ui::draw_ui(self, ctx);
    }
}
