//! Sales Dashboard
//!
//! A GUI application showing weekly sales per parent customer.

use anyhow::{anyhow, Context};
use eframe::egui;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use salesdash::{DashboardConfig, SalesDashApp};

fn main() -> anyhow::Result<()> {
    let default_filter = if cfg!(feature = "dev") {
        "salesdash=debug"
    } else {
        "salesdash=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DashboardConfig::load().context("Failed to load configuration")?;
    info!(data_file = %config.data_file.display(), "Starting dashboard");

    let title = config.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title(&title),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|cc| {
            // Configure default fonts and style
            let fonts = egui::FontDefinitions::default();
            cc.egui_ctx.set_fonts(fonts);

            let mut app = SalesDashApp::new(config);
            app.refresh_data();
            Ok(Box::new(app) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|e| anyhow!("Error running application: {e}"))
}
