use chrono::{Duration, NaiveDate};
use egui::{Color32, Context, RichText, Slider};
use tracing::error;

use super::state::MetricCard;
use super::App;
use crate::plotting::render_chart;
use crate::types::{DateInterval, DeltaEmphasis};

const GROWTH_COLOR: Color32 = Color32::from_rgb(9, 171, 59);
const DECLINE_COLOR: Color32 = Color32::from_rgb(255, 43, 43);

/// Draw the main application UI
pub fn draw_ui(app: &mut App, ctx: &Context) {
    egui::SidePanel::left("side_panel")
        .resizable(true)
        .show(ctx, |ui| {
            ui.heading("Filters");
            ui.separator();

            draw_range_controls(app, ui);
            ui.separator();
            draw_group_selector(app, ui);

            if let Some(stats) = app.format_stats() {
                ui.separator();
                ui.small(stats);
            }
        });

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading(format!("{} sales dashboard", app.config.title));
        ui.label(format!("Welcome to {}.", app.config.title));
        ui.add_space(12.0);

        if let Some(message) = &app.error_message {
            ui.colored_label(Color32::RED, message);
            if ui.button("Reload").clicked() {
                app.reload();
            }
            return;
        }

        if let Some(warning) = app.selection_warning() {
            ui.colored_label(Color32::YELLOW, warning.to_string());
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading("Sales over time");
            ui.separator();
            if let Some(texture) = &app.chart_texture {
                ui.add(egui::Image::new(texture).shrink_to_fit());
            }

            ui.add_space(24.0);
            ui.heading("YoY by customer");
            ui.separator();
            draw_metric_cards(ui, &app.metric_cards(), app.config.card_columns);
        });
    });

    // Update chart if needed
    if app.update_needed {
        update_chart_texture(app, ctx);
        app.update_needed = false;
    }
}

fn draw_range_controls(app: &mut App, ui: &mut egui::Ui) {
    let (Some(bounds), Some(current)) = (app.bounds, app.filter.interval) else {
        return;
    };

    ui.label("Which weeks are you interested in?");
    let span = bounds.span_days();
    let mut from_days = (current.from - bounds.from).num_days();
    let mut to_days = (current.to - bounds.from).num_days();

    let from_changed = ui
        .add(
            Slider::new(&mut from_days, 0..=span)
                .step_by(7.0)
                .custom_formatter(|v, _| format_offset(bounds.from, v))
                .text("From"),
        )
        .changed();
    let to_changed = ui
        .add(
            Slider::new(&mut to_days, 0..=span)
                .step_by(7.0)
                .custom_formatter(|v, _| format_offset(bounds.from, v))
                .text("To"),
        )
        .changed();

    if from_changed || to_changed {
        // The bound being dragged cannot pass the other one
        if from_changed {
            from_days = from_days.min(to_days);
        } else {
            to_days = to_days.max(from_days);
        }
        app.set_interval(DateInterval::new(
            bounds.from + Duration::days(from_days),
            bounds.from + Duration::days(to_days),
        ));
    }
}

fn draw_group_selector(app: &mut App, ui: &mut egui::Ui) {
    ui.label("Which parent customers would you like to view?");
    ui.horizontal(|ui| {
        if ui.button("Reset to top customers").clicked() {
            app.reset_selection();
        }
        if ui.button("Clear").clicked() {
            app.clear_selection();
        }
    });

    let groups = app.all_groups.clone();
    egui::ScrollArea::vertical()
        .max_height(320.0)
        .show(ui, |ui| {
            for group in &groups {
                let mut checked = app.filter.selected_groups.contains(group);
                if ui.checkbox(&mut checked, group).changed() {
                    app.set_group_selected(group, checked);
                }
            }
        });
}

fn draw_metric_cards(ui: &mut egui::Ui, cards: &[MetricCard], columns: usize) {
    egui::Grid::new("metric_cards")
        .num_columns(columns)
        .spacing([16.0, 16.0])
        .show(ui, |ui| {
            for (i, card) in cards.iter().enumerate() {
                ui.group(|ui| {
                    ui.set_min_width(160.0);
                    ui.vertical(|ui| {
                        ui.label(&card.label);
                        ui.label(RichText::new(&card.value).size(24.0).strong());
                        ui.colored_label(delta_color(card), &card.delta);
                    });
                });
                if (i + 1) % columns == 0 {
                    ui.end_row();
                }
            }
        });
}

fn delta_color(card: &MetricCard) -> Color32 {
    match card.emphasis {
        DeltaEmphasis::Off => Color32::GRAY,
        DeltaEmphasis::Normal if card.delta.starts_with('-') => DECLINE_COLOR,
        DeltaEmphasis::Normal => GROWTH_COLOR,
    }
}

fn format_offset(origin: NaiveDate, days: f64) -> String {
    (origin + Duration::days(days.round() as i64))
        .format("%Y-%m-%d")
        .to_string()
}

fn update_chart_texture(app: &mut App, ctx: &Context) {
    let Some(interval) = app.filter.interval else {
        app.chart_texture = None;
        return;
    };

    match render_chart(&app.filtered.rows, interval, &app.chart_theme, &app.chart_style) {
        Ok(image) => {
            let size = [image.width() as usize, image.height() as usize];
            let texture = ctx.load_texture(
                "sales_chart",
                egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw()),
                egui::TextureOptions::LINEAR,
            );
            app.chart_texture = Some(texture);
        }
        Err(e) => {
            error!(error = %e, "Failed to render sales chart");
            app.chart_texture = None;
        }
    }
}
