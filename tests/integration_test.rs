use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use salesdash::app::App;
use salesdash::config::DashboardConfig;
use salesdash::types::{DateInterval, DeltaEmphasis, SelectionWarning};
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Twelve customers with sales in the week ending 2024-12-29 and in the two
/// following weeks. Later customers sell more in 2025.
fn sales_csv(customers: usize) -> String {
    let mut csv = String::from("id,date,status,cust_parent_name,amount\n");
    for i in 0..customers {
        let name = format!("Customer {:02}", i);
        let n = i as i64 + 1;
        writeln!(csv, "{i}a,2024-12-26,closed,{name},{}", n * 100).unwrap();
        writeln!(csv, "{i}b,2025-01-02,closed,{name},{}", n * 1000).unwrap();
        writeln!(csv, "{i}c,2025-01-09,closed,{name},{}", n * 2000).unwrap();
        writeln!(csv, "{i}d,2025-01-10,pending,{name},{}", 50_000_000).unwrap();
    }
    // Large 2024 sales do not count towards the default selection
    writeln!(csv, "x,2024-12-23,closed,Customer 00,10000000").unwrap();
    csv
}

fn setup_dashboard(csv: &str) -> (TempDir, PathBuf, App) {
    let temp_dir = TempDir::new().unwrap();
    let data_file = temp_dir.path().join("sales.csv");
    fs::write(&data_file, csv).unwrap();

    let config = DashboardConfig {
        data_file: data_file.clone(),
        ..Default::default()
    };
    (temp_dir, data_file, App::new(config))
}

fn names(range: std::ops::RangeInclusive<usize>) -> BTreeSet<String> {
    range.map(|i| format!("Customer {:02}", i)).collect()
}

#[test]
fn test_full_workflow() {
    let (_temp_dir, _data_file, mut app) = setup_dashboard(&sales_csv(12));
    app.refresh_data();

    // Initial state
    assert_eq!(app.error_message, None);
    assert_eq!(app.all_groups.len(), 12);
    assert_eq!(app.default_groups.len(), 10);
    assert_eq!(app.default_groups[0], "Customer 11");
    assert_eq!(app.filter.selected_groups, names(2..=11));
    assert_eq!(
        app.filter.interval,
        Some(DateInterval::new(date(2024, 12, 29), date(2025, 1, 12)))
    );
    assert_eq!(app.bounds, app.filter.interval);
    assert!(app.update_needed);

    // Chart rows: 10 customers over 3 weeks
    assert_eq!(app.selection_warning(), None);
    assert_eq!(app.filtered.rows.len(), 30);
    assert!(app.filtered.rows.iter().all(|r| r.amount < 50_000_000));

    // Metric cards
    let cards = app.metric_cards();
    assert_eq!(cards.len(), 10);
    let card = cards.iter().find(|c| c.label == "Customer 05").unwrap();
    assert_eq!(card.value, "120K");
    assert_eq!(card.delta, "+114.00x");
    assert_eq!(card.emphasis, DeltaEmphasis::Normal);

    // Narrow the range
    app.set_interval(DateInterval::new(date(2025, 1, 5), date(2025, 1, 12)));
    assert_eq!(app.filtered.rows.len(), 20);
    let metric = app.metrics.iter().find(|m| m.group == "Customer 05").unwrap();
    assert_eq!(metric.growth, "+60.00x");

    // Add a customer outside the default selection
    app.set_group_selected("Customer 00", true);
    app.set_interval(DateInterval::new(date(2024, 12, 29), date(2025, 1, 12)));
    let metric = app.metrics.iter().find(|m| m.group == "Customer 00").unwrap();
    assert_eq!(metric.start, Some(100_001.0));
    assert_eq!(metric.growth, "-99,981.00x");

    // Empty selection
    app.clear_selection();
    assert_eq!(app.selection_warning(), Some(SelectionWarning::EmptySelection));
    assert!(app.filtered.rows.is_empty());
    assert!(app.metric_cards().is_empty());

    app.reset_selection();
    assert_eq!(app.selection_warning(), None);
    assert_eq!(app.filter.selected_groups, names(2..=11));
}

#[test]
fn test_undefined_metric_card() {
    let csv = "date,status,cust_parent_name,amount\n\
               2025-01-09,closed,Acme,5000\n\
               2025-01-02,closed,Globex,1000\n\
               2025-01-09,closed,Globex,3000\n";
    let (_temp_dir, _data_file, mut app) = setup_dashboard(csv);
    app.refresh_data();

    let cards = app.metric_cards();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].label, "Acme");
    assert_eq!(cards[0].value, "50K");
    assert_eq!(cards[0].delta, "n/a");
    assert_eq!(cards[0].emphasis, DeltaEmphasis::Off);
    assert_eq!(cards[1].delta, "+20.00x");
}

#[test]
fn test_data_file_change_is_picked_up() {
    let (_temp_dir, data_file, mut app) = setup_dashboard(&sales_csv(12));
    app.refresh_data();
    app.set_group_selected("Customer 02", false);
    let selected = app.filter.selected_groups.clone();
    let first = app.sales.clone().unwrap();

    // Nothing changed on disk
    app.refresh_data();
    assert!(Arc::ptr_eq(&first, app.sales.as_ref().unwrap()));

    fs::write(&data_file, sales_csv(13)).unwrap();
    app.refresh_data();

    assert_eq!(app.all_groups.len(), 13);
    assert_eq!(app.default_groups[0], "Customer 12");
    // The user's selection survives a reload
    assert_eq!(app.filter.selected_groups, selected);
}

#[test]
fn test_same_length_rewrite_is_picked_up() {
    let csv = sales_csv(12);
    let (_temp_dir, data_file, mut app) = setup_dashboard(&csv);
    app.refresh_data();
    let first = app.sales.clone().unwrap();
    let modified = fs::metadata(&data_file).unwrap().modified().unwrap();

    let rewritten = csv.replace("Customer 00,10000000", "Customer 00,20000000");
    assert_eq!(rewritten.len(), csv.len());
    fs::write(&data_file, rewritten).unwrap();
    fs::OpenOptions::new()
        .write(true)
        .open(&data_file)
        .unwrap()
        .set_modified(modified + Duration::from_secs(60))
        .unwrap();
    app.refresh_data();

    let second = app.sales.clone().unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    let week_total = |sales: &salesdash::types::AggregatedSales| {
        sales
            .buckets
            .iter()
            .find(|b| b.week == date(2024, 12, 29) && b.group == "Customer 00")
            .map(|b| b.amount)
    };
    assert_eq!(week_total(&first), Some(10_000_100));
    assert_eq!(week_total(&second), Some(20_000_100));
}

#[test]
fn test_broken_file_is_not_reparsed_every_frame() {
    let temp_dir = TempDir::new().unwrap();
    let data_file = temp_dir.path().join("sales.csv");
    fs::write(&data_file, "date,status,cust_parent_nam_,amount\n2025-01-01,closed,Acme,10\n").unwrap();
    let modified = fs::metadata(&data_file).unwrap().modified().unwrap();
    let mut app = App::new(DashboardConfig {
        data_file: data_file.clone(),
        ..Default::default()
    });
    app.refresh_data();
    assert!(app.error_message.is_some());

    // Repaired in place without touching length or mtime
    fs::write(&data_file, "date,status,cust_parent_name,amount\n2025-01-01,closed,Acme,10\n").unwrap();
    fs::OpenOptions::new()
        .write(true)
        .open(&data_file)
        .unwrap()
        .set_modified(modified)
        .unwrap();
    app.refresh_data();
    assert!(app.error_message.is_some());
    assert!(app.sales.is_none());

    // An explicit reload reads the file again
    app.reload();
    assert_eq!(app.error_message, None);
    assert_eq!(app.all_groups, vec!["Acme"]);
}

#[test]
fn test_error_handling() {
    let temp_dir = TempDir::new().unwrap();

    // Missing file
    let mut app = App::new(DashboardConfig {
        data_file: temp_dir.path().join("missing.csv"),
        ..Default::default()
    });
    app.refresh_data();
    assert!(app.error_message.is_some());
    assert!(app.sales.is_none());
    assert!(app.metric_cards().is_empty());

    // Missing column
    let data_file = temp_dir.path().join("bad.csv");
    fs::write(&data_file, "date,status,amount\n2025-01-01,closed,10\n").unwrap();
    let mut app = App::new(DashboardConfig {
        data_file: data_file.clone(),
        ..Default::default()
    });
    app.refresh_data();
    let message = app.error_message.clone().unwrap();
    assert!(message.contains("cust_parent_name"));

    // Fixing the file recovers the dashboard
    fs::write(
        &data_file,
        "date,status,cust_parent_name,amount\n2025-01-01,closed,Acme,10\n",
    )
    .unwrap();
    app.reload();
    assert_eq!(app.error_message, None);
    assert_eq!(app.all_groups, vec!["Acme"]);
}
