#[cfg(test)]
mod tests {
    use crate::plotting::*;
    use crate::types::SalesBucket;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup_rows() -> Vec<SalesBucket> {
        vec![
            SalesBucket::new(date(2024, 1, 21), "Acme", 300),
            SalesBucket::new(date(2024, 1, 7), "Acme", 100),
            SalesBucket::new(date(2024, 1, 14), "Globex", 250),
            SalesBucket::new(date(2024, 1, 14), "Acme", 200),
        ]
    }

    #[test]
    fn test_build_series_groups_and_sorts() {
        let series = build_series(&setup_rows(), date(2024, 1, 7));

        assert_eq!(
            series,
            vec![
                GroupSeries {
                    group: "Acme".to_string(),
                    points: vec![(0.0, 100.0), (7.0, 200.0), (14.0, 300.0)],
                },
                GroupSeries {
                    group: "Globex".to_string(),
                    points: vec![(7.0, 250.0)],
                },
            ]
        );
    }

    #[test]
    fn test_build_series_empty() {
        assert!(build_series(&[], date(2024, 1, 7)).is_empty());
    }

    #[test]
    fn test_value_range() {
        let series = build_series(&setup_rows(), date(2024, 1, 7));
        let (min, max) = value_range(&series);

        assert_eq!(min, 0.0);
        assert!(max > 300.0);
        assert!(max < 400.0);
    }

    #[test]
    fn test_value_range_with_refunds_and_empty() {
        let rows = vec![SalesBucket::new(date(2024, 1, 7), "Acme", -500)];
        let (min, max) = value_range(&build_series(&rows, date(2024, 1, 7)));
        assert!(min < -500.0);
        assert_eq!(max, 1.0);

        assert_eq!(value_range(&[]), (0.0, 1.0));
    }

    #[test]
    fn test_axis_labels() {
        assert_eq!(format_axis_value(&950.0), "950");
        assert_eq!(format_axis_value(&25_000.0), "25.0K");
        assert_eq!(format_axis_value(&-3_500_000.0), "-3.5M");
    }

    #[test]
    fn test_series_color_is_stable() {
        assert_eq!(series_color("Acme"), series_color("Acme"));
        assert!(styles::SERIES_PALETTE.contains(&series_color("Globex")));
    }
}
