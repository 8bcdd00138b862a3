use chrono::{TimeZone, Utc};
use report_chart::ChartError;
use report_chart::core::{
    DateParser, OrderedKey, SeriesRow, line_data, ordered_keys, unique_dates, unique_keys,
};

fn sample_rows() -> Vec<SeriesRow> {
    vec![
        SeriesRow::new("2021-01-03")
            .with_value("Hoodie", 3.0)
            .with_labeled_value("Beanie", 1.0, "Jan 3, 2020"),
        SeriesRow::new("2021-01-01").with_value("Hoodie", 5.0),
        SeriesRow::new("2021-01-02")
            .with_value("Scarf", 7.0)
            .with_value("Beanie", 2.0),
    ]
}

#[test]
fn unique_keys_follow_first_appearance() {
    let keys: Vec<String> = unique_keys(&sample_rows()).into_iter().collect();
    assert_eq!(keys, ["Hoodie", "Beanie", "Scarf"]);
}

#[test]
fn default_ordered_keys_are_visible_and_unfocused() {
    let rows = sample_rows();
    let keys = ordered_keys(&rows, &unique_keys(&rows), None);
    assert_eq!(keys.len(), 3);
    assert!(keys.iter().all(|ordered| ordered.visible && !ordered.focus));
    assert_eq!(keys[2].key, "Scarf");
}

#[test]
fn override_ordering_is_used_verbatim() {
    let rows = sample_rows();
    let overrides = vec![
        OrderedKey::new("Scarf").with_focus(true),
        OrderedKey::new("Hoodie").with_visible(false),
    ];
    let keys = ordered_keys(&rows, &unique_keys(&rows), Some(&overrides));
    assert_eq!(keys, overrides);
}

#[test]
fn override_keys_without_series_are_dropped() {
    let rows = sample_rows();
    let overrides = vec![
        OrderedKey::new("Mittens"),
        OrderedKey::new("Beanie").with_visible(false),
    ];
    let keys = ordered_keys(&rows, &unique_keys(&rows), Some(&overrides));
    assert_eq!(keys, [OrderedKey::new("Beanie").with_visible(false)]);

    let kept = ordered_keys(&[], &unique_keys(&[]), Some(&overrides));
    assert_eq!(kept, overrides);
}

#[test]
fn sparse_values_default_to_zero_and_empty_label() {
    let rows = sample_rows();
    let keys = ordered_keys(&rows, &unique_keys(&rows), None);
    let data = line_data(&rows, &keys);

    let scarf = data.iter().find(|datum| datum.key == "Scarf").expect("scarf");
    let values: Vec<f64> = scarf.values.iter().map(|value| value.value).collect();
    assert_eq!(values, [0.0, 0.0, 7.0]);
    assert!(scarf.values[0].label.is_empty());

    let beanie = data.iter().find(|datum| datum.key == "Beanie").expect("beanie");
    assert_eq!(beanie.values[0].label, "Jan 3, 2020");
}

#[test]
fn line_data_keeps_row_order() {
    let rows = sample_rows();
    let keys = ordered_keys(&rows, &unique_keys(&rows), None);
    let data = line_data(&rows, &keys);
    let dates: Vec<&str> = data[0].values.iter().map(|value| value.date.as_str()).collect();
    assert_eq!(dates, ["2021-01-03", "2021-01-01", "2021-01-02"]);
}

#[test]
fn unique_dates_are_sorted_and_deduplicated() {
    let mut rows = sample_rows();
    rows.push(SeriesRow::new("2021-01-01").with_value("Hoodie", 1.0));
    let keys = ordered_keys(&rows, &unique_keys(&rows), None);
    let parser = DateParser::new("%Y-%m-%d").expect("parser");

    let dates = unique_dates(&line_data(&rows, &keys), &parser).expect("dates");
    assert_eq!(
        dates,
        [
            Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2021, 1, 2, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2021, 1, 3, 0, 0, 0).unwrap(),
        ]
    );
}

#[test]
fn unparseable_date_reports_the_row() {
    let rows = vec![
        SeriesRow::new("2021-01-01").with_value("a", 1.0),
        SeriesRow::new("not-a-date").with_value("a", 2.0),
    ];
    let keys = ordered_keys(&rows, &unique_keys(&rows), None);
    let parser = DateParser::new("%Y-%m-%d").expect("parser");

    let err = unique_dates(&line_data(&rows, &keys), &parser).expect_err("must fail");
    match err {
        ChartError::Parse {
            row,
            value,
            pattern,
        } => {
            assert_eq!(row, 1);
            assert_eq!(value, "not-a-date");
            assert_eq!(pattern, "%Y-%m-%d");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn parser_handles_time_and_offset_patterns() {
    let parser = DateParser::new("%Y-%m-%dT%H:%M:%S").expect("parser");
    assert_eq!(
        parser.parse(0, "2018-05-30T13:45:00").expect("date"),
        Utc.with_ymd_and_hms(2018, 5, 30, 13, 45, 0).unwrap()
    );

    let parser = DateParser::new("%Y-%m-%d %H:%M %z").expect("parser");
    assert_eq!(
        parser.parse(0, "2018-05-30 10:00 +0200").expect("date"),
        Utc.with_ymd_and_hms(2018, 5, 30, 8, 0, 0).unwrap()
    );
}

#[test]
fn rows_deserialize_from_report_json() {
    let rows: Vec<SeriesRow> = serde_json::from_str(
        r#"[
            {"date": "2018-05-30T00:00:00", "Hoodie": {"value": 21599, "label": "May 30"}},
            {"date": "2018-05-31T00:00:00", "Hoodie": {"value": null}}
        ]"#,
    )
    .expect("rows");
    assert_eq!(rows[0].value("Hoodie"), 21599.0);
    assert_eq!(rows[0].label("Hoodie"), "May 30");
    assert_eq!(rows[1].value("Hoodie"), 0.0);
    assert_eq!(rows[1].value("Beanie"), 0.0);
}
