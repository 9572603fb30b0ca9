//! Pure data shaping for the dashboard views.
//!
//! Nothing here performs I/O or fails: absent values become `"N/A"` or
//! zero, never errors.

use crate::domain::model::{
    CasesType, ChartPoint, CountryOption, CountryRecord, HistoricalTimeline, MapMarker,
};
use chrono::NaiveDate;

pub const MISSING_STAT: &str = "N/A";

/// Returns a new list ordered by total `cases`, highest first.
///
/// The sort is stable, so records with equal counts keep their input
/// order. Missing `cases` compare as zero. The input is left untouched.
pub fn sort_by_cases(records: &[CountryRecord]) -> Vec<CountryRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        let a_cases = a.counts.cases.unwrap_or(0);
        let b_cases = b.counts.cases.unwrap_or(0);
        b_cases.cmp(&a_cases)
    });
    sorted
}

/// `1234567` -> `"1,234,567"`, absent -> `"N/A"`.
pub fn format_stat(value: Option<u64>) -> String {
    match value {
        Some(n) => group_thousands(n),
        None => MISSING_STAT.to_string(),
    }
}

/// Daily increment line of an info box: `"+1,234"`.
pub fn format_today(value: Option<u64>) -> String {
    match value {
        Some(n) => format!("+{}", group_thousands(n)),
        None => MISSING_STAT.to_string(),
    }
}

fn group_thousands(value: u64) -> String {
    let raw = value.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (index, ch) in raw.chars().enumerate() {
        if index > 0 && (raw.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Dropdown entries in API order; records without an ISO code cannot be
/// looked up and are skipped.
pub fn country_options(records: &[CountryRecord]) -> Vec<CountryOption> {
    records
        .iter()
        .filter_map(|record| {
            record.iso_code().map(|code| CountryOption {
                name: record.name.clone(),
                value: code.to_string(),
            })
        })
        .collect()
}

/// Circle per country, radius proportional to the square root of the metric.
pub fn map_markers(records: &[CountryRecord], cases_type: CasesType) -> Vec<MapMarker> {
    records
        .iter()
        .map(|record| {
            let (lat, lng) = record.coordinates();
            let metric = cases_type.total(&record.counts).unwrap_or(0) as f64;
            MapMarker {
                name: record.name.clone(),
                lat,
                lng,
                radius: metric.sqrt() * cases_type.map_multiplier(),
                color: cases_type.map_color(),
            }
        })
        .collect()
}

/// Parses the API's `M/D/YY` keys, e.g. `"3/14/21"`.
pub fn parse_timeline_date(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%m/%d/%y").ok()
}

/// Turns cumulative totals into daily new counts.
///
/// Keys are ordered by calendar date (the map itself orders them as
/// strings). The first date has no predecessor and produces no point.
pub fn build_chart_data(history: &HistoricalTimeline, cases_type: CasesType) -> Vec<ChartPoint> {
    let mut series: Vec<(NaiveDate, u64)> = history
        .series(cases_type)
        .iter()
        .filter_map(|(key, total)| match parse_timeline_date(key) {
            Some(date) => Some((date, *total)),
            None => {
                tracing::warn!("Skipping unparseable timeline date: {}", key);
                None
            }
        })
        .collect();
    series.sort_by_key(|(date, _)| *date);

    series
        .windows(2)
        .map(|pair| {
            let (_, previous) = pair[0];
            let (date, current) = pair[1];
            ChartPoint {
                date,
                value: daily_delta(previous, current),
            }
        })
        .collect()
}

/// Difference between two cumulative totals, clamped to the `i64` range.
fn daily_delta(previous: u64, current: u64) -> i64 {
    let delta = i128::from(current) - i128::from(previous);
    i64::try_from(delta).unwrap_or(if delta > 0 { i64::MAX } else { i64::MIN })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CaseCounts, CountryInfo};
    use std::collections::BTreeMap;

    fn record(name: &str, iso2: Option<&str>, cases: Option<u64>) -> CountryRecord {
        CountryRecord {
            name: name.to_string(),
            country_info: CountryInfo {
                iso2: iso2.map(str::to_string),
                lat: 10.0,
                long: 20.0,
                ..Default::default()
            },
            updated: None,
            counts: CaseCounts {
                cases,
                ..Default::default()
            },
        }
    }

    fn names(records: &[CountryRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_sort_by_cases_descending() {
        let input = vec![
            record("A", Some("AA"), Some(10)),
            record("B", Some("BB"), Some(300)),
            record("C", Some("CC"), Some(25)),
        ];

        let sorted = sort_by_cases(&input);
        assert_eq!(names(&sorted), vec!["B", "C", "A"]);
        for pair in sorted.windows(2) {
            assert!(pair[0].counts.cases >= pair[1].counts.cases);
        }
    }

    #[test]
    fn test_sort_by_cases_is_stable_for_ties() {
        let input = vec![
            record("first", None, Some(5)),
            record("big", None, Some(50)),
            record("second", None, Some(5)),
            record("third", None, Some(5)),
        ];

        let sorted = sort_by_cases(&input);
        assert_eq!(names(&sorted), vec!["big", "first", "second", "third"]);
    }

    #[test]
    fn test_sort_by_cases_treats_missing_as_zero() {
        let input = vec![
            record("missing", None, None),
            record("zero", None, Some(0)),
            record("one", None, Some(1)),
        ];

        let sorted = sort_by_cases(&input);
        assert_eq!(names(&sorted), vec!["one", "missing", "zero"]);
    }

    #[test]
    fn test_sort_by_cases_leaves_input_untouched() {
        let input = vec![
            record("A", None, Some(1)),
            record("B", None, Some(2)),
        ];
        let before = input.clone();

        let sorted = sort_by_cases(&input);
        assert_eq!(input, before);
        assert_eq!(sorted.len(), input.len());
        for item in &input {
            assert!(sorted.contains(item));
        }
    }

    #[test]
    fn test_sort_by_cases_empty_and_idempotent() {
        assert!(sort_by_cases(&[]).is_empty());

        let input = vec![
            record("x", None, Some(3)),
            record("y", None, Some(7)),
            record("z", None, Some(3)),
        ];
        let once = sort_by_cases(&input);
        let twice = sort_by_cases(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_format_stat() {
        assert_eq!(format_stat(None), "N/A");
        assert_eq!(format_stat(Some(0)), "0");
        assert_eq!(format_stat(Some(999)), "999");
        assert_eq!(format_stat(Some(1000)), "1,000");
        assert_eq!(format_stat(Some(123456)), "123,456");
        assert_eq!(format_stat(Some(1234567)), "1,234,567");
        assert_eq!(format_stat(Some(u64::MAX)), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_format_today() {
        assert_eq!(format_today(Some(1234)), "+1,234");
        assert_eq!(format_today(Some(0)), "+0");
        assert_eq!(format_today(None), "N/A");
    }

    #[test]
    fn test_country_options_skip_missing_iso_codes() {
        let input = vec![
            record("Zambia", Some("ZM"), Some(1)),
            record("MS Zaandam", None, Some(9)),
            record("Albania", Some("AL"), Some(2)),
        ];

        let options = country_options(&input);
        assert_eq!(
            options,
            vec![
                CountryOption {
                    name: "Zambia".to_string(),
                    value: "ZM".to_string()
                },
                CountryOption {
                    name: "Albania".to_string(),
                    value: "AL".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_map_markers_scale_with_square_root() {
        let input = vec![record("A", Some("AA"), Some(400)), record("B", None, None)];

        let markers = map_markers(&input, CasesType::Cases);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].radius, 20.0 * 800.0);
        assert_eq!(markers[0].color, "#CC1034");
        assert_eq!(markers[0].lat, 10.0);
        assert_eq!(markers[1].radius, 0.0);
    }

    #[test]
    fn test_build_chart_data_orders_by_calendar_date() {
        let mut cases = BTreeMap::new();
        // 字串排序會把 1/10/21 放在 1/9/21 之前
        cases.insert("12/31/20".to_string(), 100);
        cases.insert("1/9/21".to_string(), 150);
        cases.insert("1/10/21".to_string(), 175);
        cases.insert("1/1/21".to_string(), 120);
        let history = HistoricalTimeline {
            cases,
            ..Default::default()
        };

        let points = build_chart_data(&history, CasesType::Cases);
        let values: Vec<i64> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![20, 30, 25]);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
        assert_eq!(points[2].date, NaiveDate::from_ymd_opt(2021, 1, 10).unwrap());
    }

    #[test]
    fn test_build_chart_data_handles_corrections_and_bad_keys() {
        let mut deaths = BTreeMap::new();
        deaths.insert("3/1/21".to_string(), 50);
        deaths.insert("3/2/21".to_string(), 45);
        deaths.insert("not-a-date".to_string(), 999);
        let history = HistoricalTimeline {
            deaths,
            ..Default::default()
        };

        let points = build_chart_data(&history, CasesType::Deaths);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, -5);
        assert!(build_chart_data(&history, CasesType::Cases).is_empty());
    }

    #[test]
    fn test_build_chart_data_clamps_huge_jumps() {
        let mut cases = BTreeMap::new();
        cases.insert("1/1/21".to_string(), 0);
        cases.insert("1/2/21".to_string(), u64::MAX);
        cases.insert("1/3/21".to_string(), 0);
        let history = HistoricalTimeline {
            cases,
            ..Default::default()
        };

        let values: Vec<i64> = build_chart_data(&history, CasesType::Cases)
            .iter()
            .map(|p| p.value)
            .collect();
        assert_eq!(values, vec![i64::MAX, i64::MIN]);
    }
}
