//! Plain-text rendering of the dashboard: header, info boxes, country
//! table, map markers and the daily line graph. Each view is returned as
//! newline-joined lines without a trailing newline.

use crate::core::state::DashboardState;
use crate::core::transform::{format_stat, format_today, map_markers};
use crate::domain::model::{CasesType, ChartPoint};
use chrono::{DateTime, Utc};

const BAR_WIDTH: usize = 40;

pub fn render_header(state: &DashboardState) -> String {
    let mut lines = vec![
        "COVID-19 TRACKER".to_string(),
        format!("Showing: {}", state.selected_label()),
    ];
    if let Some(updated) = state.updated.and_then(DateTime::<Utc>::from_timestamp_millis) {
        lines.push(format!("Updated: {}", updated.format("%Y-%m-%d %H:%M UTC")));
    }
    lines.join("\n")
}

/// One box per metric; the active one is marked with `>`.
pub fn render_info_boxes(state: &DashboardState) -> String {
    CasesType::ALL
        .iter()
        .map(|cases_type| {
            let marker = if *cases_type == state.cases_type { '>' } else { ' ' };
            format!(
                "{} {:<18} {:>16} today  {:>16} total",
                marker,
                cases_type.title(),
                format_today(cases_type.today(&state.info)),
                format_stat(cases_type.total(&state.info)),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_table(state: &DashboardState, rows: usize) -> String {
    let mut lines = vec!["Live Cases by Country".to_string()];
    if state.table.is_empty() {
        lines.push("  (no data)".to_string());
        return lines.join("\n");
    }

    let shown = &state.table[..rows.min(state.table.len())];
    let name_width = shown
        .iter()
        .map(|record| record.name.chars().count())
        .max()
        .unwrap_or(0);
    lines.extend(shown.iter().map(|record| {
        format!(
            "  {:<width$}  {:>15}",
            record.name,
            format_stat(record.counts.cases),
            width = name_width
        )
    }));
    if state.table.len() > shown.len() {
        lines.push(format!("  ... {} more", state.table.len() - shown.len()));
    }
    lines.join("\n")
}

/// The `limit` largest circles for the active metric.
pub fn render_map(state: &DashboardState, limit: usize) -> String {
    let view = state.map_view;
    let mut lines = vec![format!(
        "Map center ({:.4}, {:.4}) zoom {}",
        view.lat, view.lng, view.zoom
    )];

    let mut markers = map_markers(&state.map_countries, state.cases_type);
    markers.sort_by(|a, b| b.radius.total_cmp(&a.radius));
    lines.extend(markers.iter().take(limit).map(|marker| {
        format!(
            "  {} at ({:.2}, {:.2}) radius {:.0}m {}",
            marker.name, marker.lat, marker.lng, marker.radius, marker.color
        )
    }));
    lines.join("\n")
}

pub fn render_chart(points: &[ChartPoint], cases_type: CasesType) -> String {
    let mut lines = vec![format!("Worldwide new {}", cases_type)];
    if points.is_empty() {
        lines.push("  (no data)".to_string());
        return lines.join("\n");
    }

    let max = points.iter().map(|p| p.value).max().unwrap_or(0).max(1);
    for point in points {
        let bar_len = if point.value > 0 {
            ((point.value as f64 / max as f64) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        lines.push(format!(
            "  {}  {:>12}  {}",
            point.date.format("%Y-%m-%d"),
            format_signed(point.value),
            "#".repeat(bar_len)
        ));
    }
    lines.join("\n")
}

fn format_signed(value: i64) -> String {
    let magnitude = format_stat(Some(value.unsigned_abs()));
    if value < 0 {
        format!("-{}", magnitude)
    } else {
        magnitude
    }
}
