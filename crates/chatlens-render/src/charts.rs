//! Chart models: the data each dashboard slot displays, independent of any charting backend.

use crate::model::{
    BarChartModel, LegendEntry, LineChartModel, PieChartModel, TableModel, TimelineKind,
};
use chatlens_core::config::DEFAULT_PALETTE;
use chatlens_core::{AnalyticsResults, ChartConfig};
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct ColorScale<'a> {
    palette: &'a [String],
    mapping: HashMap<String, usize>,
    next: usize,
}

impl<'a> ColorScale<'a> {
    fn new(palette: &'a [String]) -> Self {
        Self {
            palette,
            mapping: HashMap::new(),
            next: 0,
        }
    }

    /// Repeated labels keep the colour they were first given.
    fn color_for(&mut self, label: &str) -> String {
        if self.palette.is_empty() {
            return String::new();
        }
        if let Some(idx) = self.mapping.get(label).copied() {
            return self.palette[idx % self.palette.len()].clone();
        }
        let idx = self.next;
        self.next += 1;
        self.mapping.insert(label.to_string(), idx);
        self.palette[idx % self.palette.len()].clone()
    }
}

/// Integral values print without a fraction; others keep up to three decimals.
pub fn fmt_number(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    if v.abs() < 0.0005 {
        return "0".to_string();
    }
    let mut r = (v * 1000.0).round() / 1000.0;
    if r.abs() < 0.0005 {
        r = 0.0;
    }
    let mut s = format!("{r:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

/// `"alice: 42 (35.0%)"`. The percentage is dropped when `total` is not a positive number.
pub fn format_tooltip_label(label: &str, value: f64, total: f64) -> String {
    if total.is_finite() && total > 0.0 {
        let pct = value / total * 100.0;
        format!("{label}: {} ({pct:.1}%)", fmt_number(value))
    } else {
        format!("{label}: {}", fmt_number(value))
    }
}

pub fn compute_legend_entries<S: AsRef<str>>(labels: &[S], values: &[f64]) -> Vec<LegendEntry> {
    let palette: Vec<String> = DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect();
    legend_entries_with_palette(labels, values, &palette)
}

/// Zips labels with values (the shorter side wins) and keeps input order.
pub fn legend_entries_with_palette<S: AsRef<str>>(
    labels: &[S],
    values: &[f64],
    palette: &[String],
) -> Vec<LegendEntry> {
    let total = positive_total(values.iter().take(labels.len()).copied());
    let mut colors = ColorScale::new(palette);
    labels
        .iter()
        .zip(values)
        .map(|(label, &value)| {
            let label = label.as_ref();
            let percent = if total > 0.0 {
                value.max(0.0) / total * 100.0
            } else {
                0.0
            };
            LegendEntry {
                label: label.to_string(),
                value,
                color: colors.color_for(label),
                percent,
            }
        })
        .collect()
}

fn positive_total(values: impl Iterator<Item = f64>) -> f64 {
    values.filter(|v| v.is_finite() && *v > 0.0).sum()
}

fn pie_model<S: AsRef<str>>(
    title: &str,
    labels: &[S],
    values: &[f64],
    config: &ChartConfig,
) -> Option<PieChartModel> {
    let n = labels.len().min(values.len()).min(config.pie_limit);
    if n == 0 {
        return None;
    }
    let entries = legend_entries_with_palette(&labels[..n], &values[..n], &config.palette);
    let total = positive_total(entries.iter().map(|e| e.value));
    let tooltips = entries
        .iter()
        .map(|e| format_tooltip_label(&e.label, e.value, total))
        .collect();
    Some(PieChartModel {
        title: title.to_string(),
        entries,
        tooltips,
        total,
    })
}

/// Messages / media / links totals. Always present; missing counts are already 0.
pub fn activity_bar(results: &AnalyticsResults, config: &ChartConfig) -> BarChartModel {
    let labels = ["Messages", "Media Shared", "Links Shared"];
    let mut colors = ColorScale::new(&config.palette);
    BarChartModel {
        dataset_label: "Chat Analysis".to_string(),
        labels: labels.iter().map(|s| s.to_string()).collect(),
        values: vec![
            results.num_messages as f64,
            results.num_medias as f64,
            results.num_links as f64,
        ],
        colors: labels.iter().map(|l| colors.color_for(l)).collect(),
        begin_at_zero: true,
        show_legend: true,
    }
}

pub fn top_users_pie(results: &AnalyticsResults, config: &ChartConfig) -> Option<PieChartModel> {
    pie_model(
        "Most Active Users",
        &results.top_users,
        &results.message_share,
        config,
    )
}

/// `USER` / `COUNT` rows for the busiest users. Users without a share show a count of `0`.
pub fn top_users_table(results: &AnalyticsResults, config: &ChartConfig) -> Option<TableModel> {
    if results.top_users.is_empty() || results.message_share.is_empty() {
        return None;
    }
    let rows = results
        .top_users
        .iter()
        .take(config.table_limit)
        .enumerate()
        .map(|(i, user)| {
            let count = results.message_share.get(i).copied().unwrap_or(0.0);
            vec![user.clone(), fmt_number(count)]
        })
        .collect();
    Some(TableModel {
        headers: vec!["USER".to_string(), "COUNT".to_string()],
        rows,
    })
}

pub fn emoji_pie(results: &AnalyticsResults, config: &ChartConfig) -> Option<PieChartModel> {
    let labels: Vec<&str> = results.emoji.iter().map(|e| e.emoji.as_str()).collect();
    let values: Vec<f64> = results.emoji.iter().map(|e| e.count as f64).collect();
    pie_model("Emoji Usage", &labels, &values, config)
}

pub fn timeline_chart(
    kind: TimelineKind,
    results: &AnalyticsResults,
    config: &ChartConfig,
) -> Option<LineChartModel> {
    let series = match kind {
        TimelineKind::Daily => &results.daily_timeline,
        TimelineKind::Monthly => &results.monthly_timeline,
        TimelineKind::Hourly => &results.hourly_activity,
    };
    if series.is_empty() {
        return None;
    }
    let color_idx = match kind {
        TimelineKind::Daily => 0,
        TimelineKind::Monthly => 1,
        TimelineKind::Hourly => 2,
    };
    Some(LineChartModel {
        kind,
        dataset_label: kind.title().to_string(),
        labels: series.iter().map(|p| p.label.clone()).collect(),
        values: series.iter().map(|p| p.count).collect(),
        color: config
            .palette
            .get(color_idx % config.palette.len().max(1))
            .cloned()
            .unwrap_or_default(),
    })
}
