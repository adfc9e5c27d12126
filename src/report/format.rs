//! Formatted terminal output.
//!
//! Kept apart from rendering so console text can change without touching
//! chart or table code.

use std::path::Path;

use crate::aggregate::Aggregates;
use crate::domain::{ForecastResult, GapPolicy, Peak};
use crate::io::ingest::IngestStats;

/// Dataset and fit overview printed before the peak line.
pub fn format_run_summary(stats: &IngestStats, agg: &Aggregates, forecast: Option<&ForecastResult>) -> String {
    let mut out = String::new();

    out.push_str("=== waste - Weekly Waste Trends ===\n");
    out.push_str(&format!(
        "Rows: read={} | used={} | dropped={} (date={}, weight={})\n",
        stats.rows_read,
        stats.rows_used,
        stats.rows_dropped(),
        stats.dropped_date,
        stats.dropped_weight
    ));

    match (agg.daily.first(), agg.daily.last()) {
        (Some(first), Some(last)) => out.push_str(&format!(
            "Days: {} ({} .. {}) | weeks={} | total={:.2} kg\n",
            agg.daily.len(),
            first.date,
            last.date,
            agg.weekly.len(),
            agg.grand_total
        )),
        _ => out.push_str("Days: 0 | weeks=0 | total=0.00 kg\n"),
    }
    out.push_str(&format!(
        "Categories: areas={} | types={}\n",
        agg.by_area.len(),
        agg.by_type.len()
    ));

    if let Some(f) = forecast {
        let reg = &f.regularization;
        out.push_str(&format!(
            "Grid: {} weeks ({} observed, {} missing, policy={})\n",
            reg.points,
            reg.observed_weeks,
            reg.missing_weeks,
            policy_name(reg.policy)
        ));
        out.push_str(&format!(
            "Holt: alpha={:.3} beta={:.3} level={:.2} trend={:+.2}/week RMSE={:.2} kg\n",
            f.model.alpha, f.model.beta, f.model.level, f.model.trend, f.model.rmse
        ));
    }

    out
}

/// The single result sentence.
pub fn format_peak(peak: &Peak) -> String {
    format!(
        "Predicted peak waste generation is in the week starting {}, with an estimated value of {:.2} kg.",
        peak.week_start.format("%Y-%m-%d"),
        peak.value
    )
}

/// `Saved: <absolute path>`; falls back to the path as given if it cannot be
/// made absolute.
pub fn format_saved(path: &Path) -> String {
    let shown = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    format!("Saved: {}", shown.display())
}

fn policy_name(policy: GapPolicy) -> &'static str {
    match policy {
        GapPolicy::Zero => "zero",
        GapPolicy::Interpolate => "interpolate",
        GapPolicy::Drop => "drop",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn peak_line_uses_iso_date_and_two_decimals() {
        let peak = Peak {
            index: 3,
            week_start: NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
            value: 219.999,
        };
        assert_eq!(
            format_peak(&peak),
            "Predicted peak waste generation is in the week starting 2024-02-05, with an estimated value of 220.00 kg."
        );
    }

    #[test]
    fn saved_line_is_absolute() {
        let line = format_saved(Path::new("weekly_trend.csv"));
        let shown = line.strip_prefix("Saved: ").unwrap();
        assert!(Path::new(shown).is_absolute());
        assert!(shown.ends_with("weekly_trend.csv"));
    }

    #[test]
    fn summary_without_forecast_reports_counts() {
        let stats = IngestStats {
            rows_read: 10,
            rows_used: 7,
            dropped_date: 2,
            dropped_weight: 1,
        };
        let agg = Aggregates::compute(&[], crate::domain::WeekAnchor::Monday);
        let text = format_run_summary(&stats, &agg, None);
        assert!(text.contains("read=10 | used=7 | dropped=3 (date=2, weight=1)"));
        assert!(text.contains("Days: 0"));
        assert!(!text.contains("Holt:"));
    }
}
