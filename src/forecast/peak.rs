//! Peak detection over the projected weeks.

use chrono::{Duration, NaiveDate};

use crate::domain::{ForecastPoint, Peak};

/// Week starts for `horizon` weeks following `last_week`.
pub fn future_weeks(last_week: NaiveDate, horizon: usize) -> Vec<NaiveDate> {
    (1..=horizon)
        .map(|h| last_week + Duration::weeks(h as i64))
        .collect()
}

/// First projected week holding the maximum value.
///
/// Ties resolve to the earliest week. Returns `None` for an empty forecast.
pub fn locate_peak(points: &[ForecastPoint]) -> Option<Peak> {
    let mut best: Option<Peak> = None;
    for (index, p) in points.iter().enumerate() {
        let better = match best {
            None => true,
            Some(b) => p.predicted_weight_kg > b.value,
        };
        if better {
            best = Some(Peak {
                index,
                week_start: p.week_start,
                value: p.predicted_weight_kg,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn points(last: NaiveDate, values: &[f64]) -> Vec<ForecastPoint> {
        future_weeks(last, values.len())
            .into_iter()
            .zip(values.iter())
            .map(|(week_start, &predicted_weight_kg)| ForecastPoint {
                week_start,
                predicted_weight_kg,
            })
            .collect()
    }

    #[test]
    fn future_weeks_continue_the_cadence() {
        let weeks = future_weeks(d(2024, 1, 15), 4);
        assert_eq!(weeks, vec![d(2024, 1, 22), d(2024, 1, 29), d(2024, 2, 5), d(2024, 2, 12)]);
    }

    #[test]
    fn tie_resolves_to_first_week() {
        let pts = points(d(2024, 1, 15), &[10.0, 15.0, 15.0, 5.0]);
        let peak = locate_peak(&pts).unwrap();
        assert_eq!(peak.index, 1);
        assert_eq!(peak.week_start, d(2024, 1, 29));
        assert_eq!(peak.value, 15.0);
    }

    #[test]
    fn increasing_forecast_peaks_at_the_end() {
        let pts = points(d(2024, 1, 15), &[1.0, 2.0, 3.0, 4.0]);
        let peak = locate_peak(&pts).unwrap();
        assert_eq!(peak.index, 3);
        assert_eq!(peak.week_start, d(2024, 2, 12));
    }

    #[test]
    fn all_equal_values_pick_index_zero() {
        let pts = points(d(2024, 1, 15), &[7.0, 7.0, 7.0, 7.0]);
        assert_eq!(locate_peak(&pts).unwrap().index, 0);
    }

    #[test]
    fn empty_forecast_has_no_peak() {
        assert!(locate_peak(&[]).is_none());
    }
}
