//! Lay the weekly series onto a complete calendar grid.
//!
//! The grid always runs from the first to the last observed week in steps of
//! seven days, aligned to the configured anchor weekday. Weeks without
//! observations are handled by `GapPolicy`; the choice never depends on
//! whether the observed weeks happen to look regular.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::aggregate::week_start;
use crate::domain::{GapPolicy, RegularizationReport, WeekAnchor, WeeklyTotal};

/// A weekly series on a fixed cadence, ready for fitting.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularSeries {
    pub weeks: Vec<NaiveDate>,
    pub values: Vec<f64>,
    pub report: RegularizationReport,
}

impl RegularSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn last_week(&self) -> Option<NaiveDate> {
        self.weeks.last().copied()
    }

    pub fn to_totals(&self) -> Vec<WeeklyTotal> {
        self.weeks
            .iter()
            .zip(self.values.iter())
            .map(|(&week_start, &weight_kg)| WeeklyTotal {
                week_start,
                weight_kg,
            })
            .collect()
    }
}

/// Regularize `series` onto the anchored weekly grid.
///
/// Keys that are not on the anchor weekday are moved to their week start and
/// summed with any entry already there.
pub fn regularize(series: &[WeeklyTotal], anchor: WeekAnchor, policy: GapPolicy) -> RegularSeries {
    let mut observed: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for w in series {
        *observed.entry(week_start(w.week_start, anchor)).or_insert(0.0) += w.weight_kg;
    }

    let (Some(&first), Some(&last)) = (observed.keys().next(), observed.keys().next_back()) else {
        return RegularSeries {
            weeks: Vec::new(),
            values: Vec::new(),
            report: RegularizationReport {
                policy,
                observed_weeks: 0,
                missing_weeks: 0,
                points: 0,
            },
        };
    };

    let n_weeks = ((last - first).num_days() / 7) as usize + 1;
    let grid: Vec<(NaiveDate, Option<f64>)> = (0..n_weeks)
        .map(|k| {
            let week = first + Duration::weeks(k as i64);
            (week, observed.get(&week).copied())
        })
        .collect();

    let missing_weeks = grid.iter().filter(|(_, v)| v.is_none()).count();
    if missing_weeks > 0 {
        log::warn!(
            "Weekly series has {missing_weeks} empty week(s) between {first} and {last}; applying gap policy {policy:?}"
        );
    }

    let (weeks, values): (Vec<NaiveDate>, Vec<f64>) = match policy {
        GapPolicy::Zero => grid.iter().map(|&(w, v)| (w, v.unwrap_or(0.0))).unzip(),
        GapPolicy::Drop => grid.iter().filter_map(|&(w, v)| v.map(|v| (w, v))).unzip(),
        GapPolicy::Interpolate => {
            let filled = interpolate_gaps(&grid.iter().map(|(_, v)| *v).collect::<Vec<_>>());
            grid.iter().map(|(w, _)| *w).zip(filled).unzip()
        }
    };

    let report = RegularizationReport {
        policy,
        observed_weeks: observed.len(),
        missing_weeks,
        points: values.len(),
    };
    RegularSeries {
        weeks,
        values,
        report,
    }
}

/// Linear interpolation across `None` runs.
///
/// The first and last entries must be `Some` (they are observed weeks by
/// construction); any leading/trailing gap falls back to the nearest value.
fn interpolate_gaps(values: &[Option<f64>]) -> Vec<f64> {
    let known: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();

    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            if let Some(v) = v {
                return *v;
            }
            let prev = known.iter().rev().find(|(k, _)| *k < i);
            let next = known.iter().find(|(k, _)| *k > i);
            match (prev, next) {
                (Some(&(p, vp)), Some(&(n, vn))) => {
                    let frac = (i - p) as f64 / (n - p) as f64;
                    vp + (vn - vp) * frac
                }
                (Some(&(_, vp)), None) => vp,
                (None, Some(&(_, vn))) => vn,
                (None, None) => 0.0,
            }
        })
        .collect()
}
