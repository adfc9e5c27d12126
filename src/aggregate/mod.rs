//! Descriptive aggregates over validated observations.
//!
//! Every operation here is a sum-reduction over `weight_kg`:
//!
//! - by exact date (`daily_totals`)
//! - by anchored calendar week (`weekly_totals`)
//! - by category label (`totals_by_area`, `totals_by_type`)
//!
//! Nothing here fails; an empty input produces empty aggregates.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::{CategoryTotal, DailyTotal, Observation, WeekAnchor, WeeklyTotal};

/// All descriptive aggregates for one run.
#[derive(Debug, Clone, Default)]
pub struct Aggregates {
    pub daily: Vec<DailyTotal>,
    pub weekly: Vec<WeeklyTotal>,
    pub by_area: Vec<CategoryTotal>,
    pub by_type: Vec<CategoryTotal>,
    pub grand_total: f64,
}

impl Aggregates {
    pub fn compute(observations: &[Observation], anchor: WeekAnchor) -> Self {
        Self {
            daily: daily_totals(observations),
            weekly: weekly_totals(observations, anchor),
            by_area: totals_by_area(observations),
            by_type: totals_by_type(observations),
            grand_total: observations.iter().map(|o| o.weight_kg).sum(),
        }
    }
}

/// The anchor weekday on or before `date`.
pub fn week_start(date: NaiveDate, anchor: WeekAnchor) -> NaiveDate {
    let today = date.weekday().num_days_from_monday() as i64;
    let anchor = anchor.weekday().num_days_from_monday() as i64;
    let back = (today - anchor).rem_euclid(7);
    date - Duration::days(back)
}

/// Sum per calendar date, ascending by date.
pub fn daily_totals(observations: &[Observation]) -> Vec<DailyTotal> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for obs in observations {
        *by_date.entry(obs.date).or_insert(0.0) += obs.weight_kg;
    }
    by_date
        .into_iter()
        .map(|(date, weight_kg)| DailyTotal { date, weight_kg })
        .collect()
}

/// Sum per anchored week, strictly ascending by week start.
///
/// The forecaster relies on this ordering.
pub fn weekly_totals(observations: &[Observation], anchor: WeekAnchor) -> Vec<WeeklyTotal> {
    let mut by_week: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for obs in observations {
        *by_week.entry(week_start(obs.date, anchor)).or_insert(0.0) += obs.weight_kg;
    }
    by_week
        .into_iter()
        .map(|(week_start, weight_kg)| WeeklyTotal {
            week_start,
            weight_kg,
        })
        .collect()
}

pub fn totals_by_area(observations: &[Observation]) -> Vec<CategoryTotal> {
    totals_by(observations, |o| o.area.as_str())
}

pub fn totals_by_type(observations: &[Observation]) -> Vec<CategoryTotal> {
    totals_by(observations, |o| o.waste_type.as_str())
}

/// Sum per label, sorted descending by total (ties by label ascending).
pub fn totals_by<'a, F>(observations: &'a [Observation], key: F) -> Vec<CategoryTotal>
where
    F: Fn(&'a Observation) -> &'a str,
{
    let mut by_label: HashMap<&str, f64> = HashMap::new();
    for obs in observations {
        *by_label.entry(key(obs)).or_insert(0.0) += obs.weight_kg;
    }

    let mut out: Vec<CategoryTotal> = by_label
        .into_iter()
        .map(|(label, weight_kg)| CategoryTotal {
            label: label.to_string(),
            weight_kg,
        })
        .collect();
    out.sort_by(|a, b| {
        b.weight_kg
            .partial_cmp(&a.weight_kg)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.label.cmp(&b.label))
    });
    out
}
