//! Volume trend: weekly running distance over the last four ISO weeks.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::impulse::is_running_type;
use crate::models::ActivityRecord;

pub const MIN_ACTIVITIES: usize = 3;
/// Current week plus the three preceding ones.
const WEEKS_TRACKED: i64 = 4;

/// Distance total for one Monday-aligned week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyDistance {
  pub week_start: NaiveDate,
  pub distance_km: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeTrendInsight {
  pub has_data: bool,
  pub sample_count: usize,
  /// Oldest week first; the last entry is the current week.
  pub weeks: Vec<WeeklyDistance>,
  /// Current week vs the immediately preceding one; `None` when the
  /// preceding week had no distance.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub change_pct: Option<f64>,
}

impl VolumeTrendInsight {
  fn no_data(sample_count: usize) -> Self {
    Self {
      has_data: false,
      sample_count,
      weeks: Vec::new(),
      change_pct: None,
    }
  }
}

/// Monday of the ISO week containing `date`.
fn week_start(date: NaiveDate) -> NaiveDate {
  date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Weekly running distance for the current week and the three before it,
/// relative to `reference_date` (the analytics range end).
pub fn volume_trend(activities: &[ActivityRecord], reference_date: NaiveDate) -> VolumeTrendInsight {
  let runs: Vec<&ActivityRecord> = activities
    .iter()
    .filter(|activity| is_running_type(&activity.activity_type))
    .collect();
  if runs.len() < MIN_ACTIVITIES {
    return VolumeTrendInsight::no_data(runs.len());
  }

  let current_week = week_start(reference_date);
  let mut weeks = Vec::new();
  for offset in (0..WEEKS_TRACKED).rev() {
    let start = current_week - Duration::days(7 * offset);
    let end = start + Duration::days(6);
    let meters: f64 = runs
      .iter()
      .filter(|activity| {
        let date = activity.date();
        date >= start && date <= end
      })
      .map(|activity| activity.distance_meters)
      .sum();
    weeks.push(WeeklyDistance {
      week_start: start,
      distance_km: meters / 1000.0,
    });
  }

  let current = weeks[weeks.len() - 1].distance_km;
  let previous = weeks[weeks.len() - 2].distance_km;
  let change_pct = if previous > 0.0 {
    Some((current - previous) / previous * 100.0)
  } else {
    None
  };

  VolumeTrendInsight {
    has_data: true,
    sample_count: runs.len(),
    weeks,
    change_pct,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{date, run_with_distance};

  #[test]
  fn test_weeks_are_monday_aligned() {
    // 2026-08-12 is a Wednesday; its week starts Monday 2026-08-10
    assert_eq!(week_start(date("2026-08-12")), date("2026-08-10"));
    assert_eq!(week_start(date("2026-08-10")), date("2026-08-10"));
    assert_eq!(week_start(date("2026-08-16")), date("2026-08-10"));
  }

  #[test]
  fn test_change_against_preceding_week() {
    // Previous week 20 km, current week 25 km -> +25%
    let activities = vec![
      run_with_distance(1, "2026-08-04", 10_000.0),
      run_with_distance(2, "2026-08-06", 10_000.0),
      run_with_distance(3, "2026-08-11", 15_000.0),
      run_with_distance(4, "2026-08-13", 10_000.0),
    ];

    let insight = volume_trend(&activities, date("2026-08-14"));

    assert!(insight.has_data);
    assert_eq!(insight.weeks.len(), 4);
    assert_eq!(insight.weeks[2].distance_km, 20.0);
    assert_eq!(insight.weeks[3].distance_km, 25.0);
    let change = insight.change_pct.unwrap();
    assert!((change - 25.0).abs() < 1e-9);
  }

  #[test]
  fn test_change_is_none_when_previous_week_empty() {
    let activities = vec![
      run_with_distance(1, "2026-08-11", 10_000.0),
      run_with_distance(2, "2026-08-12", 10_000.0),
      run_with_distance(3, "2026-08-13", 10_000.0),
    ];

    let insight = volume_trend(&activities, date("2026-08-14"));
    assert!(insight.has_data);
    assert_eq!(insight.change_pct, None);
  }

  #[test]
  fn test_below_minimum_activities() {
    let activities = vec![
      run_with_distance(1, "2026-08-11", 10_000.0),
      run_with_distance(2, "2026-08-12", 10_000.0),
    ];

    let insight = volume_trend(&activities, date("2026-08-14"));
    assert!(!insight.has_data);
    assert_eq!(insight.sample_count, 2);
  }
}
