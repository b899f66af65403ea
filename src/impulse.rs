//! Impulse estimation: one workout in, one training-impulse scalar out.
//!
//! Two models coexist. Banister TRIMP works from average heart rate and
//! always yields a value thanks to a pace-based fallback; Edwards TRIMP
//! needs the per-zone time breakdown and yields nothing without it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::ActivityRecord;

/// ---------------------------------------------------------------------------
/// Model Constants
/// ---------------------------------------------------------------------------

/// Age assumed when no max HR is on record (max HR = 220 - age).
const ASSUMED_AGE: f64 = 35.0;
const BANISTER_WEIGHT: f64 = 0.64;
const BANISTER_EXPONENT: f64 = 1.92;
/// Scale applied to the pace-intensity coefficient for HR-less activities.
const FALLBACK_IMPULSE_SCALE: f64 = 100.0;
/// Edwards weights for zones z1..z5 (50/60/70/80/90 %HRmax bands).
const EDWARDS_ZONE_WEIGHTS: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

/// ---------------------------------------------------------------------------
/// Impulse Models
/// ---------------------------------------------------------------------------

/// Closed set of supported TRIMP models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimpModel {
  Banister,
  Edwards,
}

impl TrimpModel {
  /// Training impulse for one activity under this model.
  ///
  /// Banister is total: it falls back to a pace-derived estimate when HR is
  /// missing. Edwards returns `None` without a zone breakdown; the activity
  /// is then excluded from the Edwards series, never counted as zero.
  pub fn estimate(self, activity: &ActivityRecord) -> Option<f64> {
    match self {
      TrimpModel::Banister => Some(banister_trimp(activity)),
      TrimpModel::Edwards => edwards_trimp(activity),
    }
  }
}

/// Banister TRIMP: `hours * avg_hr * 0.64 * e^(1.92 * avg_hr / max_hr)`.
///
/// Falls back to `hours * pace_intensity * 100` when no average HR was
/// recorded.
pub fn banister_trimp(activity: &ActivityRecord) -> f64 {
  let hours = activity.duration_hours();
  match activity.average_heartrate {
    Some(avg_hr) if avg_hr > 0 => {
      let avg_hr = avg_hr as f64;
      let max_hr = effective_max_hr(activity);
      hours * avg_hr * BANISTER_WEIGHT * (BANISTER_EXPONENT * avg_hr / max_hr).exp()
    }
    _ => hours * pace_intensity(activity.pace_min_per_km()) * FALLBACK_IMPULSE_SCALE,
  }
}

/// Edwards TRIMP: zone minutes weighted 1..5 across the five %HRmax bands.
pub fn edwards_trimp(activity: &ActivityRecord) -> Option<f64> {
  let zones = activity.zone_minutes?;
  let minutes = [zones.z1, zones.z2, zones.z3, zones.z4, zones.z5];
  let mut trimp = 0.0;
  for (minutes_in_zone, weight) in minutes.iter().zip(EDWARDS_ZONE_WEIGHTS.iter()) {
    trimp += minutes_in_zone * weight;
  }
  Some(trimp)
}

fn effective_max_hr(activity: &ActivityRecord) -> f64 {
  match activity.max_heartrate {
    Some(max_hr) if max_hr > 0 => max_hr as f64,
    _ => 220.0 - ASSUMED_AGE,
  }
}

/// Intensity coefficient from average pace (min/km), for HR-less activities.
/// Unknown or zero pace gets the easiest coefficient.
fn pace_intensity(pace_min_per_km: Option<f64>) -> f64 {
  match pace_min_per_km {
    Some(pace) if pace > 0.0 => {
      if pace < 4.0 {
        0.9
      } else if pace < 5.0 {
        0.8
      } else if pace < 6.0 {
        0.7
      } else if pace < 7.0 {
        0.6
      } else {
        0.5
      }
    }
    _ => 0.5,
  }
}

/// ---------------------------------------------------------------------------
/// Running Filter & Daily Rollup
/// ---------------------------------------------------------------------------

/// Running-like sport types. The load model is running-specific; every other
/// activity type is excluded from load computation entirely.
pub fn is_running_type(activity_type: &str) -> bool {
  let normalized: String = activity_type
    .chars()
    .filter(|c| c.is_ascii_alphanumeric())
    .collect::<String>()
    .to_lowercase();
  matches!(
    normalized.as_str(),
    "run" | "trailrun" | "virtualrun" | "treadmillrun"
  )
}

/// One derived daily impulse value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpulseSample {
  pub date: NaiveDate,
  pub value: f64,
}

/// Per-day impulse totals for running activities under `model`.
///
/// Same-day activities are summed in input order so repeated runs produce
/// bit-identical results. Activities the model cannot score are skipped.
pub fn daily_impulse(
  activities: &[ActivityRecord],
  model: TrimpModel,
) -> BTreeMap<NaiveDate, f64> {
  let mut daily = BTreeMap::new();
  for activity in activities {
    if !is_running_type(&activity.activity_type) {
      continue;
    }
    if let Some(value) = model.estimate(activity) {
      *daily.entry(activity.date()).or_insert(0.0) += value;
    }
  }
  daily
}

/// The daily rollup as a date-ordered sample series.
pub fn impulse_samples(activities: &[ActivityRecord], model: TrimpModel) -> Vec<ImpulseSample> {
  daily_impulse(activities, model)
    .into_iter()
    .map(|(date, value)| ImpulseSample { date, value })
    .collect()
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::HrZoneMinutes;
  use crate::test_utils::{activity_on, run_on};

  #[test]
  fn test_banister_worked_example() {
    // 1h at avg HR 150 with max HR 185:
    // 1 * 150 * 0.64 * e^(1.92 * 150/185) ~= 455.4
    let mut activity = run_on(1, "2026-08-01", 3600, None, Some(150));
    activity.max_heartrate = Some(185);

    let trimp = banister_trimp(&activity);
    assert!(
      (trimp - 455.4).abs() < 0.5,
      "expected ~455.4, got {}",
      trimp
    );
  }

  #[test]
  fn test_banister_assumes_max_hr_when_absent() {
    // Without a recorded max HR the model uses 220 - 35 = 185
    let with_max = {
      let mut a = run_on(1, "2026-08-01", 3600, None, Some(150));
      a.max_heartrate = Some(185);
      a
    };
    let without_max = run_on(2, "2026-08-01", 3600, None, Some(150));

    assert_eq!(banister_trimp(&with_max), banister_trimp(&without_max));
  }

  #[test]
  fn test_pace_fallback_breakpoints() {
    // 1h runs at paces straddling each breakpoint; impulse = intensity * 100
    let cases = [
      (3.5, 90.0),
      (4.5, 80.0),
      (5.5, 70.0),
      (6.5, 60.0),
      (8.0, 50.0),
    ];
    for (pace, expected) in cases {
      let speed = 1000.0 / (pace * 60.0);
      let activity = run_on(1, "2026-08-01", 3600, Some(speed), None);
      let trimp = banister_trimp(&activity);
      assert!(
        (trimp - expected).abs() < 1e-6,
        "pace {} should give {}, got {}",
        pace,
        expected,
        trimp
      );
    }
  }

  #[test]
  fn test_pace_fallback_defaults_when_pace_unknown() {
    // No HR and no speed: easiest coefficient, 1h -> 50
    let activity = run_on(1, "2026-08-01", 3600, None, None);
    assert!((banister_trimp(&activity) - 50.0).abs() < 1e-6);
  }

  #[test]
  fn test_edwards_weights_zones() {
    let mut activity = run_on(1, "2026-08-01", 3600, None, Some(150));
    activity.zone_minutes = Some(HrZoneMinutes {
      z1: 10.0,
      z2: 20.0,
      z3: 15.0,
      z4: 10.0,
      z5: 5.0,
    });

    // 10*1 + 20*2 + 15*3 + 10*4 + 5*5 = 160
    assert_eq!(edwards_trimp(&activity), Some(160.0));
  }

  #[test]
  fn test_edwards_is_null_without_zone_breakdown() {
    let activity = run_on(1, "2026-08-01", 3600, None, Some(150));
    assert_eq!(edwards_trimp(&activity), None);
    assert_eq!(TrimpModel::Edwards.estimate(&activity), None);
  }

  #[test]
  fn test_running_filter_accepts_variants() {
    assert!(is_running_type("Run"));
    assert!(is_running_type("TrailRun"));
    assert!(is_running_type("VirtualRun"));
    assert!(is_running_type("trail_run"));
    assert!(!is_running_type("Ride"));
    assert!(!is_running_type("Swim"));
    assert!(!is_running_type("Walk"));
  }

  #[test]
  fn test_daily_impulse_sums_same_day_and_skips_non_runs() {
    let activities = vec![
      run_on(1, "2026-08-01", 3600, None, None), // 50
      run_on(2, "2026-08-01", 3600, None, None), // 50, same day
      activity_on(3, "Ride", "2026-08-01", 7200, None, Some(140)),
      run_on(4, "2026-08-02", 3600, None, None), // 50
    ];

    let daily = daily_impulse(&activities, TrimpModel::Banister);
    assert_eq!(daily.len(), 2);
    let first = daily.get(&crate::test_utils::date("2026-08-01")).unwrap();
    assert!((first - 100.0).abs() < 1e-6);
    let second = daily.get(&crate::test_utils::date("2026-08-02")).unwrap();
    assert!((second - 50.0).abs() < 1e-6);
  }

  #[test]
  fn test_impulse_samples_are_date_ordered() {
    let activities = vec![
      run_on(1, "2026-08-03", 3600, None, None),
      run_on(2, "2026-08-01", 3600, None, None),
    ];

    let samples = impulse_samples(&activities, TrimpModel::Banister);
    assert_eq!(samples.len(), 2);
    assert!(samples[0].date < samples[1].date);
  }
}
