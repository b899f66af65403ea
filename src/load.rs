//! Load aggregation: trailing-window chronic/acute means and training
//! stress balance.
//!
//! Despite the "EWMA 42j/7j" naming the domain uses, both loads are
//! fixed-divisor windowed means: the trailing sum is always divided by the
//! full window length, even when fewer days carry data. Early-series values
//! are therefore biased toward zero until a full window of history exists.
//! That behavior is intentional and pinned by tests.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CHRONIC_WINDOW_DAYS: i64 = 42;
pub const ACUTE_WINDOW_DAYS: i64 = 7;

/// ---------------------------------------------------------------------------
/// Load Series
/// ---------------------------------------------------------------------------

/// Derived load for one calendar day.
///
/// The aggregator emits exactly one point per day of the requested range,
/// inclusive, with no gaps; days without activity carry zeros, not holes.
/// Edwards fields are populated only when the Edwards series was requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadPoint {
  pub date: NaiveDate,
  pub chronic_load: f64,
  pub acute_load: f64,
  pub training_stress_balance: f64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub chronic_load_edwards: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub acute_load_edwards: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub training_stress_balance_edwards: Option<f64>,
}

/// TSB sign convention, pinned: `acute - chronic`. A positive balance means
/// the short-term load runs above the long-term base.
pub fn training_stress_balance(chronic: f64, acute: f64) -> f64 {
  acute - chronic
}

/// Mean of the trailing `window_days`-day window ending at `end` inclusive.
/// Missing days contribute 0; the divisor is always the window length.
fn windowed_mean(daily: &BTreeMap<NaiveDate, f64>, end: NaiveDate, window_days: i64) -> f64 {
  let start = end - Duration::days(window_days - 1);
  let sum: f64 = daily.range(start..=end).map(|(_, value)| *value).sum();
  sum / window_days as f64
}

/// Chronic/acute load series over `[range_start, range_end]` for one daily
/// impulse series.
pub fn aggregate_load(
  daily: &BTreeMap<NaiveDate, f64>,
  range_start: NaiveDate,
  range_end: NaiveDate,
) -> Vec<LoadPoint> {
  let mut points = Vec::new();
  let mut day = range_start;
  while day <= range_end {
    let chronic = windowed_mean(daily, day, CHRONIC_WINDOW_DAYS);
    let acute = windowed_mean(daily, day, ACUTE_WINDOW_DAYS);
    points.push(LoadPoint {
      date: day,
      chronic_load: chronic,
      acute_load: acute,
      training_stress_balance: training_stress_balance(chronic, acute),
      chronic_load_edwards: None,
      acute_load_edwards: None,
      training_stress_balance_edwards: None,
    });
    day = day + Duration::days(1);
  }
  points
}

/// Banister series with the Edwards series merged into the same rows.
pub fn aggregate_dual_load(
  banister_daily: &BTreeMap<NaiveDate, f64>,
  edwards_daily: &BTreeMap<NaiveDate, f64>,
  range_start: NaiveDate,
  range_end: NaiveDate,
) -> Vec<LoadPoint> {
  let mut points = aggregate_load(banister_daily, range_start, range_end);
  for point in &mut points {
    let chronic = windowed_mean(edwards_daily, point.date, CHRONIC_WINDOW_DAYS);
    let acute = windowed_mean(edwards_daily, point.date, ACUTE_WINDOW_DAYS);
    point.chronic_load_edwards = Some(chronic);
    point.acute_load_edwards = Some(acute);
    point.training_stress_balance_edwards = Some(training_stress_balance(chronic, acute));
  }
  points
}

/// ---------------------------------------------------------------------------
/// Balance Classification
/// ---------------------------------------------------------------------------

/// Five-zone TSB classification used by the form/freshness card.
/// Wire labels match what the consumers already render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TsbZone {
  #[serde(rename = "surcharge")]
  Surcharge,
  #[serde(rename = "fatigue")]
  Fatigue,
  #[serde(rename = "optimal")]
  Optimal,
  #[serde(rename = "frais")]
  Frais,
  #[serde(rename = "tres_frais")]
  TresFrais,
}

impl TsbZone {
  pub fn classify(tsb: f64) -> Self {
    if tsb < -25.0 {
      TsbZone::Surcharge
    } else if tsb < -10.0 {
      TsbZone::Fatigue
    } else if tsb <= 10.0 {
      TsbZone::Optimal
    } else if tsb <= 25.0 {
      TsbZone::Frais
    } else {
      TsbZone::TresFrais
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      TsbZone::Surcharge => "surcharge",
      TsbZone::Fatigue => "fatigue",
      TsbZone::Optimal => "optimal",
      TsbZone::Frais => "frais",
      TsbZone::TresFrais => "tres_frais",
    }
  }
}

/// Coarser three-bucket classification used by a different consumer.
/// Thresholds and labels differ from [`TsbZone`] on purpose; the two are
/// distinct operations, not variants of one scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormState {
  Recovery,
  Balanced,
  Overreaching,
}

impl FormState {
  pub fn classify(tsb: f64) -> Self {
    if tsb > 10.0 {
      FormState::Recovery
    } else if tsb < -10.0 {
      FormState::Overreaching
    } else {
      FormState::Balanced
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::date;

  fn constant_series(start: &str, days: i64, value: f64) -> BTreeMap<NaiveDate, f64> {
    let start = date(start);
    (0..days).map(|i| (start + Duration::days(i), value)).collect()
  }

  #[test]
  fn test_constant_impulse_converges_to_itself() {
    // 60 days at 70: both windows are saturated, so both means equal 70
    let daily = constant_series("2026-06-01", 60, 70.0);
    let points = aggregate_load(&daily, date("2026-07-30"), date("2026-07-30"));

    assert_eq!(points.len(), 1);
    assert!((points[0].chronic_load - 70.0).abs() < 1e-9);
    assert!((points[0].acute_load - 70.0).abs() < 1e-9);
    assert!(points[0].training_stress_balance.abs() < 1e-9);
  }

  #[test]
  fn test_fixed_divisor_biases_short_history_toward_zero() {
    // Only 7 days of history at 70: acute saturates, chronic divides by 42
    let daily = constant_series("2026-08-01", 7, 70.0);
    let points = aggregate_load(&daily, date("2026-08-07"), date("2026-08-07"));

    assert!((points[0].acute_load - 70.0).abs() < 1e-9);
    let expected_chronic = 7.0 * 70.0 / 42.0;
    assert!(
      (points[0].chronic_load - expected_chronic).abs() < 1e-9,
      "divisor must stay 42 even with 7 days of data"
    );
  }

  #[test]
  fn test_tsb_sign_convention_is_acute_minus_chronic() {
    assert_eq!(training_stress_balance(50.0, 60.0), 10.0);
    assert_eq!(training_stress_balance(60.0, 50.0), -10.0);
  }

  #[test]
  fn test_one_point_per_day_with_no_gaps() {
    // Sparse input: activity on 2 of 10 requested days
    let mut daily = BTreeMap::new();
    daily.insert(date("2026-08-02"), 50.0);
    daily.insert(date("2026-08-08"), 80.0);

    let points = aggregate_load(&daily, date("2026-08-01"), date("2026-08-10"));

    assert_eq!(points.len(), 10);
    for (i, point) in points.iter().enumerate() {
      assert_eq!(point.date, date("2026-08-01") + Duration::days(i as i64));
    }
    // A day before any activity still gets an explicit zero point
    assert_eq!(points[0].chronic_load, 0.0);
    assert_eq!(points[0].acute_load, 0.0);
  }

  #[test]
  fn test_dual_load_merges_edwards_fields() {
    let banister = constant_series("2026-08-01", 7, 42.0);
    let edwards = constant_series("2026-08-01", 7, 84.0);

    let points =
      aggregate_dual_load(&banister, &edwards, date("2026-08-07"), date("2026-08-07"));

    let point = &points[0];
    assert!((point.acute_load - 42.0).abs() < 1e-9);
    assert!((point.acute_load_edwards.unwrap() - 84.0).abs() < 1e-9);
    assert!(point.chronic_load_edwards.is_some());
    assert!(point.training_stress_balance_edwards.is_some());
  }

  #[test]
  fn test_five_zone_thresholds() {
    assert_eq!(TsbZone::classify(-30.0), TsbZone::Surcharge);
    assert_eq!(TsbZone::classify(-25.0), TsbZone::Fatigue);
    assert_eq!(TsbZone::classify(-10.0), TsbZone::Optimal);
    assert_eq!(TsbZone::classify(0.0), TsbZone::Optimal);
    assert_eq!(TsbZone::classify(10.0), TsbZone::Optimal);
    assert_eq!(TsbZone::classify(10.1), TsbZone::Frais);
    assert_eq!(TsbZone::classify(25.0), TsbZone::Frais);
    assert_eq!(TsbZone::classify(25.1), TsbZone::TresFrais);
  }

  #[test]
  fn test_three_bucket_form_state() {
    assert_eq!(FormState::classify(15.0), FormState::Recovery);
    assert_eq!(FormState::classify(10.0), FormState::Balanced);
    assert_eq!(FormState::classify(-10.0), FormState::Balanced);
    assert_eq!(FormState::classify(-11.0), FormState::Overreaching);
  }
}
