//! Orchestrator: compose the full load series and the insight bundle for a
//! date range.
//!
//! The only loud failure path lives here: malformed or inverted date
//! ranges. Everything downstream is a pure transformation that degrades to
//! `has_data = false` instead of erroring.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::impulse::{daily_impulse, TrimpModel};
use crate::insights::{
  best_day_of_week, hrv_performance, recovery_performance, sleep_load, tsb_zone, volume_trend,
  weather_heart_rate, BestDayInsight, HrvPerformanceInsight, RecoveryPerformanceInsight,
  SleepLoadInsight, TsbZoneInsight, VolumeTrendInsight, WeatherHeartRateInsight,
};
use crate::load::{aggregate_dual_load, LoadPoint};
use crate::models::{ActivityRecord, DailyBiometricEntry, WeatherByActivity};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// ---------------------------------------------------------------------------
/// Date Range
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum InvalidRangeError {
  #[error("malformed date '{0}': expected YYYY-MM-DD")]
  MalformedDate(String),

  #[error("range start {start} is after end {end}")]
  Inverted { start: NaiveDate, end: NaiveDate },
}

/// Inclusive calendar-day range, validated at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
  pub start: NaiveDate,
  pub end: NaiveDate,
}

impl DateRange {
  pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, InvalidRangeError> {
    if start > end {
      return Err(InvalidRangeError::Inverted { start, end });
    }
    Ok(Self { start, end })
  }

  /// Parse a `YYYY-MM-DD` pair as supplied by callers over the library
  /// boundary.
  pub fn parse(start: &str, end: &str) -> Result<Self, InvalidRangeError> {
    let start = NaiveDate::parse_from_str(start, DATE_FORMAT)
      .map_err(|_| InvalidRangeError::MalformedDate(start.to_string()))?;
    let end = NaiveDate::parse_from_str(end, DATE_FORMAT)
      .map_err(|_| InvalidRangeError::MalformedDate(end.to_string()))?;
    Self::new(start, end)
  }
}

/// ---------------------------------------------------------------------------
/// Report
/// ---------------------------------------------------------------------------

/// The seven correlation insights, each independently null-safe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightBundle {
  pub recovery_performance: RecoveryPerformanceInsight,
  pub weather_heart_rate: WeatherHeartRateInsight,
  pub sleep_load: SleepLoadInsight,
  pub hrv_performance: HrvPerformanceInsight,
  pub volume_trend: VolumeTrendInsight,
  pub best_day: BestDayInsight,
  pub tsb_zone: TsbZoneInsight,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
  pub range: DateRange,
  /// One point per calendar day of the range, both impulse models.
  pub load_series: Vec<LoadPoint>,
  pub insights: InsightBundle,
}

/// Full analytics pass over already-fetched input collections.
///
/// Pure and deterministic: identical inputs produce bit-identical output.
/// The relative analyzers (sleep/load window, weekly volume) anchor on the
/// range end.
pub fn analyze(
  range: DateRange,
  activities: &[ActivityRecord],
  biometrics: &[DailyBiometricEntry],
  weather: &WeatherByActivity,
) -> AnalyticsReport {
  debug!(
    start = %range.start,
    end = %range.end,
    activities = activities.len(),
    biometric_days = biometrics.len(),
    "computing analytics report"
  );

  let banister_daily = daily_impulse(activities, TrimpModel::Banister);
  let edwards_daily = daily_impulse(activities, TrimpModel::Edwards);
  let load_series = aggregate_dual_load(&banister_daily, &edwards_daily, range.start, range.end);

  let insights = InsightBundle {
    recovery_performance: recovery_performance(activities, biometrics),
    weather_heart_rate: weather_heart_rate(activities, weather),
    sleep_load: sleep_load(activities, biometrics, range.end),
    hrv_performance: hrv_performance(activities, biometrics),
    volume_trend: volume_trend(activities, range.end),
    best_day: best_day_of_week(activities),
    tsb_zone: tsb_zone(&load_series),
  };

  AnalyticsReport {
    range,
    load_series,
    insights,
  }
}

/// String-boundary entry point: validates the range, then delegates to
/// [`analyze`].
pub fn analyze_range(
  start: &str,
  end: &str,
  activities: &[ActivityRecord],
  biometrics: &[DailyBiometricEntry],
  weather: &WeatherByActivity,
) -> Result<AnalyticsReport, InvalidRangeError> {
  let range = DateRange::parse(start, end)?;
  Ok(analyze(range, activities, biometrics, weather))
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
