//! Correlation insight engine.
//!
//! Seven independent analyzers pair the activity collection with one
//! auxiliary collection (biometrics, weather, or the load series) and
//! produce descriptive comparisons. Every analyzer is null-safe on its own:
//! a missing auxiliary input never blocks the others, and results below the
//! analyzer's minimum sample count come back as `has_data = false` rather
//! than errors.

pub mod best_day;
pub mod form;
pub mod hrv;
pub mod recovery;
pub mod sleep;
pub mod volume;
pub mod weather;

pub use best_day::{best_day_of_week, BestDayInsight};
pub use form::{tsb_zone, TsbTrend, TsbZoneInsight};
pub use hrv::{hrv_performance, HrvPerformanceInsight, PaceTrend};
pub use recovery::{recovery_performance, ComparisonMetric, RecoveryPerformanceInsight};
pub use sleep::{sleep_load, SleepLoadInsight, SleepLoadState};
pub use volume::{volume_trend, VolumeTrendInsight, WeeklyDistance};
pub use weather::{weather_heart_rate, WeatherHeartRateInsight};

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::impulse::is_running_type;
use crate::models::{ActivityRecord, DailyBiometricEntry};

/// Mean of a slice; `None` for an empty group so no division produces NaN.
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
  if values.is_empty() {
    None
  } else {
    Some(values.iter().sum::<f64>() / values.len() as f64)
  }
}

/// Percentage delta of `high` against the `low` baseline:
/// `(low - high) / low * 100`. Positive means the high group did better
/// (lower pace, lower HR). `None` when the baseline is zero.
pub(crate) fn pct_delta(low: f64, high: f64) -> Option<f64> {
  if low == 0.0 {
    None
  } else {
    Some((low - high) / low * 100.0)
  }
}

/// Index biometric entries by date. Upstream guarantees at most one entry
/// per date; a duplicate would simply shadow the earlier one.
pub(crate) fn biometrics_by_date(
  entries: &[DailyBiometricEntry],
) -> HashMap<NaiveDate, &DailyBiometricEntry> {
  entries.iter().map(|entry| (entry.date, entry)).collect()
}

/// Running activities that carry a derivable pace, with that pace.
pub(crate) fn paced_runs(activities: &[ActivityRecord]) -> Vec<(&ActivityRecord, f64)> {
  activities
    .iter()
    .filter(|activity| is_running_type(&activity.activity_type))
    .filter_map(|activity| activity.pace_min_per_km().map(|pace| (activity, pace)))
    .collect()
}
