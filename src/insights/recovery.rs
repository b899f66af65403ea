//! Recovery vs performance: does the athlete actually run better on
//! recovered days?

use serde::{Deserialize, Serialize};

use super::{biometrics_by_date, mean, pct_delta};
use crate::impulse::is_running_type;
use crate::models::{ActivityRecord, DailyBiometricEntry};

/// Minimum paired samples before the comparison is worth reporting.
pub const MIN_PAIRED_SAMPLES: usize = 3;
/// Minimum pairs that must carry a given metric before that metric is used.
const MIN_METRIC_SAMPLES: usize = 3;
/// Recovery-signal split between the "recovered" and "tired" groups.
const RECOVERY_SPLIT: f64 = 60.0;

/// Which per-activity metric the two groups were compared on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMetric {
  Pace,
  HeartRate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryPerformanceInsight {
  pub has_data: bool,
  /// Activities that could be paired with a same-date recovery signal.
  pub sample_count: usize,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub metric: Option<ComparisonMetric>,
  /// Group mean for days with recovery signal >= 60.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub recovered_mean: Option<f64>,
  /// Group mean for days with recovery signal < 60.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub tired_mean: Option<f64>,
  /// `(tired - recovered) / tired * 100`; positive = better when recovered.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub delta_pct: Option<f64>,
}

impl RecoveryPerformanceInsight {
  fn no_data(sample_count: usize) -> Self {
    Self {
      has_data: false,
      sample_count,
      metric: None,
      recovered_mean: None,
      tired_mean: None,
      delta_pct: None,
    }
  }
}

struct Pair {
  signal: f64,
  pace: Option<f64>,
  heart_rate: Option<f64>,
}

/// Join running activities to the same-date biometric entry through the
/// recovery-signal fallback chain, split at the 60-point mark, and compare
/// group means on pace (or HR when too few pairs carry pace).
pub fn recovery_performance(
  activities: &[ActivityRecord],
  biometrics: &[DailyBiometricEntry],
) -> RecoveryPerformanceInsight {
  let by_date = biometrics_by_date(biometrics);

  let mut pairs = Vec::new();
  for activity in activities {
    if !is_running_type(&activity.activity_type) {
      continue;
    }
    let Some(entry) = by_date.get(&activity.date()) else {
      continue;
    };
    let Some(signal) = entry.recovery_signal() else {
      continue;
    };
    pairs.push(Pair {
      signal,
      pace: activity.pace_min_per_km(),
      heart_rate: activity.average_heartrate.map(|hr| hr as f64),
    });
  }

  if pairs.len() < MIN_PAIRED_SAMPLES {
    return RecoveryPerformanceInsight::no_data(pairs.len());
  }

  let paced = pairs.iter().filter(|pair| pair.pace.is_some()).count();
  let with_hr = pairs.iter().filter(|pair| pair.heart_rate.is_some()).count();
  let metric = if paced >= MIN_METRIC_SAMPLES {
    ComparisonMetric::Pace
  } else if with_hr >= MIN_METRIC_SAMPLES {
    ComparisonMetric::HeartRate
  } else {
    return RecoveryPerformanceInsight::no_data(pairs.len());
  };

  let metric_value = |pair: &Pair| match metric {
    ComparisonMetric::Pace => pair.pace,
    ComparisonMetric::HeartRate => pair.heart_rate,
  };

  let recovered: Vec<f64> = pairs
    .iter()
    .filter(|pair| pair.signal >= RECOVERY_SPLIT)
    .filter_map(metric_value)
    .collect();
  let tired: Vec<f64> = pairs
    .iter()
    .filter(|pair| pair.signal < RECOVERY_SPLIT)
    .filter_map(metric_value)
    .collect();

  let (Some(recovered_mean), Some(tired_mean)) = (mean(&recovered), mean(&tired)) else {
    return RecoveryPerformanceInsight::no_data(pairs.len());
  };
  let Some(delta_pct) = pct_delta(tired_mean, recovered_mean) else {
    return RecoveryPerformanceInsight::no_data(pairs.len());
  };

  RecoveryPerformanceInsight {
    has_data: true,
    sample_count: pairs.len(),
    metric: Some(metric),
    recovered_mean: Some(recovered_mean),
    tired_mean: Some(tired_mean),
    delta_pct: Some(delta_pct),
  }
}
