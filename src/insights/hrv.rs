//! HRV vs performance: median-split paces by the previous day's HRV.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::{biometrics_by_date, mean, paced_runs, pct_delta};
use crate::models::{ActivityRecord, DailyBiometricEntry};

pub const MIN_PAIRED_SAMPLES: usize = 5;
const TREND_THRESHOLD_PCT: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceTrend {
  Up,
  Down,
  Neutral,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HrvPerformanceInsight {
  pub has_data: bool,
  pub sample_count: usize,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub low_hrv_mean_pace: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub high_hrv_mean_pace: Option<f64>,
  /// `(low - high) / low * 100`; positive = faster on high-HRV days.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub delta_pct: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub trend: Option<PaceTrend>,
}

impl HrvPerformanceInsight {
  fn no_data(sample_count: usize) -> Self {
    Self {
      has_data: false,
      sample_count,
      low_hrv_mean_pace: None,
      high_hrv_mean_pace: None,
      delta_pct: None,
      trend: None,
    }
  }
}

/// Pair each run's pace with the previous calendar day's HRV (lag-1 join:
/// last night's recovery explains today's run, not the other way around),
/// then compare the low-HRV half against the high-HRV half.
pub fn hrv_performance(
  activities: &[ActivityRecord],
  biometrics: &[DailyBiometricEntry],
) -> HrvPerformanceInsight {
  let by_date = biometrics_by_date(biometrics);

  let mut pairs: Vec<(f64, f64)> = Vec::new(); // (hrv, pace)
  for (activity, pace) in paced_runs(activities) {
    let previous_day = activity.date() - Duration::days(1);
    let Some(hrv) = by_date.get(&previous_day).and_then(|entry| entry.hrv_rmssd) else {
      continue;
    };
    pairs.push((hrv, pace));
  }

  if pairs.len() < MIN_PAIRED_SAMPLES {
    return HrvPerformanceInsight::no_data(pairs.len());
  }

  pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
  let split = pairs.len() / 2;
  let low_paces: Vec<f64> = pairs[..split].iter().map(|(_, pace)| *pace).collect();
  let high_paces: Vec<f64> = pairs[split..].iter().map(|(_, pace)| *pace).collect();

  let (Some(low_mean), Some(high_mean)) = (mean(&low_paces), mean(&high_paces)) else {
    return HrvPerformanceInsight::no_data(pairs.len());
  };
  let Some(delta_pct) = pct_delta(low_mean, high_mean) else {
    return HrvPerformanceInsight::no_data(pairs.len());
  };

  let trend = if delta_pct > TREND_THRESHOLD_PCT {
    PaceTrend::Up
  } else if delta_pct < -TREND_THRESHOLD_PCT {
    PaceTrend::Down
  } else {
    PaceTrend::Neutral
  };

  HrvPerformanceInsight {
    has_data: true,
    sample_count: pairs.len(),
    low_hrv_mean_pace: Some(low_mean),
    high_hrv_mean_pace: Some(high_mean),
    delta_pct: Some(delta_pct),
    trend: Some(trend),
  }
}
