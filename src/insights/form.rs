//! Form insight: where the latest training stress balance sits and which
//! way it has been moving.

use serde::{Deserialize, Serialize};

use crate::load::{LoadPoint, TsbZone};

/// Load points needed before the trend is worth reporting.
pub const MIN_LOAD_POINTS: usize = 7;
/// TSB movement inside this band counts as stable.
const TREND_DEAD_BAND: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TsbTrend {
  Up,
  Down,
  Stable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TsbZoneInsight {
  pub has_data: bool,
  pub sample_count: usize,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub latest_tsb: Option<f64>,
  /// Latest TSB against the point seven positions earlier.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub trend: Option<TsbTrend>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub zone: Option<TsbZone>,
}

impl TsbZoneInsight {
  fn no_data(sample_count: usize) -> Self {
    Self {
      has_data: false,
      sample_count,
      latest_tsb: None,
      trend: None,
      zone: None,
    }
  }
}

/// Consumes the aggregator output directly; the series is already one point
/// per day, so a 7-point lag is a one-week lookback.
pub fn tsb_zone(points: &[LoadPoint]) -> TsbZoneInsight {
  if points.len() < MIN_LOAD_POINTS {
    return TsbZoneInsight::no_data(points.len());
  }

  let latest = points[points.len() - 1].training_stress_balance;
  let lagged = points[points.len() - MIN_LOAD_POINTS].training_stress_balance;
  let movement = latest - lagged;

  let trend = if movement > TREND_DEAD_BAND {
    TsbTrend::Up
  } else if movement < -TREND_DEAD_BAND {
    TsbTrend::Down
  } else {
    TsbTrend::Stable
  };

  TsbZoneInsight {
    has_data: true,
    sample_count: points.len(),
    latest_tsb: Some(latest),
    trend: Some(trend),
    zone: Some(TsbZone::classify(latest)),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::date;
  use chrono::Duration;

  fn series(tsbs: &[f64]) -> Vec<LoadPoint> {
    tsbs
      .iter()
      .enumerate()
      .map(|(i, tsb)| LoadPoint {
        date: date("2026-08-01") + Duration::days(i as i64),
        chronic_load: 50.0,
        acute_load: 50.0 + tsb,
        training_stress_balance: *tsb,
        chronic_load_edwards: None,
        acute_load_edwards: None,
        training_stress_balance_edwards: None,
      })
      .collect()
  }

  #[test]
  fn test_requires_seven_points() {
    let insight = tsb_zone(&series(&[0.0; 6]));
    assert!(!insight.has_data);
    assert_eq!(insight.sample_count, 6);
  }

  #[test]
  fn test_reports_latest_zone_and_trend() {
    // TSB climbing from -15 toward +12 over ten days
    let insight = tsb_zone(&series(&[
      -15.0, -12.0, -9.0, -6.0, -3.0, 0.0, 3.0, 6.0, 9.0, 12.0,
    ]));

    assert!(insight.has_data);
    assert_eq!(insight.latest_tsb, Some(12.0));
    assert_eq!(insight.trend, Some(TsbTrend::Up));
    assert_eq!(insight.zone, Some(TsbZone::Frais));
  }

  #[test]
  fn test_dead_band_is_stable() {
    let insight = tsb_zone(&series(&[0.0, 0.5, 1.0, 0.5, 0.0, 0.5, 1.0, 1.5]));
    assert!(insight.has_data);
    assert_eq!(insight.trend, Some(TsbTrend::Stable));
    assert_eq!(insight.zone, Some(TsbZone::Optimal));
  }

  #[test]
  fn test_downward_trend() {
    let insight = tsb_zone(&series(&[10.0, 5.0, 0.0, -5.0, -10.0, -15.0, -20.0]));
    assert!(insight.has_data);
    // latest -20 vs lagged 10 (seven points back)
    assert_eq!(insight.trend, Some(TsbTrend::Down));
    assert_eq!(insight.zone, Some(TsbZone::Fatigue));
  }
}
