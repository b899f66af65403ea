//! Sleep vs load: is the recent training load in proportion to how well the
//! athlete has been sleeping?

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::mean;
use crate::impulse::is_running_type;
use crate::models::{ActivityRecord, DailyBiometricEntry};

/// Days of biometric history required before the comparison runs.
pub const MIN_BIOMETRIC_DAYS: usize = 7;
/// Trailing window for both the sleep mean and the activity count.
const WINDOW_DAYS: i64 = 7;

/// Combined sleep/load state over the trailing week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SleepLoadState {
  /// Load is running ahead of sleep quality.
  #[serde(rename = "risque")]
  Risque,
  #[serde(rename = "equilibre")]
  Equilibre,
  /// Sleep is good and load is light; room to push.
  #[serde(rename = "opportunite")]
  Opportunite,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepLoadInsight {
  pub has_data: bool,
  /// Mean sleep score over the trailing 7 days (days with a score).
  #[serde(skip_serializing_if = "Option::is_none")]
  pub mean_sleep_score: Option<f64>,
  /// Running activities in the trailing 7 days.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub activity_count: Option<usize>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub state: Option<SleepLoadState>,
}

impl SleepLoadInsight {
  fn no_data() -> Self {
    Self {
      has_data: false,
      mean_sleep_score: None,
      activity_count: None,
      state: None,
    }
  }
}

/// Decision table combining the sleep band and the activity-count band.
/// Six explicit rules, then the balanced default. Not a 2x2 grid: the risk
/// and opportunity rules trigger at different combinations of severity.
fn classify(mean_sleep: f64, activity_count: usize) -> SleepLoadState {
  if mean_sleep < 60.0 && activity_count >= 5 {
    SleepLoadState::Risque
  } else if mean_sleep < 60.0 && activity_count >= 3 {
    SleepLoadState::Risque
  } else if mean_sleep < 70.0 && activity_count >= 6 {
    SleepLoadState::Risque
  } else if mean_sleep >= 85.0 && activity_count <= 3 {
    SleepLoadState::Opportunite
  } else if mean_sleep >= 80.0 && activity_count <= 2 {
    SleepLoadState::Opportunite
  } else if mean_sleep >= 75.0 && activity_count <= 1 {
    SleepLoadState::Opportunite
  } else {
    SleepLoadState::Equilibre
  }
}

/// Trailing-7-day mean sleep score against the trailing-7-day activity
/// count, classified through the fixed decision table. `reference_date` is
/// the analytics range end.
pub fn sleep_load(
  activities: &[ActivityRecord],
  biometrics: &[DailyBiometricEntry],
  reference_date: NaiveDate,
) -> SleepLoadInsight {
  if biometrics.len() < MIN_BIOMETRIC_DAYS {
    return SleepLoadInsight::no_data();
  }

  let window_start = reference_date - Duration::days(WINDOW_DAYS - 1);
  let in_window = |date: NaiveDate| date >= window_start && date <= reference_date;

  let sleep_scores: Vec<f64> = biometrics
    .iter()
    .filter(|entry| in_window(entry.date))
    .filter_map(|entry| entry.sleep_score)
    .collect();
  let Some(mean_sleep) = mean(&sleep_scores) else {
    return SleepLoadInsight::no_data();
  };

  let activity_count = activities
    .iter()
    .filter(|activity| is_running_type(&activity.activity_type))
    .filter(|activity| in_window(activity.date()))
    .count();

  SleepLoadInsight {
    has_data: true,
    mean_sleep_score: Some(mean_sleep),
    activity_count: Some(activity_count),
    state: Some(classify(mean_sleep, activity_count)),
  }
}
