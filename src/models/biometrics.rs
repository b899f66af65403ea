use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day of wearable-derived signals.
///
/// At most one entry per date. Absent fields stay `None` - zero is a valid
/// reading for several of these signals and must remain distinguishable
/// from missing data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBiometricEntry {
  pub date: NaiveDate,
  /// HRV as rMSSD, in milliseconds.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub hrv_rmssd: Option<f64>,
  /// Training readiness, 0-100.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub training_readiness: Option<f64>,
  /// Sleep score, 0-100.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sleep_score: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub resting_hr: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub body_battery_max: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub body_battery_min: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub stress_score: Option<f64>,
}

type SignalAccessor = fn(&DailyBiometricEntry) -> Option<f64>;

/// Ordered fallback chain for the day's recovery signal: readiness first,
/// then body battery, then sleep score. First available wins; values are
/// never averaged or defaulted.
const RECOVERY_SIGNAL_CHAIN: &[SignalAccessor] = &[
  |entry| entry.training_readiness,
  |entry| entry.body_battery_max,
  |entry| entry.sleep_score,
];

impl DailyBiometricEntry {
  /// Empty entry for a date, every signal missing.
  pub fn empty(date: NaiveDate) -> Self {
    Self {
      date,
      hrv_rmssd: None,
      training_readiness: None,
      sleep_score: None,
      resting_hr: None,
      body_battery_max: None,
      body_battery_min: None,
      stress_score: None,
    }
  }

  /// First available recovery signal, in chain order.
  pub fn recovery_signal(&self) -> Option<f64> {
    RECOVERY_SIGNAL_CHAIN.iter().find_map(|accessor| accessor(self))
  }
}
