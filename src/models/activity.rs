use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One completed workout, as supplied by the activity-sync collaborator.
///
/// Fields mirror what third-party providers deliver: the sport type is a
/// free-form string (not a closed enum) and anything a device may fail to
/// record is `Option`. Records are validated once at this boundary and
/// treated as immutable for the lifetime of an analytics request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
  pub id: i64,
  pub activity_type: String,
  pub started_at: DateTime<Utc>,
  pub distance_meters: f64,
  /// Moving time, not elapsed time.
  pub duration_seconds: i64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub average_speed_ms: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub average_heartrate: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_heartrate: Option<i64>,
  /// Per-zone time breakdown, when the provider supplies one. Needed by the
  /// Edwards impulse model; not derivable from average HR alone.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub zone_minutes: Option<HrZoneMinutes>,
}

impl ActivityRecord {
  /// Average pace in min/km, derived from average speed.
  pub fn pace_min_per_km(&self) -> Option<f64> {
    match self.average_speed_ms {
      Some(speed) if speed > 0.0 => Some(1000.0 / speed / 60.0),
      _ => None,
    }
  }

  pub fn duration_hours(&self) -> f64 {
    self.duration_seconds as f64 / 3600.0
  }

  /// Calendar day the activity started on.
  pub fn date(&self) -> NaiveDate {
    self.started_at.date_naive()
  }
}

/// Minutes spent in the five %HRmax bands bounded at 50/60/70/80/90%.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HrZoneMinutes {
  pub z1: f64,
  pub z2: f64,
  pub z3: f64,
  pub z4: f64,
  pub z5: f64,
}
