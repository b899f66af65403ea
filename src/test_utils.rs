//! Fixture factories shared by the module tests.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::ActivityRecord;

pub fn date(s: &str) -> NaiveDate {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date must be YYYY-MM-DD")
}

fn start_of(day: &str) -> DateTime<Utc> {
  date(day)
    .and_hms_opt(7, 30, 0)
    .expect("valid wall-clock time")
    .and_utc()
}

/// Speed in m/s for a target pace in min/km.
pub fn speed_for_pace(pace_min_per_km: f64) -> f64 {
  1000.0 / (pace_min_per_km * 60.0)
}

pub fn activity_on(
  id: i64,
  activity_type: &str,
  day: &str,
  duration_seconds: i64,
  average_speed_ms: Option<f64>,
  average_heartrate: Option<i64>,
) -> ActivityRecord {
  ActivityRecord {
    id,
    activity_type: activity_type.to_string(),
    started_at: start_of(day),
    distance_meters: average_speed_ms.unwrap_or(0.0) * duration_seconds as f64,
    duration_seconds,
    average_speed_ms,
    average_heartrate,
    max_heartrate: None,
    zone_minutes: None,
  }
}

pub fn run_on(
  id: i64,
  day: &str,
  duration_seconds: i64,
  average_speed_ms: Option<f64>,
  average_heartrate: Option<i64>,
) -> ActivityRecord {
  activity_on(id, "Run", day, duration_seconds, average_speed_ms, average_heartrate)
}

pub fn run_with_distance(id: i64, day: &str, distance_meters: f64) -> ActivityRecord {
  ActivityRecord {
    distance_meters,
    ..run_on(id, day, 3600, None, None)
  }
}
