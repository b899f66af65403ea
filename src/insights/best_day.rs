//! Best day of week: which weekday does the athlete run fastest on?

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::{mean, paced_runs};
use crate::models::ActivityRecord;

pub const MIN_PACED_ACTIVITIES: usize = 5;
/// A weekday needs at least this many runs before it can win.
pub const MIN_BUCKET_SIZE: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestDayInsight {
  pub has_data: bool,
  /// Paced running activities across all buckets.
  pub sample_count: usize,
  /// English weekday name, as the consumers render it.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub best_day: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub mean_pace: Option<f64>,
}

impl BestDayInsight {
  fn no_data(sample_count: usize) -> Self {
    Self {
      has_data: false,
      sample_count,
      best_day: None,
      mean_pace: None,
    }
  }
}

/// Indexed by `Weekday::num_days_from_monday`.
const WEEKDAY_NAMES: [&str; 7] = [
  "Monday",
  "Tuesday",
  "Wednesday",
  "Thursday",
  "Friday",
  "Saturday",
  "Sunday",
];

/// Bucket paced runs by weekday and pick the eligible bucket with the
/// lowest mean pace. A single fast outlier on an otherwise empty weekday
/// cannot win: buckets below [`MIN_BUCKET_SIZE`] are ignored.
pub fn best_day_of_week(activities: &[ActivityRecord]) -> BestDayInsight {
  let paced = paced_runs(activities);
  if paced.len() < MIN_PACED_ACTIVITIES {
    return BestDayInsight::no_data(paced.len());
  }

  let mut buckets: [Vec<f64>; 7] = Default::default();
  for (activity, pace) in &paced {
    let index = activity.started_at.weekday().num_days_from_monday() as usize;
    buckets[index].push(*pace);
  }

  let mut best: Option<(usize, f64)> = None;
  for (index, bucket) in buckets.iter().enumerate() {
    if bucket.len() < MIN_BUCKET_SIZE {
      continue;
    }
    let Some(bucket_mean) = mean(bucket) else {
      continue;
    };
    let better = match best {
      Some((_, current)) => bucket_mean < current,
      None => true,
    };
    if better {
      best = Some((index, bucket_mean));
    }
  }

  match best {
    Some((index, bucket_mean)) => BestDayInsight {
      has_data: true,
      sample_count: paced.len(),
      best_day: Some(WEEKDAY_NAMES[index].to_string()),
      mean_pace: Some(bucket_mean),
    },
    None => BestDayInsight::no_data(paced.len()),
  }
}
