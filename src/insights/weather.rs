//! Weather vs heart rate: mean HR per temperature band.

use serde::{Deserialize, Serialize};

use super::mean;
use crate::impulse::is_running_type;
use crate::models::{ActivityRecord, WeatherByActivity};

/// Minimum samples across all buckets.
pub const MIN_SAMPLES: usize = 5;

const COLD_BELOW_CELSIUS: f64 = 10.0;
const WARM_ABOVE_CELSIUS: f64 = 20.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherHeartRateInsight {
  pub has_data: bool,
  /// Activities with both an HR reading and a joined temperature.
  pub sample_count: usize,
  /// Mean HR below 10 C.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub cold_mean_hr: Option<f64>,
  /// Mean HR between 10 and 20 C.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub mild_mean_hr: Option<f64>,
  /// Mean HR above 20 C.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub warm_mean_hr: Option<f64>,
}

impl WeatherHeartRateInsight {
  fn no_data(sample_count: usize) -> Self {
    Self {
      has_data: false,
      sample_count,
      cold_mean_hr: None,
      mild_mean_hr: None,
      warm_mean_hr: None,
    }
  }
}

/// Bucket runs by the temperature joined on activity id and average the HR
/// per bucket. Activities missing either side of the join are excluded.
pub fn weather_heart_rate(
  activities: &[ActivityRecord],
  weather: &WeatherByActivity,
) -> WeatherHeartRateInsight {
  let mut cold = Vec::new();
  let mut mild = Vec::new();
  let mut warm = Vec::new();

  for activity in activities {
    if !is_running_type(&activity.activity_type) {
      continue;
    }
    let Some(hr) = activity.average_heartrate else {
      continue;
    };
    let Some(temperature) = weather
      .get(&activity.id)
      .and_then(|sample| sample.temperature_celsius)
    else {
      continue;
    };

    let hr = hr as f64;
    if temperature < COLD_BELOW_CELSIUS {
      cold.push(hr);
    } else if temperature <= WARM_ABOVE_CELSIUS {
      mild.push(hr);
    } else {
      warm.push(hr);
    }
  }

  let sample_count = cold.len() + mild.len() + warm.len();
  if sample_count < MIN_SAMPLES {
    return WeatherHeartRateInsight::no_data(sample_count);
  }

  WeatherHeartRateInsight {
    has_data: true,
    sample_count,
    cold_mean_hr: mean(&cold),
    mild_mean_hr: mean(&mild),
    warm_mean_hr: mean(&warm),
  }
}
