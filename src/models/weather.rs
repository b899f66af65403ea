use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Weather at activity time, keyed by activity id (not by date).
///
/// The weather-enrichment collaborator may have no sample for any given
/// activity, and a sample may itself carry no temperature.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeatherSample {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub temperature_celsius: Option<f64>,
}

pub type WeatherByActivity = HashMap<i64, WeatherSample>;
