//! Training-load analytics core.
//!
//! Converts raw activity and biometric time series into derived
//! fitness/fatigue signals (TRIMP, chronic/acute load, training stress
//! balance) and cross-metric correlation insights. The whole crate is
//! synchronous, side-effect-free computation over immutable in-memory
//! snapshots: callers fetch the collections, this library derives the
//! numbers, the UI renders them.

pub mod cache;
pub mod impulse;
pub mod insights;
pub mod load;
pub mod models;
pub mod report;

#[cfg(test)]
pub(crate) mod test_utils;

pub use cache::ReportCache;
pub use impulse::{ImpulseSample, TrimpModel};
pub use load::{FormState, LoadPoint, TsbZone};
pub use models::{
  ActivityRecord, DailyBiometricEntry, HrZoneMinutes, WeatherByActivity, WeatherSample,
};
pub use report::{
  analyze, analyze_range, AnalyticsReport, DateRange, InsightBundle, InvalidRangeError,
};
