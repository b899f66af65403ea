pub mod activity;
pub mod biometrics;
pub mod weather;

pub use activity::{ActivityRecord, HrZoneMinutes};
pub use biometrics::DailyBiometricEntry;
pub use weather::{WeatherByActivity, WeatherSample};
