//! Wire types for the prediction service

use chrono::NaiveDateTime;
use pitwatch_core::error::validation;
use serde::{Deserialize, Serialize};

use crate::error::{PredictionError, Result};

/// Inclusive bounds accepted for a single reading.
pub const TEMPERATURE_RANGE: (f64, f64) = (-50.0, 200.0);
pub const PRESSURE_RANGE: (f64, f64) = (0.0, 1000.0);
pub const VIBRATION_RANGE: (f64, f64) = (0.0, 100.0);

/// Smallest batch the service can build its rolling-window features from.
pub const MIN_SERIES_READINGS: usize = 3;

/// Timestamp layout used by the batch endpoint.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Single-reading prediction request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// °C
    pub temperature: f64,
    /// Pa, as the prediction model was trained on. Machine telemetry reports bar.
    pub pressure: f64,
    /// mm/s
    pub vibration: f64,
}

impl Default for PredictionRequest {
    fn default() -> Self {
        Self {
            temperature: 25.0,
            pressure: 50.0,
            vibration: 5.0,
        }
    }
}

impl PredictionRequest {
    pub fn new(temperature: f64, pressure: f64, vibration: f64) -> Self {
        Self {
            temperature,
            pressure,
            vibration,
        }
    }

    /// Readings of a machine running hot
    pub fn sample() -> Self {
        Self::new(75.5, 150.2, 8.7)
    }

    /// Check every field against its range. Reports the first offending field.
    pub fn validate(&self) -> Result<()> {
        check("temperature", self.temperature, TEMPERATURE_RANGE)?;
        check("pressure", self.pressure, PRESSURE_RANGE)?;
        check("vibration", self.vibration, VIBRATION_RANGE)?;
        Ok(())
    }
}

fn check(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<()> {
    validation::require_range(value, field, min, max)
        .map_err(|e| PredictionError::validation(field, e))
}

/// One timestamped row of the batch request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SensorReading {
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub vibration: f64,
    pub pressure: f64,
}

mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Service verdict
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// 1 = failure predicted, 0 = normal operation
    pub prediction: u8,
    pub probability_no_failure: f64,
    pub probability_failure: f64,
}

impl PredictionResponse {
    pub fn is_failure(&self) -> bool {
        self.prediction == 1
    }
}

/// Error body returned with 4xx/5xx responses
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: String,
}
