//! Failure-prediction client for PitWatch
//!
//! Wraps the two remote calls the dashboard makes against the prediction
//! backend (`POST /ml/predict` and the `GET /` health check), renders
//! results for display, and runs the periodic connectivity probe.

pub mod client;
pub mod error;
pub mod probe;
pub mod report;
pub mod types;

pub use client::PredictionClient;
pub use error::{PredictionError, Result};
pub use probe::{ConnectionState, ConnectivityProbe, HealthCheck, ProbeStatus};
pub use report::{PredictionPanel, PredictionReport};
pub use types::{PredictionRequest, PredictionResponse, SensorReading};
