//! Result rendering and form state for the prediction panel

use serde::Serialize;

use crate::error::PredictionError;
use crate::types::PredictionResponse;

/// Display-ready view of a [`PredictionResponse`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    pub failure: bool,
    pub headline: &'static str,
    /// e.g. "10.00%"
    pub failure_probability: String,
    pub normal_probability: String,
    /// Width of the risk bar in percent, clamped to 0..=100
    pub bar_width: f64,
}

impl PredictionReport {
    pub fn from_response(response: &PredictionResponse) -> Self {
        let failure = response.is_failure();
        Self {
            failure,
            headline: if failure {
                "Failure Predicted"
            } else {
                "No Failure Detected"
            },
            failure_probability: percent(response.probability_failure),
            normal_probability: percent(response.probability_no_failure),
            bar_width: (response.probability_failure * 100.0).clamp(0.0, 100.0),
        }
    }
}

impl From<&PredictionResponse> for PredictionReport {
    fn from(response: &PredictionResponse) -> Self {
        Self::from_response(response)
    }
}

fn percent(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

/// Last outcome shown next to the prediction form.
///
/// Results stay on screen until the next submission starts; a failed
/// submission shows its error instead of the previous result.
#[derive(Debug, Clone, Default)]
pub struct PredictionPanel {
    response: Option<PredictionResponse>,
    error: Option<String>,
    pending: bool,
}

impl PredictionPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A submission is starting: clear both the result and the error.
    pub fn begin(&mut self) {
        self.response = None;
        self.error = None;
        self.pending = true;
    }

    /// Record the outcome of the submission started with [`PredictionPanel::begin`].
    pub fn finish(&mut self, outcome: Result<PredictionResponse, PredictionError>) {
        self.pending = false;
        match outcome {
            Ok(response) => self.response = Some(response),
            Err(e) => self.error = Some(e.message()),
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn response(&self) -> Option<&PredictionResponse> {
        self.response.as_ref()
    }

    pub fn report(&self) -> Option<PredictionReport> {
        self.response.as_ref().map(PredictionReport::from_response)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Nothing submitted yet, or the last attempt produced nothing to show
    pub fn is_idle(&self) -> bool {
        !self.pending && self.response.is_none() && self.error.is_none()
    }
}
