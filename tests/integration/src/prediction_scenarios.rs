//! Prediction round trips against a local stub backend

use axum::http::StatusCode;
use chrono::NaiveDate;
use pitwatch_prediction::{
    ConnectionState, ConnectivityProbe, PredictionClient, PredictionError, PredictionPanel,
    PredictionReport, PredictionRequest, SensorReading,
};
use serde_json::json;
use std::time::Duration;

use crate::test_utils::{
    bare_status_backend, failing_backend, init_test_logging, plain_text_backend,
    recording_backend, stub_backend, unreachable_backend, verdict,
};

fn client(base: &str) -> PredictionClient {
    PredictionClient::new(base).expect("valid url")
}

fn readings() -> Vec<SensorReading> {
    let day = NaiveDate::from_ymd_opt(2025, 7, 15).expect("valid date");
    (10..13)
        .map(|hour| SensorReading {
            timestamp: day.and_hms_opt(hour, 0, 0).expect("valid time"),
            temperature: 65.0 + f64::from(hour),
            vibration: 0.05 * f64::from(hour),
            pressure: f64::from(hour),
        })
        .collect()
}

#[tokio::test]
async fn test_default_readings_report_no_failure() {
    init_test_logging();
    let (base, captured) = recording_backend(verdict(0, 0.1)).await;

    let mut panel = PredictionPanel::new();
    panel.begin();
    assert!(panel.is_pending());
    panel.finish(client(&base).predict(&PredictionRequest::default()).await);

    let report = panel.report().expect("result shown");
    assert!(!report.failure);
    assert_eq!(report.headline, "No Failure Detected");
    assert_eq!(report.failure_probability, "10.00%");
    assert_eq!(report.normal_probability, "90.00%");
    assert!(panel.error().is_none());

    let sent = captured.lock().expect("captured bodies");
    assert_eq!(
        sent.as_slice(),
        &[json!({ "temperature": 25.0, "pressure": 50.0, "vibration": 5.0 })]
    );
}

#[tokio::test]
async fn test_series_posts_pascal_case_rows() {
    let (base, captured) = recording_backend(verdict(1, 0.7)).await;

    let response = client(&base)
        .predict_series(&readings())
        .await
        .expect("prediction");
    assert!(PredictionReport::from_response(&response).failure);

    let sent = captured.lock().expect("captured bodies");
    let rows = sent[0].as_array().expect("array body");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["Timestamp"], "2025-07-15 10:00:00");
    assert!(rows[2].get("Pressure").is_some());
}

#[tokio::test]
async fn test_short_series_is_rejected_locally() {
    let (base, captured) = recording_backend(verdict(0, 0.1)).await;

    let err = client(&base)
        .predict_series(&readings()[..2])
        .await
        .unwrap_err();
    assert_eq!(
        err,
        PredictionError::InsufficientReadings {
            required: 3,
            provided: 2
        }
    );
    assert!(captured.lock().expect("captured bodies").is_empty());
}

#[tokio::test]
async fn test_invalid_readings_never_reach_backend() {
    let (base, captured) = recording_backend(verdict(0, 0.1)).await;

    let err = client(&base)
        .predict(&PredictionRequest::new(250.0, 50.0, 5.0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PredictionError::Validation {
            field: "temperature",
            ..
        }
    ));

    let err = client(&base)
        .predict(&PredictionRequest::new(25.0, 50.0, 150.0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PredictionError::Validation {
            field: "vibration",
            ..
        }
    ));
    assert!(captured.lock().expect("captured bodies").is_empty());
}

#[tokio::test]
async fn test_error_body_becomes_message() {
    let base = failing_backend(StatusCode::BAD_REQUEST, "Missing required columns").await;

    let err = client(&base)
        .predict(&PredictionRequest::sample())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        PredictionError::Request("Missing required columns".to_string())
    );
}

#[tokio::test]
async fn test_status_without_error_body() {
    let base = bare_status_backend(StatusCode::BAD_GATEWAY).await;

    let err = client(&base)
        .predict(&PredictionRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.message(), "HTTP error! status: 502");
}

#[tokio::test]
async fn test_failure_verdict_and_then_backend_error() {
    let base = stub_backend(verdict(1, 0.85)).await;

    let mut panel = PredictionPanel::new();
    panel.begin();
    panel.finish(client(&base).predict(&PredictionRequest::sample()).await);
    assert_eq!(panel.report().map(|r| r.headline), Some("Failure Predicted"));

    // A failed submission replaces the previous result with its message
    let broken = failing_backend(StatusCode::INTERNAL_SERVER_ERROR, "model not loaded").await;
    panel.begin();
    panel.finish(client(&broken).predict(&PredictionRequest::default()).await);
    assert!(panel.report().is_none());
    assert_eq!(panel.error(), Some("model not loaded"));
}

#[tokio::test]
async fn test_unreachable_backend_shows_error() {
    let base = unreachable_backend().await;
    let mut panel = PredictionPanel::new();

    panel.begin();
    panel.finish(client(&base).predict(&PredictionRequest::default()).await);
    assert!(panel.report().is_none());
    assert!(panel.error().is_some());
    assert!(!panel.is_pending());
}

#[tokio::test]
async fn test_connection_states() {
    let up = stub_backend(verdict(0, 0.1)).await;
    assert!(client(&up).test_connection().await);

    let down = unreachable_backend().await;
    assert!(!client(&down).test_connection().await);

    let plain = plain_text_backend().await;
    assert!(!client(&plain).test_connection().await);
}

#[tokio::test]
async fn test_probe_tracks_backend_reachability() {
    let up = stub_backend(verdict(0, 0.1)).await;
    let down = unreachable_backend().await;

    for (base, expected) in [
        (up, ConnectionState::Connected),
        (down, ConnectionState::Disconnected),
    ] {
        let probe = ConnectivityProbe::spawn(client(&base), Duration::from_secs(3600));
        let mut updates = probe.subscribe();

        let status = tokio::time::timeout(
            Duration::from_secs(10),
            updates.wait_for(|s| !s.in_flight && s.last_checked.is_some()),
        )
        .await
        .expect("first check finished")
        .expect("probe alive")
        .clone();

        assert_eq!(status.connection, expected);
        assert_eq!(status.endpoint, base);
        probe.shutdown().await;
    }
}
