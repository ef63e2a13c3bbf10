//! Periodic connectivity probe
//!
//! A background task checks the prediction service once at start and then
//! every interval (30 s by default). Checks run one at a time inside the
//! task loop, so a slow health endpoint delays the next tick instead of
//! stacking requests. Results are published on a `watch` channel; failures
//! only flip the status to `Disconnected`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::client::PredictionClient;

/// Something that can answer "is the backend reachable?"
pub trait HealthCheck: Send + Sync + 'static {
    fn test_connection(&self) -> impl Future<Output = bool> + Send;

    /// Human-readable target, shown next to the status badge
    fn endpoint(&self) -> String;
}

impl HealthCheck for PredictionClient {
    fn test_connection(&self) -> impl Future<Output = bool> + Send {
        PredictionClient::test_connection(self)
    }

    fn endpoint(&self) -> String {
        self.base_url().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    /// No check has completed yet
    Checking,
    Connected,
    Disconnected,
}

impl ConnectionState {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Checking => "Checking...",
            ConnectionState::Connected => "Connected",
            ConnectionState::Disconnected => "Disconnected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeStatus {
    pub connection: ConnectionState,
    pub last_checked: Option<DateTime<Utc>>,
    pub endpoint: String,
    /// A check is in flight; `connection` still holds the previous result
    pub in_flight: bool,
}

impl ProbeStatus {
    fn initial(endpoint: String) -> Self {
        Self {
            connection: ConnectionState::Checking,
            last_checked: None,
            endpoint,
            in_flight: false,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection == ConnectionState::Connected
    }
}

/// Handle to the running probe task.
///
/// Dropping the handle stops the task after its current check.
#[derive(Debug)]
pub struct ConnectivityProbe {
    status: watch::Receiver<ProbeStatus>,
    refresh: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl ConnectivityProbe {
    /// Start probing `checker` every `period`. The first check runs immediately.
    pub fn spawn<C: HealthCheck>(checker: C, period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        let (status_tx, status_rx) = watch::channel(ProbeStatus::initial(checker.endpoint()));
        let (refresh_tx, mut refresh_rx) = mpsc::channel::<()>(1);

        info!(
            endpoint = %checker.endpoint(),
            period_ms = period.as_millis() as u64,
            "connectivity probe started"
        );

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    request = refresh_rx.recv() => {
                        if request.is_none() {
                            break;
                        }
                    }
                }
                run_check(&checker, &status_tx).await;
            }

            debug!("connectivity probe stopped");
        });

        Self {
            status: status_rx,
            refresh: refresh_tx,
            task,
        }
    }

    /// Latest published status
    pub fn status(&self) -> ProbeStatus {
        self.status.borrow().clone()
    }

    /// Receiver for status updates
    pub fn subscribe(&self) -> watch::Receiver<ProbeStatus> {
        self.status.clone()
    }

    /// Ask for an out-of-schedule check. Returns false when one is already queued.
    pub fn check_now(&self) -> bool {
        self.refresh.try_send(()).is_ok()
    }

    /// Cancel the probe task and wait for it to finish.
    pub async fn shutdown(self) {
        self.task.abort();
        let _ = self.task.await;
        info!("connectivity probe shut down");
    }
}

async fn run_check<C: HealthCheck>(checker: &C, status: &watch::Sender<ProbeStatus>) {
    status.send_modify(|s| s.in_flight = true);

    let connected = checker.test_connection().await;
    let connection = if connected {
        ConnectionState::Connected
    } else {
        ConnectionState::Disconnected
    };

    status.send_modify(|s| {
        if s.connection != connection {
            info!(
                endpoint = %s.endpoint,
                state = connection.label(),
                "backend connectivity changed"
            );
        }
        s.connection = connection;
        s.last_checked = Some(Utc::now());
        s.in_flight = false;
    });
}
