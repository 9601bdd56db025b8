//! Session manager and liveness monitor.
//!
//! Owns the one live session to the store. Readers take a clone of the
//! current `Arc` and drop the lock before querying, so a reconnect never
//! waits on an in-flight query and never pulls a handle out from under one.
//! A reader still holding the previous handle after a swap sees
//! [`StoreError::Closed`], which callers report as "store unavailable".

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use super::error::StoreError;
use super::session::{Connector, Session};

/// Default interval between liveness checks (5 minutes).
pub const DEFAULT_KEEPALIVE_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Trivial round-trip used to probe the session.
pub const LIVENESS_QUERY: &str = "SELECT 1;";

/// Result of one liveness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LivenessOutcome {
    /// The current session answered.
    Healthy,
    /// The session was dead and has been replaced.
    Reconnected,
    /// The session was dead and reconnecting failed; the next check retries.
    Degraded,
    /// The manager has been closed; any session opened by the check was
    /// closed again.
    Closed,
}

/// Owns the current store session and repairs it when it dies.
pub struct SessionManager {
    connector: Arc<dyn Connector>,
    connection_string: String,
    current: RwLock<Arc<dyn Session>>,
    degraded: AtomicBool,
    closed: AtomicBool,
    shutdown: watch::Sender<bool>,
}

impl SessionManager {
    /// Open the initial session.
    ///
    /// Failure here is a startup error: there is no retry.
    pub fn init(
        connector: Arc<dyn Connector>,
        connection_string: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let connection_string = connection_string.into();
        if connection_string.trim().is_empty() {
            return Err(StoreError::MissingConnectionString);
        }

        let session = connector.connect(&connection_string)?;
        info!("connected to store");

        Ok(Self {
            connector,
            connection_string,
            current: RwLock::new(session),
            degraded: AtomicBool::new(false),
            closed: AtomicBool::new(false),
            shutdown: watch::channel(false).0,
        })
    }

    /// The session to use for the next query.
    ///
    /// While degraded this is the stale, closed handle; queries on it fail
    /// with [`StoreError::Closed`] rather than blocking.
    pub fn current(&self) -> Arc<dyn Session> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Whether the last liveness check failed to reconnect.
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Acquire)
    }

    /// Run one round of the keep-alive protocol.
    ///
    /// Probes the current session. If the probe fails, opens a fresh
    /// session with the original connection string, installs it, and only
    /// then closes the old one. If reconnecting fails, the old handle is
    /// closed and left in place so readers fail fast until the next check.
    pub fn check_liveness(&self) -> LivenessOutcome {
        if self.closed.load(Ordering::Acquire) {
            return LivenessOutcome::Closed;
        }

        let session = self.current();
        let probe_err = match session.select(LIVENESS_QUERY) {
            Ok(_) => {
                self.degraded.store(false, Ordering::Release);
                info!("keep-alive query succeeded");
                return LivenessOutcome::Healthy;
            }
            Err(e) => e,
        };

        if self.closed.load(Ordering::Acquire) {
            return LivenessOutcome::Closed;
        }
        warn!(error = %probe_err, "keep-alive query failed, reconnecting to store");

        match self.connector.connect(&self.connection_string) {
            Ok(fresh) => {
                let old = {
                    let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
                    // close() may have run while we were connecting
                    if self.closed.load(Ordering::Acquire) {
                        drop(guard);
                        fresh.close();
                        info!("discarded reconnected session, manager closed");
                        return LivenessOutcome::Closed;
                    }
                    std::mem::replace(&mut *guard, fresh)
                };
                old.close();
                self.degraded.store(false, Ordering::Release);
                info!("reconnected to store");
                LivenessOutcome::Reconnected
            }
            Err(e) => {
                session.close();
                self.degraded.store(true, Ordering::Release);
                error!(error = %e, "reconnection attempt failed");
                LivenessOutcome::Degraded
            }
        }
    }

    /// Close the current session and stop any running monitor.
    ///
    /// Safe to call more than once. A liveness check racing with this call
    /// closes whatever session it opened instead of installing it. The
    /// monitor exits at its next wake-up; await [`MonitorHandle::stop`] to
    /// wait for an in-progress check to finish.
    pub fn close(&self) {
        {
            let guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
            if self.closed.swap(true, Ordering::AcqRel) {
                return;
            }
            guard.close();
        }
        self.shutdown.send_replace(true);
        info!("store connection closed");
    }

    /// Start the background liveness monitor.
    ///
    /// The first check runs one full `interval` after start. It stops when
    /// the returned handle is stopped or dropped, or when the manager is
    /// closed.
    pub fn spawn_monitor(self: &Arc<Self>, interval: Duration) -> MonitorHandle {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let mut closed_rx = self.shutdown.subscribe();
        let manager = Arc::clone(self);

        let task = tokio::spawn(async move {
            if manager.closed.load(Ordering::Acquire) {
                return;
            }
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await; // First tick is immediate, skip it

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = closed_rx.changed() => break,
                    _ = ticker.tick() => {
                        let manager = Arc::clone(&manager);
                        // Probing and reconnecting block on the network
                        let check = tokio::task::spawn_blocking(move || manager.check_liveness());
                        match check.await {
                            Ok(LivenessOutcome::Closed) => break,
                            Ok(_) => {}
                            Err(e) => error!(error = %e, "liveness check task failed"),
                        }
                    }
                }
            }

            info!("session monitor stopped");
        });

        MonitorHandle {
            stop: Some(stop_tx),
            task,
        }
    }
}

/// Handle to a running liveness monitor.
pub struct MonitorHandle {
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl MonitorHandle {
    /// Signal the monitor to stop and wait for it to finish.
    ///
    /// A check already in progress is allowed to complete first.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            // Err means the task already exited
            let _ = stop.send(());
        }
        if let Err(e) = (&mut self.task).await {
            warn!(error = %e, "session monitor ended abnormally");
        }
    }
}
