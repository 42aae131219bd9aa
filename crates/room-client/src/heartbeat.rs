//! Heartbeat scheduler
//!
//! Sends the fixed liveness payload for the lifetime of the connection:
//! once immediately, then after each interval. The schedule is
//! send-then-arm (the next delay starts after the send completes), so the
//! period drifts by the send latency each cycle. This mirrors a
//! self-rescheduling single-shot timer rather than a fixed-rate tick.

use crate::session::Session;
use room_core::LIVENESS_PAYLOAD;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Handle to a running heartbeat task
///
/// Cancellation is by-value, so it can happen at most once.
pub struct Heartbeat {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Heartbeat {
    /// Start the heartbeat for a session
    ///
    /// The first liveness payload is sent immediately.
    pub fn start(session: Arc<Session>, interval: Duration) -> Self {
        let (shutdown, mut watch_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            loop {
                if session.send_text(LIVENESS_PAYLOAD).await.is_err() {
                    tracing::debug!(
                        session_id = %session.id(),
                        "Outbound channel closed, heartbeat stopping"
                    );
                    break;
                }

                tracing::trace!(session_id = %session.id(), "Liveness payload sent");

                tokio::select! {
                    _ = tokio::time::sleep(interval) => {
                        if *watch_rx.borrow() {
                            break;
                        }
                    }
                    _ = watch_rx.changed() => break,
                }
            }

            tracing::debug!(session_id = %session.id(), "Heartbeat stopped");
        });

        Self { shutdown, handle }
    }

    /// Cancel the heartbeat; no further sends occur once the pending
    /// delay is interrupted
    pub fn cancel(self) {
        let _ = self.shutdown.send(true);
    }

    /// Cancel and wait for the task to finish
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}
