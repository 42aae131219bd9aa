//! Client runtime
//!
//! Connects to the room server, drives the WebSocket until it closes, and
//! owns the session lifecycle: outbound frames and inbound reduction run
//! in one task, so messages are processed strictly in delivery order.

use crate::handlers::MessageReducer;
use crate::heartbeat::Heartbeat;
use crate::session::{ConnectionState, Session};
use futures_util::{SinkExt, StreamExt};
use room_common::{AppConfig, AppError, AppResult};
use room_core::ServerMessage;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Channel buffer size for outgoing frames
const OUTBOUND_BUFFER_SIZE: usize = 16;

/// A connected room client
///
/// Owns the session and the driver task. Dropping the client leaves the
/// driver running; await [`closed`](Self::closed) to observe the session
/// end.
pub struct RoomClient {
    session: Arc<Session>,
    driver: JoinHandle<AppResult<()>>,
}

impl RoomClient {
    /// Connect to the configured room
    pub async fn connect(config: &AppConfig) -> AppResult<Self> {
        let url = config.ws_url();
        let (socket, _response) = connect_async(&url)
            .await
            .map_err(|e| AppError::Connection(format!("{url}: {e}")))?;

        let (outbound_tx, outbound_rx) = mpsc::channel(OUTBOUND_BUFFER_SIZE);
        let session = Session::new(outbound_tx);

        tracing::info!(
            session_id = %session.id(),
            url = %url,
            "WebSocket connection established"
        );

        // Connection is open: start the liveness schedule (first send now)
        let heartbeat = Heartbeat::start(
            session.clone(),
            Duration::from_millis(config.heartbeat.interval_ms),
        );

        let driver = tokio::spawn(drive(socket, outbound_rx, session.clone(), heartbeat));

        Ok(Self { session, driver })
    }

    /// The client's session (room state, connection state)
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Wait until the connection closes
    ///
    /// Returns `Ok(())` on a clean close, or the transport error that
    /// ended the session.
    pub async fn closed(self) -> AppResult<()> {
        self.driver.await.map_err(AppError::internal)?
    }
}

/// Drive the WebSocket until it closes
///
/// One loop multiplexes inbound frames and outbound sends, so the reducer
/// is never invoked concurrently and frames are processed in delivery
/// order. On exit the heartbeat is cancelled exactly once.
async fn drive(
    socket: WsStream,
    mut outbound_rx: mpsc::Receiver<Message>,
    session: Arc<Session>,
    heartbeat: Heartbeat,
) -> AppResult<()> {
    let (mut sink, mut stream) = socket.split();

    let result = loop {
        tokio::select! {
            frame = stream.next() => match frame {
                Some(Ok(message)) => {
                    if handle_frame(&session, message) {
                        break Ok(());
                    }
                }
                Some(Err(e)) => {
                    tracing::warn!(
                        session_id = %session.id(),
                        error = %e,
                        "WebSocket error"
                    );
                    break Err(AppError::Transport(e.to_string()));
                }
                None => {
                    tracing::info!(session_id = %session.id(), "Connection closed by peer");
                    break Ok(());
                }
            },
            outbound = outbound_rx.recv() => match outbound {
                Some(message) => {
                    if let Err(e) = sink.send(message).await {
                        tracing::warn!(
                            session_id = %session.id(),
                            error = %e,
                            "Failed to send frame"
                        );
                        break Err(AppError::Transport(e.to_string()));
                    }
                }
                // all senders dropped; the session is gone, stop writing
                None => break Ok(()),
            },
        }
    };

    // Stop the liveness schedule; released exactly once on close
    heartbeat.cancel();
    session.set_state(ConnectionState::Disconnected);
    let _ = sink.close().await;

    tracing::info!(session_id = %session.id(), "Session closed");

    result
}

/// Process one inbound frame; returns `true` when the connection is over
fn handle_frame(session: &Session, message: Message) -> bool {
    match message {
        Message::Text(text) => {
            match ServerMessage::from_json(&text) {
                Ok(msg) => {
                    tracing::trace!(
                        session_id = %session.id(),
                        message = %msg,
                        "Received message"
                    );
                    if let Err(e) = MessageReducer::reduce(session, msg) {
                        // state is intact; drop the message and carry on
                        tracing::warn!(
                            session_id = %session.id(),
                            error = %e,
                            "Handler error, message dropped"
                        );
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        session_id = %session.id(),
                        error = %e,
                        "Failed to parse message, dropping frame"
                    );
                }
            }
            false
        }
        Message::Binary(_) => {
            tracing::warn!(
                session_id = %session.id(),
                "Binary frames not supported, dropping"
            );
            false
        }
        Message::Ping(_) => {
            tracing::trace!(session_id = %session.id(), "Ping received");
            // Pong is handled by the transport
            false
        }
        Message::Pong(_) => {
            tracing::trace!(session_id = %session.id(), "Pong received");
            false
        }
        Message::Close(_) => {
            tracing::info!(session_id = %session.id(), "Close frame received");
            true
        }
        Message::Frame(_) => false,
    }
}
