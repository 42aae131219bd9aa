//! Test helpers for integration tests
//!
//! Provides a scripted one-shot WebSocket server and polling utilities.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use room_client::Session;
use room_common::{AppConfig, AppSettings, Environment, HeartbeatConfig, ServerConfig};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_tungstenite::{accept_async, accept_hdr_async, WebSocketStream};

/// The server side of an accepted test connection
pub type ServerWs = WebSocketStream<TcpStream>;

/// A one-shot scripted WebSocket server
///
/// Accepts a single connection on an ephemeral port and hands it to the
/// script. Assertion failures inside the script surface through
/// [`finished`](Self::finished).
pub struct ScriptedServer {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ScriptedServer {
    /// Bind an ephemeral port and serve one connection with `script`
    pub async fn spawn<F, Fut>(script: F) -> Result<Self>
    where
        F: FnOnce(ServerWs) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept failed");
            let ws = accept_async(stream).await.expect("handshake failed");
            script(ws).await;
        });

        Ok(Self { addr, handle })
    }

    /// Like [`spawn`](Self::spawn), but assert the handshake request path
    pub async fn spawn_on_path<F, Fut>(expected_path: &str, script: F) -> Result<Self>
    where
        F: FnOnce(ServerWs) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let expected = expected_path.to_string();

        let handle = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept failed");
            let ws = accept_hdr_async(stream, |req: &tokio_tungstenite::tungstenite::handshake::server::Request, resp| {
                assert_eq!(req.uri().path(), expected, "unexpected request path");
                Ok(resp)
            })
            .await
            .expect("handshake failed");
            script(ws).await;
        });

        Ok(Self { addr, handle })
    }

    /// Client configuration pointing at this server
    pub fn client_config(&self, room_id: &str, heartbeat_interval_ms: u64) -> AppConfig {
        AppConfig {
            app: AppSettings {
                name: "room-sync-test".to_string(),
                env: Environment::Development,
            },
            server: ServerConfig {
                host: self.addr.ip().to_string(),
                port: self.addr.port(),
            },
            heartbeat: HeartbeatConfig {
                interval_ms: heartbeat_interval_ms,
            },
            room_id: room_id.to_string(),
        }
    }

    /// Wait for the script to finish; propagates script panics
    pub async fn finished(self) -> Result<()> {
        self.handle.await?;
        Ok(())
    }
}

/// Poll the session until its room equals `expected`, or time out
pub async fn wait_for_room(session: &Session, expected: &Value, wait: Duration) -> bool {
    let deadline = Instant::now() + wait;
    loop {
        if session.room().as_ref() == Some(expected) {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
