//! WebSocket client that mirrors the telemetry server into a [`TableSource`].
//!
//! Runs a tokio runtime on a background thread. The table is marked
//! connected while a socket is open and disconnected otherwise; the client
//! retries at a fixed interval until it is dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::source::{TableSource, TelemetryMessage};

/// Handle to the background client thread. Dropping it stops the client.
pub struct WsTelemetryClient {
    table: TableSource,
    shutdown: Arc<AtomicBool>,
}

impl WsTelemetryClient {
    /// Start mirroring `url` into `table`.
    pub fn spawn(url: &str, retry: Duration, table: TableSource) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let url = url.to_string();
        let thread_table = table.clone();
        let thread_shutdown = shutdown.clone();

        std::thread::spawn(move || {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    error!(error = %e, "failed to create tokio runtime");
                    return;
                }
            };
            rt.block_on(async {
                Self::run(&url, retry, &thread_table, &thread_shutdown).await;
            });
            thread_table.set_connected(false);
        });

        Self { table, shutdown }
    }

    pub fn table(&self) -> &TableSource {
        &self.table
    }

    async fn run(url: &str, retry: Duration, table: &TableSource, shutdown: &AtomicBool) {
        while !shutdown.load(Ordering::Relaxed) {
            match tokio_tungstenite::connect_async(url).await {
                Ok((stream, _)) => {
                    info!(url, "telemetry socket connected");
                    table.set_connected(true);
                    Self::read_until_closed(stream, retry, table, shutdown).await;
                    table.set_connected(false);
                    warn!(url, "telemetry socket closed");
                }
                Err(e) => debug!(url, error = %e, "telemetry server unreachable"),
            }
            if !shutdown.load(Ordering::Relaxed) {
                tokio::time::sleep(retry).await;
            }
        }
    }

    async fn read_until_closed<T>(
        mut stream: tokio_tungstenite::WebSocketStream<T>,
        poll: Duration,
        table: &TableSource,
        shutdown: &AtomicBool,
    ) where
        T: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
    {
        use futures_util::StreamExt;
        use tokio_tungstenite::tungstenite::Message;

        while !shutdown.load(Ordering::Relaxed) {
            // Wake up periodically so a dropped handle is noticed on a quiet socket.
            let next = match tokio::time::timeout(poll, stream.next()).await {
                Ok(next) => next,
                Err(_) => continue,
            };
            match next {
                Some(Ok(Message::Text(text))) => match TelemetryMessage::parse(&text) {
                    Ok(msg) => msg.apply(table),
                    Err(e) => debug!(error = %e, "ignoring telemetry frame"),
                },
                Some(Ok(Message::Close(_))) | None => break,
                Some(Err(e)) => {
                    warn!(error = %e, "telemetry socket error");
                    break;
                }
                Some(Ok(_)) => {}
            }
        }
    }
}

impl Drop for WsTelemetryClient {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}
