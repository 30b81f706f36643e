use crate::connection::{Connection, Response};
use crate::types::{Song, Status};
use bar_core::{BarError, Result};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Longest a single command may take, connecting included.
const COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared command connection that reconnects lazily.
///
/// A failed or timed-out command drops the connection; the next command
/// dials again.
#[derive(Debug)]
pub struct Client {
    addr: String,
    timeout: Duration,
    conn: Mutex<Option<Connection>>,
}

impl Client {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            timeout: COMMAND_TIMEOUT,
            conn: Mutex::new(None),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run `cmd`, dialling first if there is no live connection.
    pub async fn command(&self, cmd: &str) -> Result<Response> {
        let mut slot = self.conn.lock().await;
        let result = tokio::time::timeout(self.timeout, self.exchange(&mut slot, cmd))
            .await
            .unwrap_or_else(|_| Err(BarError::Mpd(format!("{cmd}: timed out"))));
        if result.is_err() {
            *slot = None;
        }
        result
    }

    async fn exchange(&self, slot: &mut Option<Connection>, cmd: &str) -> Result<Response> {
        if slot.is_none() {
            let conn = Connection::connect(&self.addr).await?;
            debug!(addr = %self.addr, version = conn.version(), "connected to MPD");
            *slot = Some(conn);
        }
        let conn = slot
            .as_mut()
            .ok_or_else(|| BarError::Mpd("not connected".into()))?;
        conn.command(cmd).await
    }

    pub async fn ping(&self) -> Result<()> {
        self.command("ping").await.map(drop)
    }

    pub async fn status(&self) -> Result<Status> {
        self.command("status").await.map(|r| Status::from_response(&r))
    }

    pub async fn current_song(&self) -> Result<Song> {
        self.command("currentsong").await.map(|r| Song::from_response(&r))
    }

    pub async fn pause(&self, pause: bool) -> Result<()> {
        self.command(if pause { "pause 1" } else { "pause 0" })
            .await
            .map(drop)
    }

    /// Pause when playing, resume when paused.
    pub async fn toggle_pause(&self) -> Result<()> {
        let status = self.status().await?;
        self.pause(!status.is_paused()).await
    }

    pub async fn previous(&self) -> Result<()> {
        self.command("previous").await.map(drop)
    }

    pub async fn next(&self) -> Result<()> {
        self.command("next").await.map(drop)
    }

    /// Ping every `interval` so the server does not time the connection out.
    /// Failures are logged; the next command reconnects.
    pub async fn keep_alive(&self, interval: Duration) {
        loop {
            tokio::time::sleep(interval).await;
            if let Err(e) = self.ping().await {
                warn!(addr = %self.addr, "MPD keep-alive failed: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::tests::fake_server;

    #[tokio::test]
    async fn toggle_pause_reads_state_first() {
        let (addr, server) = fake_server(vec!["state: play\nOK\n", "OK\n"]).await;
        let client = Client::new(addr);

        client.toggle_pause().await.unwrap();
        assert_eq!(server.await.unwrap(), vec!["status", "pause 1"]);
    }

    #[tokio::test]
    async fn failed_command_drops_connection() {
        let (addr, server) = fake_server(vec!["state: pause\nOK\n"]).await;
        let client = Client::new(addr.clone());

        assert!(client.status().await.unwrap().is_paused());
        server.await.unwrap();

        // Server is gone: the command fails and the slot is cleared.
        assert!(client.next().await.is_err());
        assert!(client.conn.lock().await.is_none());
    }

    #[tokio::test]
    async fn unreachable_server_is_an_error_not_a_panic() {
        let client = Client::new("127.0.0.1:1");
        assert!(client.ping().await.is_err());
    }

    #[tokio::test]
    async fn silent_server_times_out_and_frees_the_client() {
        use tokio::io::AsyncWriteExt;
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            stream.write_all(b"OK MPD 0.23.5\n").await.unwrap();
            // Read nothing, answer nothing.
            tokio::time::sleep(Duration::from_secs(60)).await;
            drop(stream);
        });

        let client = Client::new(addr).with_timeout(Duration::from_millis(100));
        let started = std::time::Instant::now();
        let err = client.status().await.unwrap_err();

        assert!(err.to_string().contains("timed out"));
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(client.conn.lock().await.is_none());
    }
}
