use crate::events::{parse_event, ActiveWindow, HyprlandEvent, WorkspaceRef};
use bar_core::{BarError, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Delay between reconnect attempts on the event socket.
const RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// Hyprland IPC client.
///
/// Streams typed [`HyprlandEvent`]s from the event socket and sends one-shot
/// requests on the command socket.
#[derive(Debug, Clone)]
pub struct HyprlandIpc {
    /// Path to `.socket2.sock` (the event socket).
    event_socket: PathBuf,
    /// Path to `.socket.sock` (the command socket).
    cmd_socket: PathBuf,
}

impl HyprlandIpc {
    /// Create a new client, discovering sockets from `$HYPRLAND_INSTANCE_SIGNATURE`.
    pub fn new() -> Result<Self> {
        let sig = std::env::var("HYPRLAND_INSTANCE_SIGNATURE").map_err(|_| {
            BarError::Ipc("HYPRLAND_INSTANCE_SIGNATURE not set; is Hyprland running?".into())
        })?;

        let runtime_dir =
            std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/run/user/1000".to_string());

        Ok(Self::with_base(
            PathBuf::from(runtime_dir).join("hypr").join(sig),
        ))
    }

    /// Client for the sockets inside `base`.
    pub fn with_base(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            event_socket: base.join(".socket2.sock"),
            cmd_socket: base.join(".socket.sock"),
        }
    }

    pub fn event_socket(&self) -> &Path {
        &self.event_socket
    }

    /// Spawn a background task that reads the event socket and forwards typed
    /// events on the returned channel.
    ///
    /// Connection failures are retried forever; the task ends when the
    /// receiver is dropped.
    pub fn spawn_listener(&self) -> mpsc::Receiver<HyprlandEvent> {
        let (tx, rx) = mpsc::channel(32);
        let path = self.event_socket.clone();

        tokio::spawn(async move {
            loop {
                match UnixStream::connect(&path).await {
                    Ok(stream) => {
                        info!("Connected to Hyprland event socket");
                        let mut lines = BufReader::new(stream).lines();

                        while let Ok(Some(line)) = lines.next_line().await {
                            if tx.send(parse_event(&line)).await.is_err() {
                                return; // all receivers dropped
                            }
                        }

                        warn!("Hyprland IPC connection lost; reconnecting in 2s…");
                    }
                    Err(e) => {
                        error!("Cannot connect to Hyprland IPC: {e}; retrying in 2s…");
                    }
                }

                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        });

        rx
    }

    /// Send a one-shot command to Hyprland and return the raw response.
    pub async fn command(&self, cmd: &str) -> Result<String> {
        let mut stream = UnixStream::connect(&self.cmd_socket)
            .await
            .map_err(|e| BarError::Ipc(format!("connect: {e}")))?;

        stream
            .write_all(cmd.as_bytes())
            .await
            .map_err(|e| BarError::Ipc(format!("write: {e}")))?;

        let mut buf = String::new();
        stream
            .read_to_string(&mut buf)
            .await
            .map_err(|e| BarError::Ipc(format!("read: {e}")))?;

        Ok(buf)
    }

    async fn query<T: DeserializeOwned>(&self, cmd: &str) -> Result<T> {
        let raw = self.command(cmd).await?;
        serde_json::from_str(&raw).map_err(|e| BarError::Ipc(format!("parse {cmd}: {e}")))
    }

    /// The focused window, with empty fields when nothing is focused.
    pub async fn active_window(&self) -> Result<ActiveWindow> {
        self.query("j/activewindow").await
    }

    /// The focused workspace.
    pub async fn active_workspace(&self) -> Result<WorkspaceRef> {
        self.query("j/activeworkspace").await
    }

    /// Ask Hyprland to focus workspace `id`.
    pub async fn switch_workspace(&self, id: u32) -> Result<()> {
        let reply = self.command(&format!("dispatch workspace {id}")).await?;
        match reply.trim() {
            "ok" => Ok(()),
            other => Err(BarError::Ipc(format!("workspace {id}: {other}"))),
        }
    }
}
