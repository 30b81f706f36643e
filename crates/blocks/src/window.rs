use crate::Adapter;
use bar_config::WindowConfig;
use bar_core::{Block, BlockHandle};
use bar_ipc::{HyprlandEvent, HyprlandIpc};
use tracing::warn;

/// Text for the focused window, falling back to `placeholder` when untitled.
pub fn window_text(title: &str, placeholder: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        placeholder.to_string()
    } else {
        title.to_string()
    }
}

pub fn block(cfg: &WindowConfig) -> Block {
    Block::new("window", cfg.width)
        .with_align(cfg.align)
        .with_pad(cfg.pad)
        .with_text(cfg.placeholder.as_str())
}

/// Follow Hyprland `activewindow` events.
pub fn adapter(handle: BlockHandle, cfg: WindowConfig, ipc: Option<HyprlandIpc>) -> Adapter {
    Adapter::new("window", async move {
        let Some(ipc) = ipc else {
            warn!("Hyprland IPC unavailable; window title disabled");
            return;
        };

        match ipc.active_window().await {
            Ok(w) => {
                handle.update(window_text(&w.title, &cfg.placeholder)).await;
            }
            Err(e) => warn!("Could not fetch active window: {e}"),
        }

        let mut events = ipc.spawn_listener();
        while let Some(event) = events.recv().await {
            if let HyprlandEvent::ActiveWindow { title, .. } = event {
                handle.update(window_text(&title, &cfg.placeholder)).await;
            }
        }
    })
}
