use crate::Adapter;
use bar_config::WorkspacesConfig;
use bar_core::{BarError, Block, BlockHandle, Button, Color, Result, TextMeasure};
use bar_ipc::{HyprlandEvent, HyprlandIpc};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Block width for a workspace label: the text plus 4 px, rounded up to the
/// next multiple of 16, at least 32.
pub fn label_width(measure: &dyn TextMeasure, name: &str) -> i32 {
    let pw = measure.measure(name) + 4;
    (16 * (1 + pw / 16)).max(32)
}

/// Previous and next workspace ids around `active`, wrapping at both ends.
/// Ids are 1-based; an unknown `active` (0) behaves like the first.
pub fn neighbours(active: u32, count: u32) -> (u32, u32) {
    if count == 0 {
        return (0, 0);
    }
    let idx = active.clamp(1, count) - 1;
    let prev = (idx + count - 1) % count;
    let next = (idx + 1) % count;
    (prev + 1, next + 1)
}

/// Highlight bookkeeping for the workspace strip.
#[derive(Debug, Clone)]
pub struct Workspaces {
    handles: Vec<BlockHandle>,
    normal: Color,
    highlight: Color,
    active: Arc<AtomicU32>,
}

impl Workspaces {
    pub fn active(&self) -> u32 {
        self.active.load(Ordering::Relaxed)
    }

    /// Move the highlight to workspace `id` and redraw the two blocks that
    /// changed. Ids outside the configured names clear the highlight.
    pub async fn focus(&self, id: u32) {
        let old = self.active.swap(id, Ordering::Relaxed);
        if old == id {
            return;
        }
        for (slot, color) in [(old, self.normal), (id, self.highlight)] {
            let Some(handle) = slot.checked_sub(1).and_then(|i| self.handles.get(i as usize))
            else {
                continue;
            };
            if handle.set_bg(Some(color)) {
                handle.redraw().await;
            }
        }
    }
}

/// One block per configured name plus the shared highlight state.
///
/// Click focuses that workspace; scrolling on any of them steps through the
/// list relative to the active one.
pub fn blocks(
    cfg: &WorkspacesConfig,
    measure: &dyn TextMeasure,
    ipc: Option<HyprlandIpc>,
) -> Result<(Vec<Block>, Arc<AtomicU32>)> {
    let normal: Color = cfg.background.parse()?;
    // Validate the highlight colour up front as well.
    let _: Color = cfg.active.parse()?;

    let count = cfg.names.len() as u32;
    let active = Arc::new(AtomicU32::new(0));

    let blocks = cfg
        .names
        .iter()
        .zip(1..)
        .map(|(name, id)| {
            Block::new(format!("workspace-{id}"), label_width(measure, name))
                .with_text(name.as_str())
                .with_bg(normal)
                .on_click(switch_to(ipc.clone(), move || id))
                .on(Button::ScrollUp, {
                    let active = active.clone();
                    switch_to(ipc.clone(), move || {
                        neighbours(active.load(Ordering::Relaxed), count).0
                    })
                })
                .on(Button::ScrollDown, {
                    let active = active.clone();
                    switch_to(ipc.clone(), move || {
                        neighbours(active.load(Ordering::Relaxed), count).1
                    })
                })
        })
        .collect();

    Ok((blocks, active))
}

fn switch_to(
    ipc: Option<HyprlandIpc>,
    target: impl Fn() -> u32 + Send + Sync + 'static,
) -> impl Fn() -> futures::future::BoxFuture<'static, Result<()>> + Send + Sync + 'static {
    move || -> futures::future::BoxFuture<'static, Result<()>> {
        let ipc = ipc.clone();
        let id = target();
        Box::pin(async move {
            let ipc = ipc.ok_or_else(|| BarError::Ipc("Hyprland is not available".into()))?;
            ipc.switch_workspace(id).await
        })
    }
}

pub fn adapter(
    handles: Vec<BlockHandle>,
    cfg: &WorkspacesConfig,
    active: Arc<AtomicU32>,
    ipc: Option<HyprlandIpc>,
) -> Result<Adapter> {
    let state = Workspaces {
        handles,
        normal: cfg.background.parse()?,
        highlight: cfg.active.parse()?,
        active,
    };

    Ok(Adapter::new("workspaces", async move {
        let Some(ipc) = ipc else {
            warn!("Hyprland IPC unavailable; workspace highlight disabled");
            return;
        };

        match ipc.active_workspace().await {
            Ok(ws) => state.focus(ws.id.max(0) as u32).await,
            Err(e) => warn!("Could not fetch active workspace: {e}"),
        }

        let mut events = ipc.spawn_listener();
        while let Some(event) = events.recv().await {
            if let HyprlandEvent::Workspace { id, name } = event {
                debug!(id, %name, "workspace focused");
                state.focus(id).await;
            }
        }
    }))
}
