//! Startup wiring: configuration in, groups of blocks plus their adapters out.

use crate::{battery, clock, cpu, music, todo, wifi, window, workspaces, Adapter};
use bar_config::{BarConfig, BlockKind};
use bar_core::{Alignment, BarError, Block, Context, Group, RedrawSender, Result};
use bar_ipc::HyprlandIpc;
use bar_mpd::Client;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// The composed bar content, before any adapter is running.
#[derive(Debug)]
pub struct Composition {
    pub groups: Vec<Group>,
    pub adapters: Vec<Adapter>,
}

impl Composition {
    /// Start every adapter and hand back the groups for the bar.
    pub fn spawn(self) -> (Vec<Group>, Vec<JoinHandle<()>>) {
        let handles = self.adapters.into_iter().map(Adapter::spawn).collect();
        (self.groups, handles)
    }
}

/// Build the left, center and right groups named in `cfg`.
///
/// Each block kind may appear once. Adapters are created but not started;
/// their handles signal `redraw`.
pub fn compose(cfg: &BarConfig, ctx: &Context, redraw: &RedrawSender) -> Result<Composition> {
    let mut builder = Builder {
        cfg,
        ctx,
        redraw,
        seen: HashSet::new(),
        adapters: Vec::new(),
        ipc: None,
    };

    let mut groups = Vec::with_capacity(3);
    for (align, kinds) in [
        (Alignment::Left, &cfg.left),
        (Alignment::Center, &cfg.center),
        (Alignment::Right, &cfg.right),
    ] {
        let mut blocks = Vec::new();
        for &kind in kinds {
            blocks.extend(builder.build(kind)?);
        }
        groups.push(Group::new(align, blocks));
    }

    info!(
        blocks = groups.iter().map(|g| g.blocks().len()).sum::<usize>(),
        adapters = builder.adapters.len(),
        "Bar composed"
    );

    Ok(Composition {
        groups,
        adapters: builder.adapters,
    })
}

struct Builder<'a> {
    cfg: &'a BarConfig,
    ctx: &'a Context,
    redraw: &'a RedrawSender,
    seen: HashSet<BlockKind>,
    adapters: Vec<Adapter>,
    /// Resolved on first use; `Some(None)` once discovery has failed.
    ipc: Option<Option<HyprlandIpc>>,
}

impl Builder<'_> {
    fn ipc(&mut self) -> Option<HyprlandIpc> {
        self.ipc
            .get_or_insert_with(|| match HyprlandIpc::new() {
                Ok(ipc) => Some(ipc),
                Err(e) => {
                    warn!("{e}");
                    None
                }
            })
            .clone()
    }

    fn build(&mut self, kind: BlockKind) -> Result<Vec<Block>> {
        if !self.seen.insert(kind) {
            return Err(BarError::Config(format!(
                "block {kind:?} is listed more than once"
            )));
        }

        let cfg = self.cfg;
        let redraw = self.redraw.clone();

        let (blocks, adapter) = match kind {
            BlockKind::Workspaces => {
                let ipc = self.ipc();
                let (blocks, active) =
                    workspaces::blocks(&cfg.workspaces, self.ctx.measure.as_ref(), ipc.clone())?;
                let handles = blocks.iter().map(|b| b.handle(redraw.clone())).collect();
                let adapter = workspaces::adapter(handles, &cfg.workspaces, active, ipc)?;
                (blocks, adapter)
            }
            BlockKind::Window => {
                let ipc = self.ipc();
                let block = window::block(&cfg.window);
                let adapter = window::adapter(block.handle(redraw), cfg.window.clone(), ipc);
                (vec![block], adapter)
            }
            BlockKind::Clock => {
                let block = clock::block(&cfg.clock)?;
                let adapter = clock::adapter(block.handle(redraw), cfg.clock.clone());
                (vec![block], adapter)
            }
            BlockKind::Music => {
                let client = Arc::new(Client::new(cfg.music.address.clone()));
                let block = music::block(&cfg.music, client.clone())?;
                let adapter = music::adapter(block.handle(redraw), cfg.music.clone(), client);
                (vec![block], adapter)
            }
            BlockKind::Todo => {
                let block = todo::block(&cfg.todo)?;
                let adapter = todo::adapter(block.handle(redraw), cfg.todo.clone());
                (vec![block], adapter)
            }
            BlockKind::Battery => {
                let block = battery::block(&cfg.battery);
                let adapter = battery::adapter(block.handle(redraw), cfg.battery.clone());
                (vec![block], adapter)
            }
            BlockKind::Wifi => {
                let block = wifi::block(&cfg.wifi);
                let adapter = wifi::adapter(block.handle(redraw), cfg.wifi.clone());
                (vec![block], adapter)
            }
            BlockKind::Cpu => {
                let block = cpu::block(&cfg.cpu);
                let adapter = cpu::adapter(block.handle(redraw), cfg.cpu.clone());
                (vec![block], adapter)
            }
        };

        self.adapters.push(adapter);
        Ok(blocks)
    }
}
