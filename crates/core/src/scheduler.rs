use crate::bar::Bar;
use crate::redraw::RedrawReceiver;
use crate::surface::Surface;
use std::sync::Arc;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Waiting for a redraw signal.
    Idle,
    /// Draining every dirty block.
    Sweeping,
}

/// The single consumer that repaints dirty blocks.
pub struct Scheduler<S> {
    bar: Arc<Bar>,
    redraw: RedrawReceiver,
    surface: S,
    state: SchedulerState,
}

impl<S: Surface> Scheduler<S> {
    pub fn new(bar: Arc<Bar>, redraw: RedrawReceiver, surface: S) -> Self {
        Self {
            bar,
            redraw,
            surface,
            state: SchedulerState::Idle,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Repaint every dirty block in display order, then flush once.
    ///
    /// The whole bar is walked rather than only the block that signalled, so
    /// blocks dirtied between wake-ups are never skipped. A paint failure is
    /// logged and the block is dropped for this frame.
    pub fn sweep(&mut self) -> usize {
        self.state = SchedulerState::Sweeping;
        let mut painted = 0;

        for placement in self.bar.placements() {
            let Some(content) = placement.block.take_dirty() else {
                continue;
            };
            match self.bar.paint(&mut self.surface, placement, &content) {
                Ok(()) => painted += 1,
                Err(e) => error!(block = placement.block.id(), "paint failed: {e}"),
            }
        }

        if painted > 0 {
            if let Err(e) = self.surface.flush() {
                error!("surface flush failed: {e}");
            }
            debug!(painted, "sweep complete");
        }

        self.state = SchedulerState::Idle;
        painted
    }

    /// Sweep, then sleep until the next signal. Returns once every sender is gone.
    pub async fn run(mut self) {
        loop {
            self.sweep();
            match self.redraw.recv().await {
                Some(block) => debug!(block = %block, "redraw requested"),
                None => break,
            }
        }
        info!("redraw channel closed; scheduler stopping");
    }
}
