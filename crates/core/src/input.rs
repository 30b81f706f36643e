use crate::action::Button;
use crate::bar::Bar;
use crate::block::HitZone;
use crate::layout::Placement;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// A button press (or wheel step) at an absolute x coordinate on the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub x: i32,
    pub button: Button,
}

/// What became of a pointer event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// No block under the pointer.
    Missed,
    /// Inside a block but outside its clickable zone.
    Ignored { block: String },
    /// The block has no action for this button.
    Unbound { block: String },
    Invoked { block: String },
    /// The action ran and returned an error (already logged).
    Failed { block: String },
}

/// Routes pointer events to the block under the cursor.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    bar: Arc<Bar>,
}

impl Dispatcher {
    pub fn new(bar: Arc<Bar>) -> Self {
        Self { bar }
    }

    /// The first block whose interval contains `x`, and whether `x` is inside
    /// that block's clickable zone.
    pub fn hit_test(&self, x: i32) -> Option<(Placement<'_>, bool)> {
        let placement = self.bar.placements().find(|p| p.contains(x))?;
        let clickable = match placement.block.hit_zone() {
            HitZone::Whole => true,
            HitZone::TrailingText { pad } => {
                let text = self.bar.fit_text(placement.block, &placement.block.text());
                let tw = self.bar.context().measure.measure(&text);
                x >= placement.end() - tw - pad
            }
        };
        Some((placement, clickable))
    }

    pub async fn dispatch(&self, event: PointerEvent) -> Dispatch {
        let Some((placement, clickable)) = self.hit_test(event.x) else {
            return Dispatch::Missed;
        };
        let block = placement.block.id().to_string();
        if !clickable {
            return Dispatch::Ignored { block };
        }
        let Some(action) = placement.block.action(event.button) else {
            return Dispatch::Unbound { block };
        };

        debug!(block = %block, button = %event.button, "running action");
        match action.invoke().await {
            Ok(()) => Dispatch::Invoked { block },
            Err(e) => {
                warn!(block = %block, button = %event.button, "action failed: {e}");
                Dispatch::Failed { block }
            }
        }
    }

    /// Dispatch events until the sender side closes.
    pub async fn run(self, mut events: mpsc::Receiver<PointerEvent>) {
        while let Some(event) = events.recv().await {
            self.dispatch(event).await;
        }
        debug!("pointer channel closed; dispatcher stopping");
    }
}
