//! Data-source adapters for the bar and the startup composition that wires
//! them to their blocks.
//!
//! Every block kind has a module exposing a builder for its block(s) and an
//! async adapter loop that writes through a [`bar_core::BlockHandle`].

pub mod battery;
pub mod clock;
pub mod compose;
pub mod cpu;
pub mod music;
pub mod popup;
pub mod todo;
pub mod wifi;
pub mod window;
pub mod workspaces;

pub use compose::{compose, Composition};
pub use popup::{NotificationPopup, PopupBody};

use futures::future::BoxFuture;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// A long-running task that feeds one or more blocks.
pub struct Adapter {
    name: &'static str,
    task: BoxFuture<'static, ()>,
}

impl Adapter {
    pub fn new(name: &'static str, task: impl Future<Output = ()> + Send + 'static) -> Self {
        Self {
            name,
            task: Box::pin(task),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the adapter on the current tokio runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tracing::debug!(adapter = self.name, "starting adapter");
        tokio::spawn(self.task)
    }
}

impl std::fmt::Debug for Adapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Adapter").field("name", &self.name).finish()
    }
}

/// Polling period from a configured number of seconds; never zero.
pub(crate) fn period(secs: u64) -> Duration {
    Duration::from_secs(secs.max(1))
}
