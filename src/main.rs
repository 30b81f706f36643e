//! blockbar: a block-based status bar for Hyprland.
//!
//! Run with:  `RUST_LOG=info blockbar`

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("blockbar v{} starting", env!("CARGO_PKG_VERSION"));

    bar_wayland::run().map_err(Into::into)
}
