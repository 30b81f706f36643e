use crate::{period, Adapter};
use bar_config::WifiConfig;
use bar_core::{Block, BlockHandle};
use bar_system::{format_wifi, ssid};
use tracing::warn;

pub fn block(cfg: &WifiConfig) -> Block {
    Block::new("wifi", cfg.width)
        .with_align(cfg.align)
        .with_text(format_wifi(""))
}

/// Ask `iwgetid` for the associated SSID every `interval_secs`.
/// A failed query keeps the previous text.
pub fn adapter(handle: BlockHandle, cfg: WifiConfig) -> Adapter {
    Adapter::new("wifi", async move {
        let iface = cfg.effective_interface();
        let mut tick = tokio::time::interval(period(cfg.interval_secs));
        loop {
            tick.tick().await;
            match ssid(&iface).await {
                Ok(name) => {
                    handle.update(format_wifi(&name)).await;
                }
                Err(e) => warn!(%iface, "{e}"),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disconnected() {
        let b = block(&WifiConfig::default());
        assert_eq!(b.width(), 200);
        assert_eq!(b.text(), "\u{faa9} not connected");
    }
}
