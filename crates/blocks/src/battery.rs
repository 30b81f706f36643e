use crate::{period, Adapter};
use bar_config::BatteryConfig;
use bar_core::{Block, BlockHandle, Result};
use bar_system::{format_battery, read_battery, supply_dir, BatteryReading};
use tracing::warn;

/// Shown while the supply cannot be read.
pub const UNKNOWN: &str = "?";

pub fn battery_text(reading: &Result<BatteryReading>) -> String {
    match reading {
        Ok(r) => format_battery(r),
        Err(_) => UNKNOWN.to_string(),
    }
}

pub fn block(cfg: &BatteryConfig) -> Block {
    Block::new("battery", cfg.width)
        .with_align(cfg.align)
        .with_text(UNKNOWN)
}

/// Poll the sysfs power-supply directory every `interval_secs`.
pub fn adapter(handle: BlockHandle, cfg: BatteryConfig) -> Adapter {
    Adapter::new("battery", async move {
        let dir = supply_dir(&cfg.supply);
        let mut tick = tokio::time::interval(period(cfg.interval_secs));
        loop {
            tick.tick().await;
            let reading = read_battery(&dir).await;
            if let Err(e) = &reading {
                warn!(supply = %cfg.supply, "{e}");
            }
            handle.update(battery_text(&reading)).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bar_core::BarError;

    #[test]
    fn unreadable_supply_shows_unknown() {
        let failed: Result<BatteryReading> = Err(BarError::System("gone".into()));
        assert_eq!(battery_text(&failed), "?");

        let ok = Ok(BatteryReading {
            capacity: "64".into(),
            status: "Discharging".into(),
        });
        assert_eq!(battery_text(&ok), "\u{f578} 64%");
    }

    #[test]
    fn block_starts_unknown() {
        let b = block(&BatteryConfig::default());
        assert_eq!(b.id(), "battery");
        assert_eq!(b.width(), 72);
        assert_eq!(b.text(), UNKNOWN);
    }
}
