use crate::{period, Adapter};
use bar_config::ClockConfig;
use bar_core::{BarError, Block, BlockHandle, Result};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Write;

/// Render `time` with a `strftime` format, rejecting invalid specifiers
/// instead of panicking inside `Display`.
pub fn format_time<Tz>(time: &DateTime<Tz>, format: &str) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    write!(out, "{}", time.format(format))
        .map_err(|_| BarError::Config(format!("invalid clock format '{format}'")))?;
    Ok(out)
}

pub fn block(cfg: &ClockConfig) -> Result<Block> {
    let text = format_time(&Local::now(), &cfg.format)?;
    Ok(Block::new("clock", cfg.width)
        .with_align(cfg.align)
        .with_text(text))
}

/// Re-render the local time every `interval_secs`.
pub fn adapter(handle: BlockHandle, cfg: ClockConfig) -> Adapter {
    Adapter::new("clock", async move {
        let mut tick = tokio::time::interval(period(cfg.interval_secs));
        loop {
            tick.tick().await;
            // The format was validated when the block was built.
            if let Ok(text) = format_time(&Local::now(), &cfg.format) {
                handle.update(text).await;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn noon() -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|d| d.and_hms_opt(13, 7, 0))
            .unwrap()
            .and_utc()
    }

    #[test]
    fn default_format() {
        let text = format_time(&noon(), &ClockConfig::default().format).unwrap();
        assert_eq!(text, "Tuesday, March 5 01:07 PM");
    }

    #[test]
    fn bad_format_is_config_error() {
        let err = format_time(&noon(), "%Q").unwrap_err();
        assert!(matches!(err, BarError::Config(_)));

        let cfg = ClockConfig {
            format: "%Q".into(),
            ..ClockConfig::default()
        };
        assert!(block(&cfg).is_err());
    }

    #[test]
    fn block_geometry_follows_config() {
        let b = block(&ClockConfig::default()).unwrap();
        assert_eq!(b.id(), "clock");
        assert_eq!(b.width(), 400);
        assert!(!b.text().is_empty());
    }
}
