use bar_core::{BarError, Result};
use std::path::{Path, PathBuf};

/// Nerd Font battery glyph shown in front of the charge level.
pub const BATTERY_GLYPH: char = '\u{f578}';

/// Raw charge state read from the Linux sysfs power-supply interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatteryReading {
    /// Contents of `capacity`, e.g. `"57"`.
    pub capacity: String,
    /// Contents of `status`, e.g. `"Discharging"`, `"Charging"`, `"Full"`.
    pub status: String,
}

/// `/sys/class/power_supply/<supply>`.
pub fn supply_dir(supply: &str) -> PathBuf {
    Path::new("/sys/class/power_supply").join(supply)
}

/// Read `capacity` and `status` from a power-supply directory.
pub async fn read_battery(dir: &Path) -> Result<BatteryReading> {
    let read = |name: &'static str| async move {
        tokio::fs::read_to_string(dir.join(name))
            .await
            .map(|s| s.trim().to_string())
            .map_err(|e| BarError::System(format!("reading battery {name}: {e}")))
    };

    Ok(BatteryReading {
        capacity: read("capacity").await?,
        status: read("status").await?,
    })
}

/// Block text: `<glyph> 57%`, followed by the status unless discharging.
pub fn format_battery(reading: &BatteryReading) -> String {
    let mut text = format!("{BATTERY_GLYPH} {}%", reading.capacity);
    if reading.status != "Discharging" {
        text.push(' ');
        text.push_str(&reading.status);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(capacity: &str, status: &str) -> BatteryReading {
        BatteryReading {
            capacity: capacity.into(),
            status: status.into(),
        }
    }

    #[test]
    fn discharging_shows_level_only() {
        assert_eq!(format_battery(&reading("57", "Discharging")), "\u{f578} 57%");
    }

    #[test]
    fn other_states_are_appended() {
        assert_eq!(
            format_battery(&reading("100", "Full")),
            "\u{f578} 100% Full"
        );
        assert_eq!(
            format_battery(&reading("80", "Charging")),
            "\u{f578} 80% Charging"
        );
    }

    #[tokio::test]
    async fn reads_trimmed_sysfs_files() {
        let dir = std::env::temp_dir().join(format!("blockbar-bat-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("capacity"), "42\n").unwrap();
        std::fs::write(dir.join("status"), "Charging\n").unwrap();

        let r = read_battery(&dir).await.unwrap();
        assert_eq!(r, reading("42", "Charging"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn missing_supply_is_a_system_error() {
        let err = read_battery(Path::new("/nonexistent/BAT9")).await.unwrap_err();
        assert!(matches!(err, BarError::System(_)));
    }
}
