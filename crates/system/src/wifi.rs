use bar_core::{BarError, Result};
use tokio::process::Command;

pub const CONNECTED_GLYPH: char = '\u{faa8}';
pub const DISCONNECTED_GLYPH: char = '\u{faa9}';

/// SSID of the network `iface` is associated with, empty when disconnected.
pub async fn ssid(iface: &str) -> Result<String> {
    let output = Command::new("iwgetid")
        .arg("-r")
        .arg(iface)
        .output()
        .await
        .map_err(|e| BarError::System(format!("running iwgetid: {e}")))?;

    // iwgetid exits non-zero when not associated; that is not an error here.
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Block text for an SSID.
pub fn format_wifi(ssid: &str) -> String {
    let ssid = ssid.trim();
    if ssid.is_empty() {
        format!("{DISCONNECTED_GLYPH} not connected")
    } else {
        format!("{CONNECTED_GLYPH} {ssid}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connected_shows_ssid() {
        assert_eq!(format_wifi("eduroam\n"), "\u{faa8} eduroam");
    }

    #[test]
    fn empty_means_disconnected() {
        assert_eq!(format_wifi(""), "\u{faa9} not connected");
        assert_eq!(format_wifi("  "), "\u{faa9} not connected");
    }
}
