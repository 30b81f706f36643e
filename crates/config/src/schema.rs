use bar_core::Alignment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure parsed from `blockbar.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    /// Bar geometry.
    pub global: GlobalConfig,
    /// Default colours and font metrics.
    pub theme: ThemeConfig,
    /// Blocks anchored to the left edge, in order.
    pub left: Vec<BlockKind>,
    /// Blocks centred in the bar, in order.
    pub center: Vec<BlockKind>,
    /// Blocks anchored to the right edge, in order.
    pub right: Vec<BlockKind>,

    pub clock: ClockConfig,
    pub window: WindowConfig,
    pub workspaces: WorkspacesConfig,
    pub battery: BatteryConfig,
    pub wifi: WifiConfig,
    pub music: MusicConfig,
    pub todo: TodoConfig,
    pub cpu: CpuConfig,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            global: GlobalConfig::default(),
            theme: ThemeConfig::default(),
            left: vec![BlockKind::Workspaces, BlockKind::Window],
            center: vec![BlockKind::Clock],
            right: vec![BlockKind::Battery, BlockKind::Wifi],
            clock: ClockConfig::default(),
            window: WindowConfig::default(),
            workspaces: WorkspacesConfig::default(),
            battery: BatteryConfig::default(),
            wifi: WifiConfig::default(),
            music: MusicConfig::default(),
            todo: TodoConfig::default(),
            cpu: CpuConfig::default(),
        }
    }
}

/// Every block type the bar knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Workspaces,
    Window,
    Clock,
    Music,
    Todo,
    Battery,
    Wifi,
    Cpu,
}

/// Bar geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Bar width in pixels. Layout offsets are computed against this.
    pub width: i32,
    /// Bar height in pixels.
    pub height: i32,
    /// Whether the bar sits at the top or the bottom.
    pub position: Position,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 26,
            position: Position::Top,
        }
    }
}

/// Bar position on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Top,
    Bottom,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Fallback block background (hex).
    pub background: String,
    /// Fallback block foreground (hex).
    pub foreground: String,
    /// Font size in points.
    pub font_size: f32,
    /// Horizontal advance of one monospace cell, in pixels.
    pub glyph_width: i32,
    /// Distance from the top of the bar to the top of the text.
    pub text_y: i32,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: "#222222".to_string(),
            foreground: "#cccccc".to_string(),
            font_size: 16.0,
            glyph_width: 10,
            text_y: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub width: i32,
    pub align: Alignment,
    /// `strftime` format string.
    pub format: String,
    pub interval_secs: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            width: 400,
            align: Alignment::Center,
            format: "%A, %B %-d %I:%M %p".to_string(),
            interval_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: i32,
    pub align: Alignment,
    pub pad: i32,
    /// Shown when the focused window has no title.
    pub placeholder: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 340,
            align: Alignment::Left,
            pad: 8,
            placeholder: "?".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspacesConfig {
    /// One block per name; workspace ids are 1-based positions in this list.
    pub names: Vec<String>,
    pub background: String,
    pub active: String,
}

impl Default for WorkspacesConfig {
    fn default() -> Self {
        Self {
            names: (1..=5).map(|i| i.to_string()).collect(),
            background: "#5394C9".to_string(),
            active: "#72A7D3".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatteryConfig {
    pub width: i32,
    pub align: Alignment,
    /// Directory name under `/sys/class/power_supply`.
    pub supply: String,
    pub interval_secs: u64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            width: 72,
            align: Alignment::Center,
            supply: "BAT0".to_string(),
            interval_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiConfig {
    pub width: i32,
    pub align: Alignment,
    /// Wireless interface; `$WIFI_INTERFACE` takes precedence.
    pub interface: String,
    pub interval_secs: u64,
}

impl Default for WifiConfig {
    fn default() -> Self {
        Self {
            width: 200,
            align: Alignment::Center,
            interface: "wlp2s0".to_string(),
            interval_secs: 15,
        }
    }
}

impl WifiConfig {
    /// The interface to query, honouring `$WIFI_INTERFACE`.
    pub fn effective_interface(&self) -> String {
        std::env::var("WIFI_INTERFACE")
            .ok()
            .filter(|i| !i.is_empty())
            .unwrap_or_else(|| self.interface.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicConfig {
    pub width: i32,
    pub align: Alignment,
    /// MPD `host:port`.
    pub address: String,
    /// Colour of the strip at the block's left edge.
    pub accent: String,
    /// Width of that strip; `0` disables it.
    pub accent_width: i32,
    /// Extra clickable pixels in front of the track text.
    pub hit_pad: i32,
    pub keepalive_secs: u64,
    /// Back-off between reconnect attempts.
    pub retry_secs: u64,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            width: 660,
            align: Alignment::Right,
            address: "127.0.0.1:6600".to_string(),
            accent: "#445967".to_string(),
            accent_width: 24,
            hit_pad: 16,
            keepalive_secs: 45,
            retry_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoConfig {
    pub width: i32,
    pub align: Alignment,
    /// Todo file; defaults to `~/.todo`.
    pub path: Option<PathBuf>,
    /// Command spawned on click; the todo path is appended.
    pub editor: Vec<String>,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            width: 29,
            align: Alignment::Center,
            path: None,
            editor: ["st", "micro", "-savecursor", "false"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl TodoConfig {
    pub fn effective_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| crate::home_dir().join(".todo"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuConfig {
    pub width: i32,
    pub align: Alignment,
    pub interval_secs: u64,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            width: 140,
            align: Alignment::Center,
            interval_secs: 2,
        }
    }
}
