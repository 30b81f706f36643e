//! Sensor and filesystem readers used by the bar's data-source blocks.

pub mod battery;
pub mod cpu;
pub mod todo;
pub mod watch;
pub mod wifi;

pub use battery::{format_battery, read_battery, supply_dir, BatteryReading};
pub use cpu::{format_bytes, format_cpu, CpuHistory, CpuSample, CpuSampler};
pub use todo::{count_file_lines, count_lines, format_todo};
pub use watch::watch_file;
pub use wifi::{format_wifi, ssid};
