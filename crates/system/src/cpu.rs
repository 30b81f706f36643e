use std::collections::VecDeque;
use sysinfo::System;

/// Rolling history of CPU usage samples, used to smooth the displayed value.
#[derive(Debug, Clone)]
pub struct CpuHistory {
    pub samples:  VecDeque<f32>,
    pub capacity: usize,
}

impl CpuHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples:  VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new sample, evicting the oldest if at capacity.
    pub fn push(&mut self, value: f32) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Average of all samples in the history window.
    pub fn average(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f32>() / self.samples.len() as f32
    }
}

/// One smoothed CPU/memory reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuSample {
    /// Average usage across cores and the history window (0.0 – 100.0).
    pub usage: f32,
    pub ram_used: u64,
}

/// Owns a `sysinfo::System` and a short usage history.
pub struct CpuSampler {
    sys: System,
    history: CpuHistory,
}

impl CpuSampler {
    pub fn new(window: usize) -> Self {
        Self {
            sys: System::new(),
            history: CpuHistory::new(window.max(1)),
        }
    }

    /// Refresh CPU and memory counters and return the smoothed reading.
    pub fn sample(&mut self) -> CpuSample {
        self.sys.refresh_cpu_usage();
        self.sys.refresh_memory();

        let cores: Vec<f32> = self.sys.cpus().iter().map(|c| c.cpu_usage()).collect();
        if !cores.is_empty() {
            self.history.push(cores.iter().sum::<f32>() / cores.len() as f32);
        }

        CpuSample {
            usage: self.history.average(),
            ram_used: self.sys.used_memory(),
        }
    }
}

/// Human-readable binary size, e.g. `"7.3 GiB"`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [(u64, &str); 3] = [(1 << 30, "GiB"), (1 << 20, "MiB"), (1 << 10, "KiB")];

    UNITS
        .iter()
        .find(|(size, _)| bytes >= *size)
        .map(|(size, unit)| format!("{:.1} {unit}", bytes as f64 / *size as f64))
        .unwrap_or_else(|| format!("{bytes} B"))
}

/// Block text, e.g. `cpu 12% 3.1 GiB`.
pub fn format_cpu(sample: &CpuSample) -> String {
    format!("cpu {:.0}% {}", sample.usage, format_bytes(sample.ram_used))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_evicts_oldest() {
        let mut h = CpuHistory::new(2);
        h.push(10.0);
        h.push(20.0);
        h.push(60.0);
        assert_eq!(h.samples.len(), 2);
        assert_eq!(h.average(), 40.0);
    }

    #[test]
    fn empty_history_averages_zero() {
        assert_eq!(CpuHistory::new(4).average(), 0.0);
    }

    #[test]
    fn bytes_pick_largest_unit() {
        assert_eq!(format_bytes(8 * 1024 * 1024 * 1024), "8.0 GiB");
        assert_eq!(format_bytes(512 * 1024 * 1024), "512.0 MiB");
        assert_eq!(format_bytes(0), "0 B");
    }

    #[test]
    fn cpu_text() {
        let sample = CpuSample {
            usage: 12.4,
            ram_used: 3 * 1024 * 1024 * 1024,
        };
        assert_eq!(format_cpu(&sample), "cpu 12% 3.0 GiB");
    }
}
