use crate::{period, Adapter};
use bar_config::CpuConfig;
use bar_core::{Block, BlockHandle};
use bar_system::{format_cpu, CpuSampler};

/// Samples averaged into the displayed usage.
const HISTORY: usize = 5;

pub fn block(cfg: &CpuConfig) -> Block {
    Block::new("cpu", cfg.width).with_align(cfg.align)
}

pub fn adapter(handle: BlockHandle, cfg: CpuConfig) -> Adapter {
    Adapter::new("cpu", async move {
        let mut sampler = CpuSampler::new(HISTORY);
        let mut tick = tokio::time::interval(period(cfg.interval_secs));
        loop {
            tick.tick().await;
            handle.update(format_cpu(&sampler.sample())).await;
        }
    })
}
