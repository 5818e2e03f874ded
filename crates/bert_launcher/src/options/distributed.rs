//! Distributed training options
//!
//! Example: two nodes, 2 GPUs on the first and 3 on the second.
//! Both nodes pass `--world-size 5 --init-method tcp://node1:2333`.
//! The first node passes `--rank 0 --gpus-per-node 2`,
//! the second `--rank 2 --gpus-per-node 3`.

use clap::{Args, ValueEnum};
use serde::Serialize;

pub const DISTRIBUTED_HEADING: &str = "Distributed training";

/// DistributedDataParallel implementation. Only c10d is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
pub enum DdpBackend {
    #[default]
    #[value(name = "c10d")]
    #[serde(rename = "c10d")]
    C10d,
}

#[derive(Args, Debug, Clone, Serialize)]
#[command(next_help_heading = DISTRIBUTED_HEADING)]
pub struct DistributedArgs {
    /// Total number of GPUs across all nodes (default: all visible GPUs)
    // Replaced at runtime by TrainingParser with the probed device count.
    #[arg(
        long,
        visible_alias = "distributed-world-size",
        default_value_t = 1,
        value_name = "N"
    )]
    pub world_size: usize,

    /// Rank of the current GPU
    #[arg(long, visible_alias = "distributed-rank", default_value_t = 0)]
    pub rank: usize,

    /// Number of GPUs used in the current worker/node
    #[arg(long, visible_alias = "distributed-gpus", default_value_t = 2)]
    pub gpus_per_node: usize,

    /// Distributed backend
    #[arg(long, visible_alias = "distributed-backend", default_value = "nccl")]
    pub backend: String,

    /// Typically tcp://hostname:port, used to establish the initial connection
    #[arg(long, visible_alias = "distributed-init-method")]
    pub init_method: Option<String>,

    /// Which GPU to use (usually configured automatically)
    #[arg(long, visible_aliases = ["local-rank", "local_rank"], default_value_t = 0)]
    pub device_id: usize,

    /// Do not spawn multiple processes even if multiple GPUs are visible
    #[arg(long, visible_alias = "distributed-no-spawn")]
    pub no_spawn: bool,

    /// DistributedDataParallel backend
    #[arg(long, value_enum, default_value_t = DdpBackend::C10d)]
    pub ddp_backend: DdpBackend,

    /// Bucket size for gradient reduction
    #[arg(long, default_value_t = 25, value_name = "MB")]
    pub bucket_cap_mb: usize,

    /// Enable unused parameter detection in DistributedDataParallel
    #[arg(long)]
    pub find_unused_parameters: bool,
}

impl DistributedArgs {
    pub fn is_distributed(&self) -> bool {
        self.world_size > 1
    }
}
