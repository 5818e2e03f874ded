//! Options - argument groups of the training command line
//!
//! Each group is a clap `Args` struct rendered under its own help heading:
//! - DatasetArgs: "Dataset and data loading"
//! - DistributedArgs: "Distributed training"
//! - OptimizationArgs: "Optimization"

pub mod dataset;
pub mod distributed;
pub mod optimization;

pub use dataset::{DatasetArgs, Subset, DATASET_HEADING};
pub use distributed::{DdpBackend, DistributedArgs, DISTRIBUTED_HEADING};
pub use optimization::{OptimizationArgs, OPTIMIZATION_HEADING};
