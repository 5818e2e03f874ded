//! Optimization options: learning rate schedule, update frequency, stop conditions

use clap::Args;
use serde::Serialize;

use crate::value_list::ValueList;

pub const OPTIMIZATION_HEADING: &str = "Optimization";

#[derive(Args, Debug, Clone, Serialize)]
#[command(next_help_heading = OPTIMIZATION_HEADING)]
pub struct OptimizationArgs {
    /// Force stop training at specified epoch (0 = unlimited)
    #[arg(long, visible_alias = "me", default_value_t = 0, value_name = "N")]
    pub max_epoch: usize,

    /// Force stop training at specified update (0 = unlimited)
    #[arg(long, visible_alias = "mu", default_value_t = 0, value_name = "N")]
    pub max_update: usize,

    /// Clip threshold of gradients
    #[arg(long, default_value_t = 25.0, value_name = "NORM")]
    pub clip_norm: f64,

    /// Update parameters every N_i batches, when in epoch i
    #[arg(
        long,
        default_value = "1",
        value_parser = ValueList::<usize>::parse,
        value_name = "N1,N2,...,N_K"
    )]
    pub update_freq: ValueList<usize>,

    /// Learning rate for the first N epochs; all epochs >N use LR_N
    #[arg(
        long,
        visible_alias = "learning-rate",
        default_value = "0.25",
        value_parser = ValueList::<f64>::parse,
        value_name = "LR_1,LR_2,...,LR_N"
    )]
    pub lr: ValueList<f64>,

    /// Stop training when the learning rate reaches this minimum
    #[arg(long, default_value_t = -1.0, value_name = "LR")]
    pub min_lr: f64,

    /// Use BMUF as the global optimizer for syncing models across GPUs
    #[arg(long)]
    pub use_bmuf: bool,
}

impl OptimizationArgs {
    /// `None` when `--max-epoch` is 0.
    pub fn epoch_limit(&self) -> Option<usize> {
        (self.max_epoch > 0).then_some(self.max_epoch)
    }

    /// `None` when `--max-update` is 0.
    pub fn update_limit(&self) -> Option<usize> {
        (self.max_update > 0).then_some(self.max_update)
    }
}
