use crate::options::{DatasetArgs, DistributedArgs, OptimizationArgs};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

/// Progress log formats accepted by `--log-format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
pub enum LogFormat {
    /// Plain progress lines
    #[default]
    #[value(name = "none")]
    #[serde(rename = "none")]
    Plain,
}

/// Full training command line.
///
/// Build it through [`crate::parser::TrainingParser`] rather than `Cli::parse`,
/// which would skip the device-count default for `--world-size` and the
/// post-parse normalization.
#[derive(Parser, Debug, Clone, Serialize)]
#[command(name = "bert_launcher", author, version, about = "Distributed BERT pretraining launcher", long_about = None)]
#[command(allow_missing_positional = true, allow_negative_numbers = true)]
pub struct Cli {
    /// Disable progress bar
    #[arg(long)]
    pub no_progress_bar: bool,

    /// Pseudo random number generator seed
    #[arg(long, default_value_t = 19940802, value_name = "N")]
    pub seed: u64,

    /// Log progress every N batches (when progress bar is disabled)
    #[arg(long, default_value_t = 1000, value_name = "N")]
    pub log_interval: usize,

    /// Log format to use
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Write the resolved configuration as JSON ("-" for stdout)
    #[arg(long, value_name = "PATH")]
    #[serde(skip)]
    pub dump_config: Option<PathBuf>,

    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub distributed: DistributedArgs,

    #[command(flatten)]
    pub optimization: OptimizationArgs,
}
