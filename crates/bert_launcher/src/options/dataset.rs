//! Dataset and data loading options

use clap::{Args, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

pub const DATASET_HEADING: &str = "Dataset and data loading";

/// Data split names accepted by `--train-subset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Subset {
    #[default]
    Train,
    Valid,
    Test,
}

#[derive(Args, Debug, Clone, Serialize)]
#[command(next_help_heading = DATASET_HEADING)]
pub struct DatasetArgs {
    /// Task name
    #[arg(default_value = "bert", display_order = 0)]
    pub task: String,

    /// Path including data
    #[arg(value_name = "DATA", display_order = 1)]
    pub data: PathBuf,

    /// How many subprocesses to use for data loading
    #[arg(long, default_value_t = 16, value_name = "N")]
    pub num_workers: usize,

    /// Maximum number of tokens in a batch
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<usize>,

    /// Maximum number of sentences in a batch
    #[arg(long, visible_alias = "batch-size", value_name = "N")]
    pub max_sentences: Option<usize>,

    /// Data subset to use for training
    #[arg(long, value_enum, default_value_t = Subset::Train, value_name = "SPLIT")]
    pub train_subset: Subset,

    /// Comma separated list of data subsets to use for validation (train, valid, valid1, test, test1)
    #[arg(long, default_value = "valid", value_name = "SPLIT")]
    pub valid_subset: String,

    /// Validate every N epochs
    #[arg(long, default_value_t = 1, value_name = "N")]
    pub validate_interval: usize,

    /// Disable validation
    #[arg(long)]
    pub disable_validation: bool,

    /// Maximum number of tokens in a validation batch (defaults to --max-tokens)
    #[arg(long, value_name = "N")]
    pub max_tokens_valid: Option<usize>,

    /// Maximum number of sentences in a validation batch (defaults to --max-sentences)
    #[arg(long, value_name = "N")]
    pub max_sentences_valid: Option<usize>,

    /// Path to the vocabulary file
    #[arg(long, value_name = "PATH")]
    pub dict: Option<PathBuf>,

    /// Path to the BERT model configuration
    #[arg(long, visible_alias = "config_file", value_name = "PATH")]
    pub config_file: PathBuf,
}

impl DatasetArgs {
    /// Validation splits named by `--valid-subset`, in order.
    pub fn valid_subsets(&self) -> Vec<&str> {
        self.valid_subset
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}
