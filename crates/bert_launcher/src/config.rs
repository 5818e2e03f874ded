//! Resolved Configuration
//!
//! Handles post-parse normalization, the read-only `ParsedConfig` view,
//! and JSON serialization of the resolved command line.

use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::ops::Deref;
use std::path::Path;
use tracing::info;

use crate::cli::Cli;
use crate::error::LaunchError;

/// Fill derived defaults: `--max-sentences-valid` from `--max-sentences`,
/// then `--max-tokens-valid` from `--max-tokens`. Explicit values are kept.
pub fn normalize(mut cli: Cli) -> Cli {
    let dataset = &mut cli.dataset;
    if dataset.max_sentences_valid.is_none() {
        dataset.max_sentences_valid = dataset.max_sentences;
    }
    if dataset.max_tokens_valid.is_none() {
        dataset.max_tokens_valid = dataset.max_tokens;
    }
    cli
}

/// Normalized command line. Read-only once built.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ParsedConfig(Cli);

impl ParsedConfig {
    pub fn new(cli: Cli) -> Self {
        Self(normalize(cli))
    }

    /// Learning rate for a 1-based epoch.
    pub fn lr_for_epoch(&self, epoch: usize) -> f64 {
        *self.0.optimization.lr.for_epoch(epoch)
    }

    /// Gradient accumulation steps for a 1-based epoch.
    pub fn update_freq_for_epoch(&self, epoch: usize) -> usize {
        *self.0.optimization.update_freq.for_epoch(epoch)
    }

    pub fn into_inner(self) -> Cli {
        self.0
    }

    pub fn log_summary(&self) {
        let cli = &self.0;
        let dataset = &cli.dataset;
        let distributed = &cli.distributed;
        let optimization = &cli.optimization;

        info!("--- BERT Pretraining Launcher ---");
        info!(
            "Dataset: Task={}, Data={}, ModelConfig={}, Workers={}",
            dataset.task,
            dataset.data.display(),
            dataset.config_file.display(),
            dataset.num_workers
        );
        info!(
            "Batching: MaxTokens={:?}, MaxSentences={:?}, Valid(Tokens={:?}, Sentences={:?}), Subsets={:?}",
            dataset.max_tokens,
            dataset.max_sentences,
            dataset.max_tokens_valid,
            dataset.max_sentences_valid,
            dataset.valid_subsets()
        );
        info!(
            "Distributed: WorldSize={}, Rank={}, GpusPerNode={}, Backend={}, InitMethod={:?}, DeviceId={}",
            distributed.world_size,
            distributed.rank,
            distributed.gpus_per_node,
            distributed.backend,
            distributed.init_method,
            distributed.device_id
        );
        info!(
            "Optimization: LR=[{}], MinLR={}, UpdateFreq=[{}], ClipNorm={}, MaxEpoch={:?}, MaxUpdate={:?}",
            optimization.lr,
            optimization.min_lr,
            optimization.update_freq,
            optimization.clip_norm,
            optimization.epoch_limit(),
            optimization.update_limit()
        );
    }
}

impl Deref for ParsedConfig {
    type Target = Cli;

    fn deref(&self) -> &Cli {
        &self.0
    }
}

/// On-disk form written by `--dump-config`.
#[derive(Serialize)]
struct ConfigManifest<'a> {
    created_at: String,
    config: &'a ParsedConfig,
}

/// Write the resolved configuration as pretty JSON.
pub fn write_config<W: Write>(config: &ParsedConfig, mut writer: W) -> Result<(), LaunchError> {
    let manifest = ConfigManifest {
        created_at: chrono::Local::now().to_rfc3339(),
        config,
    };
    serde_json::to_writer_pretty(&mut writer, &manifest)?;
    writeln!(writer)?;
    Ok(())
}

pub fn save_config(config: &ParsedConfig, path: &Path) -> Result<(), LaunchError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    write_config(config, file)
}
