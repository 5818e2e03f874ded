//! Command line configuration for distributed BERT pretraining.
//!
//! - cli / options: the clap schema, grouped by help heading
//! - value_list: comma separated per-epoch schedules
//! - parser: device-aware parsing into a ParsedConfig
//! - config: normalization and the resolved, read-only view

pub mod cli;
pub mod config;
pub mod device_utils;
pub mod error;
pub mod options;
pub mod parser;
pub mod value_list;

pub use cli::{Cli, LogFormat};
pub use config::{normalize, save_config, write_config, ParsedConfig};
pub use error::{ConfigErrorKind, LaunchError};
pub use parser::TrainingParser;
pub use value_list::{ListParseError, ValueList};
