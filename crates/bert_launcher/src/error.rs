//! Launch Errors - classification of command line failures
//!
//! Configuration errors (missing required option, bad choice, unparseable
//! value) and usage errors (unknown flag, surplus positional) are both fatal.
//! They keep the underlying clap error so the user sees clap's formatted
//! message and usage line.

use clap::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// `data` or `--config-file` was not supplied
    MissingRequired,
    /// Value outside the declared choices. clap reports a flag given without
    /// its value (`--max-tokens` at the end of the line) under the same kind,
    /// so that case lands here too.
    InvalidChoice,
    /// Scalar or list value that does not convert to the declared type
    InvalidValue,
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("{source}")]
    Config {
        kind: ConfigErrorKind,
        source: clap::Error,
    },

    #[error("{0}")]
    Usage(clap::Error),

    #[error("failed to write config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize config: {0}")]
    Json(#[from] serde_json::Error),
}

impl LaunchError {
    pub fn config_kind(&self) -> Option<ConfigErrorKind> {
        match self {
            Self::Config { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }

    /// Print the error and terminate the process.
    ///
    /// Help and version requests exit with 0, every other error is non-zero.
    pub fn exit(&self) -> ! {
        match self {
            Self::Config { source, .. } | Self::Usage(source) => source.exit(),
            other => {
                eprintln!("error: {}", other);
                std::process::exit(1)
            }
        }
    }
}

impl From<clap::Error> for LaunchError {
    fn from(err: clap::Error) -> Self {
        let kind = match err.kind() {
            ErrorKind::MissingRequiredArgument => ConfigErrorKind::MissingRequired,
            // Also raised for a missing option value
            ErrorKind::InvalidValue => ConfigErrorKind::InvalidChoice,
            ErrorKind::ValueValidation => ConfigErrorKind::InvalidValue,
            _ => return Self::Usage(err),
        };
        Self::Config { kind, source: err }
    }
}
