//! Training Parser - builds the command and resolves it into a ParsedConfig

use clap::{Command, CommandFactory, FromArgMatches};
use std::ffi::OsString;
use tracing::debug;

use crate::cli::Cli;
use crate::config::ParsedConfig;
use crate::device_utils::{default_world_size, visible_device_count};
use crate::error::LaunchError;

/// Command line parser with the host device count injected.
///
/// Long flags must be spelled out in full or through a declared alias;
/// clap never infers abbreviations unless `infer_long_args` is set.
#[derive(Debug, Clone, Copy)]
pub struct TrainingParser {
    device_count: usize,
}

impl TrainingParser {
    pub fn new(device_count: usize) -> Self {
        Self { device_count }
    }

    /// Probe the host once for visible accelerators.
    pub fn from_host() -> Self {
        Self::new(visible_device_count())
    }

    pub fn device_count(&self) -> usize {
        self.device_count
    }

    pub fn command(&self) -> Command {
        let world_size = default_world_size(self.device_count);
        Cli::command().mut_arg("world_size", |arg| arg.default_value(world_size.to_string()))
    }

    pub fn parse_from<I, T>(&self, args: I) -> Result<ParsedConfig, LaunchError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command().try_get_matches_from(args)?;
        let cli = Cli::from_arg_matches(&matches)?;
        debug!("Parsed command line: {:?}", cli);
        Ok(ParsedConfig::new(cli))
    }

    /// Parse the arguments of the current process.
    pub fn parse(&self) -> Result<ParsedConfig, LaunchError> {
        self.parse_from(std::env::args_os())
    }

    /// Message shown for a failed parse. Usage errors are followed by the
    /// full help, listing every option group.
    pub fn error_report(&self, err: &LaunchError) -> String {
        match err {
            LaunchError::Usage(source) if source.use_stderr() => {
                let mut cmd = self.command();
                format!("{}\n{}", source.render(), cmd.render_help())
            }
            other => other.to_string(),
        }
    }

    /// Print the error and terminate the process.
    pub fn exit(&self, err: &LaunchError) -> ! {
        match err {
            LaunchError::Usage(source) if source.use_stderr() => {
                eprint!("{}", self.error_report(err));
                std::process::exit(source.exit_code())
            }
            other => other.exit(),
        }
    }
}
