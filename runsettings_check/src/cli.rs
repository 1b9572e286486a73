//! Command-line interface definitions for `runsettings-check`.

use camino::Utf8PathBuf;
use clap::Parser;

/// Parsed CLI arguments for `runsettings-check`.
#[derive(Debug, Clone, Parser)]
#[command(name = "runsettings-check")]
#[command(about = "Resolve the MSTestV2 search directories of a run settings file")]
#[command(version)]
pub struct Args {
    /// Run settings file to load.
    #[arg(value_name = "FILE")]
    pub file: Utf8PathBuf,
    /// Resolve relative directories against this folder instead of the
    /// folder containing the file.
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<Utf8PathBuf>,
    /// Print the settings as JSON.
    #[arg(long = "json")]
    pub is_json: bool,
    /// Log each resolution decision to stderr.
    #[arg(short = 'v', long = "verbose")]
    pub is_verbose: bool,
}

impl Args {
    /// Default log filter when `RUST_LOG` is unset.
    #[must_use]
    pub const fn default_filter(&self) -> &'static str {
        if self.is_verbose { "debug" } else { "warn" }
    }
}
