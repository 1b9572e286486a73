//! Library side of `runsettings-check`.
//!
//! [`run`] loads the file named by [`Args`], resolves its `MSTestV2`
//! section and writes a report. The binary only parses arguments, installs
//! logging and maps the outcome to an exit status.

pub mod cli;
pub mod error;
pub mod report;

use std::io::Write;

use run_settings::{
    Settings, SettingsError, SettingsParser, SettingsProvider, read_settings_file,
};
use tracing::info;

pub use cli::Args;
pub use error::CheckError;
pub use report::{ReportFormat, write_report};

/// Load the settings named by `args` and write the report to `out`.
///
/// # Errors
///
/// Returns [`CheckError::InvalidSettings`] when the file cannot be read or
/// is invalid, or an output error when the report cannot be written.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<(), CheckError> {
    let settings = load(args)?;
    let format = if args.is_json {
        ReportFormat::Json
    } else {
        ReportFormat::Text
    };
    write_report(out, &settings, format)
}

/// Load the resolved settings for `args`.
///
/// With `--base-dir` the given folder, rather than the file's own, anchors
/// relative directories.
///
/// # Errors
///
/// Returns any [`SettingsError`] raised while reading or parsing.
pub fn load(args: &Args) -> Result<Settings, SettingsError> {
    let settings = match &args.base_dir {
        None => SettingsProvider::new().load_file(&args.file)?.clone(),
        Some(base_dir) => {
            let xml = read_settings_file(&args.file)?;
            let parser = SettingsParser::new().with_base_directory(base_dir.as_str());
            SettingsProvider::with_parser(parser)
                .load_run_settings(&xml)?
                .clone()
        }
    };
    info!(
        file = %args.file,
        directories = settings.search_directories().len(),
        "loaded run settings"
    );
    Ok(settings)
}
