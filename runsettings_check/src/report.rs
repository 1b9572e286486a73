//! Rendering resolved settings for the terminal.

use std::io::Write;

use run_settings::Settings;

use crate::error::CheckError;

/// How the report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Human-readable lines.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Write `settings` to `out` in `format`.
///
/// # Errors
///
/// Returns [`CheckError::Output`] when writing fails or
/// [`CheckError::Json`] when encoding fails.
pub fn write_report<W: Write>(
    out: &mut W,
    settings: &Settings,
    format: ReportFormat,
) -> Result<(), CheckError> {
    match format {
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, settings)?;
            writeln!(out)?;
        }
        ReportFormat::Text => write_text(out, settings)?,
    }
    Ok(())
}

fn write_text<W: Write>(out: &mut W, settings: &Settings) -> std::io::Result<()> {
    writeln!(out, "DeploymentEnabled: {}", settings.deployment_enabled())?;
    writeln!(
        out,
        "DeployTestSourceDependencies: {}",
        settings.deploy_test_source_dependencies()
    )?;
    if settings.search_directories().is_empty() {
        return writeln!(out, "SearchDirectories: (none)");
    }
    writeln!(out, "SearchDirectories:")?;
    for directory in settings.search_directories() {
        let scope = if directory.include_sub_directories() {
            "recursive"
        } else {
            "top level only"
        };
        writeln!(out, "  {} ({scope})", directory.directory_path())?;
    }
    Ok(())
}
