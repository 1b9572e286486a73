//! Error types for `runsettings-check`.

use run_settings::SettingsError;
use thiserror::Error;

/// Errors surfaced by `runsettings-check`.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The file could not be read or its adapter section is invalid.
    #[error("invalid run settings: {0}")]
    InvalidSettings(#[from] SettingsError),

    /// The settings could not be encoded as JSON.
    #[error("failed to encode settings as JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The report could not be written.
    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}
