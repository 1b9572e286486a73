//! Parsing of the adapter section of run settings.
//!
//! [`AdapterSettings`] mirrors what the document declares, [`Settings`] is
//! the resolved result, [`SettingsParser`] turns one into the other and
//! [`SettingsProvider`] keeps the latest loaded value.

mod document;
mod parser;
mod provider;
mod types;

pub use document::AdapterSettings;
pub use parser::SettingsParser;
pub use provider::{SETTINGS_NAME, SettingsProvider, read_settings_file};
pub use types::{DirectoryEntry, RecursiveDirectoryPath, Settings};

#[cfg(test)]
mod tests;
