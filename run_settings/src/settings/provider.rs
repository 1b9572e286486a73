//! Owned settings provider for the adapter section of run settings.

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};
use tracing::debug;

use super::parser::{SettingsParser, parent_or_dot};
use super::types::Settings;
use crate::error::{SettingsError, SettingsResult};
use crate::path::{DirectoryProbe, FileSystem, ProcessEnvironment, VariableExpander};
use crate::xml::XmlCursor;

/// Name of the run settings element holding the adapter section.
pub const SETTINGS_NAME: &str = "MSTestV2";

/// Holds the most recently loaded adapter [`Settings`].
///
/// Before anything is loaded, and after [`SettingsProvider::reset`], the
/// provider reports [`Settings::default`]. A failed load leaves the previous
/// settings untouched.
#[derive(Debug, Clone)]
pub struct SettingsProvider<E = ProcessEnvironment, P = FileSystem> {
    parser: SettingsParser<E, P>,
    settings: Settings,
}

impl SettingsProvider {
    /// Create a provider with the default parser.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parser(SettingsParser::new())
    }
}

impl Default for SettingsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, P> SettingsProvider<E, P> {
    /// Create a provider loading through `parser`.
    #[must_use]
    pub fn with_parser(parser: SettingsParser<E, P>) -> Self {
        Self {
            parser,
            settings: Settings::default(),
        }
    }

    /// The current settings.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Forget loaded settings and return to the defaults.
    pub fn reset(&mut self) {
        self.settings = Settings::default();
    }
}

impl<E, P> SettingsProvider<E, P>
where
    E: VariableExpander,
    P: DirectoryProbe,
{
    /// Load the section the cursor is positioned on.
    ///
    /// # Errors
    ///
    /// Returns the parser's [`SettingsError`] unchanged; the stored settings
    /// are not modified in that case.
    pub fn load(&mut self, cursor: &mut XmlCursor<'_>) -> SettingsResult<&Settings> {
        self.settings = self.parser.to_settings(cursor)?;
        Ok(&self.settings)
    }

    /// Locate the [`SETTINGS_NAME`] element in a complete run settings
    /// document and load it. Without such an element the current settings
    /// are kept.
    ///
    /// # Errors
    ///
    /// Returns a [`SettingsError`] when the document is malformed or the
    /// section is invalid.
    pub fn load_run_settings(&mut self, xml: &str) -> SettingsResult<&Settings> {
        let mut cursor = XmlCursor::new(xml);
        if cursor.move_to_element(SETTINGS_NAME)? {
            return self.load(&mut cursor);
        }
        debug!(section = SETTINGS_NAME, "run settings contain no adapter section");
        Ok(&self.settings)
    }

    /// Read a run settings file and load its adapter section, resolving
    /// relative search directories against the file's folder.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] when the file cannot be read, or any
    /// error from [`SettingsProvider::load_run_settings`].
    pub fn load_file(&mut self, path: &Utf8Path) -> SettingsResult<&Settings> {
        let xml = read_settings_file(path)?;
        self.parser.set_settings_file(path);
        self.load_run_settings(&xml)
    }
}

/// Read a run settings file into memory.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] when `path` has no file name or the file
/// cannot be read as UTF-8 text.
pub fn read_settings_file(path: &Utf8Path) -> SettingsResult<String> {
    read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_to_string(path: &Utf8Path) -> std::io::Result<String> {
    let file_name = path
        .file_name()
        .ok_or_else(|| std::io::Error::other("cannot determine file name for run settings path"))?;
    let dir = Dir::open_ambient_dir(parent_or_dot(path), ambient_authority())?;
    dir.read_to_string(file_name)
}
