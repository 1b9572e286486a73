//! Parsing a settings section into resolved [`Settings`].

use camino::Utf8Path;

use super::document::AdapterSettings;
use super::types::Settings;
use crate::error::SettingsResult;
use crate::path::{DirectoryProbe, FileSystem, PathResolver, ProcessEnvironment, VariableExpander};
use crate::xml::XmlCursor;

/// Reads a settings section and resolves its search directories.
///
/// Relative directory paths are resolved against the base directory, which
/// is normally the folder holding the run settings file.
///
/// # Examples
///
/// ```rust
/// use run_settings::{PathResolver, SettingsParser};
///
/// # fn main() -> run_settings::SettingsResult<()> {
/// let resolver = PathResolver::new().with_probe(|_: &str| true);
/// let parser = SettingsParser::with_resolver(resolver).with_base_directory(r"C:\unitTesting");
/// let settings = parser.parse_str(
///     r#"<MSTestV2>
///          <AssemblyResolution>
///            <Directory path="MsTest\Adapter" includeSubDirectories="false" />
///          </AssemblyResolution>
///        </MSTestV2>"#,
/// )?;
/// assert_eq!(
///     settings.search_directories()[0].directory_path(),
///     r"C:\unitTesting\MsTest\Adapter"
/// );
/// assert!(settings.deployment_enabled());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SettingsParser<E = ProcessEnvironment, P = FileSystem> {
    resolver: PathResolver<E, P>,
    base_directory: Option<String>,
}

impl SettingsParser {
    /// Create a parser using the default resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_resolver(PathResolver::new())
    }
}

impl Default for SettingsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, P> SettingsParser<E, P> {
    /// Create a parser resolving directories with `resolver`.
    #[must_use]
    pub const fn with_resolver(resolver: PathResolver<E, P>) -> Self {
        Self {
            resolver,
            base_directory: None,
        }
    }

    /// Resolve relative directories against `directory`.
    #[must_use]
    pub fn with_base_directory(mut self, directory: impl Into<String>) -> Self {
        self.base_directory = Some(directory.into());
        self
    }

    /// Resolve relative directories against the folder containing
    /// `settings_file`.
    #[must_use]
    pub fn for_settings_file(mut self, settings_file: &Utf8Path) -> Self {
        self.set_settings_file(settings_file);
        self
    }

    pub(crate) fn set_settings_file(&mut self, settings_file: &Utf8Path) {
        self.base_directory = Some(parent_or_dot(settings_file).as_str().to_owned());
    }

    /// The resolver used for search directories.
    #[must_use]
    pub const fn resolver(&self) -> &PathResolver<E, P> {
        &self.resolver
    }

    /// The directory relative paths are resolved against, if set.
    #[must_use]
    pub fn base_directory(&self) -> Option<&str> {
        self.base_directory.as_deref()
    }
}

impl<E, P> SettingsParser<E, P>
where
    E: VariableExpander,
    P: DirectoryProbe,
{
    /// Read the section at the cursor and resolve its search directories.
    ///
    /// # Errors
    ///
    /// Propagates any structural [`SettingsError`](crate::SettingsError)
    /// raised by [`AdapterSettings::to_settings`]. Unresolvable directories
    /// are dropped rather than reported.
    pub fn to_settings(&self, cursor: &mut XmlCursor<'_>) -> SettingsResult<Settings> {
        let declared = AdapterSettings::to_settings(cursor)?;
        Ok(declared.resolve(&self.resolver, self.base_directory()))
    }

    /// Parse a document whose root element is the settings section.
    ///
    /// # Errors
    ///
    /// As for [`SettingsParser::to_settings`]; an empty document reports
    /// [`SettingsError::NotPositioned`](crate::SettingsError::NotPositioned).
    pub fn parse_str(&self, xml: &str) -> SettingsResult<Settings> {
        let mut cursor = XmlCursor::new(xml);
        cursor.read()?;
        self.to_settings(&mut cursor)
    }
}

/// Return the parent directory of `path`, falling back to `"."` when the path
/// has no parent or the parent is empty.
pub(crate) fn parent_or_dot(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}
