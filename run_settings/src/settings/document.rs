//! Reading the adapter section of a run settings document.
//!
//! Expected shape:
//!
//! ```xml
//! <MSTestV2>
//!   <DeploymentEnabled>true</DeploymentEnabled>
//!   <DeployTestSourceDependencies>true</DeployTestSourceDependencies>
//!   <AssemblyResolution>
//!     <Directory path="%HOMEDRIVE%\directory" includeSubDirectories="true" />
//!     <Directory path="C:\windows" includeSubDirectories="false" />
//!     <Directory path=".\DirectoryName" />
//!   </AssemblyResolution>
//! </MSTestV2>
//! ```
//!
//! Unknown children of the root are skipped. Inside `AssemblyResolution`
//! only `Directory` is accepted.

use tracing::{debug, warn};
use uncased::UncasedStr;

use super::types::{DirectoryEntry, RecursiveDirectoryPath, Settings};
use crate::error::{SettingsError, SettingsResult};
use crate::path::{DirectoryProbe, PathResolver, VariableExpander};
use crate::xml::{Element, Node, XmlCursor};

pub(crate) const ASSEMBLY_RESOLUTION: &str = "AssemblyResolution";
pub(crate) const DIRECTORY: &str = "Directory";
pub(crate) const DEPLOYMENT_ENABLED: &str = "DeploymentEnabled";
pub(crate) const DEPLOY_TEST_SOURCE_DEPENDENCIES: &str = "DeployTestSourceDependencies";
const PATH_ATTRIBUTE: &str = "path";
const INCLUDE_SUB_DIRECTORIES_ATTRIBUTE: &str = "includeSubDirectories";

/// Settings as declared by the document, search directories still
/// unresolved.
///
/// This is the accumulating half of the parser: [`AdapterSettings::to_settings`]
/// collects entries in document order, and
/// [`AdapterSettings::directory_list_with_recursive_property`] resolves them
/// later against a base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterSettings {
    search_directories: Vec<DirectoryEntry>,
    deployment_enabled: bool,
    deploy_test_source_dependencies: bool,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            search_directories: Vec::new(),
            deployment_enabled: true,
            deploy_test_source_dependencies: true,
        }
    }
}

enum Section {
    AssemblyResolution,
    DeploymentEnabled,
    DeployTestSourceDependencies,
    Unknown(String),
}

impl Section {
    fn of(element: &Element) -> Self {
        if element.is_named(ASSEMBLY_RESOLUTION) {
            Self::AssemblyResolution
        } else if element.is_named(DEPLOYMENT_ENABLED) {
            Self::DeploymentEnabled
        } else if element.is_named(DEPLOY_TEST_SOURCE_DEPENDENCIES) {
            Self::DeployTestSourceDependencies
        } else {
            Self::Unknown(element.name().to_owned())
        }
    }
}

impl AdapterSettings {
    /// Read the settings section the cursor is positioned on.
    ///
    /// The cursor must sit on the section's root element. Unknown elements
    /// and stray text between children are skipped. Reading stops at the
    /// root's end tag, leaving the cursor there.
    ///
    /// # Errors
    ///
    /// Returns a [`SettingsError`] when the cursor is not on an element, when
    /// `AssemblyResolution` holds anything other than `Directory` elements,
    /// when a `Directory` has no `path`, or when the XML is malformed. No
    /// partially read settings are returned.
    pub fn to_settings(cursor: &mut XmlCursor<'_>) -> SettingsResult<Self> {
        let is_empty = cursor.current_element()?.is_empty();
        let mut settings = Self::default();
        cursor.read()?;
        if is_empty {
            return Ok(settings);
        }
        loop {
            let section = match cursor.node() {
                Node::Element(element) => Section::of(element),
                Node::Text(text) => {
                    debug!(text = %text, "skipping text between run settings elements");
                    cursor.read()?;
                    continue;
                }
                Node::StartOfDocument | Node::EndElement(_) | Node::EndOfDocument => break,
            };
            match section {
                Section::AssemblyResolution => settings.read_assembly_resolution(cursor)?,
                Section::DeploymentEnabled => {
                    let text = cursor.read_inner_text()?;
                    if let Some(value) = parse_flag(DEPLOYMENT_ENABLED, &text) {
                        settings.deployment_enabled = value;
                    }
                }
                Section::DeployTestSourceDependencies => {
                    let text = cursor.read_inner_text()?;
                    if let Some(value) = parse_flag(DEPLOY_TEST_SOURCE_DEPENDENCIES, &text) {
                        settings.deploy_test_source_dependencies = value;
                    }
                }
                Section::Unknown(name) => {
                    debug!(element = %name, "skipping unrecognised run settings element");
                    cursor.skip()?;
                }
            }
        }
        Ok(settings)
    }

    fn read_assembly_resolution(&mut self, cursor: &mut XmlCursor<'_>) -> SettingsResult<()> {
        let is_empty = cursor.current_element()?.is_empty();
        cursor.read()?;
        if is_empty {
            return Ok(());
        }
        while let Some(element) = cursor.element() {
            if !element.is_named(DIRECTORY) {
                return Err(SettingsError::invalid_element(
                    element.name(),
                    ASSEMBLY_RESOLUTION,
                ));
            }
            let entry = directory_entry(element)?;
            self.search_directories.push(entry);
            cursor.skip()?;
        }
        cursor.read_end_element(ASSEMBLY_RESOLUTION)
    }

    /// Append a search directory entry.
    pub fn push_search_directory(&mut self, entry: DirectoryEntry) {
        self.search_directories.push(entry);
    }

    /// Entries declared under `AssemblyResolution`, in document order.
    #[must_use]
    pub const fn search_directories(&self) -> &[DirectoryEntry] {
        self.search_directories.as_slice()
    }

    /// Declared `DeploymentEnabled` value, `true` when absent.
    #[must_use]
    pub const fn deployment_enabled(&self) -> bool {
        self.deployment_enabled
    }

    /// Declared `DeployTestSourceDependencies` value, `true` when absent.
    #[must_use]
    pub const fn deploy_test_source_dependencies(&self) -> bool {
        self.deploy_test_source_dependencies
    }

    /// Resolve every accumulated search directory against `base_directory`.
    ///
    /// Order is preserved. Entries that do not resolve (missing directory,
    /// wildcard, invalid characters) are dropped.
    #[must_use]
    pub fn directory_list_with_recursive_property<E, P>(
        &self,
        resolver: &PathResolver<E, P>,
        base_directory: Option<&str>,
    ) -> Vec<RecursiveDirectoryPath>
    where
        E: VariableExpander,
        P: DirectoryProbe,
    {
        self.search_directories
            .iter()
            .filter_map(|entry| {
                resolver
                    .resolve_full_path_if_exists(entry.path(), base_directory)
                    .map(|path| RecursiveDirectoryPath::new(path, entry.include_sub_directories()))
            })
            .collect()
    }

    /// Produce the resolved [`Settings`].
    #[must_use]
    pub fn resolve<E, P>(&self, resolver: &PathResolver<E, P>, base_directory: Option<&str>) -> Settings
    where
        E: VariableExpander,
        P: DirectoryProbe,
    {
        Settings::new(
            self.directory_list_with_recursive_property(resolver, base_directory),
            self.deployment_enabled,
            self.deploy_test_source_dependencies,
        )
    }
}

fn directory_entry(element: &Element) -> SettingsResult<DirectoryEntry> {
    let path = element
        .attribute(PATH_ATTRIBUTE)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| SettingsError::missing_attribute(element.name(), PATH_ATTRIBUTE))?;
    let include_sub_directories = match element.attribute(INCLUDE_SUB_DIRECTORIES_ATTRIBUTE) {
        None => true,
        Some(raw) if raw.trim().is_empty() => true,
        Some(raw) => parse_bool(raw).unwrap_or_else(|| {
            warn!(
                path,
                value = raw,
                "includeSubDirectories is not a boolean; treating it as false"
            );
            false
        }),
    };
    Ok(DirectoryEntry::new(path, include_sub_directories))
}

fn parse_flag(element: &str, text: &str) -> Option<bool> {
    let parsed = parse_bool(text);
    if parsed.is_none() {
        warn!(element, value = text, "ignoring non-boolean run settings flag");
    }
    parsed
}

/// Parse `true` or `false`, ignoring ASCII case and surrounding whitespace.
pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    let trimmed = UncasedStr::new(text.trim());
    if trimmed == "true" {
        Some(true)
    } else if trimmed == "false" {
        Some(false)
    } else {
        None
    }
}
