//! Values produced by parsing and resolving a run settings section.

use serde::Serialize;

/// A `<Directory>` entry as written in the document, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    path: String,
    include_sub_directories: bool,
}

impl DirectoryEntry {
    /// Create an entry for `path`.
    #[must_use]
    pub fn new(path: impl Into<String>, include_sub_directories: bool) -> Self {
        Self {
            path: path.into(),
            include_sub_directories,
        }
    }

    /// The path expression, variables unexpanded.
    #[must_use]
    pub const fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Whether assemblies may also be found below this directory.
    #[must_use]
    pub const fn include_sub_directories(&self) -> bool {
        self.include_sub_directories
    }
}

/// A resolved search directory: absolute, normalised and known to exist
/// when it was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecursiveDirectoryPath {
    directory_path: String,
    include_sub_directories: bool,
}

impl RecursiveDirectoryPath {
    pub(crate) const fn new(directory_path: String, include_sub_directories: bool) -> Self {
        Self {
            directory_path,
            include_sub_directories,
        }
    }

    /// Absolute path of the directory.
    #[must_use]
    pub const fn directory_path(&self) -> &str {
        self.directory_path.as_str()
    }

    /// Whether subdirectories are searched too.
    #[must_use]
    pub const fn include_sub_directories(&self) -> bool {
        self.include_sub_directories
    }
}

/// Adapter settings with every search directory resolved.
///
/// Directories keep document order; duplicates are kept and entries that
/// did not resolve are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    search_directories: Vec<RecursiveDirectoryPath>,
    deployment_enabled: bool,
    deploy_test_source_dependencies: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_directories: Vec::new(),
            deployment_enabled: true,
            deploy_test_source_dependencies: true,
        }
    }
}

impl Settings {
    pub(crate) const fn new(
        search_directories: Vec<RecursiveDirectoryPath>,
        deployment_enabled: bool,
        deploy_test_source_dependencies: bool,
    ) -> Self {
        Self {
            search_directories,
            deployment_enabled,
            deploy_test_source_dependencies,
        }
    }

    /// Directories searched when resolving test dependencies.
    #[must_use]
    pub const fn search_directories(&self) -> &[RecursiveDirectoryPath] {
        self.search_directories.as_slice()
    }

    /// Whether deployment of test assets is enabled. Defaults to `true`.
    #[must_use]
    pub const fn deployment_enabled(&self) -> bool {
        self.deployment_enabled
    }

    /// Whether dependencies of the test source are deployed alongside it.
    /// Defaults to `true`.
    #[must_use]
    pub const fn deploy_test_source_dependencies(&self) -> bool {
        self.deploy_test_source_dependencies
    }
}
