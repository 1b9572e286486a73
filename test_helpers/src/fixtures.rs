//! Fixtures for run settings documents on disk.
//!
//! [`SectionBuilder`] writes the adapter section (optionally wrapped in a
//! `<RunSettings>` document), and [`SettingsDir`] lays files and search
//! directories out under a temporary directory that is removed on drop.
//!
//! # Examples
//!
//! ```
//! use run_settings_test_helpers::fixtures::{SectionBuilder, SettingsDir};
//!
//! # fn main() -> anyhow::Result<()> {
//! let dir = SettingsDir::new()?;
//! dir.create_dir("deps")?;
//! let xml = SectionBuilder::new().directory("deps", Some(false)).run_settings();
//! let file = dir.write("test.runsettings", &xml)?;
//! assert!(file.is_file());
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Temporary directory holding run settings files and the directories they
/// refer to.
#[derive(Debug)]
pub struct SettingsDir {
    root: Utf8PathBuf,
    _dir: TempDir,
}

impl SettingsDir {
    /// Create an empty temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or its path is
    /// not valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp dir")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("temp dir is not valid UTF-8: {}", path.display()))?;
        Ok(Self { root, _dir: dir })
    }

    /// Absolute path of the temporary directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Create `relative` (and any missing parents) below the root.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn create_dir(&self, relative: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(relative);
        std::fs::create_dir_all(&path).with_context(|| format!("create {path}"))?;
        Ok(path)
    }

    /// Write `contents` to `relative` below the root, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if a parent directory or the file cannot be written.
    pub fn write(&self, relative: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        std::fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }
}

/// Builds the XML of an `MSTestV2` section.
#[derive(Debug, Clone, Default)]
pub struct SectionBuilder {
    directories: Vec<(String, Option<bool>)>,
    deployment_enabled: Option<bool>,
    deploy_test_source_dependencies: Option<bool>,
}

impl SectionBuilder {
    /// Start an empty section.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `<Directory>` entry. `None` omits `includeSubDirectories`.
    #[must_use]
    pub fn directory(mut self, path: impl Into<String>, include_sub_directories: Option<bool>) -> Self {
        self.directories.push((path.into(), include_sub_directories));
        self
    }

    /// Emit a `<DeploymentEnabled>` element.
    #[must_use]
    pub const fn deployment_enabled(mut self, value: bool) -> Self {
        self.deployment_enabled = Some(value);
        self
    }

    /// Emit a `<DeployTestSourceDependencies>` element.
    #[must_use]
    pub const fn deploy_test_source_dependencies(mut self, value: bool) -> Self {
        self.deploy_test_source_dependencies = Some(value);
        self
    }

    /// The section on its own, rooted at `<MSTestV2>`.
    #[must_use]
    pub fn section(&self) -> String {
        let mut xml = String::from("<MSTestV2>\n");
        if let Some(value) = self.deployment_enabled {
            xml.push_str(&format!("  <DeploymentEnabled>{value}</DeploymentEnabled>\n"));
        }
        if let Some(value) = self.deploy_test_source_dependencies {
            xml.push_str(&format!(
                "  <DeployTestSourceDependencies>{value}</DeployTestSourceDependencies>\n"
            ));
        }
        if !self.directories.is_empty() {
            xml.push_str("  <AssemblyResolution>\n");
            for (path, include) in &self.directories {
                xml.push_str(&format!("    <Directory path=\"{}\"", escape_attribute(path)));
                if let Some(flag) = include {
                    xml.push_str(&format!(" includeSubDirectories=\"{flag}\""));
                }
                xml.push_str(" />\n");
            }
            xml.push_str("  </AssemblyResolution>\n");
        }
        xml.push_str("</MSTestV2>\n");
        xml
    }

    /// A complete run settings document containing the section.
    #[must_use]
    pub fn run_settings(&self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<RunSettings>\n<RunConfiguration>\n  \
             <ResultsDirectory>.\\TestResults</ResultsDirectory>\n</RunConfiguration>\n{}</RunSettings>\n",
            self.section()
        )
    }
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('"', "&quot;")
}
