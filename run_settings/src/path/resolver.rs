//! Resolution of configured search directory expressions.

use std::fmt;

use tracing::{debug, warn};

use super::environment::{DirectoryProbe, FileSystem, ProcessEnvironment, VariableExpander};
use super::expression::{AbsolutePath, PathKind, has_invalid_characters};

/// Turns path expressions from a run settings document into absolute,
/// existing directory paths.
///
/// Variable expansion and the existence check go through the injected
/// [`VariableExpander`] and [`DirectoryProbe`]; the current directory used
/// for root-relative input can be pinned with
/// [`PathResolver::with_current_directory`].
///
/// # Examples
///
/// ```rust
/// use run_settings::PathResolver;
///
/// let resolver = PathResolver::new()
///     .with_expander(|text: &str| text.replace("%temp%", r"C:\foo"))
///     .with_probe(|_: &str| true);
/// let resolved = resolver.resolve_full_path_if_exists(r"%temp%\unitTesting\..\Adapter", None);
/// assert_eq!(resolved.as_deref(), Some(r"C:\foo\Adapter"));
/// ```
#[derive(Clone)]
pub struct PathResolver<E = ProcessEnvironment, P = FileSystem> {
    expander: E,
    probe: P,
    current_directory: Option<String>,
}

impl PathResolver {
    /// Create a resolver backed by the process environment and filesystem.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            expander: ProcessEnvironment,
            probe: FileSystem,
            current_directory: None,
        }
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, P> fmt::Debug for PathResolver<E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathResolver")
            .field("expander", &std::any::type_name::<E>())
            .field("probe", &std::any::type_name::<P>())
            .field("current_directory", &self.current_directory)
            .finish()
    }
}

impl<E, P> PathResolver<E, P> {
    /// Replace the variable expander.
    #[must_use]
    pub fn with_expander<X>(self, expander: X) -> PathResolver<X, P>
    where
        X: VariableExpander,
    {
        PathResolver {
            expander,
            probe: self.probe,
            current_directory: self.current_directory,
        }
    }

    /// Replace the directory probe.
    #[must_use]
    pub fn with_probe<Q>(self, probe: Q) -> PathResolver<E, Q>
    where
        Q: DirectoryProbe,
    {
        PathResolver {
            expander: self.expander,
            probe,
            current_directory: self.current_directory,
        }
    }

    /// Pin the directory used in place of the process working directory.
    #[must_use]
    pub fn with_current_directory(mut self, directory: impl Into<String>) -> Self {
        self.current_directory = Some(directory.into());
        self
    }

    fn current_directory(&self) -> Option<AbsolutePath> {
        let directory = match &self.current_directory {
            Some(pinned) => pinned.clone(),
            None => std::env::current_dir()
                .ok()?
                .into_os_string()
                .into_string()
                .ok()?,
        };
        AbsolutePath::parse(&directory)
    }

    /// Produce the absolute form of `path` without consulting the probe.
    fn full_path(&self, path: &str, base_directory: Option<&str>) -> Option<AbsolutePath> {
        match PathKind::of(path) {
            PathKind::Network | PathKind::DriveRooted => AbsolutePath::parse(path),
            PathKind::RootRelative => Some(self.current_directory()?.with_root_of(path)),
            PathKind::Relative => {
                let mut base = match base_directory.filter(|dir| !dir.trim().is_empty()) {
                    Some(dir) => self.full_path(dir, None)?,
                    None => self.current_directory()?,
                };
                base.push(path);
                Some(base)
            }
        }
    }
}

impl<E, P> PathResolver<E, P>
where
    E: VariableExpander,
    P: DirectoryProbe,
{
    /// Expand, absolutise and normalise `path`, returning it only if the
    /// directory exists.
    ///
    /// Relative paths are joined onto `base_directory` (or the current
    /// directory when no base is given). Paths starting with a single
    /// separator ignore `base_directory` and land on the root of the current
    /// directory; `\\host\share` paths and drive paths are taken as they
    /// are.
    ///
    /// Returns `None` when the expanded path is blank, contains a wildcard or
    /// another invalid character, cannot be made absolute, or names a
    /// directory the probe does not report.
    #[must_use]
    pub fn resolve_full_path_if_exists(
        &self,
        path: &str,
        base_directory: Option<&str>,
    ) -> Option<String> {
        let expanded = self.expander.expand(path);
        if expanded.trim().is_empty() {
            warn!(path, "search directory path is empty");
            return None;
        }
        if has_invalid_characters(&expanded) {
            warn!(path, %expanded, "search directory path contains invalid characters");
            return None;
        }
        let Some(full_path) = self.full_path(&expanded, base_directory) else {
            warn!(path, %expanded, "search directory path cannot be made absolute");
            return None;
        };
        let rendered = full_path.render();
        if !self.probe.exists(&rendered) {
            warn!(directory = %rendered, "search directory does not exist");
            return None;
        }
        debug!(path, directory = %rendered, "resolved search directory");
        Some(rendered)
    }
}
