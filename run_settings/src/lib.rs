//! Run settings parsing and search directory resolution for test adapters.
//!
//! The crate reads the `MSTestV2` section of a run settings document into
//! [`Settings`], resolving each configured search directory through a
//! [`PathResolver`]. Directories that cannot be resolved are dropped with a
//! warning; structural problems in the document abort the parse with a
//! [`SettingsError`].
//!
//! ```rust,no_run
//! use camino::Utf8Path;
//! use run_settings::SettingsProvider;
//!
//! # fn main() -> run_settings::SettingsResult<()> {
//! let mut provider = SettingsProvider::new();
//! let settings = provider.load_file(Utf8Path::new("test.runsettings"))?;
//! for directory in settings.search_directories() {
//!     println!("{}", directory.directory_path());
//! }
//! # Ok(())
//! # }
//! ```

mod error;
pub mod path;
pub mod settings;
pub mod xml;

pub use error::{SettingsError, SettingsResult};
pub use path::{DirectoryProbe, FileSystem, PathResolver, ProcessEnvironment, VariableExpander};
pub use settings::{
    AdapterSettings, DirectoryEntry, RecursiveDirectoryPath, SETTINGS_NAME, Settings,
    SettingsParser, SettingsProvider, read_settings_file,
};
pub use xml::{Element, Node, XmlCursor};
