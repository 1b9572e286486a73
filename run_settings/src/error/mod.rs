//! Error types produced while reading run settings.
//!
//! Only structural problems surface here. A directory entry whose path
//! cannot be resolved is not an error: the resolver drops it and logs a
//! warning instead.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that abort a run settings parse.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    /// An element appeared inside a container that does not allow it.
    #[error("Invalid settings '{container}'. Unexpected XmlElement: '{element}'.")]
    InvalidElement {
        /// Name of the offending element as written in the document.
        element: String,
        /// Container the element was found in.
        container: String,
    },

    /// A recognised element lacks an attribute it cannot do without.
    #[error("Invalid settings '{element}'. Required attribute '{attribute}' is missing or empty.")]
    MissingAttribute {
        /// Element missing the attribute.
        element: String,
        /// Name of the required attribute.
        attribute: String,
    },

    /// A container held something other than the elements it accepts.
    #[error("Invalid settings '{container}'. Unexpected content: {found}.")]
    UnexpectedContent {
        /// Container being read.
        container: String,
        /// Description of the node that was found instead.
        found: String,
    },

    /// The reader was not positioned on an element when one was required.
    #[error("run settings reader is not positioned on an element (found {found})")]
    NotPositioned {
        /// Description of the node the reader was on.
        found: String,
    },

    /// The document is not well-formed XML.
    #[error("malformed run settings XML near byte {position}: {source}")]
    Xml {
        /// Byte offset reported by the XML reader.
        position: u64,
        /// Underlying reader error.
        #[source]
        source: quick_xml::Error,
    },

    /// Reading a run settings file failed.
    #[error("failed to read run settings file '{path}': {source}")]
    Io {
        /// File that could not be read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl SettingsError {
    /// Returns `true` when the error describes a problem with the document
    /// itself rather than with reading it from disk.
    ///
    /// Hosts typically report these as "invalid run settings" to the user.
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }

    pub(crate) fn invalid_element(element: &str, container: &str) -> Self {
        Self::InvalidElement {
            element: element.to_owned(),
            container: container.to_owned(),
        }
    }

    pub(crate) fn missing_attribute(element: &str, attribute: &str) -> Self {
        Self::MissingAttribute {
            element: element.to_owned(),
            attribute: attribute.to_owned(),
        }
    }
}

/// Result alias used throughout the crate.
pub type SettingsResult<T> = Result<T, SettingsError>;
