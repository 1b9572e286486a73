//! Node values produced by the cursor.

use uncased::UncasedStr;

/// The node an [`XmlCursor`](super::XmlCursor) is positioned on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nothing has been read yet.
    StartOfDocument,
    /// A start tag or a self-closing tag.
    Element(Element),
    /// An end tag, carrying the element name.
    EndElement(String),
    /// Non-blank character data, entities already unescaped.
    Text(String),
    /// The document is exhausted.
    EndOfDocument,
}

impl Node {
    /// Short human-readable description used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::StartOfDocument => "start of document".to_owned(),
            Self::Element(element) => format!("element '{}'", element.name()),
            Self::EndElement(name) => format!("end of element '{name}'"),
            Self::Text(text) => format!("text '{}'", text.trim()),
            Self::EndOfDocument => "end of document".to_owned(),
        }
    }
}

/// A start tag together with its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    is_empty: bool,
}

impl Element {
    pub(crate) const fn new(name: String, attributes: Vec<(String, String)>, is_empty: bool) -> Self {
        Self {
            name,
            attributes,
            is_empty,
        }
    }

    /// Element name exactly as written, prefix included.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns `true` when the element name equals `name`, ignoring ASCII
    /// case.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        UncasedStr::new(&self.name) == name
    }

    /// Value of the attribute called exactly `name`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` for a self-closing tag such as `<Directory/>`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.is_empty
    }
}
