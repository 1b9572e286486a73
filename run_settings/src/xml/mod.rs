//! Forward-only cursor over a run settings document.
//!
//! [`XmlCursor`] wraps a `quick-xml` reader and exposes the handful of
//! operations the settings parser needs: advance to the next node, inspect
//! the current element and its attributes, skip a subtree, and collect the
//! text of a leaf element. Comments, declarations, processing instructions
//! and whitespace-only text never surface as nodes.

mod node;

use std::fmt;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{SettingsError, SettingsResult};

pub use node::{Element, Node};

/// Forward-only reader positioned on one [`Node`] at a time.
///
/// A fresh cursor sits on [`Node::StartOfDocument`]; call
/// [`XmlCursor::read`] to move to the first node.
///
/// # Examples
///
/// ```rust
/// use run_settings::{Node, XmlCursor};
///
/// # fn main() -> run_settings::SettingsResult<()> {
/// let mut cursor = XmlCursor::new("<MSTestV2><DeploymentEnabled>false</DeploymentEnabled></MSTestV2>");
/// cursor.read()?;
/// assert!(cursor.is_element_named("mstestv2"));
/// cursor.read()?;
/// assert_eq!(cursor.read_inner_text()?, "false");
/// assert!(matches!(cursor.node(), Node::EndElement(name) if name == "MSTestV2"));
/// # Ok(())
/// # }
/// ```
pub struct XmlCursor<'a> {
    reader: Reader<&'a [u8]>,
    node: Node,
}

impl fmt::Debug for XmlCursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmlCursor")
            .field("node", &self.node)
            .finish_non_exhaustive()
    }
}

impl<'a> XmlCursor<'a> {
    /// Create a cursor over `xml`.
    #[must_use]
    pub fn new(xml: &'a str) -> Self {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);
        Self {
            reader,
            node: Node::StartOfDocument,
        }
    }

    /// The node the cursor is on.
    #[must_use]
    pub const fn node(&self) -> &Node {
        &self.node
    }

    /// The current element, if the cursor is on one.
    #[must_use]
    pub const fn element(&self) -> Option<&Element> {
        match &self.node {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// The current element, or an error naming what the cursor is on.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NotPositioned`] when the cursor is not on an
    /// element.
    pub fn current_element(&self) -> SettingsResult<&Element> {
        self.element().ok_or_else(|| SettingsError::NotPositioned {
            found: self.node.describe(),
        })
    }

    /// Returns `true` when the cursor is on an element called `name`,
    /// ignoring ASCII case.
    #[must_use]
    pub fn is_element_named(&self, name: &str) -> bool {
        self.element().is_some_and(|element| element.is_named(name))
    }

    /// Value of attribute `name` on the current element.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.element().and_then(|element| element.attribute(name))
    }

    /// Advance to the next node.
    ///
    /// Returns `false` once the end of the document is reached.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Xml`] when the document is malformed.
    pub fn read(&mut self) -> SettingsResult<bool> {
        self.node = self.next_node()?;
        Ok(!matches!(self.node, Node::EndOfDocument))
    }

    /// Move past the current element, including everything nested inside
    /// it, and land on the following node.
    ///
    /// On any other node this behaves like [`XmlCursor::read`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Xml`] when the document is malformed.
    pub fn skip(&mut self) -> SettingsResult<()> {
        if self.element().is_some_and(|element| !element.is_empty()) {
            self.consume_subtree(|_| {})?;
        }
        self.read().map(|_| ())
    }

    /// Collect the text inside the current element and move past it.
    ///
    /// Text of nested elements is included; markup is not.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NotPositioned`] when the cursor is not on an
    /// element, or [`SettingsError::Xml`] when the document is malformed.
    pub fn read_inner_text(&mut self) -> SettingsResult<String> {
        let is_empty = self.current_element()?.is_empty();
        let mut text = String::new();
        if !is_empty {
            self.consume_subtree(|fragment| text.push_str(fragment))?;
        }
        self.read()?;
        Ok(text)
    }

    /// Consume the end tag closing `container` and move to the next node.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnexpectedContent`] when the cursor is on
    /// anything other than an end tag.
    pub fn read_end_element(&mut self, container: &str) -> SettingsResult<()> {
        if matches!(self.node, Node::EndElement(_)) {
            return self.read().map(|_| ());
        }
        Err(SettingsError::UnexpectedContent {
            container: container.to_owned(),
            found: self.node.describe(),
        })
    }

    /// Scan forward, starting with the current node, for an element called
    /// `name` (ASCII case-insensitive).
    ///
    /// Returns `false` when the document ends first.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Xml`] when the document is malformed.
    pub fn move_to_element(&mut self, name: &str) -> SettingsResult<bool> {
        loop {
            if self.is_element_named(name) {
                return Ok(true);
            }
            if !self.read()? {
                return Ok(false);
            }
        }
    }

    /// Read until the end tag matching the current start tag, handing every
    /// text fragment to `on_text`. Leaves the cursor on that end tag.
    fn consume_subtree<F>(&mut self, mut on_text: F) -> SettingsResult<()>
    where
        F: FnMut(&str),
    {
        let mut depth = 1_usize;
        while depth > 0 {
            self.node = self.next_node()?;
            match &self.node {
                Node::Element(element) if !element.is_empty() => depth += 1,
                Node::EndElement(_) => depth -= 1,
                Node::Text(fragment) => on_text(fragment),
                Node::EndOfDocument => break,
                Node::Element(_) | Node::StartOfDocument => {}
            }
        }
        Ok(())
    }

    fn next_node(&mut self) -> SettingsResult<Node> {
        loop {
            let event = self.reader.read_event().map_err(|source| self.xml_error(source))?;
            let node = match event {
                Event::Start(start) => Node::Element(self.element_from(&start, false)?),
                Event::Empty(start) => Node::Element(self.element_from(&start, true)?),
                Event::End(end) => {
                    Node::EndElement(String::from_utf8_lossy(end.name().as_ref()).into_owned())
                }
                Event::Text(text) => {
                    let unescaped = text.unescape().map_err(|source| self.xml_error(source))?;
                    if unescaped.trim().is_empty() {
                        continue;
                    }
                    Node::Text(unescaped.into_owned())
                }
                Event::CData(data) => Node::Text(String::from_utf8_lossy(&data).into_owned()),
                Event::Eof => Node::EndOfDocument,
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => continue,
            };
            return Ok(node);
        }
    }

    fn element_from(&self, start: &BytesStart<'_>, is_empty: bool) -> SettingsResult<Element> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for entry in start.attributes() {
            let attribute = entry.map_err(|source| self.xml_error(source.into()))?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .map_err(|source| self.xml_error(source))?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(Element::new(name, attributes, is_empty))
    }

    fn xml_error(&self, source: quick_xml::Error) -> SettingsError {
        SettingsError::Xml {
            position: u64::try_from(self.reader.buffer_position()).unwrap_or(u64::MAX),
            source,
        }
    }
}

#[cfg(test)]
mod tests;
