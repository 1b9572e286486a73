//! Unit tests for the forward-only XML cursor.

use anyhow::{Result, bail, ensure};
use rstest::rstest;

use super::{Node, XmlCursor};
use crate::SettingsError;

const DOCUMENT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!-- leading comment -->
<RunSettings>
  <MSTestV2>
    <AssemblyResolution>
      <Directory path="C:\a &amp; b" includeSubDirectories="false" />
      <Directory path="D:\c"></Directory>
    </AssemblyResolution>
    <DeploymentEnabled> False </DeploymentEnabled>
  </MSTestV2>
</RunSettings>"#;

fn element_name(cursor: &XmlCursor<'_>) -> Option<String> {
    cursor.element().map(|element| element.name().to_owned())
}

#[test]
fn fresh_cursor_sits_before_the_document() {
    let cursor = XmlCursor::new(DOCUMENT);
    assert_eq!(cursor.node(), &Node::StartOfDocument);
}

#[test]
fn read_skips_declarations_comments_and_whitespace() -> Result<()> {
    let mut cursor = XmlCursor::new(DOCUMENT);
    ensure!(cursor.read()?, "document ended early");
    ensure!(
        element_name(&cursor).as_deref() == Some("RunSettings"),
        "unexpected node {:?}",
        cursor.node()
    );
    ensure!(cursor.read()?, "document ended early");
    ensure!(cursor.is_element_named("mstestv2"), "names match without case");
    Ok(())
}

#[test]
fn attributes_are_unescaped_and_case_sensitive() -> Result<()> {
    let mut cursor = XmlCursor::new(DOCUMENT);
    ensure!(cursor.move_to_element("Directory")?, "no Directory element");
    ensure!(cursor.attribute("path") == Some(r"C:\a & b"), "path attribute");
    ensure!(
        cursor.attribute("includeSubDirectories") == Some("false"),
        "includeSubDirectories attribute"
    );
    ensure!(cursor.attribute("Path").is_none(), "attribute lookup ignores case");
    let Some(element) = cursor.element() else {
        bail!("expected an element");
    };
    ensure!(element.is_empty(), "self-closing tag should be empty");
    Ok(())
}

#[test]
fn skip_moves_past_nested_content() -> Result<()> {
    let mut cursor = XmlCursor::new(DOCUMENT);
    ensure!(cursor.move_to_element("AssemblyResolution")?, "no container");
    cursor.skip()?;
    ensure!(
        element_name(&cursor).as_deref() == Some("DeploymentEnabled"),
        "unexpected node {:?}",
        cursor.node()
    );
    Ok(())
}

#[test]
fn skip_on_self_closing_element_reads_one_node() -> Result<()> {
    let mut cursor = XmlCursor::new(DOCUMENT);
    ensure!(cursor.move_to_element("Directory")?, "no Directory element");
    cursor.skip()?;
    ensure!(
        cursor.attribute("path") == Some(r"D:\c"),
        "unexpected node {:?}",
        cursor.node()
    );
    cursor.skip()?;
    ensure!(
        cursor.node() == &Node::EndElement("AssemblyResolution".to_owned()),
        "unexpected node {:?}",
        cursor.node()
    );
    Ok(())
}

#[test]
fn read_inner_text_returns_trimmed_text_and_moves_on() -> Result<()> {
    let mut cursor = XmlCursor::new(DOCUMENT);
    ensure!(cursor.move_to_element("DeploymentEnabled")?, "no flag element");
    let text = cursor.read_inner_text()?;
    ensure!(text == "False", "unexpected text {text:?}");
    ensure!(
        cursor.node() == &Node::EndElement("MSTestV2".to_owned()),
        "unexpected node {:?}",
        cursor.node()
    );
    Ok(())
}

#[rstest]
#[case::self_closing("<Flag/><Next/>")]
#[case::empty_pair("<Flag></Flag><Next/>")]
fn read_inner_text_of_empty_elements_is_empty(#[case] xml: &str) -> Result<()> {
    let mut cursor = XmlCursor::new(xml);
    cursor.read()?;
    let text = cursor.read_inner_text()?;
    ensure!(text.is_empty(), "unexpected text {text:?}");
    ensure!(cursor.is_element_named("Next"), "unexpected node {:?}", cursor.node());
    Ok(())
}

#[test]
fn read_inner_text_concatenates_nested_text() -> Result<()> {
    let mut cursor = XmlCursor::new("<Flag>tr<b>u</b>e</Flag>");
    cursor.read()?;
    let text = cursor.read_inner_text()?;
    ensure!(text == "true", "unexpected text {text:?}");
    ensure!(
        cursor.node() == &Node::EndOfDocument,
        "unexpected node {:?}",
        cursor.node()
    );
    Ok(())
}

#[test]
fn read_inner_text_requires_an_element() {
    let mut cursor = XmlCursor::new("<a/>");
    let result = cursor.read_inner_text();
    assert!(
        matches!(result, Err(SettingsError::NotPositioned { ref found }) if found == "start of document"),
        "unexpected result {result:?}"
    );
}

#[test]
fn read_end_element_rejects_other_nodes() -> Result<()> {
    let mut cursor = XmlCursor::new("<a>stray text</a>");
    cursor.read()?;
    cursor.read()?;
    match cursor.read_end_element("a") {
        Err(SettingsError::UnexpectedContent { container, found }) => {
            ensure!(container == "a", "container {container}");
            ensure!(found == "text 'stray text'", "found {found}");
            Ok(())
        }
        other => bail!("expected UnexpectedContent, got {other:?}"),
    }
}

#[test]
fn move_to_element_reports_absence() -> Result<()> {
    let mut cursor = XmlCursor::new("<RunSettings><Other/></RunSettings>");
    ensure!(!cursor.move_to_element("MSTestV2")?, "element should be absent");
    ensure!(cursor.node() == &Node::EndOfDocument, "cursor should be exhausted");
    Ok(())
}

#[test]
fn mismatched_tags_are_xml_errors() -> Result<()> {
    let mut cursor = XmlCursor::new("<a><b></a>");
    let mut outcome = Ok(true);
    while matches!(outcome, Ok(true)) {
        outcome = cursor.read();
    }
    match outcome {
        Err(err @ SettingsError::Xml { .. }) => {
            ensure!(err.is_format_error(), "xml errors are format errors");
            Ok(())
        }
        other => bail!("expected an XML error, got {other:?}"),
    }
}

#[test]
fn cdata_surfaces_as_text() -> Result<()> {
    let mut cursor = XmlCursor::new("<Flag><![CDATA[true]]></Flag>");
    cursor.read()?;
    let text = cursor.read_inner_text()?;
    ensure!(text == "true", "unexpected text {text:?}");
    Ok(())
}
