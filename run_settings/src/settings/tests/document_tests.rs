//! Tests for reading the declared settings out of the document.

use anyhow::{Result, bail, ensure};
use rstest::rstest;

use super::{read_document, stub_resolver};
use crate::SettingsError;
use crate::settings::document::parse_bool;
use crate::settings::{AdapterSettings, DirectoryEntry};
use crate::xml::{Node, XmlCursor};

const UNKNOWN_CONTAINER_AT_ROOT: &str = r#"<MSTestV2>
    <IgnoreTestImpact>true</IgnoreTestImpact>
    <AssemblyResolutionBug>
        <Directory path="C:\\MsTest\\Adapter" includeSubDirectories="true" />
        <Directory path="%temp%\\unitTesting\\MsTest\\Adapter" includeSubDirectories="false" />
        <Directory path="*MsTest\Adapter" />
    </AssemblyResolutionBug>
    <InProcMode>true</InProcMode>
    <CleanUpCommunicationChannels>false</CleanUpCommunicationChannels>
</MSTestV2>"#;

const MISNAMED_DIRECTORY: &str = r#"<MSTestV2>
    <AssemblyResolution>
        <DirectoryBug path="C:\\MsTest\\Adapter" includeSubDirectories="true" />
        <Directory path="%temp%\\unitTesting\\MsTest\\Adapter" includeSubDirectories="false" />
        <Directory path="*MsTest\Adapter" />
    </AssemblyResolution>
</MSTestV2>"#;

#[test]
fn unknown_elements_under_the_root_are_skipped() -> Result<()> {
    let settings = read_document(UNKNOWN_CONTAINER_AT_ROOT)?;
    ensure!(
        settings.search_directories().is_empty(),
        "unexpected entries {:?}",
        settings.search_directories()
    );
    ensure!(settings.deployment_enabled(), "default should hold");
    Ok(())
}

#[test]
fn misnamed_directory_entry_is_a_format_error() -> Result<()> {
    match read_document(MISNAMED_DIRECTORY) {
        Err(SettingsError::InvalidElement { element, container }) => {
            ensure!(element == "DirectoryBug", "element {element}");
            ensure!(container == "AssemblyResolution", "container {container}");
            Ok(())
        }
        other => bail!("expected InvalidElement, got {other:?}"),
    }
}

#[test]
fn directory_entries_keep_document_order_and_duplicates() -> Result<()> {
    let settings = read_document(
        r#"<MSTestV2>
             <AssemblyResolution>
               <Directory path="C:\b" includeSubDirectories="false" />
               <Directory path="C:\a" />
               <Directory path="C:\b" includeSubDirectories="TRUE" />
               <Directory path="*MsTest\Adapter" />
             </AssemblyResolution>
           </MSTestV2>"#,
    )?;
    let expected = vec![
        DirectoryEntry::new(r"C:\b", false),
        DirectoryEntry::new(r"C:\a", true),
        DirectoryEntry::new(r"C:\b", true),
        DirectoryEntry::new(r"*MsTest\Adapter", true),
    ];
    ensure!(
        settings.search_directories() == expected.as_slice(),
        "unexpected entries {:?}",
        settings.search_directories()
    );
    Ok(())
}

#[rstest]
#[case::absent("", true)]
#[case::blank(r#"includeSubDirectories="""#, true)]
#[case::lowercase_false(r#"includeSubDirectories="false""#, false)]
#[case::mixed_case_true(r#"includeSubDirectories=" True ""#, true)]
#[case::not_a_boolean(r#"includeSubDirectories="yes""#, false)]
fn include_sub_directories_parsing(#[case] attribute: &str, #[case] expected: bool) -> Result<()> {
    let xml = format!(
        r#"<MSTestV2><AssemblyResolution><Directory path="C:\a" {attribute}/></AssemblyResolution></MSTestV2>"#
    );
    let settings = read_document(&xml)?;
    let Some(entry) = settings.search_directories().first() else {
        bail!("no entry read from {xml}");
    };
    ensure!(
        entry.include_sub_directories() == expected,
        "attribute {attribute:?} gave {}",
        entry.include_sub_directories()
    );
    Ok(())
}

#[rstest]
#[case::missing(r"<Directory includeSubDirectories='true'/>")]
#[case::blank(r"<Directory path='  '/>")]
fn directory_without_path_is_a_format_error(#[case] entry: &str) -> Result<()> {
    let xml = format!("<MSTestV2><AssemblyResolution>{entry}</AssemblyResolution></MSTestV2>");
    match read_document(&xml) {
        Err(SettingsError::MissingAttribute { element, attribute }) => {
            ensure!(element == "Directory", "element {element}");
            ensure!(attribute == "path", "attribute {attribute}");
            Ok(())
        }
        other => bail!("expected MissingAttribute, got {other:?}"),
    }
}

#[test]
fn text_inside_assembly_resolution_is_a_format_error() -> Result<()> {
    let xml = r#"<MSTestV2><AssemblyResolution>C:\a</AssemblyResolution></MSTestV2>"#;
    match read_document(xml) {
        Err(err @ SettingsError::UnexpectedContent { .. }) => {
            ensure!(err.is_format_error(), "should be a format error");
            Ok(())
        }
        other => bail!("expected UnexpectedContent, got {other:?}"),
    }
}

#[rstest]
#[case::text_before_children("stray")]
#[case::cdata_before_children("<![CDATA[stray]]>")]
fn stray_root_text_does_not_hide_later_children(#[case] stray: &str) -> Result<()> {
    let settings = read_document(&format!(
        r#"<MSTestV2>{stray}<DeploymentEnabled>false</DeploymentEnabled>{stray}
             <AssemblyResolution><Directory path="C:\a" includeSubDirectories="false"/></AssemblyResolution>
           </MSTestV2>"#
    ))?;
    ensure!(!settings.deployment_enabled(), "flag after text was not read");
    ensure!(
        settings.search_directories() == [DirectoryEntry::new(r"C:\a", false)].as_slice(),
        "unexpected entries {:?}",
        settings.search_directories()
    );
    Ok(())
}

#[test]
fn stray_root_text_does_not_hide_later_format_errors() -> Result<()> {
    let xml = "<MSTestV2>stray<DeploymentEnabled>false</DeploymentEnabled>\
               <AssemblyResolution><Bogus/></AssemblyResolution></MSTestV2>";
    match read_document(xml) {
        Err(SettingsError::InvalidElement { element, container }) => {
            ensure!(element == "Bogus", "element {element}");
            ensure!(container == "AssemblyResolution", "container {container}");
            Ok(())
        }
        other => bail!("expected InvalidElement, got {other:?}"),
    }
}

#[test]
fn trailing_root_text_stops_at_the_root_end_tag() -> Result<()> {
    let mut cursor = XmlCursor::new("<MSTestV2><Other/>tail</MSTestV2>");
    cursor.read()?;
    let _settings = AdapterSettings::to_settings(&mut cursor)?;
    ensure!(
        cursor.node() == &Node::EndElement("MSTestV2".to_owned()),
        "unexpected node {:?}",
        cursor.node()
    );
    Ok(())
}

#[test]
fn element_names_ignore_case() -> Result<()> {
    let settings = read_document(
        r#"<mstestv2>
             <assemblyresolution><DIRECTORY path="C:\a"/></assemblyresolution>
             <deploymentenabled>false</deploymentenabled>
           </mstestv2>"#,
    )?;
    ensure!(settings.search_directories().len() == 1, "directory not read");
    ensure!(!settings.deployment_enabled(), "flag not read");
    Ok(())
}

#[rstest]
#[case::absent("", true, true)]
#[case::false_flag("<DeploymentEnabled>False</DeploymentEnabled>", false, true)]
#[case::true_flag("<DeploymentEnabled>TRUE</DeploymentEnabled>", true, true)]
#[case::garbage_keeps_default("<DeploymentEnabled>nope</DeploymentEnabled>", true, true)]
#[case::empty_keeps_default("<DeploymentEnabled/>", true, true)]
#[case::dependencies(
    "<DeployTestSourceDependencies>false</DeployTestSourceDependencies>",
    true,
    false
)]
#[case::both(
    "<DeployTestSourceDependencies>false</DeployTestSourceDependencies><DeploymentEnabled>false</DeploymentEnabled>",
    false,
    false
)]
fn flag_elements(
    #[case] body: &str,
    #[case] deployment_enabled: bool,
    #[case] deploy_dependencies: bool,
) -> Result<()> {
    let settings = read_document(&format!("<MSTestV2>{body}</MSTestV2>"))?;
    ensure!(
        settings.deployment_enabled() == deployment_enabled,
        "DeploymentEnabled for {body}"
    );
    ensure!(
        settings.deploy_test_source_dependencies() == deploy_dependencies,
        "DeployTestSourceDependencies for {body}"
    );
    Ok(())
}

#[test]
fn self_closing_root_yields_defaults() -> Result<()> {
    let settings = read_document("<MSTestV2/>")?;
    ensure!(settings == AdapterSettings::default(), "unexpected {settings:?}");
    Ok(())
}

#[test]
fn reading_stops_at_the_root_end_tag() -> Result<()> {
    let mut cursor = XmlCursor::new("<RunSettings><MSTestV2><Other/></MSTestV2><Next/></RunSettings>");
    ensure!(cursor.move_to_element("MSTestV2")?, "section missing");
    let _settings = AdapterSettings::to_settings(&mut cursor)?;
    ensure!(
        cursor.node() == &Node::EndElement("MSTestV2".to_owned()),
        "unexpected node {:?}",
        cursor.node()
    );
    Ok(())
}

#[test]
fn cursor_must_start_on_an_element() {
    let mut cursor = XmlCursor::new("<MSTestV2/>");
    let result = AdapterSettings::to_settings(&mut cursor);
    assert!(
        matches!(result, Err(SettingsError::NotPositioned { .. })),
        "unexpected {result:?}"
    );
}

#[test]
fn directory_list_resolves_in_order_and_drops_failures() {
    let mut settings = AdapterSettings::default();
    settings.push_search_directory(DirectoryEntry::new(r"C:\unitTesting\..\MsTest\Adapter", true));
    settings.push_search_directory(DirectoryEntry::new(r"*MsTest\Adapter", true));
    settings.push_search_directory(DirectoryEntry::new(r"%temp%\unitTesting\MsTest\Adapter", false));

    let resolved = settings.directory_list_with_recursive_property(&stub_resolver(), Some(r"C:\unitTesting"));

    let summary: Vec<(&str, bool)> = resolved
        .iter()
        .map(|path| (path.directory_path(), path.include_sub_directories()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (r"C:\MsTest\Adapter", true),
            (r"C:\foo\unitTesting\MsTest\Adapter", false),
        ]
    );
}

#[rstest]
#[case::lower("true", Some(true))]
#[case::upper("FALSE", Some(false))]
#[case::padded("  True\n", Some(true))]
#[case::numeric("1", None)]
#[case::empty("", None)]
fn parses_booleans(#[case] text: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(text), expected, "text: {text:?}");
}
