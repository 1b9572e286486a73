//! Unit tests for reading, resolving and providing adapter settings.

use super::{AdapterSettings, Settings, SettingsParser};
use crate::SettingsResult;
use crate::path::PathResolver;
use crate::xml::XmlCursor;

mod document_tests;

type StubResolver = PathResolver<fn(&str) -> String, fn(&str) -> bool>;

fn expand_temp(text: &str) -> String {
    text.replace("%temp%", r"C:\foo")
}

const fn always_exists(_: &str) -> bool {
    true
}

/// Resolver that expands `%temp%` to `C:\foo`, reports every directory as
/// present and uses `D:\work` as the current directory.
pub(super) fn stub_resolver() -> StubResolver {
    PathResolver::new()
        .with_expander(expand_temp as fn(&str) -> String)
        .with_probe(always_exists as fn(&str) -> bool)
        .with_current_directory(r"D:\work")
}

/// Read the declared settings from a document rooted at the section.
pub(super) fn read_document(xml: &str) -> SettingsResult<AdapterSettings> {
    let mut cursor = XmlCursor::new(xml);
    cursor.read()?;
    AdapterSettings::to_settings(&mut cursor)
}

pub(super) fn parse_resolved(xml: &str) -> SettingsResult<Settings> {
    SettingsParser::with_resolver(stub_resolver())
        .with_base_directory(r"C:\unitTesting")
        .parse_str(xml)
}
