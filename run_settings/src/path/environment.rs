//! Capabilities the resolver consults: variable expansion and directory
//! probing.
//!
//! Both are traits so callers can substitute closures in tests. The
//! defaults talk to the real process environment and filesystem.

use camino::Utf8Path;

/// Expands environment-variable placeholders embedded in a path.
///
/// Expansion is textual and never fails; placeholders that cannot be
/// resolved are left in place.
pub trait VariableExpander {
    /// Returns `text` with every resolvable placeholder substituted.
    fn expand(&self, text: &str) -> String;
}

impl<F> VariableExpander for F
where
    F: Fn(&str) -> String,
{
    fn expand(&self, text: &str) -> String {
        self(text)
    }
}

/// Reports whether a directory exists.
pub trait DirectoryProbe {
    /// Returns `true` when `path` names an existing directory.
    fn exists(&self, path: &str) -> bool;
}

impl<F> DirectoryProbe for F
where
    F: Fn(&str) -> bool,
{
    fn exists(&self, path: &str) -> bool {
        self(path)
    }
}

/// Expands `%NAME%` placeholders from the process environment.
///
/// Lookups try the exact name first and then fall back to an ASCII
/// case-insensitive match, so `%temp%` finds `TEMP`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl VariableExpander for ProcessEnvironment {
    fn expand(&self, text: &str) -> String {
        expand_percent_variables(text, lookup_process_variable)
    }
}

fn lookup_process_variable(name: &str) -> Option<String> {
    std::env::var(name).ok().or_else(|| {
        std::env::vars()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

/// Checks directories against the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystem;

impl DirectoryProbe for FileSystem {
    fn exists(&self, path: &str) -> bool {
        Utf8Path::new(path).is_dir()
    }
}

/// Substitute `%NAME%` placeholders using `lookup`.
///
/// An unknown name is copied through with its opening `%`, and scanning
/// resumes at its closing `%`, which may open the next placeholder. A lone
/// `%` without a partner is kept verbatim.
pub(crate) fn expand_percent_variables<L>(text: &str, lookup: L) -> String
where
    L: Fn(&str) -> Option<String>,
{
    let mut expanded = String::with_capacity(text.len());
    let mut rest = text;
    while let Some((before, after_open)) = rest.split_once('%') {
        expanded.push_str(before);
        let Some((name, after_close)) = after_open.split_once('%') else {
            expanded.push('%');
            expanded.push_str(after_open);
            return expanded;
        };
        match Some(name).filter(|n| !n.is_empty()).and_then(&lookup) {
            Some(value) => {
                expanded.push_str(&value);
                rest = after_close;
            }
            None => {
                expanded.push('%');
                expanded.push_str(name);
                rest = after_open.get(name.len()..).unwrap_or_default();
            }
        }
    }
    expanded.push_str(rest);
    expanded
}
