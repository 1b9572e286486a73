//! Lexical classification and normalisation of path expressions.
//!
//! Paths here are plain strings using Windows conventions alongside POSIX
//! ones: both `\` and `/` separate segments, `X:` introduces a drive and a
//! doubled leading separator introduces a network share. Nothing in this
//! module touches the filesystem.

const fn is_separator(c: char) -> bool {
    matches!(c, '\\' | '/')
}

fn segments(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_separator).filter(|segment| !segment.is_empty())
}

/// Returns `true` when `path` holds a wildcard or a character the platform
/// never accepts in a path.
pub(crate) fn has_invalid_characters(path: &str) -> bool {
    path.chars()
        .any(|c| matches!(c, '*' | '?' | '<' | '>' | '|' | '"') || c.is_control())
}

/// Shape of a path expression once variables have been expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PathKind {
    /// `\\host\share\...`
    Network,
    /// `X:\...` or `X:...`
    DriveRooted,
    /// `\...` without a drive; anchored to the current root.
    RootRelative,
    /// Anything else, `.\a` included.
    Relative,
}

impl PathKind {
    pub(crate) fn of(path: &str) -> Self {
        let mut chars = path.chars();
        match (chars.next(), chars.next()) {
            (Some(first), Some(second)) if is_separator(first) && is_separator(second) => {
                Self::Network
            }
            (Some(first), _) if is_separator(first) => Self::RootRelative,
            (Some(letter), Some(':')) if letter.is_ascii_alphabetic() => Self::DriveRooted,
            _ => Self::Relative,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Root {
    Drive(char),
    Share {
        separator: char,
        host: String,
        share: Option<String>,
    },
    Slash,
}

/// An absolute path held as a root plus normalised segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AbsolutePath {
    root: Root,
    segments: Vec<String>,
}

impl AbsolutePath {
    /// Parse a path that carries its own root.
    ///
    /// Returns `None` for relative input. Root-relative input is anchored
    /// to `/`; callers wanting the current drive use [`Self::with_root_of`].
    pub(crate) fn parse(path: &str) -> Option<Self> {
        match PathKind::of(path) {
            PathKind::Network => Some(Self::parse_share(path)),
            PathKind::DriveRooted => {
                let mut chars = path.chars();
                let letter = chars.next()?;
                let mut absolute = Self {
                    root: Root::Drive(letter),
                    segments: Vec::new(),
                };
                absolute.push(chars.as_str().strip_prefix(':').unwrap_or_default());
                Some(absolute)
            }
            PathKind::RootRelative => {
                let mut absolute = Self {
                    root: Root::Slash,
                    segments: Vec::new(),
                };
                absolute.push(path);
                Some(absolute)
            }
            PathKind::Relative => None,
        }
    }

    /// Parse `\\host\share\...`. Host and share form the root, so `.` and
    /// `..` met before both are known are dropped instead of named.
    fn parse_share(path: &str) -> Self {
        let separator = path.chars().next().unwrap_or('\\');
        let mut parts = segments(path);
        let mut root_names = parts.by_ref().filter(|segment| !matches!(*segment, "." | ".."));
        let host = root_names.next().unwrap_or_default().to_owned();
        let share = root_names.next().map(str::to_owned);
        let mut absolute = Self {
            root: Root::Share {
                separator,
                host,
                share,
            },
            segments: Vec::new(),
        };
        for segment in parts {
            absolute.push_segment(segment);
        }
        absolute
    }

    /// Anchor the segments of `path` at the root of `self`, discarding the
    /// segments `self` already holds.
    pub(crate) fn with_root_of(&self, path: &str) -> Self {
        let mut anchored = Self {
            root: self.root.clone(),
            segments: Vec::new(),
        };
        anchored.push(path);
        anchored
    }

    /// Append the segments of a relative path, folding `.` and `..`.
    pub(crate) fn push(&mut self, relative: &str) {
        for segment in segments(relative) {
            self.push_segment(segment);
        }
    }

    fn push_segment(&mut self, segment: &str) {
        match segment {
            "." => {}
            ".." => {
                self.segments.pop();
            }
            other => self.segments.push(other.to_owned()),
        }
    }

    const fn separator(&self) -> char {
        match &self.root {
            Root::Drive(_) => '\\',
            Root::Share { separator, .. } => *separator,
            Root::Slash => '/',
        }
    }

    /// Render the path as a string.
    pub(crate) fn render(&self) -> String {
        let separator = self.separator();
        let mut rendered = match &self.root {
            Root::Drive(letter) => format!("{letter}:{separator}"),
            Root::Share { host, share, .. } => {
                let mut prefix = format!("{separator}{separator}{host}");
                if let Some(share_name) = share {
                    prefix.push(separator);
                    prefix.push_str(share_name);
                }
                if !self.segments.is_empty() {
                    prefix.push(separator);
                }
                prefix
            }
            Root::Slash => separator.to_string(),
        };
        rendered.push_str(&self.segments.join(&separator.to_string()));
        rendered
    }
}
