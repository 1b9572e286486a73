//! Resolution of search directory expressions into absolute paths.
//!
//! [`PathResolver`] expands environment variables, rejects wildcards,
//! anchors relative paths, folds `.` and `..` segments, and finally asks a
//! [`DirectoryProbe`] whether the directory exists.

mod environment;
mod expression;
mod resolver;

pub use environment::{DirectoryProbe, FileSystem, ProcessEnvironment, VariableExpander};
pub use resolver::PathResolver;

#[cfg(test)]
mod tests;
