//! Unit tests for path expansion, classification and resolution.
