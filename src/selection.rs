// src/selection.rs

//! Selection filter: decides whether a selected file can be injected.
//!
//! A path is accepted when it matches `^.+\.(<ext>|<ext>...)$`, i.e. at least
//! one character followed by one of the configured extensions. Matching is
//! case-sensitive, so `Foo.M` is rejected.

use std::path::Path;

use regex::Regex;

use crate::config::SelectionSection;
use crate::errors::{InjectorError, Result};

/// Message shown when the selection cannot be injected.
pub const SELECTION_HINT: &str = "Select text in an implementation file to inject...";

#[derive(Debug, Clone)]
pub struct SelectionFilter {
    pattern: Regex,
}

impl SelectionFilter {
    /// Build a filter accepting the given extensions (without the dot).
    pub fn new<S: AsRef<str>>(extensions: &[S]) -> Result<Self> {
        if extensions.is_empty() {
            return Err(InjectorError::ConfigError(
                "selection filter needs at least one extension".to_string(),
            ));
        }

        let alternatives: Vec<String> = extensions
            .iter()
            .map(|ext| regex::escape(ext.as_ref()))
            .collect();
        let source = format!(r"^.+\.({})$", alternatives.join("|"));

        let pattern = Regex::new(&source).map_err(|e| {
            InjectorError::ConfigError(format!("invalid selection pattern '{source}': {e}"))
        })?;

        Ok(Self { pattern })
    }

    pub fn from_config(section: &SelectionSection) -> Result<Self> {
        Self::new(&section.extensions)
    }

    /// Whether `path` names an implementation file that can be injected.
    ///
    /// Paths that are not valid UTF-8 are never accepted.
    pub fn accepts(&self, path: &Path) -> bool {
        path.to_str()
            .map(|s| self.pattern.is_match(s))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepts(path: &str) -> bool {
        SelectionFilter::from_config(&SelectionSection::default())
            .unwrap()
            .accepts(Path::new(path))
    }

    #[test]
    fn accepts_implementation_files() {
        assert!(accepts("/src/App/ViewController.m"));
        assert!(accepts("/src/App/Bridge.mm"));
        assert!(accepts("/src/App/View.swift"));
    }

    #[test]
    fn rejects_headers_and_other_files() {
        assert!(!accepts("/src/App/ViewController.h"));
        assert!(!accepts("/src/App/Main.storyboard"));
        assert!(!accepts("/src/App/View.swift.orig"));
        assert!(!accepts("/src/App/notes.mmm"));
    }

    #[test]
    fn match_is_case_sensitive() {
        assert!(!accepts("/src/App/ViewController.M"));
        assert!(!accepts("/src/App/View.Swift"));
    }

    #[test]
    fn requires_a_name_before_the_extension() {
        assert!(!accepts(".m"));
        assert!(accepts("a.m"));
    }

    #[test]
    fn custom_extensions_are_escaped() {
        let filter = SelectionFilter::new(&["c", "cpp"]).unwrap();
        assert!(filter.accepts(Path::new("main.cpp")));
        assert!(!filter.accepts(Path::new("main.m")));
    }
}
