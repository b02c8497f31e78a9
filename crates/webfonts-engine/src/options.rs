//! Engine configuration

use std::fmt;

use webfonts_repo::Repository;

use crate::select::FontSelect;

/// Configuration for one attachment.
pub struct Options {
    /// Repository overrides, merged over the instance's base repository
    pub repository: Option<Repository>,
    /// Fallback font stack appended after every resolved family
    pub font_stack: Vec<String>,
    /// Exclusion predicate: elements matching this selector group are
    /// neither restyled nor considered during subtree resolution
    pub exclude: Option<String>,
    /// Pluggable font selection strategy; defaults to the repository's
    /// per-language preference list
    pub font_selector: Option<Box<dyn FontSelect>>,
    /// Authored font-family stacks that language-based resolution may
    /// override even though they are explicit and non-generic
    pub overridable_font_families: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            repository: None,
            font_stack: vec!["Helvetica".into(), "Arial".into(), "sans-serif".into()],
            exclude: None,
            font_selector: None,
            overridable_font_families: Vec::new(),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("repository", &self.repository)
            .field("font_stack", &self.font_stack)
            .field("exclude", &self.exclude)
            .field("font_selector", &self.font_selector.as_ref().map(|_| "<strategy>"))
            .field("overridable_font_families", &self.overridable_font_families)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_font_stack() {
        let options = Options::default();
        assert_eq!(options.font_stack, ["Helvetica", "Arial", "sans-serif"]);
        assert!(options.repository.is_none());
        assert!(options.exclude.is_none());
        assert!(options.overridable_font_families.is_empty());
    }
}
