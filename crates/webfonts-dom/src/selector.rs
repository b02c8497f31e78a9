//! Simple selector matching for exclusion predicates

use crate::node::ElementData;

/// One simple selector: tag, `.class`, `#id` or `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Tag(String),
    Class(String),
    Id(String),
    Universal,
}

impl SimpleSelector {
    /// Parse a simple selector string
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if s == "*" {
            Some(Self::Universal)
        } else if let Some(id) = s.strip_prefix('#') {
            Some(Self::Id(id.to_string()))
        } else if let Some(class) = s.strip_prefix('.') {
            Some(Self::Class(class.to_string()))
        } else {
            Some(Self::Tag(s.to_ascii_lowercase()))
        }
    }

    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Universal => true,
            Self::Tag(tag) => element.tag.eq_ignore_ascii_case(tag),
            Self::Class(class) => element.has_class(class),
            Self::Id(id) => element.attr("id") == Some(id),
        }
    }
}

/// A comma-separated group of simple selectors; matches when any member
/// matches. This is the full selector language exclusion predicates are
/// expressed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList(Vec<SimpleSelector>);

impl SelectorList {
    /// Parse a selector group such as `".no-webfonts, #plain, code"`.
    ///
    /// Returns `None` when no member parses.
    pub fn parse(s: &str) -> Option<Self> {
        let selectors: Vec<SimpleSelector> =
            s.split(',').filter_map(SimpleSelector::parse).collect();
        if selectors.is_empty() {
            None
        } else {
            Some(Self(selectors))
        }
    }

    pub fn matches(&self, element: &ElementData) -> bool {
        self.0.iter().any(|s| s.matches(element))
    }
}
