//! Subtree resolution
//!
//! Walks the attachment root's subtree once, classifies each candidate
//! element, then performs the font loads and applications in batched
//! passes: one load per needed family, then one application per family to
//! its element group. Computed styles are read during the walk, before any
//! styling of the pass takes effect.

use webfonts_dom::{Document, NodeId, is_generic_family, parse_font_family_list};

use crate::engine::{ApplyOutcome, LoadOutcome, WebFonts};

/// What a resolution pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Families whose CSS was injected during this pass, in order
    pub fonts_loaded: Vec<String>,
    /// Elements that received a font stack (root and group members;
    /// form controls styled alongside them are not counted separately)
    pub elements_styled: usize,
    /// Elements left alone because of authored, non-generic styling
    pub elements_preserved: usize,
    /// Elements detached from an inherited root override
    pub inheritance_breaks: usize,
}

pub(crate) fn resolve_subtree(webfonts: &mut WebFonts, doc: &mut Document) -> ResolveReport {
    let root = webfonts.root;
    // Resolved root font before this pass touches anything.
    let base_family = doc.resolved_font_family(root);

    let mut queue: Vec<String> = Vec::new();
    let mut groups: Vec<(String, Vec<NodeId>)> = Vec::new();
    let mut breaks: Vec<NodeId> = Vec::new();
    let mut preserved = 0usize;

    // Font-family can arrive from a lang attribute, an inline style or a
    // class, so the candidate set is deliberately broad.
    for element in doc.descendant_elements(root) {
        let candidate = {
            let Some(el) = doc.element(element) else { continue };
            el.attr("lang").is_some() || el.has_inline_style() || !el.classes.is_empty()
        };
        if !candidate {
            continue;
        }
        if let Some(exclude) = &webfonts.exclude {
            if doc.matches(element, exclude) {
                continue;
            }
        }

        let element_family = doc.resolved_font_family(element);
        let own_declared = doc.own_font_family(element);
        let own_lang = doc.attr(element, "lang").map(|l| l.to_ascii_lowercase());

        if let Some(lang) =
            own_lang.filter(|l| webfonts.language.as_deref() != Some(l.as_str()))
        {
            let authored = element_family != base_family
                && !is_generic_family(&element_family)
                && !webfonts.is_overridable(own_declared.as_deref());
            if authored {
                tracing::trace!("preserving authored font-family '{element_family}'");
                preserved += 1;
            } else if let Some(family) =
                // An empty family is a legal "no font" result and must not
                // end up in any CSS list.
                webfonts.resolve_font(&lang).filter(|f| !f.trim().is_empty())
            {
                enqueue(&mut queue, &family);
                match groups.iter_mut().find(|(f, _)| *f == family) {
                    Some((_, members)) => members.push(element),
                    None => groups.push((family, vec![element])),
                }
            } else if base_family != webfonts.original_font_family
                && element_family == base_family
            {
                // Inheriting the root override with no font of its own; it
                // must be detached so it does not keep inheriting.
                breaks.push(element);
            }
        }

        // An authored custom font still gets its rules injected, even
        // though the element itself is never restyled here.
        if let Some(declared) = own_declared {
            if let Some(first) = parse_font_family_list(&declared).into_iter().next() {
                enqueue(&mut queue, &first);
            }
        }
    }

    let mut fonts_loaded = Vec::new();
    for family in &queue {
        if webfonts.load(doc, family) == LoadOutcome::Injected {
            fonts_loaded.push(family.clone());
        }
    }

    let inheritance_breaks = breaks.len();
    let original = webfonts.original_font_family.clone();
    for element in breaks {
        webfonts.apply(doc, Some(&original), Some(&[element][..]));
    }

    let mut elements_styled = 0usize;
    if let Some(language) = webfonts.language.clone() {
        let family = webfonts.resolve_font(&language);
        if let Some(family) = family.as_deref() {
            if webfonts.load(doc, family) == LoadOutcome::Injected {
                fonts_loaded.push(family.to_string());
            }
        }
        if webfonts.apply(doc, family.as_deref(), None) == ApplyOutcome::Applied {
            elements_styled += 1;
        }
    }
    for (family, members) in &groups {
        webfonts.apply(doc, Some(family), Some(members.as_slice()));
        elements_styled += members.len();
    }

    ResolveReport {
        fonts_loaded,
        elements_styled,
        elements_preserved: preserved,
        inheritance_breaks,
    }
}

fn enqueue(queue: &mut Vec<String>, family: &str) {
    if !queue.iter().any(|f| f == family) {
        queue.push(family.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Options, WebFonts};

    // The break-inheritance branch is unreachable through the public flows
    // (attach captures the original before anything is styled, refresh
    // resets first), so it is driven here by styling the root after attach.
    #[test]
    fn test_break_inheritance_reset() {
        let mut doc = Document::new();
        let body = doc.body();
        let root = doc.create_element("div");
        let textarea = doc.create_element("textarea");
        doc.append_child(body, root);
        doc.append_child(root, textarea);
        doc.set_attr(textarea, "lang", "xx");

        let mut webfonts = WebFonts::attach(&mut doc, root, Options::default()).unwrap();
        assert_eq!(webfonts.original_font_family(), "sans-serif");

        // Style the root and the control out-of-band, as if an earlier
        // pass had run.
        let stack = "'HindiFont', Helvetica, Arial, sans-serif";
        doc.set_font_family(root, Some(stack));
        doc.set_font_family(textarea, Some(stack));

        let report = resolve_subtree(&mut webfonts, &mut doc);
        assert_eq!(report.inheritance_breaks, 1);
        // The control no longer carries the inherited override.
        assert_eq!(doc.resolved_font_family(textarea), "monospace");
    }

    #[test]
    fn test_break_not_taken_when_root_unchanged() {
        let mut doc = Document::new();
        let body = doc.body();
        let root = doc.create_element("div");
        let textarea = doc.create_element("textarea");
        doc.append_child(body, root);
        doc.append_child(root, textarea);
        doc.set_attr(textarea, "lang", "xx");

        let mut webfonts = WebFonts::attach(&mut doc, root, Options::default()).unwrap();
        let report = resolve_subtree(&mut webfonts, &mut doc);
        assert_eq!(report.inheritance_breaks, 0);
        assert_eq!(doc.resolved_font_family(textarea), "monospace");
    }
}
