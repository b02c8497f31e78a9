//! Document: tree plus the host-environment surface
//!
//! Carries everything the font resolution engine needs from a browser
//! document: attribute and computed-style reads, style mutation, subtree
//! queries, a document default language, a simulated user-agent string,
//! and a single idempotently-created `<style>` injection point in `<head>`.

use crate::NodeId;
use crate::node::{ElementData, NodeData};
use crate::selector::SelectorList;
use crate::tree::DomTree;

/// Font family every element bottoms out at when nothing else applies
const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Tags of text-input-capable form controls. They get a user-agent
/// `monospace` default and do not inherit font-family.
const FORM_CONTROL_TAGS: [&str; 3] = ["input", "textarea", "button"];

fn ua_default_font_family(tag: &str) -> Option<&'static str> {
    FORM_CONTROL_TAGS.contains(&tag).then_some("monospace")
}

/// An HTML document with fabricated computed styles.
pub struct Document {
    tree: DomTree,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
    /// The injected stylesheet element; NONE until the first injection
    style_element: NodeId,
    user_agent: String,
    /// Author rules: class name to font-family value, in source order
    class_styles: Vec<(String, String)>,
}

impl Document {
    /// Create a document with the usual html/head/body skeleton.
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");
        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            html_element: html,
            head_element: head,
            body_element: body,
            style_element: NodeId::NONE,
            user_agent: String::new(),
            class_styles: Vec::new(),
        }
    }

    pub fn html(&self) -> NodeId {
        self.html_element
    }

    pub fn head(&self) -> NodeId {
        self.head_element
    }

    pub fn body(&self) -> NodeId {
        self.body_element
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Simulated `navigator.userAgent`
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn set_user_agent(&mut self, user_agent: &str) {
        self.user_agent = user_agent.to_string();
    }

    /// Document default language: the `lang` attribute of `<html>`.
    pub fn default_language(&self) -> Option<&str> {
        self.attr(self.html_element, "lang")
    }

    /// Register an author rule assigning a font-family to a class.
    ///
    /// Later rules win over earlier ones, matching cascade source order.
    pub fn add_class_style(&mut self, class: &str, font_family: &str) {
        self.class_styles.push((class.to_string(), font_family.to_string()));
    }

    // ------------------------------------------------------------------
    // Tree construction
    // ------------------------------------------------------------------

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.tree.create_text(content)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.tree.append_child(parent, child);
    }

    // ------------------------------------------------------------------
    // Element access
    // ------------------------------------------------------------------

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.tree.get(id).and_then(|n| n.as_element())
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.tree.get_mut(id).and_then(|n| n.as_element_mut())
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attr(name))
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(id) {
            el.set_attr(name, value);
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(el) = self.element_mut(id) {
            el.add_class(class);
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(el) = self.element_mut(id) {
            el.remove_class(class);
        }
    }

    pub fn matches(&self, id: NodeId, selector: &SelectorList) -> bool {
        self.element(id).is_some_and(|e| selector.matches(e))
    }

    // ------------------------------------------------------------------
    // Computed styles
    // ------------------------------------------------------------------

    /// The element's own (non-inherited) font-family declaration: inline
    /// style first, then class rules in reverse source order.
    pub fn own_font_family(&self, id: NodeId) -> Option<String> {
        let el = self.element(id)?;
        self.own_font_family_of(el)
    }

    fn own_font_family_of(&self, el: &ElementData) -> Option<String> {
        if let Some(inline) = el.inline_font_family() {
            return Some(inline.to_string());
        }
        self.class_styles
            .iter()
            .rev()
            .find(|(class, _)| el.has_class(class))
            .map(|(_, value)| value.clone())
    }

    /// The font-family value in effect for an element, as the style engine
    /// would compute it: own declaration, else the user-agent default for
    /// form controls, else the nearest ancestor's resolved value, else the
    /// document default.
    pub fn resolved_font_family(&self, id: NodeId) -> String {
        let Some(node) = self.tree.get(id) else {
            return DEFAULT_FONT_FAMILY.to_string();
        };
        if let Some(el) = node.as_element() {
            if let Some(own) = self.own_font_family_of(el) {
                return own;
            }
            if let Some(ua) = ua_default_font_family(&el.tag) {
                return ua.to_string();
            }
        }
        if node.parent.is_valid() {
            self.resolved_font_family(node.parent)
        } else {
            DEFAULT_FONT_FAMILY.to_string()
        }
    }

    /// Set or remove an element's inline font-family.
    pub fn set_font_family(&mut self, id: NodeId, value: Option<&str>) {
        if let Some(el) = self.element_mut(id) {
            el.set_inline_font_family(value);
        }
    }

    // ------------------------------------------------------------------
    // Subtree queries
    // ------------------------------------------------------------------

    /// Descendant elements of `root` in document order, excluding `root`.
    pub fn descendant_elements(&self, root: NodeId) -> Vec<NodeId> {
        self.tree
            .descendants(root)
            .into_iter()
            .filter(|&id| self.is_element(id))
            .collect()
    }

    /// Descendant form controls of `root` (single-line inputs, text areas,
    /// buttons), excluding `root` itself.
    pub fn form_controls_of(&self, root: NodeId) -> Vec<NodeId> {
        self.descendant_elements(root)
            .into_iter()
            .filter(|&id| {
                self.tag(id).is_some_and(|tag| FORM_CONTROL_TAGS.contains(&tag))
            })
            .collect()
    }

    /// Descendant elements of `root` carrying the given class.
    pub fn elements_with_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.descendant_elements(root)
            .into_iter()
            .filter(|&id| self.has_class(id, class))
            .collect()
    }

    // ------------------------------------------------------------------
    // Stylesheet injection
    // ------------------------------------------------------------------

    /// Append CSS text to the document's injected stylesheet.
    ///
    /// The `<style>` element in `<head>` is created on first use; the
    /// operation is append-only and injected text is never removed.
    pub fn inject_css(&mut self, css: &str) {
        if !self.style_element.is_valid() {
            let style = self.tree.create_element("style");
            self.tree.append_child(self.head_element, style);
            self.style_element = style;
        }
        let text_child = self
            .tree
            .children(self.style_element)
            .into_iter()
            .find(|&id| self.tree.get(id).is_some_and(|n| n.as_text().is_some()));
        match text_child {
            Some(id) => {
                if let Some(node) = self.tree.get_mut(id) {
                    if let NodeData::Text(text) = &mut node.data {
                        text.push_str(css);
                    }
                }
            }
            None => {
                let text = self.tree.create_text(css);
                self.tree.append_child(self.style_element, text);
            }
        }
    }

    /// Accumulated text of the injected stylesheet.
    pub fn style_text(&self) -> String {
        if !self.style_element.is_valid() {
            return String::new();
        }
        self.tree
            .children(self.style_element)
            .into_iter()
            .filter_map(|id| self.tree.get(id).and_then(|n| n.as_text()).map(str::to_string))
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_div() -> (Document, NodeId) {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        let body = doc.body();
        doc.append_child(body, div);
        (doc, div)
    }

    #[test]
    fn test_document_skeleton() {
        let doc = Document::new();
        assert_eq!(doc.tag(doc.html()), Some("html"));
        assert_eq!(doc.tag(doc.head()), Some("head"));
        assert_eq!(doc.tag(doc.body()), Some("body"));
        assert_eq!(doc.default_language(), None);
    }

    #[test]
    fn test_default_language() {
        let mut doc = Document::new();
        let html = doc.html();
        doc.set_attr(html, "lang", "fi");
        assert_eq!(doc.default_language(), Some("fi"));
    }

    #[test]
    fn test_resolved_font_family_defaults() {
        let (mut doc, div) = doc_with_div();
        assert_eq!(doc.resolved_font_family(div), "sans-serif");

        let textarea = doc.create_element("textarea");
        doc.append_child(div, textarea);
        assert_eq!(doc.resolved_font_family(textarea), "monospace");
    }

    #[test]
    fn test_resolved_font_family_inheritance() {
        let (mut doc, div) = doc_with_div();
        let span = doc.create_element("span");
        let deep = doc.create_element("em");
        doc.append_child(div, span);
        doc.append_child(span, deep);

        doc.set_font_family(div, Some("'TharLon', Helvetica"));
        assert_eq!(doc.resolved_font_family(span), "'TharLon', Helvetica");
        assert_eq!(doc.resolved_font_family(deep), "'TharLon', Helvetica");

        // Form controls do not inherit.
        let input = doc.create_element("input");
        doc.append_child(span, input);
        assert_eq!(doc.resolved_font_family(input), "monospace");
    }

    #[test]
    fn test_own_font_family_class_rules() {
        let (mut doc, div) = doc_with_div();
        doc.add_class_style("serifed", "serif");
        doc.add_class_style("fancy", "FancyFont");
        doc.set_attr(div, "class", "serifed fancy");

        // Later rules win.
        assert_eq!(doc.own_font_family(div).as_deref(), Some("FancyFont"));

        // Inline style beats class rules.
        doc.set_attr(div, "style", "font-family: Inline");
        assert_eq!(doc.own_font_family(div).as_deref(), Some("Inline"));
    }

    #[test]
    fn test_inherited_value_is_not_own() {
        let (mut doc, div) = doc_with_div();
        let span = doc.create_element("span");
        doc.append_child(div, span);
        doc.set_font_family(div, Some("FancyFont"));

        assert_eq!(doc.own_font_family(span), None);
        assert_eq!(doc.resolved_font_family(span), "FancyFont");
    }

    #[test]
    fn test_descendant_queries() {
        let (mut doc, div) = doc_with_div();
        let p = doc.create_element("p");
        let input = doc.create_element("input");
        let textarea = doc.create_element("textarea");
        doc.append_child(div, p);
        doc.append_child(p, input);
        doc.append_child(div, textarea);

        assert_eq!(doc.descendant_elements(div), vec![p, input, textarea]);
        assert_eq!(doc.form_controls_of(div), vec![input, textarea]);

        doc.add_class(textarea, "webfonts-changed");
        assert_eq!(doc.elements_with_class(div, "webfonts-changed"), vec![textarea]);
    }

    #[test]
    fn test_inject_css_single_style_element() {
        let mut doc = Document::new();
        doc.inject_css("@font-face { font-family: 'A';\n}\n");
        doc.inject_css("@font-face { font-family: 'B';\n}\n");

        let styles: Vec<NodeId> = doc
            .descendant_elements(doc.head())
            .into_iter()
            .filter(|&id| doc.tag(id) == Some("style"))
            .collect();
        assert_eq!(styles.len(), 1);
        assert_eq!(
            doc.style_text(),
            "@font-face { font-family: 'A';\n}\n@font-face { font-family: 'B';\n}\n"
        );
    }
}
