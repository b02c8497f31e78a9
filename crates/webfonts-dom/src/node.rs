//! DOM nodes and element data

use smallvec::SmallVec;

use crate::NodeId;
use crate::style::{Declaration, parse_declarations, serialize_declarations};

/// A node in the arena tree.
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    pub fn text(content: String) -> Self {
        Self::with_data(NodeData::Text(content))
    }

    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
}

/// An element attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Element-specific data
///
/// The `class` and `style` attributes are kept both as raw attribute text
/// and in parsed form; the parsed forms are the source of truth and the raw
/// text is regenerated when they are mutated programmatically.
#[derive(Debug)]
pub struct ElementData {
    /// Tag name, lowercase
    pub tag: String,
    /// Attributes in set order
    pub attrs: SmallVec<[Attribute; 4]>,
    /// Parsed class list
    pub classes: SmallVec<[String; 2]>,
    /// Parsed inline style declarations
    pub style: Vec<Declaration>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: SmallVec::new(),
            classes: SmallVec::new(),
            style: Vec::new(),
        }
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, replacing any existing value
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "class" => {
                self.classes = value.split_whitespace().map(str::to_string).collect();
            }
            "style" => {
                self.style = parse_declarations(value);
            }
            _ => {}
        }
        match self.attrs.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => self.attrs.push(Attribute { name, value: value.to_string() }),
        }
    }

    fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|a| a.name != name);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
            self.sync_class_attr();
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        if self.has_class(class) {
            self.classes.retain(|c| c != class);
            self.sync_class_attr();
        }
    }

    /// The element's own inline `font-family` declaration, if any
    pub fn inline_font_family(&self) -> Option<&str> {
        self.style
            .iter()
            .rev()
            .find(|d| d.property == "font-family")
            .map(|d| d.value.as_str())
    }

    /// Set or remove the inline `font-family` declaration.
    ///
    /// `None` (or an empty value) removes the declaration, letting the
    /// cascade take over again.
    pub fn set_inline_font_family(&mut self, value: Option<&str>) {
        self.style.retain(|d| d.property != "font-family");
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.style.push(Declaration {
                property: "font-family".to_string(),
                value: value.to_string(),
            });
        }
        self.sync_style_attr();
    }

    /// Whether the element carries any inline style declarations
    pub fn has_inline_style(&self) -> bool {
        !self.style.is_empty()
    }

    fn sync_class_attr(&mut self) {
        if self.classes.is_empty() {
            self.remove_attr("class");
        } else {
            let value = self.classes.join(" ");
            match self.attrs.iter_mut().find(|a| a.name == "class") {
                Some(attr) => attr.value = value,
                None => self.attrs.push(Attribute { name: "class".into(), value }),
            }
        }
    }

    fn sync_style_attr(&mut self) {
        if self.style.is_empty() {
            self.remove_attr("style");
        } else {
            let value = serialize_declarations(&self.style);
            match self.attrs.iter_mut().find(|a| a.name == "style") {
                Some(attr) => attr.value = value,
                None => self.attrs.push(Attribute { name: "style".into(), value }),
            }
        }
    }
}
