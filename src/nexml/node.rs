//! Generic structured document nodes.
//!
//! Provides [ElementNode], the tag/attributes/children tree the
//! [Writer](crate::nexml::Writer) produces and the
//! [Reader](crate::nexml::Reader) consumes. The host application's XML
//! layer maps its parsed elements to and from this form; this crate never
//! tokenizes XML itself.
//!
//! Document equality is order-independent at every level, captured by
//! [`ElementNode::structurally_eq`]: same tag, same attribute multiset,
//! same text, same multiset of structurally equal children. The writer's
//! own output order is nevertheless deterministic for testability.

// =#========================================================================#=
// ELEMENT NODE
// =#========================================================================#=
/// A generic document node: tag name, ordered attributes, ordered children,
/// and optional text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<ElementNode>,
    text: Option<String>,
}

impl ElementNode {
    /// Creates an empty node with the given tag name.
    pub fn new(tag: &str) -> ElementNode {
        ElementNode {
            tag: tag.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Appends an attribute, returning the node for chaining.
    pub fn with_attribute(mut self, name: &str, value: &str) -> ElementNode {
        self.add_attribute(name, value);
        self
    }

    /// Sets the text content, returning the node for chaining.
    pub fn with_text(mut self, text: &str) -> ElementNode {
        self.text = Some(text.to_string());
        self
    }

    /// Appends a child, returning the node for chaining.
    pub fn with_child(mut self, child: ElementNode) -> ElementNode {
        self.add_child(child);
        self
    }

    /// Appends an attribute.
    pub fn add_attribute(&mut self, name: &str, value: &str) {
        self.attributes.push((name.to_string(), value.to_string()));
    }

    /// Appends a child node.
    pub fn add_child(&mut self, child: ElementNode) {
        self.children.push(child);
    }

    /// Returns the tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the attributes in emission order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Returns the value of the first attribute with the given name,
    /// or [None].
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the child nodes in emission order.
    pub fn children(&self) -> &[ElementNode] {
        &self.children
    }

    /// Returns the text content, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Compares two nodes for structural equality:
    /// * same tag name,
    /// * same text content,
    /// * same attributes, irrespective of order,
    /// * same children (as a multiset of structurally equal nodes),
    ///   irrespective of order, recursively.
    pub fn structurally_eq(&self, other: &ElementNode) -> bool {
        if self.tag != other.tag || self.text != other.text {
            return false;
        }

        if self.attributes.len() != other.attributes.len() {
            return false;
        }
        let mut matched = vec![false; other.attributes.len()];
        for attribute in &self.attributes {
            let found = other
                .attributes
                .iter()
                .enumerate()
                .find(|(i, candidate)| !matched[*i] && *candidate == attribute);
            match found {
                Some((i, _)) => matched[i] = true,
                None => return false,
            }
        }

        if self.children.len() != other.children.len() {
            return false;
        }
        let mut matched = vec![false; other.children.len()];
        for child in &self.children {
            let found = other
                .children
                .iter()
                .enumerate()
                .find(|(i, candidate)| !matched[*i] && child.structurally_eq(candidate));
            match found {
                Some((i, _)) => matched[i] = true,
                None => return false,
            }
        }

        true
    }
}
