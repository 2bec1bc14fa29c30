//! Owned SVG/XML node tree and its serializer
//!
//! Parsed documents are borrowed views over their source text, so frame content
//! is copied into this tree before it is re-parented into a sprite group.

use crate::Result;
use std::io::Write;

/// Default SVG namespace URI
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// XLink namespace URI, commonly used for `xlink:href`
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// A single node of the document tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

impl Node {
    /// Returns the element if this node is one
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Whether this node is text made only of whitespace
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text(text) if text.trim().is_empty())
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        match self {
            Node::Element(element) => element.write_to(writer)?,
            Node::Text(text) => writer.write_all(escape_text(text).as_bytes())?,
            Node::Comment(text) => write!(writer, "<!--{}-->", text)?,
        }
        Ok(())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An element with a qualified name, ordered attributes and ordered children
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Qualified tag name (`g`, `path`, `sodipodi:namedview`, ...)
    pub name: String,
    /// Attributes in document order, keyed by qualified name
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Sets an attribute, replacing an existing one of the same name in place
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Looks up an attribute value by qualified name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Appends a child node, taking ownership of it
    pub fn append(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Iterates over the child elements, skipping text and comments
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Serializes this element and its subtree without any added whitespace
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        if self.children.is_empty() {
            self.write_tag(writer, true)?;
            return Ok(());
        }

        self.write_open(writer)?;
        for child in &self.children {
            child.write_to(writer)?;
        }
        self.write_close(writer)
    }

    /// Writes the start tag only; pair with [`Element::write_close`]
    pub fn write_open<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.write_tag(writer, false)
    }

    /// Writes the end tag
    pub fn write_close<W: Write>(&self, writer: &mut W) -> Result<()> {
        write!(writer, "</{}>", self.name)?;
        Ok(())
    }

    fn write_tag<W: Write>(&self, writer: &mut W, self_closing: bool) -> Result<()> {
        write!(writer, "<{}", self.name)?;
        for (name, value) in &self.attributes {
            write!(writer, " {}=\"{}\"", name, escape_attribute(value))?;
        }
        let end = if self_closing { " />" } else { ">" };
        writer.write_all(end.as_bytes())?;
        Ok(())
    }
}

/// XML declaration written at the top of every document
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            // Literal whitespace would be normalized to spaces on re-parse
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(element: &Element) -> String {
        let mut buffer = Vec::new();
        element.write_to(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_set_attribute_replaces_in_place() {
        let mut element = Element::new("g")
            .with_attribute("id", "a")
            .with_attribute("display", "none");
        element.set_attribute("id", "b");

        assert_eq!(
            element.attributes,
            vec![
                ("id".to_string(), "b".to_string()),
                ("display".to_string(), "none".to_string()),
            ]
        );
        assert_eq!(element.attribute("display"), Some("none"));
        assert_eq!(element.attribute("missing"), None);
    }

    #[test]
    fn test_empty_element_self_closes() {
        let element = Element::new("path").with_attribute("d", "M0 0L1 1");
        assert_eq!(render(&element), r#"<path d="M0 0L1 1" />"#);
    }

    #[test]
    fn test_nested_children_keep_order() {
        let mut group = Element::new("g");
        group.append(Element::new("rect"));
        group.append(Node::Text("label".to_string()));
        group.append(Node::Comment(" note ".to_string()));
        group.append(Element::new("circle"));

        assert_eq!(
            render(&group),
            "<g><rect />label<!-- note --><circle /></g>"
        );
        let names: Vec<_> = group.child_elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["rect", "circle"]);
    }

    #[test]
    fn test_escaping() {
        let mut text = Element::new("text").with_attribute("data-x", "a \"b\" & <c>\nd");
        text.append(Node::Text("1 < 2 & 3 > 2".to_string()));

        assert_eq!(
            render(&text),
            "<text data-x=\"a &quot;b&quot; &amp; &lt;c&gt;&#10;d\">1 &lt; 2 &amp; 3 &gt; 2</text>"
        );
    }

    #[test]
    fn test_open_and_close_tags() {
        let root = Element::new("svg")
            .with_attribute("xmlns", SVG_NAMESPACE)
            .with_attribute("viewBox", "0 0 1 1");
        let mut buffer = Vec::new();
        root.write_open(&mut buffer).unwrap();
        Element::new("g").write_to(&mut buffer).unwrap();
        root.write_close(&mut buffer).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 1 1\"><g /></svg>"
        );
    }

    #[test]
    fn test_blank_text_detection() {
        assert!(Node::Text("\n    ".to_string()).is_blank_text());
        assert!(!Node::Text(" x ".to_string()).is_blank_text());
        assert!(!Node::Element(Element::new("g")).is_blank_text());
    }
}
