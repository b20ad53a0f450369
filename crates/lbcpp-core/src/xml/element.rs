// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Owned XML element tree.
//!
//! Parsing goes through `roxmltree`; writing is done here with explicit
//! escaping of text and attribute values.

use crate::error::Result;
use roxmltree::Document;

/// XML element with attributes, text content and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    tag: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create an empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Element tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set (or replace) an attribute.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Text content.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Set text content.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// Append a child element.
    pub fn add_child(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// First child with the given tag.
    pub fn find_child(&self, tag: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.tag == tag)
    }

    // ========================================================================
    // Parsing
    // ========================================================================

    /// Parse an XML document and return its root element.
    pub fn parse(text: &str) -> Result<Self> {
        let doc = Document::parse(text)?;
        Ok(Self::from_node(doc.root_element()))
    }

    /// Copy a `roxmltree` element (and its subtree).
    ///
    /// Text directly under the element is concatenated. Whitespace-only text
    /// of an element that has child elements is dropped as indentation.
    pub fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let mut element = Self::new(node.tag_name().name());
        for attribute in node.attributes() {
            element
                .attributes
                .push((attribute.name().to_string(), attribute.value().to_string()));
        }

        let mut text = String::new();
        for child in node.children() {
            if child.is_element() {
                element.children.push(Self::from_node(child));
            } else if child.is_text() {
                text.push_str(child.text().unwrap_or_default());
            }
        }
        let indentation_only = !element.children.is_empty() && text.trim().is_empty();
        if !text.is_empty() && !indentation_only {
            element.text = Some(text);
        }
        element
    }

    // ========================================================================
    // Writing
    // ========================================================================

    /// Serialize this element; `indent` spaces per level, 0 for one line.
    pub fn to_xml_string(&self, indent: usize) -> String {
        let mut out = String::new();
        self.write_into(&mut out, indent, 0);
        out
    }

    fn write_into(&self, out: &mut String, indent: usize, depth: usize) {
        let pad = " ".repeat(indent * depth);
        out.push_str(&pad);
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }

        let text = self.text.as_deref().filter(|t| !t.is_empty());
        if text.is_none() && self.children.is_empty() {
            out.push_str("/>");
        } else {
            out.push('>');
            if let Some(text) = text {
                out.push_str(&escape_text(text));
            }
            if !self.children.is_empty() {
                if indent > 0 {
                    out.push('\n');
                }
                for child in &self.children {
                    child.write_into(out, indent, depth + 1);
                }
                out.push_str(&pad);
            }
            out.push_str("</");
            out.push_str(&self.tag);
            out.push('>');
        }
        if indent > 0 {
            out.push('\n');
        }
    }
}

/// True iff XML 1.0 can carry `c`, raw or as a character reference.
pub fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Escape character data.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value (double-quoted).
///
/// Line breaks and tabs are written as character references so attribute
/// value normalization does not turn them into spaces.
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
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

    #[test]
    fn test_parse_structure() {
        let xml = r#"<root a="1" b="two">
            <child>text</child>
            <child/>
        </root>"#;
        let root = XmlElement::parse(xml).expect("parse");
        assert_eq!(root.tag(), "root");
        assert_eq!(root.attribute("b"), Some("two"));
        assert_eq!(root.text(), None);
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[0].text(), Some("text"));
        assert_eq!(root.children()[1].text(), None);
    }

    #[test]
    fn test_leaf_text_kept_verbatim() {
        let root = XmlElement::parse("<v>  padded  </v>").expect("parse");
        assert_eq!(root.text(), Some("  padded  "));
    }

    #[test]
    fn test_escaping_survives_reparse() {
        let mut e = XmlElement::new("v");
        e.set_attribute("name", "a \"quoted\" <name>\n\tnext");
        e.set_text("x < y && y > z\r\n");
        let parsed = XmlElement::parse(&e.to_xml_string(0)).expect("parse");
        assert_eq!(parsed, e);
    }

    #[test]
    fn test_pretty_print() {
        let mut root = XmlElement::new("root");
        let mut child = XmlElement::new("child");
        child.set_text("1");
        root.add_child(child);
        root.add_child(XmlElement::new("empty"));
        assert_eq!(
            root.to_xml_string(2),
            "<root>\n  <child>1</child>\n  <empty/>\n</root>\n"
        );
        assert_eq!(
            root.to_xml_string(0),
            "<root><child>1</child><empty/></root>"
        );
    }

    #[test]
    fn test_set_attribute_replaces() {
        let mut e = XmlElement::new("v");
        e.set_attribute("k", "1");
        e.set_attribute("k", "2");
        assert_eq!(e.attributes().len(), 1);
        assert_eq!(e.attribute("k"), Some("2"));
    }

    #[test]
    fn test_xml_char_ranges() {
        for c in ['a', '\t', '\n', '\r', '\u{e9}', '\u{FFFD}', '\u{1F600}'] {
            assert!(is_xml_char(c), "{:?}", c);
        }
        for c in ['\u{0}', '\u{1}', '\u{8}', '\u{1F}', '\u{FFFE}', '\u{FFFF}'] {
            assert!(!is_xml_char(c), "{:?}", c);
        }
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            XmlElement::parse("<open>"),
            Err(crate::Error::Xml(_))
        ));
    }
}
