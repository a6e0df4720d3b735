// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! XML wire support.
//!
//! [`XmlElement`] is the document-tree form XML codecs produce and consume.
//! Parsing goes through roxmltree; serialization is string-built with
//! escaping.

use crate::core::{Result, UaError};

/// A single element in an XML document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// Element name
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    /// Text content, if any
    pub text: Option<String>,
    /// Child elements in document order
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Builder-style attribute insertion.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Builder-style text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a child element.
    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.as_str())
    }

    /// Find the first child with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Text content, defaulting to the empty string.
    pub fn text_content(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Serialize this element and its subtree to an XML string.
    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        self.write_into(&mut out);
        out
    }

    fn write_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }

        if self.text.is_none() && self.children.is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape_text(text));
        }
        for child in &self.children {
            child.write_into(out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }

    /// Parse an XML document into an element tree.
    ///
    /// # Errors
    ///
    /// Fails with a decoding error when the input is not well-formed XML.
    pub fn parse(xml: &str) -> Result<XmlElement> {
        let document = roxmltree::Document::parse(xml)
            .map_err(|e| UaError::decoding("xml", e.to_string()))?;
        Ok(Self::from_node(document.root_element()))
    }

    fn from_node(node: roxmltree::Node<'_, '_>) -> XmlElement {
        let mut element = XmlElement::new(node.tag_name().name());
        for attribute in node.attributes() {
            element
                .attributes
                .push((attribute.name().to_string(), attribute.value().to_string()));
        }
        for child in node.children() {
            if child.is_element() {
                element.children.push(Self::from_node(child));
            } else if child.is_text() {
                let text = child.text().unwrap_or("");
                if !text.trim().is_empty() {
                    element.text = Some(text.to_string());
                }
            }
        }
        element
    }
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_empty_element() {
        assert_eq!(XmlElement::new("Range").to_xml_string(), "<Range/>");
    }

    #[test]
    fn test_serialize_with_attributes_and_text() {
        let element = XmlElement::new("Low")
            .with_attribute("t", "Double")
            .with_text("1.5");
        assert_eq!(element.to_xml_string(), "<Low t=\"Double\">1.5</Low>");
    }

    #[test]
    fn test_serialize_nested() {
        let mut range = XmlElement::new("Range");
        range.push_child(XmlElement::new("Low").with_text("0"));
        range.push_child(XmlElement::new("High").with_text("10"));
        assert_eq!(
            range.to_xml_string(),
            "<Range><Low>0</Low><High>10</High></Range>"
        );
    }

    #[test]
    fn test_escaping() {
        let element = XmlElement::new("Name")
            .with_attribute("note", "a\"b")
            .with_text("x < y & z");
        assert_eq!(
            element.to_xml_string(),
            "<Name note=\"a&quot;b\">x &lt; y &amp; z</Name>"
        );
    }

    #[test]
    fn test_parse_round_trip() {
        let mut range = XmlElement::new("Range");
        range.push_child(
            XmlElement::new("Low").with_attribute("t", "Double").with_text("1.5"),
        );
        range.push_child(
            XmlElement::new("High").with_attribute("t", "Double").with_text("9"),
        );

        let parsed = XmlElement::parse(&range.to_xml_string()).unwrap();
        assert_eq!(parsed, range);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        let err = XmlElement::parse("<Range><Low></Range>").unwrap_err();
        assert!(matches!(err, UaError::Decoding { .. }));
    }

    #[test]
    fn test_child_and_attribute_lookup() {
        let xml = "<Range unit=\"m\"><Low>1</Low><High>2</High></Range>";
        let parsed = XmlElement::parse(xml).unwrap();
        assert_eq!(parsed.attribute("unit"), Some("m"));
        assert_eq!(parsed.child("High").map(XmlElement::text_content), Some("2"));
        assert_eq!(parsed.child("Missing"), None);
    }
}
