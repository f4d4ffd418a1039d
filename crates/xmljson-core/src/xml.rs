//! XML parse stage — raw bytes to an owned [`XmlElement`] tree.
//!
//! Parsing is delegated to `roxmltree`. The resulting document is walked once
//! and copied into the crate's own tree type so the normalizer never depends on
//! the parser. Element and attribute names are kept exactly as written in the
//! source, prefix included, and namespace declarations made on an element are
//! reported among its attributes. Namespaces are never resolved.

use crate::types::{XmlElement, XmlNode};
use thiserror::Error;

/// Options controlling the parse stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept documents that carry a `<!DOCTYPE …>` declaration.
    pub allow_dtd: bool,
    /// Deepest element nesting accepted; the root element is level 1.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            allow_dtd: true,
            max_depth: 1024,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The text is not a well-formed XML document.
    #[error("{0}")]
    Malformed(String),
    #[error("XML nesting exceeds {0} levels")]
    TooDeep(usize),
}

/// Decode raw file bytes into text: UTF-8, lossy, leading BOM removed.
pub fn decode(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{feff}').unwrap_or(&*text).to_string()
}

/// Parse a complete XML document and return its root element.
pub fn parse_document(text: &str, options: ParseOptions) -> Result<XmlElement, ParseError> {
    let parsing = roxmltree::ParsingOptions {
        allow_dtd: options.allow_dtd,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(text, parsing)
        .map_err(|e| ParseError::Malformed(e.to_string()))?;
    convert_element(doc.root_element(), 1, options.max_depth)
}

fn convert_element(
    node: roxmltree::Node<'_, '_>,
    depth: usize,
    max_depth: usize,
) -> Result<XmlElement, ParseError> {
    if depth > max_depth {
        return Err(ParseError::TooDeep(max_depth));
    }

    let text = node.document().input_text();
    let mut element = XmlElement::new(element_qname(text, node.range().start));
    element.attributes = collect_attributes(node, text);

    for child in node.children() {
        let converted = match child.node_type() {
            roxmltree::NodeType::Element => {
                XmlNode::Element(convert_element(child, depth + 1, max_depth)?)
            }
            roxmltree::NodeType::Text => XmlNode::Text(child.text().unwrap_or_default().to_string()),
            roxmltree::NodeType::Comment => {
                XmlNode::Comment(child.text().unwrap_or_default().to_string())
            }
            roxmltree::NodeType::PI => match child.pi() {
                Some(pi) => XmlNode::ProcessingInstruction {
                    target: pi.target.to_string(),
                    value: pi.value.map(str::to_string),
                },
                None => continue,
            },
            roxmltree::NodeType::Root => continue,
        };
        element.children.push(converted);
    }

    Ok(element)
}

/// The element name as written, read from the start tag at `start`.
fn element_qname(text: &str, start: usize) -> String {
    let name = &text[start + 1..];
    let end = name
        .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
        .unwrap_or(name.len());
    name[..end].to_string()
}

/// Attributes and namespace declarations of `node`, in document order.
fn collect_attributes(node: roxmltree::Node<'_, '_>, text: &str) -> Vec<(String, String)> {
    let mut attributes: Vec<(usize, String, String)> = node
        .attributes()
        .map(|attr| {
            let qname = attr.range_qname();
            (qname.start, text[qname].to_string(), attr.value().to_string())
        })
        .collect();

    for (pos, qname) in start_tag_qnames(text, node.range().start) {
        let prefix = match qname.strip_prefix("xmlns") {
            Some("") => None,
            Some(rest) => match rest.strip_prefix(':') {
                Some(prefix) => Some(prefix),
                None => continue,
            },
            None => continue,
        };
        // Declarations made on this element come first in its in-scope set.
        if let Some(ns) = node.namespaces().find(|ns| ns.name() == prefix) {
            attributes.push((pos, qname.to_string(), ns.uri().to_string()));
        }
    }

    attributes.sort_by_key(|(pos, ..)| *pos);
    attributes
        .into_iter()
        .map(|(_, name, value)| (name, value))
        .collect()
}

/// Byte offset and name of every attribute in the start tag at `start`.
/// Only called on documents the parser has already accepted.
fn start_tag_qnames(text: &str, start: usize) -> Vec<(usize, &str)> {
    let bytes = text.as_bytes();
    let mut i = start + 1;
    while i < bytes.len() && !(bytes[i].is_ascii_whitespace() || matches!(bytes[i], b'/' | b'>')) {
        i += 1;
    }

    let mut names = Vec::new();
    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || matches!(bytes[i], b'/' | b'>') {
            break;
        }
        let name_start = i;
        while i < bytes.len() && !(bytes[i] == b'=' || bytes[i].is_ascii_whitespace()) {
            i += 1;
        }
        names.push((name_start, &text[name_start..i]));

        while i < bytes.len() && !matches!(bytes[i], b'"' | b'\'') {
            i += 1;
        }
        let Some(&quote) = bytes.get(i) else { break };
        i += 1;
        while i < bytes.len() && bytes[i] != quote {
            i += 1;
        }
        i += 1;
    }
    names
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
