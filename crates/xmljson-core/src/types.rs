//! Core types for xmljson-core.
//!
//! This module defines the data structures shared across the pipeline: the
//! parsed [`XmlElement`] tree the normalizer consumes, and the per-file
//! [`ConversionResult`] the batch converter produces.

use serde::Serialize;

/// A parsed XML element.
///
/// Produced by [`crate::xml::parse_document`]; consumed by
/// [`crate::normalizer::normalize`]. Names are qualified (`prefix:local`)
/// exactly as they appear in the source document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    /// Tag name.
    pub name: String,
    /// Attributes in document order. Well-formed XML never repeats a name.
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<XmlNode>,
}

/// One child of an [`XmlElement`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    /// Character data, CDATA sections included, untrimmed.
    Text(String),
    Comment(String),
    ProcessingInstruction {
        target: String,
        value: Option<String>,
    },
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    pub fn with_node(mut self, node: XmlNode) -> Self {
        self.children.push(node);
        self
    }

    /// Iterate over element children only.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }
}

/// Outcome of converting one file: exactly one of a payload or an error.
///
/// Serialises as a single `content` or `error` key so that, flattened into
/// [`ConversionResult`], a result reads `{"fileName": …, "content": …}` or
/// `{"fileName": …, "error": …}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Content(serde_json::Value),
    Error(String),
}

/// Per-file conversion result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub file_name: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl ConversionResult {
    pub fn content(file_name: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            file_name: file_name.into(),
            outcome: Outcome::Content(value),
        }
    }

    pub fn error(file_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            outcome: Outcome::Error(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error(_))
    }

    pub fn content_value(&self) -> Option<&serde_json::Value> {
        match &self.outcome {
            Outcome::Content(v) => Some(v),
            Outcome::Error(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Content(_) => None,
            Outcome::Error(msg) => Some(msg),
        }
    }
}

/// One [`ConversionResult`] per input file, in input order.
pub type BatchResult = Vec<ConversionResult>;
