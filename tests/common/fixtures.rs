//! Static XML documents used across harnesses.

use std::path::{Path, PathBuf};

pub const CATALOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<catalog version="2">
  <book id="bk101">
    <title>XML Developer's Guide</title>
    <price currency="USD">44.95</price>
  </book>
  <book id="bk102">
    <title>Midnight Rain</title>
    <price currency="EUR">5.95</price>
  </book>
  <publisher>Northwind</publisher>
</catalog>
"#;

pub const RSS: &str = r#"<rss version="2.0">
  <channel>
    <title>Feed</title>
    <item><title>one</title></item>
    <item><title>two</title></item>
    <item><title>three</title></item>
  </channel>
</rss>"#;

pub const NAMESPACED: &str = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <m:GetPrice xmlns:m="https://example.org/prices">
      <m:Item>Apples</m:Item>
    </m:GetPrice>
  </soap:Body>
</soap:Envelope>"#;

pub const MIXED_CONTENT: &str = "<p>Hello <b>bold</b> world<!-- note --></p>";

pub const CDATA: &str = "<script><![CDATA[if (a < b) { go(); }]]></script>";

/// Documents that are not well-formed.
pub const MALFORMED: &[&str] = &[
    "",
    "<a>",
    "<a></b>",
    "<a><b></a></b>",
    "just text",
    "<a/><b/>",
    "<a x=\"1\" x=\"2\"/>",
];

/// `depth` nested `<n>` elements.
pub fn nested(depth: usize) -> String {
    format!("{}{}", "<n>".repeat(depth), "</n>".repeat(depth))
}

/// Write `body` to `dir/name` and return the path.
pub fn write_fixture(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("write fixture");
    path
}
