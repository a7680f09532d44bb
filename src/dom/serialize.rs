//! HTML serialization of snapshot subtrees.
//!
//! A finished snapshot is fully self-contained, so serializing it yields
//! markup that renders without any network access. This writes markup only;
//! it never persists anything itself.

use crate::dom::element::{DomNode, ElementNode};

/// Tags that never take children or a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Serialize a subtree to an HTML string
pub fn serialize_node(node: &DomNode) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &DomNode, out: &mut String) {
    match node {
        DomNode::Element(element) => write_element(element, out),
        DomNode::Text(text) => out.push_str(&escape_text(text)),
        DomNode::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
    }
}

fn write_element(element: &ElementNode, out: &mut String) {
    let tag = element.tag_name.to_ascii_lowercase();
    out.push('<');
    out.push_str(&tag);

    let emit_style = !element.style.is_empty();
    for (name, value) in &element.attributes {
        if emit_style && name == "style" {
            continue;
        }
        out.push(' ');
        out.push_str(name);
        if !value.is_empty() {
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }
    }
    if emit_style {
        out.push_str(" style=\"");
        out.push_str(&escape_attribute(&element.style.css_text()));
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&tag.as_str()) {
        return;
    }

    for child in &element.children {
        write_node(child, out);
    }

    out.push_str("</");
    out.push_str(&tag);
    out.push('>');
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;").replace('<', "&lt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::style::StyleMap;

    #[test]
    fn test_serialize_nested_elements() {
        let node = DomNode::element(ElementNode::new("div").with_attribute("id", "root").with_children(vec![
            DomNode::element(ElementNode::new("span").with_text("hi")),
        ]));
        assert_eq!(serialize_node(&node), "<div id=\"root\"><span>hi</span></div>");
    }

    #[test]
    fn test_serialize_void_element() {
        let node = DomNode::element(
            ElementNode::new("img").with_attribute("src", "data:image/png;base64,AAAA"),
        );
        assert_eq!(serialize_node(&node), "<img src=\"data:image/png;base64,AAAA\">");
    }

    #[test]
    fn test_serialize_boolean_attribute() {
        let node = DomNode::element(
            ElementNode::new("option").with_attribute("value", "b").with_attribute("selected", ""),
        );
        assert_eq!(serialize_node(&node), "<option value=\"b\" selected></option>");
    }

    #[test]
    fn test_serialize_escapes() {
        let node = DomNode::element(
            ElementNode::new("p").with_attribute("title", "a\"b<c").with_text("1 < 2 & 3"),
        );
        assert_eq!(
            serialize_node(&node),
            "<p title=\"a&quot;b&lt;c\">1 &lt; 2 &amp; 3</p>"
        );
    }

    #[test]
    fn test_serialize_style_attribute() {
        let node = DomNode::element(
            ElementNode::new("div").with_style(StyleMap::parse("color: red; width: 0")),
        );
        assert_eq!(serialize_node(&node), "<div style=\"color: red; width: 0;\"></div>");
    }

    #[test]
    fn test_serialize_comment() {
        let node = DomNode::Comment("note".to_string());
        assert_eq!(serialize_node(&node), "<!--note-->");
    }
}
