use super::is_void;
use crate::element::{Content, Element};

/// Escapes a string for use in a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Escapes a string for use as text content.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Serialize an element and its subtree. Generated ids are omitted and
/// hidden elements are written with the `hidden` attribute.
pub fn to_markup(element: &Element) -> String {
    let mut out = String::new();
    write_element(element, &mut out);
    out
}

fn write_element(element: &Element, out: &mut String) {
    if element.is_text() {
        if let Content::Text(text) = &element.content {
            out.push_str(&escape_text(text));
        }
        return;
    }

    out.push('<');
    out.push_str(&element.tag);
    if !element.anonymous {
        out.push_str(&format!(r#" id="{}""#, escape_attr(&element.id)));
    }
    if !element.classes.is_empty() {
        out.push_str(&format!(r#" class="{}""#, escape_attr(&element.classes.join(" "))));
    }
    for (key, value) in &element.attributes {
        out.push_str(&format!(r#" {}="{}""#, key, escape_attr(value)));
    }
    if element.is_hidden() {
        out.push_str(" hidden");
    }
    out.push('>');

    if is_void(&element.tag) {
        return;
    }

    match &element.content {
        Content::None => {}
        Content::Text(text) => out.push_str(&escape_text(text)),
        Content::Children(children) => {
            for child in children {
                write_element(child, out);
            }
        }
    }

    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_fragment;

    #[test]
    fn test_write_element_tree() {
        let el = Element::div()
            .id("wrap")
            .class("row")
            .attr("data-x", "a\"b")
            .child(Element::input().attr("name", "f[0]"))
            .child(Element::text("1 < 2"));

        assert_eq!(
            to_markup(&el),
            r#"<div id="wrap" class="row" data-x="a&quot;b"><input name="f[0]">1 &lt; 2</div>"#
        );
    }

    #[test]
    fn test_hidden_written_as_attribute() {
        let el = Element::a().class("remove").hidden().child(Element::text("x"));
        assert_eq!(to_markup(&el), r#"<a class="remove" hidden>x</a>"#);
    }

    #[test]
    fn test_reparse_written_markup() {
        let source = r#"<ul id="list"><li class="item" data-index="0">one</li></ul>"#;
        let nodes = parse_fragment(source).unwrap();
        assert_eq!(to_markup(&nodes[0]), source);
    }
}
