use log::trace;

use super::{decode_entities, is_void};
use crate::element::Element;
use crate::error::MarkupError;
use crate::types::Display;

/// Parse a markup fragment into its top-level nodes.
///
/// Whitespace-only text between elements is dropped. Comments are skipped.
/// `id` and `class` attributes populate the element's own fields, while
/// `hidden` and a `display: none` style declaration set [`Display::None`].
pub fn parse_fragment(input: &str) -> Result<Vec<Element>, MarkupError> {
    let mut parser = Parser { src: input, pos: 0 };
    let nodes = parser.parse_nodes(None)?;
    trace!("[markup] Parsed {} top-level nodes", nodes.len());
    Ok(nodes)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn eat(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, f: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c: char| !f(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn eof(&self, expected: impl Into<String>) -> MarkupError {
        MarkupError::UnexpectedEof {
            offset: self.pos,
            expected: expected.into(),
        }
    }

    /// Parse nodes until the end of input, or until the closing tag of
    /// `open` when parsing an element's content.
    fn parse_nodes(&mut self, open: Option<&str>) -> Result<Vec<Element>, MarkupError> {
        let mut nodes = Vec::new();

        loop {
            if self.rest().is_empty() {
                return match open {
                    Some(tag) => Err(self.eof(format!("</{tag}>"))),
                    None => Ok(nodes),
                };
            }

            if self.rest().starts_with("<!--") {
                let start = self.pos;
                match self.rest()[4..].find("-->") {
                    Some(end) => self.pos += 4 + end + 3,
                    None => return Err(MarkupError::UnterminatedComment { offset: start }),
                }
            } else if self.rest().starts_with("</") {
                let start = self.pos;
                self.pos += 2;
                let tag = self.parse_name().to_ascii_lowercase();
                self.skip_whitespace();
                if !self.eat(">") {
                    return Err(self.eof(">"));
                }
                return match open {
                    Some(open) if open == tag => Ok(nodes),
                    _ => Err(MarkupError::UnexpectedClosingTag { tag, offset: start }),
                };
            } else if self.at_tag_start() {
                nodes.push(self.parse_element()?);
            } else {
                let text = self.parse_text();
                if !text.trim().is_empty() {
                    nodes.push(Element::text(decode_entities(text)));
                }
            }
        }
    }

    fn at_tag_start(&self) -> bool {
        let mut chars = self.rest().chars();
        chars.next() == Some('<') && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
    }

    fn parse_text(&mut self) -> &'a str {
        let start = self.pos;
        // A '<' that does not open a tag or comment is literal text.
        self.pos += self.peek().map_or(0, char::len_utf8);
        self.take_while(|c| c != '<');
        &self.src[start..self.pos]
    }

    fn parse_name(&mut self) -> &'a str {
        self.take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
    }

    fn parse_element(&mut self) -> Result<Element, MarkupError> {
        let start = self.pos;
        self.pos += 1;
        let tag = self.parse_name().to_ascii_lowercase();
        if tag.is_empty() {
            return Err(MarkupError::InvalidTagName { offset: start });
        }

        let mut element = Element::new(tag.as_str());
        let self_closing = loop {
            self.skip_whitespace();
            if self.eat("/>") {
                break true;
            }
            if self.eat(">") {
                break false;
            }
            if self.rest().is_empty() {
                return Err(self.eof(format!("end of <{tag}> tag")));
            }

            let name = self.take_while(|c| {
                !c.is_whitespace() && !matches!(c, '=' | '>' | '/' | '"' | '\'')
            });
            if name.is_empty() {
                // Stray '/' or quote inside a tag.
                self.pos += self.peek().map_or(0, char::len_utf8);
                continue;
            }
            let name = name.to_ascii_lowercase();

            self.skip_whitespace();
            let value = if self.eat("=") {
                self.skip_whitespace();
                Some(self.parse_attr_value()?)
            } else {
                None
            };
            apply_attribute(&mut element, &name, value);
        };

        if !self_closing && !is_void(&tag) {
            let children = self.parse_nodes(Some(tag.as_str()))?;
            element = element.children(children);
        }

        Ok(element)
    }

    fn parse_attr_value(&mut self) -> Result<String, MarkupError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let value = self.take_while(|c| c != quote);
                if !self.eat(&quote.to_string()) {
                    return Err(self.eof(format!("closing {quote}")));
                }
                Ok(decode_entities(value))
            }
            Some(_) => {
                let value = self.take_while(|c| !c.is_whitespace() && c != '>');
                Ok(decode_entities(value))
            }
            None => Err(self.eof("attribute value")),
        }
    }
}

fn apply_attribute(element: &mut Element, name: &str, value: Option<String>) {
    match name {
        "id" => {
            element.id = value.unwrap_or_default();
            element.anonymous = false;
        }
        "class" => {
            for class in value.unwrap_or_default().split_whitespace() {
                element.add_class(class);
            }
        }
        "hidden" => element.display = Display::None,
        "style" => {
            let mut kept = Vec::new();
            for declaration in value.unwrap_or_default().split(';') {
                let Some((key, val)) = declaration.split_once(':') else {
                    continue;
                };
                if key.trim().eq_ignore_ascii_case("display") {
                    element.display = if val.trim().eq_ignore_ascii_case("none") {
                        Display::None
                    } else {
                        Display::Default
                    };
                } else {
                    kept.push(format!("{}: {}", key.trim(), val.trim()));
                }
            }
            if !kept.is_empty() {
                element.set_attr("style", kept.join("; "));
            }
        }
        _ => element.set_attr(name, value.unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Content;

    #[test]
    fn test_nested_elements() {
        let nodes = parse_fragment(r#"<div class="a b"><span>hi</span></div>"#).unwrap();
        assert_eq!(nodes.len(), 1);
        let div = &nodes[0];
        assert_eq!(div.tag, "div");
        assert!(div.has_class("a"));
        assert!(div.has_class("b"));
        assert_eq!(div.child_elements()[0].tag, "span");
        assert_eq!(div.text_content(), "hi");
    }

    #[test]
    fn test_void_and_self_closing() {
        let nodes = parse_fragment(r#"<input name="x"><br/><p />"#).unwrap();
        let tags: Vec<_> = nodes.iter().map(|n| n.tag.as_str()).collect();
        assert_eq!(tags, vec!["input", "br", "p"]);
        assert_eq!(nodes[0].get_attr("name"), Some("x"));
        assert_eq!(nodes[2].content, Content::None);
    }

    #[test]
    fn test_attribute_forms() {
        let nodes = parse_fragment(r#"<input type=text required value='a &amp; b'>"#).unwrap();
        let input = &nodes[0];
        assert_eq!(input.get_attr("type"), Some("text"));
        assert_eq!(input.get_attr("required"), Some(""));
        assert_eq!(input.get_attr("value"), Some("a & b"));
    }

    #[test]
    fn test_display_none_from_style() {
        let nodes =
            parse_fragment(r#"<a style="color: red; display:none">x</a><b hidden>y</b>"#).unwrap();
        assert!(nodes[0].is_hidden());
        assert_eq!(nodes[0].get_attr("style"), Some("color: red"));
        assert!(nodes[1].is_hidden());
        assert_eq!(nodes[1].get_attr("hidden"), None);
    }

    #[test]
    fn test_comments_and_whitespace_skipped() {
        let nodes = parse_fragment("  <!-- note -->\n  <div></div>\n").unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].tag, "div");
    }

    #[test]
    fn test_literal_less_than_in_text() {
        let nodes = parse_fragment("<p>1 < 2</p>").unwrap();
        assert_eq!(nodes[0].text_content(), "1 < 2");
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            parse_fragment("<div><span></div>"),
            Err(MarkupError::UnexpectedClosingTag { .. })
        ));
        assert!(matches!(
            parse_fragment("<div>"),
            Err(MarkupError::UnexpectedEof { .. })
        ));
        assert!(matches!(
            parse_fragment("<!-- open"),
            Err(MarkupError::UnterminatedComment { offset: 0 })
        ));
        assert!(matches!(
            parse_fragment(r#"<a href="x>"#),
            Err(MarkupError::UnexpectedEof { .. })
        ));
    }
}
