use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;
use crate::types::Display;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// Tag used for text nodes.
pub const TEXT_TAG: &str = "#text";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    // Identity
    pub id: String,
    /// True when `id` was generated rather than given by the author.
    /// Generated ids are not written back out as markup.
    pub anonymous: bool,
    pub tag: String,

    // Selectors
    pub classes: Vec<String>,
    /// Attributes other than `id` and `class`, in source order. An element
    /// whose authored id was renewed keeps it here as `id`.
    pub attributes: Vec<(String, String)>,

    // Visual
    pub display: Display,

    // Content
    pub content: Content,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            anonymous: true,
            tag: "div".to_string(),
            classes: Vec::new(),
            attributes: Vec::new(),
            display: Display::Default,
            content: Content::None,
        }
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into().to_ascii_lowercase();
        Self {
            id: generate_id(&tag),
            tag,
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn a() -> Self {
        Self::new("a")
    }

    pub fn input() -> Self {
        Self::new("input")
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("text"),
            tag: TEXT_TAG.to_string(),
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    pub fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self.anonymous = false;
        self
    }

    /// Replace the id with a fresh generated one. An authored id is kept as
    /// an `id` attribute so it is still written out as markup.
    pub fn renew_id(&mut self) {
        if !self.anonymous {
            let authored = std::mem::take(&mut self.id);
            self.set_attr("id", authored);
        }
        let prefix = if self.is_text() { "text" } else { self.tag.as_str() };
        self.id = generate_id(prefix);
        self.anonymous = true;
    }

    // Selectors
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    /// Attribute names compare ASCII case-insensitively, as in HTML.
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing the value in place if it already exists.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self
            .attributes
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&key))
        {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn remove_attr(&mut self, key: &str) -> Option<String> {
        let pos = self
            .attributes
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(key))?;
        Some(self.attributes.remove(pos).1)
    }

    // Visual
    pub fn display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }

    pub fn hidden(self) -> Self {
        self.display(Display::None)
    }

    pub fn is_hidden(&self) -> bool {
        self.display == Display::None
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        for child in new_children {
            self.push_child(child);
        }
        self
    }

    /// Append a child, converting text content into a text node first.
    pub fn push_child(&mut self, child: Element) {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            Content::None => self.content = Content::Children(vec![child]),
            Content::Text(text) => {
                let text = Element::text(std::mem::take(text));
                self.content = Content::Children(vec![text, child]);
            }
        }
    }

    pub fn child_elements(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    pub fn child_elements_mut(&mut self) -> Option<&mut Vec<Element>> {
        match &mut self.content {
            Content::Children(children) => Some(children),
            _ => None,
        }
    }

    /// Concatenated text of this element and all of its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Duplicate this subtree. Every element in the copy gets a fresh,
    /// generated id so the copy can live in the same document.
    pub fn deep_clone(&self) -> Element {
        let content = match &self.content {
            Content::Children(children) => {
                Content::Children(children.iter().map(Element::deep_clone).collect())
            }
            other => other.clone(),
        };
        let prefix = if self.is_text() { "text" } else { self.tag.as_str() };
        Element {
            id: generate_id(prefix),
            anonymous: true,
            tag: self.tag.clone(),
            classes: self.classes.clone(),
            attributes: self.attributes.clone(),
            display: self.display,
            content,
        }
    }
}

fn collect_text(element: &Element, out: &mut String) {
    match &element.content {
        Content::Text(text) => out.push_str(text),
        Content::Children(children) => {
            for child in children {
                collect_text(child, out);
            }
        }
        Content::None => {}
    }
}
