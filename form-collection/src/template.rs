//! Item templates: placeholder substitution and materialization.

use formdom::{parse_fragment, Element};
use log::warn;
use regex::{NoExpand, Regex, RegexBuilder};

use crate::error::CollectionError;

/// Token name used when the items host does not declare one.
pub const DEFAULT_TEMPLATE_NAME: &str = "name";

/// Markup for one new item, with a `__<name>__` placeholder token.
#[derive(Debug, Clone)]
pub struct ItemTemplate {
    markup: String,
    name: String,
    token: Regex,
}

impl ItemTemplate {
    pub fn new(markup: impl Into<String>, name: impl Into<String>) -> Result<Self, CollectionError> {
        let name = name.into();
        let pattern = format!("__{}__", regex::escape(&name));
        let token = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| CollectionError::InvalidToken {
                token: pattern.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            markup: markup.into(),
            name,
            token,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Replace every occurrence of the token, ignoring case.
    pub fn instantiate(&self, value: usize) -> String {
        let value = value.to_string();
        self.token
            .replace_all(&self.markup, NoExpand(value.as_str()))
            .into_owned()
    }

    /// Instantiate and parse into a single element. A template with several
    /// top-level elements is wrapped in a `div`.
    pub fn materialize(&self, value: usize) -> Result<Element, CollectionError> {
        let mut nodes: Vec<Element> = parse_fragment(&self.instantiate(value))?
            .into_iter()
            .filter(|node| !node.is_text())
            .collect();

        match nodes.len() {
            0 => Err(CollectionError::EmptyTemplate),
            1 => Ok(nodes.remove(0)),
            n => {
                warn!("[collection] Template has {n} top-level elements, wrapping them");
                Ok(Element::div().children(nodes))
            }
        }
    }
}
