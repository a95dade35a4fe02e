//! Widget configuration and lifecycle callbacks.

use std::sync::Arc;

use formdom::Document;

use crate::conventions::Conventions;

/// Passed to the `added` callback once the new item is in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedEvent {
    /// The items host the item was appended to.
    pub host: String,
    /// The new item.
    pub item: String,
    pub container: String,
}

/// Passed to the `loaded` callback at the end of initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedEvent {
    /// Number of items found.
    pub count: usize,
    /// The items found, in document order.
    pub items: Vec<String>,
}

/// Passed to the `removed` callback while the item is still in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedEvent {
    /// The remove trigger that was clicked.
    pub trigger: String,
    /// The item about to be removed.
    pub item: String,
}

pub type AddedCallback = Arc<dyn Fn(&mut Document, &AddedEvent) + Send + Sync>;
pub type LoadedCallback = Arc<dyn Fn(&mut Document, &LoadedEvent) + Send + Sync>;
pub type RemovedCallback = Arc<dyn Fn(&mut Document, &RemovedEvent) + Send + Sync>;

/// Configuration for a [`CollectionWidget`](crate::CollectionWidget).
///
/// Defaults: no minimum, no maximum, no-op callbacks and the default
/// [`Conventions`].
#[derive(Clone)]
pub struct CollectionOptions {
    /// Removal is refused at or below this many items.
    pub minimum_elements: usize,
    /// Adding is refused at this many items (None = unbounded).
    pub maximum_elements: Option<usize>,
    pub conventions: Conventions,
    pub(crate) added: AddedCallback,
    pub(crate) loaded: LoadedCallback,
    pub(crate) removed: RemovedCallback,
}

impl Default for CollectionOptions {
    fn default() -> Self {
        Self {
            minimum_elements: 0,
            maximum_elements: None,
            conventions: Conventions::default(),
            added: Arc::new(|_: &mut Document, _: &AddedEvent| {}),
            loaded: Arc::new(|_: &mut Document, _: &LoadedEvent| {}),
            removed: Arc::new(|_: &mut Document, _: &RemovedEvent| {}),
        }
    }
}

impl std::fmt::Debug for CollectionOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionOptions")
            .field("minimum_elements", &self.minimum_elements)
            .field("maximum_elements", &self.maximum_elements)
            .field("conventions", &self.conventions)
            .finish_non_exhaustive()
    }
}

impl CollectionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn minimum_elements(mut self, min: usize) -> Self {
        self.minimum_elements = min;
        self
    }

    pub fn maximum_elements(mut self, max: usize) -> Self {
        self.maximum_elements = Some(max);
        self
    }

    pub fn conventions(mut self, conventions: Conventions) -> Self {
        self.conventions = conventions;
        self
    }

    /// Called after each successful add, with the item already appended.
    pub fn on_added(
        mut self,
        callback: impl Fn(&mut Document, &AddedEvent) + Send + Sync + 'static,
    ) -> Self {
        self.added = Arc::new(callback);
        self
    }

    /// Called once at the end of initialization.
    pub fn on_loaded(
        mut self,
        callback: impl Fn(&mut Document, &LoadedEvent) + Send + Sync + 'static,
    ) -> Self {
        self.loaded = Arc::new(callback);
        self
    }

    /// Called for each successful remove, before the item is detached.
    pub fn on_removed(
        mut self,
        callback: impl Fn(&mut Document, &RemovedEvent) + Send + Sync + 'static,
    ) -> Self {
        self.removed = Arc::new(callback);
        self
    }

    /// True if one more item may be added to a collection of `count`.
    pub fn can_add(&self, count: usize) -> bool {
        self.maximum_elements.is_none_or(|max| count < max)
    }

    /// True if one item may be removed from a collection of `count`.
    pub fn can_remove(&self, count: usize) -> bool {
        count > self.minimum_elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CollectionOptions::default();
        assert_eq!(options.minimum_elements, 0);
        assert_eq!(options.maximum_elements, None);
        assert_eq!(options.conventions, Conventions::default());
    }

    #[test]
    fn test_capacity_guards() {
        let options = CollectionOptions::new().minimum_elements(1).maximum_elements(3);
        assert!(options.can_add(2));
        assert!(!options.can_add(3));
        assert!(!options.can_add(4));
        assert!(options.can_remove(2));
        assert!(!options.can_remove(1));
        assert!(!options.can_remove(0));
    }

    #[test]
    fn test_unbounded_maximum() {
        let options = CollectionOptions::new();
        assert!(options.can_add(usize::MAX - 1));
        assert!(!options.can_remove(0));
    }
}
