//! The collection widget: discovery, add, remove and event handling.

use std::sync::atomic::{AtomicUsize, Ordering};

use formdom::{Display, Document, Event, Filter, HandlerId};
use log::{debug, trace, warn};

use crate::error::CollectionError;
use crate::index::{assign_indices, stamp_index};
use crate::options::{AddedEvent, CollectionOptions, LoadedEvent, RemovedEvent};
use crate::template::{ItemTemplate, DEFAULT_TEMPLATE_NAME};

/// Unique identifier for a CollectionWidget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionId(usize);

impl CollectionId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for CollectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__collection_{}", self.0)
    }
}

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// The event reached none of this widget's listeners.
    Ignored,
    /// The event reached an add or remove trigger. Its default action
    /// must be suppressed, even when the guards turned it into a no-op.
    Consumed,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

/// Manages a repeatable group of form fields inside a container element.
///
/// The widget keeps its own list of item ids. The document is queried only
/// by [`initialize`](Self::initialize); after that the list is maintained
/// by [`add_one`](Self::add_one) and [`remove_one`](Self::remove_one).
#[derive(Debug)]
pub struct CollectionWidget {
    id: CollectionId,
    container: String,
    options: CollectionOptions,
    /// Items host, set by initialize.
    host: Option<String>,
    template_name: String,
    items: Vec<String>,
}

impl CollectionWidget {
    /// Create a widget for `container`. The document is not touched until
    /// [`initialize`](Self::initialize).
    pub fn new(container: impl Into<String>, options: CollectionOptions) -> Self {
        Self {
            id: CollectionId::new(),
            container: container.into(),
            options,
            host: None,
            template_name: DEFAULT_TEMPLATE_NAME.to_string(),
            items: Vec::new(),
        }
    }

    /// Create and initialize in one step.
    pub fn attach(
        doc: &mut Document,
        container: impl Into<String>,
        options: CollectionOptions,
    ) -> Result<Self, CollectionError> {
        let mut widget = Self::new(container, options);
        widget.initialize(doc)?;
        Ok(widget)
    }

    pub fn id(&self) -> CollectionId {
        self.id
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn options(&self) -> &CollectionOptions {
        &self.options
    }

    /// The items host, once initialized.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Name of the placeholder token, without the surrounding underscores.
    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    /// Number of items in the collection.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Item ids, in insertion order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn is_attached(&self, doc: &Document) -> bool {
        doc.contains(&self.container)
    }

    fn add_handler(&self) -> HandlerId {
        HandlerId::new(format!("{}:add", self.id))
    }

    fn remove_handler(&self) -> HandlerId {
        HandlerId::new(format!("{}:remove", self.id))
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Discover the collection's structure, wire its triggers, index the
    /// existing items and fire the `loaded` callback.
    pub fn initialize(&mut self, doc: &mut Document) -> Result<&mut Self, CollectionError> {
        if !self.is_attached(doc) {
            debug!("[collection] Container {} is not in the document", self.container);
            return Err(CollectionError::ContainerMissing(self.container.clone()));
        }

        let conventions = &self.options.conventions;
        let hosts = doc.query_class(&self.container, &conventions.items_class);
        let Some(host) = hosts.first() else {
            return Err(CollectionError::MissingItemsHost {
                container: self.container.clone(),
                class: conventions.items_class.clone(),
            });
        };
        if hosts.len() > 1 {
            warn!(
                "[collection] {} elements with class {} in {}, using {}",
                hosts.len(),
                conventions.items_class,
                self.container,
                host.id
            );
        }

        let host_id = host.id.clone();
        self.template_name = host
            .get_attr(&conventions.template_name_attr)
            .unwrap_or(DEFAULT_TEMPLATE_NAME)
            .to_string();
        self.items = doc
            .query_class(&host_id, &conventions.item_class)
            .iter()
            .map(|el| el.id.clone())
            .collect();
        let add_triggers: Vec<String> = doc
            .query_class(&self.container, &conventions.add_class)
            .iter()
            .map(|el| el.id.clone())
            .collect();

        for trigger in &add_triggers {
            doc.on(trigger, Filter::Itself, self.add_handler());
        }
        self.listen_remove(doc);

        assign_indices(doc, &self.items, &self.options.conventions.index_attr);
        self.host = Some(host_id);

        debug!(
            "[collection] {} attached to {}: {} items, {} add triggers, token __{}__",
            self.id,
            self.container,
            self.items.len(),
            add_triggers.len(),
            self.template_name
        );

        let loaded = LoadedEvent {
            count: self.items.len(),
            items: self.items.clone(),
        };
        (self.options.loaded)(doc, &loaded);

        Ok(self)
    }

    /// The single delegated listener serving every remove trigger in the
    /// container, including those of items added later.
    fn listen_remove(&self, doc: &mut Document) {
        let filter = Filter::Class(self.options.conventions.remove_class.clone());
        doc.on(&self.container, filter, self.remove_handler());
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Add one item from the template. Returns the new item's id, or None
    /// when the container is gone or the collection is full.
    pub fn add_one(&mut self, doc: &mut Document) -> Result<Option<String>, CollectionError> {
        if !self.is_attached(doc) {
            trace!("[collection] add ignored, {} is detached", self.container);
            return Ok(None);
        }
        let host = self
            .host
            .clone()
            .ok_or_else(|| CollectionError::NotInitialized(self.container.clone()))?;

        if !self.options.can_add(self.items.len()) {
            debug!(
                "[collection] add refused, {} is at its maximum of {}",
                self.container,
                self.items.len()
            );
            return Ok(None);
        }

        let conventions = &self.options.conventions;
        let markup = doc
            .get(&host)
            .ok_or_else(|| CollectionError::MissingItemsHost {
                container: self.container.clone(),
                class: conventions.items_class.clone(),
            })?
            .get_attr(&conventions.template_attr)
            .ok_or_else(|| CollectionError::MissingTemplate {
                host: host.clone(),
                attribute: conventions.template_attr.clone(),
            })?
            .to_string();

        // The counter moves before the token is substituted.
        let counter = self.items.len() + 1;
        let template = ItemTemplate::new(markup, self.template_name.as_str())?;
        let mut item = template.materialize(counter)?;
        item.add_class(conventions.item_class.as_str());

        let remove_source = doc
            .query_class(&self.container, &conventions.remove_class)
            .into_iter()
            .find(|el| el.is_hidden())
            .map(|el| el.deep_clone());
        match remove_source {
            Some(mut remove) => {
                remove.display = Display::Default;
                item.push_child(remove);
            }
            None => warn!(
                "[collection] No hidden .{} in {}, new item has no remove control",
                conventions.remove_class, self.container
            ),
        }

        // Templates may carry authored ids; item ids must stay unique.
        doc.adopt(&mut item);

        let item_id = doc
            .append_child(&host, item)
            .ok_or_else(|| CollectionError::MissingItemsHost {
                container: self.container.clone(),
                class: conventions.items_class.clone(),
            })?;
        self.items.push(item_id.clone());
        stamp_index(doc, &item_id, &self.options.conventions.index_attr, counter);

        debug!(
            "[collection] Added {} to {} ({} items)",
            item_id,
            host,
            self.items.len()
        );

        let added = AddedEvent {
            host,
            item: item_id.clone(),
            container: self.container.clone(),
        };
        (self.options.added)(doc, &added);

        Ok(Some(item_id))
    }

    /// Add one item when the collection is empty, then make sure the remove
    /// listener is in place.
    pub fn add_one_if_empty(
        &mut self,
        doc: &mut Document,
    ) -> Result<Option<String>, CollectionError> {
        if !self.items.is_empty() {
            return Ok(None);
        }
        let added = self.add_one(doc)?;
        if self.is_attached(doc) {
            self.listen_remove(doc);
        }
        Ok(added)
    }

    /// Remove the item enclosing `trigger`. Returns the removed item's id,
    /// or None when the container is gone, the collection is at its minimum
    /// or the trigger is not inside one of this widget's items.
    ///
    /// The remaining items keep the indices they had.
    pub fn remove_one(&mut self, doc: &mut Document, trigger: &str) -> Option<String> {
        if !self.is_attached(doc) {
            trace!("[collection] remove ignored, {} is detached", self.container);
            return None;
        }

        if !self.options.can_remove(self.items.len()) {
            debug!(
                "[collection] remove refused, {} is at its minimum of {}",
                self.container,
                self.items.len()
            );
            return None;
        }

        let item = doc
            .closest(trigger, &self.options.conventions.item_class)
            .map(|el| el.id.clone())
            .filter(|id| self.items.contains(id));
        let Some(item) = item else {
            warn!(
                "[collection] Remove trigger {} is not inside an item of {}",
                trigger, self.container
            );
            return None;
        };

        let removed = RemovedEvent {
            trigger: trigger.to_string(),
            item: item.clone(),
        };
        (self.options.removed)(doc, &removed);

        doc.remove(trigger);
        doc.remove(&item);
        if let Some(pos) = self.items.iter().position(|id| *id == item) {
            self.items.remove(pos);
        }

        debug!(
            "[collection] Removed {} from {} ({} items)",
            item,
            self.container,
            self.items.len()
        );

        Some(item)
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Route an event through the document and run the add or remove
    /// operation it reaches.
    pub fn handle_event(
        &mut self,
        doc: &mut Document,
        event: &Event,
    ) -> Result<EventResult, CollectionError> {
        let add = self.add_handler();
        let remove = self.remove_handler();

        for route in doc.dispatch(event) {
            if route.handler == add {
                trace!("[collection] Click on {} adds", route.matched);
                self.add_one(doc)?;
                return Ok(EventResult::Consumed);
            }
            if route.handler == remove {
                trace!("[collection] Click on {} removes", route.matched);
                self.remove_one(doc, &route.matched);
                return Ok(EventResult::Consumed);
            }
        }

        trace!("[collection] Click on {} is not for {}", event.target(), self.id);
        Ok(EventResult::Ignored)
    }
}
