//! Owned document tree plus the listener table used for event routing.

use std::collections::HashSet;

use log::{debug, trace};

use crate::element::{find_element, find_element_mut, Element};
use crate::error::MarkupError;
use crate::event::{Event, Filter, HandlerId, Listener, MouseButton, Route};
use crate::markup;
use crate::query;

/// Id given to the implicit root created by [`Document::parse`].
pub const DOCUMENT_ROOT: &str = "document";

#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
    listeners: Vec<Listener>,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            root,
            listeners: Vec::new(),
        }
    }

    /// Parse a markup fragment into a document. The fragment's top-level
    /// nodes become children of a root element with id [`DOCUMENT_ROOT`].
    pub fn parse(input: &str) -> Result<Self, MarkupError> {
        let nodes = markup::parse_fragment(input)?;
        let root = Element::new("body").id(DOCUMENT_ROOT).children(nodes);
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        find_element(&self.root, id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        find_element_mut(&mut self.root, id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Elements from the root down to `id`, both included.
    pub fn path_to(&self, id: &str) -> Option<Vec<&Element>> {
        query::path_to(&self.root, id)
    }

    /// The nearest element carrying `class`, starting at `id` itself and
    /// walking up through its ancestors.
    pub fn closest(&self, id: &str, class: &str) -> Option<&Element> {
        let path = self.path_to(id)?;
        path.into_iter().rev().find(|el| el.has_class(class))
    }

    /// Descendants of `scope` carrying `class`, in document order.
    pub fn query_class(&self, scope: &str, class: &str) -> Vec<&Element> {
        match self.get(scope) {
            Some(scope) => query::query_class(scope, class),
            None => Vec::new(),
        }
    }

    /// Append `child` to the element `parent`. Returns the child's id, or
    /// None if `parent` is not in the document.
    pub fn append_child(&mut self, parent: &str, child: Element) -> Option<String> {
        let parent = self.get_mut(parent)?;
        let id = child.id.clone();
        parent.push_child(child);
        debug!("[dom] Appended {} to {}", id, parent.id);
        Some(id)
    }

    /// Prepare a detached subtree for insertion: every element whose id is
    /// already taken, in the document or earlier in the subtree, gets a
    /// fresh one. Returns how many ids were renewed.
    pub fn adopt(&self, element: &mut Element) -> usize {
        let mut taken: HashSet<String> = query::subtree_ids(&self.root).into_iter().collect();
        let renewed = renew_taken_ids(element, &mut taken);
        if renewed > 0 {
            debug!("[dom] Renewed {} taken ids, subtree is now {}", renewed, element.id);
        }
        renewed
    }

    /// Detach an element and its subtree. Listeners registered anywhere in
    /// the subtree are dropped with it.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let removed = query::detach(&mut self.root, id)?;
        let ids = query::subtree_ids(&removed);
        let before = self.listeners.len();
        self.listeners.retain(|l| !ids.contains(&l.element));
        debug!(
            "[dom] Removed {} ({} elements, {} listeners)",
            id,
            ids.len(),
            before - self.listeners.len()
        );
        Some(removed)
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Register a listener. Registering the same (element, filter, handler)
    /// twice is a no-op; returns false in that case or when the element is
    /// not in the document.
    pub fn on(&mut self, element: &str, filter: Filter, handler: HandlerId) -> bool {
        if !self.contains(element) {
            return false;
        }

        let listener = Listener {
            element: element.to_string(),
            filter,
            handler,
        };
        if self.listeners.contains(&listener) {
            trace!("[dom] Listener {} on {} already registered", listener.handler, element);
            return false;
        }

        debug!(
            "[dom] Listener {} on {} ({:?})",
            listener.handler, element, listener.filter
        );
        self.listeners.push(listener);
        true
    }

    /// Drop every listener with the given handler on `element`.
    pub fn off(&mut self, element: &str, handler: &HandlerId) {
        self.listeners
            .retain(|l| !(l.element == element && &l.handler == handler));
    }

    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    /// Work out which listeners an event reaches. The event bubbles from its
    /// target up to the root, so routes are ordered innermost first.
    pub fn dispatch(&self, event: &Event) -> Vec<Route> {
        let Event::Click { target, button } = event;

        if *button != MouseButton::Left {
            trace!("[dom] Ignoring {:?} click on {}", button, target);
            return Vec::new();
        }

        let Some(path) = self.path_to(target) else {
            trace!("[dom] Click target {} is not in the document", target);
            return Vec::new();
        };

        let mut routes = Vec::new();
        for (depth, current) in path.iter().enumerate().rev() {
            for listener in self.listeners.iter().filter(|l| l.element == current.id) {
                let matched = match &listener.filter {
                    Filter::Itself => Some(current.id.clone()),
                    // Delegation only considers elements strictly below the
                    // listener's element.
                    Filter::Class(class) => path[depth + 1..]
                        .iter()
                        .rev()
                        .find(|el| el.has_class(class))
                        .map(|el| el.id.clone()),
                };

                if let Some(matched) = matched {
                    trace!(
                        "[dom] Click on {} reaches {} via {}",
                        target, listener.handler, matched
                    );
                    routes.push(Route {
                        handler: listener.handler.clone(),
                        current: current.id.clone(),
                        matched,
                    });
                }
            }
        }

        routes
    }
}

fn renew_taken_ids(element: &mut Element, taken: &mut HashSet<String>) -> usize {
    let mut renewed = 0;
    if taken.contains(&element.id) {
        renewed += 1;
        while taken.contains(&element.id) {
            element.renew_id();
        }
    }
    taken.insert(element.id.clone());

    if let Some(children) = element.child_elements_mut() {
        for child in children {
            renewed += renew_taken_ids(child, taken);
        }
    }
    renewed
}
