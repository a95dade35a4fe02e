//! Repeatable form field groups ("collections") over a [`formdom`] document.
//!
//! A collection is a container element holding an items host, which carries
//! the markup template for one item and the name of its placeholder token.
//! [`CollectionWidget`] adds items from that template, removes them through
//! their remove triggers, keeps the count between the configured minimum and
//! maximum, and reports each change through the callbacks in
//! [`CollectionOptions`].

pub mod conventions;
pub mod error;
pub mod index;
pub mod options;
pub mod template;
pub mod widget;

pub use conventions::Conventions;
pub use error::CollectionError;
pub use index::{assign_indices, read_index};
pub use options::{AddedEvent, CollectionOptions, LoadedEvent, RemovedEvent};
pub use template::{ItemTemplate, DEFAULT_TEMPLATE_NAME};
pub use widget::{CollectionId, CollectionWidget, EventResult};
