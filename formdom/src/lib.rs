pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod markup;
pub mod query;
pub mod types;

pub use document::{Document, DOCUMENT_ROOT};
pub use element::{Content, Element};
pub use error::MarkupError;
pub use event::{Event, Filter, HandlerId, Listener, MouseButton, Route};
pub use markup::{parse_fragment, to_markup};
pub use types::*;
