//! Collection error types

use formdom::MarkupError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// The container is not in the document. Attaching to a missing
    /// container is the one soft failure callers are expected to handle.
    #[error("container '{0}' is not in the document")]
    ContainerMissing(String),

    #[error("widget on '{0}' has not been initialized")]
    NotInitialized(String),

    #[error("container '{container}' has no element with class '{class}'")]
    MissingItemsHost { container: String, class: String },

    #[error("items host '{host}' has no '{attribute}' attribute")]
    MissingTemplate { host: String, attribute: String },

    #[error("template produced no element")]
    EmptyTemplate,

    #[error("invalid template token '{token}': {message}")]
    InvalidToken { token: String, message: String },

    #[error("template markup: {0}")]
    Markup(#[from] MarkupError),
}

impl CollectionError {
    /// True for the soft failure of a container that is not in the document.
    pub fn is_container_missing(&self) -> bool {
        matches!(self, Self::ContainerMissing(_))
    }
}
