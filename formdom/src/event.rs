/// Events delivered to a document, targeted at an element id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Mouse click on an element.
    Click { target: String, button: MouseButton },
}

impl Event {
    /// Primary-button click on the given element.
    pub fn click(target: impl Into<String>) -> Self {
        Self::Click {
            target: target.into(),
            button: MouseButton::Left,
        }
    }

    pub fn target(&self) -> &str {
        match self {
            Self::Click { target, .. } => target,
        }
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Opaque name of a handler, resolved by whoever registered the listener.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerId(pub String);

impl HandlerId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl From<&str> for HandlerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for HandlerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which clicks below a listener's element reach it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Any click on the element or inside it.
    Itself,
    /// Delegated: clicks on (or inside) a descendant carrying this class.
    Class(String),
}

/// A listener registered on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listener {
    pub element: String,
    pub filter: Filter,
    pub handler: HandlerId,
}

/// One listener reached while dispatching an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub handler: HandlerId,
    /// Element the listener is registered on.
    pub current: String,
    /// Element that satisfied the filter. Equal to `current` for
    /// [`Filter::Itself`], the matching descendant for [`Filter::Class`].
    pub matched: String,
}
