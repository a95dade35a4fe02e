/// How an element takes part in the rendered document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Display {
    /// Rendered normally.
    #[default]
    Default,
    /// Present in the tree but not rendered (`hidden`, `display: none`).
    None,
}
