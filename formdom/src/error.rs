use thiserror::Error;

/// Errors raised while parsing markup. Offsets are byte positions in the
/// parsed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("unexpected end of markup at byte {offset}, expected {expected}")]
    UnexpectedEof { offset: usize, expected: String },

    #[error("unexpected closing tag </{tag}> at byte {offset}")]
    UnexpectedClosingTag { tag: String, offset: usize },

    #[error("unterminated comment starting at byte {offset}")]
    UnterminatedComment { offset: usize },

    #[error("invalid tag name at byte {offset}")]
    InvalidTagName { offset: usize },
}
