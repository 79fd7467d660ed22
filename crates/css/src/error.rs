//! Selector errors.

use thiserror::Error;

use crate::ast::Combinator;

/// Errors from parsing or compiling selectors. All of them are fatal for
/// the selector set they occur in.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// Input was empty or only whitespace.
    #[error("empty selector")]
    Empty,

    /// A token the grammar does not allow at this position.
    #[error("unexpected `{found}` at offset {offset}")]
    UnexpectedToken { offset: usize, found: String },

    /// Input ended inside a construct.
    #[error("unexpected end of selector")]
    UnexpectedEnd,

    /// The combinator parses but cannot be matched against a document tree.
    #[error("unsupported combinator `{0}`")]
    UnsupportedCombinator(Combinator),

    /// A list was given where exactly one selector is required.
    #[error("expected a single selector, found a list of {0}")]
    UnexpectedList(usize),
}
