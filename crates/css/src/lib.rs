//! CSS selectors for picking element handlers.
//!
//! Selectors are parsed into an AST ([`Selector`]), normalized, and woven
//! together into one [`DecisionTree`] that a [`Picker`] walks for each
//! element instead of testing every selector in turn.

pub mod ast;
mod combinator;
pub mod dom;
pub mod error;
pub mod parser;
pub mod picker;
mod token;
pub mod weave;

pub use ast::{
    CaseModifier, Combinator, CompoundSelector, Matcher, Selector, SimpleSelector, Specificity,
    normalize, serialize,
};
pub use dom::DomElement;
pub use error::SelectorError;
pub use parser::{parse, parse1};
pub use picker::{ElementAccess, PickMatch, Picker, TieBreak};
pub use weave::{DecisionNode, DecisionTree, ValueBranch, ValueTest, validate};
