//! HTML/XML parsing into a read-only document arena.
//!
//! Pipeline: [`Tokenizer`] (with the [`entities`] decoder) → [`Parser`] →
//! [`Document`]. The [`serialize`] module renders subtrees back to markup.

pub mod dom;
pub mod entities;
pub mod parser;
pub mod serialize;
pub mod tokenizer;

pub use crate::dom::{Document, Element, ElementKind, Node, NodeData, NodeId};
pub use crate::entities::{
    decode_html, decode_html_attribute, decode_html_strict, decode_xml, escape_attribute,
    escape_text,
};
pub use crate::parser::{Parser, ParserOptions, parse_document};
pub use crate::serialize::{SerializeOptions, close_tag, inner_html, open_tag, outer_html};
pub use crate::tokenizer::{QuoteType, TokenSink, Tokenizer, TokenizerConfig, tokenize};
