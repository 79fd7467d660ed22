//! HTML to plain text.
//!
//! [`HtmlToText`] picks a formatter for every element with a compiled
//! selector decision tree; formatters drive the [`BlockTextBuilder`], which
//! wraps words, lays out lists and tables, and merges block spacing.
//!
//! ```
//! let text = layout::html_to_text("<h1>Title</h1><p>Hello <b>world</b>.</p>");
//! assert_eq!(text, "TITLE\n\nHello world.");
//! ```

pub mod builder;
pub mod convert;
pub mod error;
pub mod formatters;
pub mod inline;
pub mod options;
pub mod table;
pub mod whitespace;

pub use crate::builder::{BlockOpen, BlockTextBuilder, ListOpen, PrefixAlign, TableClose};
pub use crate::convert::{HtmlToText, MAX_WALK_DEPTH, Walker, html_to_text};
pub use crate::error::{BuilderError, CompileError};
pub use crate::formatters::{FormatFn, Formatters, list_label};
pub use crate::options::{
    BaseElements, ConvertOptions, DataTables, FormatOptions, Limits, LinkBrackets, LongWordSplit,
    OrderBy, SelectorDefinition, default_selectors, merge_selectors,
};
pub use crate::table::{TableCell, table_to_string};
pub use crate::whitespace::WhitespaceProcessor;
pub use css::TieBreak;
