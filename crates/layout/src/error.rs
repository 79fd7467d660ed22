use thiserror::Error;

use css::SelectorError;

/// Problems found while compiling a converter. Nothing has been converted
/// yet when one of these is returned.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("invalid selector `{selector}`: {source}")]
    Selector {
        selector: String,
        #[source]
        source: SelectorError,
    },

    #[error("selector `{0}` has no format")]
    MissingFormat(String),

    #[error("selector `{selector}` uses unknown format `{format}`")]
    UnknownFormat { selector: String, format: String },

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// A formatter drove the block text builder into an invalid state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    #[error("cannot open a list item: the current item is a {found}, not a list")]
    ListItemOutsideList { found: &'static str },

    #[error("cannot open a table row: the current item is a {found}, not a table")]
    RowOutsideTable { found: &'static str },

    #[error("cannot open a table cell: the current item is a {found}, not a table row")]
    CellOutsideRow { found: &'static str },

    #[error("cannot close a {expected}: the current item is a {found}")]
    CloseMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("cannot close the root block")]
    CloseRoot,
}
