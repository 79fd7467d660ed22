//! Conversion settings.
//!
//! Every struct deserializes with `#[serde(default)]`, so a TOML file only
//! needs the fields it changes. Selector entries are merged over the
//! built-in defaults by selector string (see [`merge_selectors`]).

use std::collections::BTreeMap;

use css::TieBreak;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CompileError;

/// Settings for [`crate::HtmlToText`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Target line length. `None` (or `false` in TOML) disables wrapping.
    #[serde(deserialize_with = "deserialize_wordwrap")]
    pub wordwrap: Option<usize>,
    /// Characters collapsed as inter-word whitespace.
    pub whitespace_characters: String,
    /// Keep `\n` from the source as line breaks.
    pub preserve_newlines: bool,
    pub decode_entities: bool,
    pub xml_mode: bool,
    pub long_word_split: LongWordSplit,
    pub limits: Limits,
    pub base_elements: BaseElements,
    /// Replacements applied to every emitted word, keyed by the text they
    /// replace.
    pub encode_characters: BTreeMap<String, String>,
    /// Which `<table>` elements are laid out as data tables.
    pub tables: DataTables,
    /// Which of two equally specific selectors picks the formatter.
    pub tie_break: TieBreak,
    /// Appended to the defaults; an entry whose selector string is already
    /// known is merged into it field by field.
    pub selectors: Vec<SelectorDefinition>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            wordwrap: Some(80),
            whitespace_characters: " \t\r\n\u{0c}\u{200b}".to_string(),
            preserve_newlines: false,
            decode_entities: true,
            xml_mode: false,
            long_word_split: LongWordSplit::default(),
            limits: Limits::default(),
            base_elements: BaseElements::default(),
            encode_characters: BTreeMap::new(),
            tables: DataTables::default(),
            tie_break: TieBreak::default(),
            selectors: Vec::new(),
        }
    }
}

impl ConvertOptions {
    /// Parse options from TOML. Missing fields keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, CompileError> {
        Ok(toml::from_str(source)?)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WrapSetting {
    Width(usize),
    Enabled(bool),
}

fn deserialize_wordwrap<'de, D: Deserializer<'de>>(d: D) -> Result<Option<usize>, D::Error> {
    Ok(match WrapSetting::deserialize(d)? {
        WrapSetting::Width(width) => Some(width),
        WrapSetting::Enabled(true) => ConvertOptions::default().wordwrap,
        WrapSetting::Enabled(false) => None,
    })
}

/// How a word longer than the line is broken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LongWordSplit {
    /// Break after the last of these characters that fits, trying them in
    /// order.
    pub wrap_characters: Vec<char>,
    /// Cut at the line length when no wrap character helps.
    pub force_wrap_on_limit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Emitted in place of content cut by the limits below.
    pub ellipsis: String,
    pub max_base_elements: Option<usize>,
    pub max_child_nodes: Option<usize>,
    pub max_depth: Option<usize>,
    /// Longer input is truncated before parsing.
    pub max_input_length: Option<usize>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            ellipsis: "...".to_string(),
            max_base_elements: None,
            max_child_nodes: None,
            max_depth: None,
            max_input_length: Some(16 * 1024 * 1024),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    /// Group base elements by the selector that found them.
    #[default]
    Selectors,
    /// Document order.
    Occurrence,
}

/// Which elements the conversion starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseElements {
    pub selectors: Vec<String>,
    pub order_by: OrderBy,
    /// Convert the whole document when no base element is found.
    pub return_dom_by_default: bool,
}

impl Default for BaseElements {
    fn default() -> Self {
        Self {
            selectors: vec!["body".to_string()],
            order_by: OrderBy::Selectors,
            return_dom_by_default: true,
        }
    }
}

/// `true` makes every table a data table; a list of selectors (usually
/// `.class` / `#id`) restricts it to matching tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataTables {
    All(bool),
    Matching(Vec<String>),
}

impl Default for DataTables {
    fn default() -> Self {
        DataTables::Matching(Vec::new())
    }
}

/// Brackets around link targets: a `[open, close]` pair, or `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkBrackets {
    Pair(String, String),
    Enabled(bool),
}

impl LinkBrackets {
    pub fn wrap(&self, text: &str) -> String {
        match self {
            LinkBrackets::Pair(open, close) => format!("{open}{text}{close}"),
            LinkBrackets::Enabled(true) => format!("[{text}]"),
            LinkBrackets::Enabled(false) => text.to_string(),
        }
    }
}

impl Default for LinkBrackets {
    fn default() -> Self {
        LinkBrackets::Enabled(true)
    }
}

/// Per-selector formatter options. Each formatter reads the fields it
/// understands; unset fields fall back to the formatter's own default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub leading_line_breaks: Option<usize>,
    pub trailing_line_breaks: Option<usize>,
    /// Headings.
    pub uppercase: Option<bool>,
    /// Blockquotes.
    pub trim_empty_lines: Option<bool>,
    /// `inlineString` / `blockString`.
    pub string: Option<String>,
    /// `inlineSurround`.
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    /// Unordered lists.
    pub item_prefix: Option<String>,
    /// Horizontal lines.
    pub length: Option<usize>,
    /// Anchors and images.
    pub base_url: Option<String>,
    pub link_brackets: Option<LinkBrackets>,
    pub hide_link_href_if_same_as_text: Option<bool>,
    pub ignore_href: Option<bool>,
    pub no_anchor_url: Option<bool>,
    /// Data tables.
    pub max_column_width: Option<usize>,
    pub col_spacing: Option<usize>,
    pub row_spacing: Option<usize>,
    pub uppercase_header_cells: Option<bool>,
}

macro_rules! merge_fields {
    ($base:ident, $over:ident, $($field:ident),+ $(,)?) => {
        FormatOptions {
            $($field: $over.$field.or($base.$field),)+
        }
    };
}

impl FormatOptions {
    /// Fields set in `over` win.
    pub fn merged(self, over: FormatOptions) -> FormatOptions {
        let base = self;
        merge_fields!(
            base,
            over,
            leading_line_breaks,
            trailing_line_breaks,
            uppercase,
            trim_empty_lines,
            string,
            prefix,
            suffix,
            item_prefix,
            length,
            base_url,
            link_brackets,
            hide_link_href_if_same_as_text,
            ignore_href,
            no_anchor_url,
            max_column_width,
            col_spacing,
            row_spacing,
            uppercase_header_cells,
        )
    }
}

/// One `(selector, formatter, options)` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorDefinition {
    pub selector: String,
    /// Formatter name; may be left out when merging into a known selector.
    pub format: Option<String>,
    pub options: FormatOptions,
}

impl SelectorDefinition {
    pub fn new(selector: &str, format: &str) -> Self {
        Self {
            selector: selector.to_string(),
            format: Some(format.to_string()),
            options: FormatOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    fn merged(self, over: SelectorDefinition) -> SelectorDefinition {
        SelectorDefinition {
            selector: over.selector,
            format: over.format.or(self.format),
            options: self.options.merged(over.options),
        }
    }
}

fn breaks(leading: usize, trailing: usize) -> FormatOptions {
    FormatOptions {
        leading_line_breaks: Some(leading),
        trailing_line_breaks: Some(trailing),
        ..FormatOptions::default()
    }
}

/// The built-in selector set.
pub fn default_selectors() -> Vec<SelectorDefinition> {
    let heading = |leading| {
        FormatOptions {
            uppercase: Some(true),
            ..breaks(leading, 2)
        }
    };
    let link = FormatOptions {
        link_brackets: Some(LinkBrackets::default()),
        hide_link_href_if_same_as_text: Some(false),
        ignore_href: Some(false),
        no_anchor_url: Some(true),
        ..FormatOptions::default()
    };
    vec![
        SelectorDefinition::new("*", "inline"),
        SelectorDefinition::new("a", "anchor").with_options(link.clone()),
        SelectorDefinition::new("article", "block"),
        SelectorDefinition::new("aside", "block"),
        SelectorDefinition::new("blockquote", "blockquote").with_options(FormatOptions {
            trim_empty_lines: Some(true),
            ..breaks(2, 2)
        }),
        SelectorDefinition::new("br", "lineBreak"),
        SelectorDefinition::new("div", "block"),
        SelectorDefinition::new("footer", "block"),
        SelectorDefinition::new("form", "block"),
        SelectorDefinition::new("h1", "heading").with_options(heading(3)),
        SelectorDefinition::new("h2", "heading").with_options(heading(3)),
        SelectorDefinition::new("h3", "heading").with_options(heading(3)),
        SelectorDefinition::new("h4", "heading").with_options(heading(2)),
        SelectorDefinition::new("h5", "heading").with_options(heading(2)),
        SelectorDefinition::new("h6", "heading").with_options(heading(2)),
        SelectorDefinition::new("header", "block"),
        SelectorDefinition::new("hr", "horizontalLine").with_options(breaks(2, 2)),
        SelectorDefinition::new("img", "image").with_options(FormatOptions {
            link_brackets: Some(LinkBrackets::default()),
            ..FormatOptions::default()
        }),
        SelectorDefinition::new("main", "block"),
        SelectorDefinition::new("nav", "block"),
        SelectorDefinition::new("ol", "orderedList").with_options(breaks(2, 2)),
        SelectorDefinition::new("p", "paragraph").with_options(breaks(2, 2)),
        SelectorDefinition::new("pre", "pre").with_options(breaks(2, 2)),
        SelectorDefinition::new("script", "skip"),
        SelectorDefinition::new("section", "block"),
        SelectorDefinition::new("style", "skip"),
        SelectorDefinition::new("table", "table").with_options(FormatOptions {
            max_column_width: Some(60),
            col_spacing: Some(3),
            row_spacing: Some(0),
            uppercase_header_cells: Some(true),
            ..breaks(2, 2)
        }),
        SelectorDefinition::new("ul", "unorderedList").with_options(FormatOptions {
            item_prefix: Some(" * ".to_string()),
            ..breaks(2, 2)
        }),
        SelectorDefinition::new("wbr", "wbr"),
    ]
}

/// Collapse entries sharing a selector string into one, later fields
/// winning. The merged entry takes the position of the last occurrence.
pub fn merge_selectors(items: Vec<SelectorDefinition>) -> Vec<SelectorDefinition> {
    let mut merged: Vec<SelectorDefinition> = Vec::with_capacity(items.len());
    for item in items {
        match merged.iter().position(|m| m.selector == item.selector) {
            Some(pos) => {
                let earlier = merged.remove(pos);
                merged.push(earlier.merged(item));
            }
            None => merged.push(item),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_overrides_only_what_it_names() {
        let options = ConvertOptions::from_toml_str(
            r#"
            wordwrap = 40
            preserve_newlines = true
            tie_break = "prefer-first"

            [limits]
            max_depth = 3

            [[selectors]]
            selector = "p"
            options = { leading_line_breaks = 1 }
            "#,
        )
        .expect("valid config");
        assert_eq!(options.wordwrap, Some(40));
        assert!(options.preserve_newlines);
        assert_eq!(options.tie_break, TieBreak::PreferFirst);
        assert_eq!(options.limits.max_depth, Some(3));
        assert_eq!(options.limits.ellipsis, "...");
        assert_eq!(options.base_elements.selectors, vec!["body".to_string()]);
        assert_eq!(options.selectors[0].format, None);
    }

    #[test]
    fn wordwrap_false_disables_wrapping() {
        let options = ConvertOptions::from_toml_str("wordwrap = false").expect("valid config");
        assert_eq!(options.wordwrap, None);
        let options = ConvertOptions::from_toml_str("").expect("valid config");
        assert_eq!(options.wordwrap, Some(80));
    }

    #[test]
    fn data_tables_and_brackets_accept_both_shapes() {
        let options = ConvertOptions::from_toml_str(
            r##"
            tables = ["#prices", ".grid"]

            [[selectors]]
            selector = "a"
            options = { link_brackets = false }

            [[selectors]]
            selector = "img"
            options = { link_brackets = ["<", ">"] }
            "##,
        )
        .expect("valid config");
        assert_eq!(
            options.tables,
            DataTables::Matching(vec!["#prices".into(), ".grid".into()])
        );
        let brackets: Vec<_> = options
            .selectors
            .iter()
            .map(|s| s.options.link_brackets.clone())
            .collect();
        assert_eq!(
            brackets,
            vec![
                Some(LinkBrackets::Enabled(false)),
                Some(LinkBrackets::Pair("<".into(), ">".into()))
            ]
        );
        assert!(matches!(
            ConvertOptions::from_toml_str("tables = true"),
            Ok(ConvertOptions {
                tables: DataTables::All(true),
                ..
            })
        ));
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = ConvertOptions::from_toml_str("wordwrap = \"wide\"");
        assert!(matches!(err, Err(CompileError::Config(_))), "{err:?}");
    }

    #[test]
    fn merging_keeps_unset_fields_and_moves_to_last_position() {
        let merged = merge_selectors(vec![
            SelectorDefinition::new("p", "paragraph").with_options(breaks(2, 2)),
            SelectorDefinition::new("a", "anchor"),
            SelectorDefinition {
                selector: "p".into(),
                format: None,
                options: FormatOptions {
                    leading_line_breaks: Some(1),
                    ..FormatOptions::default()
                },
            },
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].selector, "a");
        assert_eq!(merged[1].format.as_deref(), Some("paragraph"));
        assert_eq!(merged[1].options.leading_line_breaks, Some(1));
        assert_eq!(merged[1].options.trailing_line_breaks, Some(2));
    }
}
