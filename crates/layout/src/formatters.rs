//! Element formatters.
//!
//! A formatter renders one element through the [`Walker`]: it drives the
//! block text builder and walks whatever children it wants rendered. The
//! registry maps the names used in selector definitions to formatters;
//! custom ones can be added with [`Formatters::register`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use html::{NodeId, close_tag, open_tag, outer_html};
use url::Url;

use crate::builder::{BlockOpen, ListOpen, PrefixAlign, TableClose};
use crate::convert::Walker;
use crate::error::BuilderError;
use crate::inline::char_len;
use crate::options::FormatOptions;

pub type FormatFn =
    dyn Fn(&mut Walker<'_>, NodeId, &FormatOptions) -> Result<(), BuilderError> + Send + Sync;

#[derive(Clone)]
pub struct Formatters {
    map: HashMap<String, Arc<FormatFn>>,
}

impl Formatters {
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Every built-in formatter.
    pub fn builtin() -> Self {
        let mut f = Self::empty();
        f.register("inline", inline);
        f.register("block", block);
        f.register("skip", skip);
        f.register("inlineString", inline_string);
        f.register("blockString", block_string);
        f.register("inlineTag", inline_tag);
        f.register("blockTag", block_tag);
        f.register("inlineHtml", inline_html);
        f.register("blockHtml", block_html);
        f.register("inlineSurround", inline_surround);
        f.register("lineBreak", line_break);
        f.register("wbr", wbr);
        f.register("horizontalLine", horizontal_line);
        f.register("paragraph", paragraph);
        f.register("pre", pre);
        f.register("heading", heading);
        f.register("blockquote", blockquote);
        f.register("anchor", anchor);
        f.register("image", image);
        f.register("unorderedList", unordered_list);
        f.register("orderedList", ordered_list);
        f.register("table", table);
        f.register("dataTable", data_table);
        f
    }

    /// Add or replace the formatter called `name`.
    pub fn register<F>(&mut self, name: &str, formatter: F)
    where
        F: Fn(&mut Walker<'_>, NodeId, &FormatOptions) -> Result<(), BuilderError>
            + Send
            + Sync
            + 'static,
    {
        self.map.insert(name.to_string(), Arc::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<Arc<FormatFn>> {
        self.map.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }
}

impl Default for Formatters {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for Formatters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.map.keys().collect();
        names.sort();
        f.debug_struct("Formatters").field("names", &names).finish()
    }
}

fn leading(opts: &FormatOptions, default: usize) -> usize {
    opts.leading_line_breaks.unwrap_or(default)
}

fn trailing(opts: &FormatOptions, default: usize) -> usize {
    opts.trailing_line_breaks.unwrap_or(default)
}

fn open_block(w: &mut Walker<'_>, leading_line_breaks: usize) {
    w.builder().open_block(BlockOpen {
        leading_line_breaks,
        ..BlockOpen::default()
    });
}

// Children inside a block with the given break counts.
fn block_with(
    w: &mut Walker<'_>,
    id: NodeId,
    opts: &FormatOptions,
    default_breaks: usize,
) -> Result<(), BuilderError> {
    open_block(w, leading(opts, default_breaks));
    w.walk_children(id);
    w.builder().close_block(trailing(opts, default_breaks), None)
}

fn inline(w: &mut Walker<'_>, id: NodeId, _: &FormatOptions) -> Result<(), BuilderError> {
    w.walk_children(id);
    Ok(())
}

fn block(w: &mut Walker<'_>, id: NodeId, opts: &FormatOptions) -> Result<(), BuilderError> {
    block_with(w, id, opts, 1)
}

fn skip(_: &mut Walker<'_>, _: NodeId, _: &FormatOptions) -> Result<(), BuilderError> {
    Ok(())
}

fn inline_string(w: &mut Walker<'_>, _: NodeId, opts: &FormatOptions) -> Result<(), BuilderError> {
    w.builder().add_literal(opts.string.as_deref().unwrap_or(""));
    Ok(())
}

fn block_string(w: &mut Walker<'_>, _: NodeId, opts: &FormatOptions) -> Result<(), BuilderError> {
    open_block(w, leading(opts, 1));
    w.builder().add_literal(opts.string.as_deref().unwrap_or(""));
    w.builder().close_block(trailing(opts, 1), None)
}

fn add_unwrapped(w: &mut Walker<'_>, text: &str) {
    let builder = w.builder();
    builder.start_no_wrap();
    builder.add_literal(text);
    builder.stop_no_wrap();
}

// Tags as literal markup around the rendered children.
fn tag_around_children(w: &mut Walker<'_>, id: NodeId) {
    let Some(el) = w.element(id) else {
        return;
    };
    let options = w.serialize_options();
    add_unwrapped(w, &open_tag(el, &options));
    w.walk_children(id);
    add_unwrapped(w, &close_tag(el));
}

fn inline_tag(w: &mut Walker<'_>, id: NodeId, _: &FormatOptions) -> Result<(), BuilderError> {
    tag_around_children(w, id);
    Ok(())
}

fn block_tag(w: &mut Walker<'_>, id: NodeId, opts: &FormatOptions) -> Result<(), BuilderError> {
    open_block(w, leading(opts, 2));
    tag_around_children(w, id);
    w.builder().close_block(trailing(opts, 2), None)
}

fn element_html(w: &mut Walker<'_>, id: NodeId) {
    let markup = outer_html(w.document(), id, &w.serialize_options());
    add_unwrapped(w, &markup);
}

fn inline_html(w: &mut Walker<'_>, id: NodeId, _: &FormatOptions) -> Result<(), BuilderError> {
    element_html(w, id);
    Ok(())
}

fn block_html(w: &mut Walker<'_>, id: NodeId, opts: &FormatOptions) -> Result<(), BuilderError> {
    open_block(w, leading(opts, 2));
    element_html(w, id);
    w.builder().close_block(trailing(opts, 2), None)
}

fn inline_surround(w: &mut Walker<'_>, id: NodeId, opts: &FormatOptions) -> Result<(), BuilderError> {
    w.builder().add_literal(opts.prefix.as_deref().unwrap_or(""));
    w.walk_children(id);
    w.builder().add_literal(opts.suffix.as_deref().unwrap_or(""));
    Ok(())
}

fn line_break(w: &mut Walker<'_>, _: NodeId, _: &FormatOptions) -> Result<(), BuilderError> {
    w.builder().add_line_break();
    Ok(())
}

fn wbr(w: &mut Walker<'_>, _: NodeId, _: &FormatOptions) -> Result<(), BuilderError> {
    w.builder().add_word_break_opportunity();
    Ok(())
}

fn horizontal_line(w: &mut Walker<'_>, _: NodeId, opts: &FormatOptions) -> Result<(), BuilderError> {
    let length = opts.length.or(w.options().wordwrap).unwrap_or(40);
    open_block(w, leading(opts, 2));
    w.builder().add_literal(&"-".repeat(length));
    w.builder().close_block(trailing(opts, 2), None)
}

fn paragraph(w: &mut Walker<'_>, id: NodeId, opts: &FormatOptions) -> Result<(), BuilderError> {
    block_with(w, id, opts, 2)
}

fn pre(w: &mut Walker<'_>, id: NodeId, opts: &FormatOptions) -> Result<(), BuilderError> {
    w.builder().open_block(BlockOpen {
        leading_line_breaks: leading(opts, 2),
        is_pre: true,
        ..BlockOpen::default()
    });
    w.walk_children(id);
    w.builder().close_block(trailing(opts, 2), None)
}

fn heading(w: &mut Walker<'_>, id: NodeId, opts: &FormatOptions) -> Result<(), BuilderError> {
    open_block(w, leading(opts, 2));
    if opts.uppercase != Some(false) {
        w.builder().push_word_transform(|word| word.to_uppercase());
        w.walk_children(id);
        w.builder().pop_word_transform();
    } else {
        w.walk_children(id);
    }
    w.builder().close_block(trailing(opts, 2), None)
}

fn blockquote(w: &mut Walker<'_>, id: NodeId, opts: &FormatOptions) -> Result<(), BuilderError> {
    w.builder().open_block(BlockOpen {
        leading_line_breaks: leading(opts, 2),
        reserved_line_length: 2,
        is_pre: false,
    });
    w.walk_children(id);
    let trim = opts.trim_empty_lines != Some(false);
    let quote = move |text: String| {
        let text = if trim { text.trim_matches('\n') } else { text.as_str() };
        text.split('\n')
            .map(|line| format!("> {line}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    w.builder().close_block(trailing(opts, 2), Some(&quote))
}

// `href` resolved against `base_url` when it is relative.
fn resolve_url(base_url: Option<&str>, href: &str) -> String {
    let Some(base) = base_url else {
        return href.to_string();
    };
    if Url::parse(href).is_ok() {
        return href.to_string();
    }
    Url::parse(base)
        .and_then(|base| base.join(href))
        .map(String::from)
        .unwrap_or_else(|_| href.to_string())
}

fn anchor_href(w: &Walker<'_>, id: NodeId, opts: &FormatOptions) -> Option<String> {
    if opts.ignore_href == Some(true) {
        return None;
    }
    let href = w.element(id)?.attr("href").filter(|h| !h.is_empty())?;
    let href = href.strip_prefix("mailto:").unwrap_or(href);
    if opts.no_anchor_url == Some(true) && href.starts_with('#') {
        return None;
    }
    Some(resolve_url(opts.base_url.as_deref(), href))
}

fn anchor(w: &mut Walker<'_>, id: NodeId, opts: &FormatOptions) -> Result<(), BuilderError> {
    let Some(href) = anchor_href(w, id, opts) else {
        w.walk_children(id);
        return Ok(());
    };
    w.builder().push_word_capture();
    w.walk_children(id);
    let text = w.builder().pop_word_transform().unwrap_or_default();
    if opts.hide_link_href_if_same_as_text == Some(true) && href == text {
        return Ok(());
    }
    let shown = if text.is_empty() {
        href
    } else {
        let brackets = opts.link_brackets.clone().unwrap_or_default();
        format!(" {}", brackets.wrap(&href))
    };
    w.builder().add_inline(&shown, true);
    Ok(())
}

fn image(w: &mut Walker<'_>, id: NodeId, opts: &FormatOptions) -> Result<(), BuilderError> {
    let Some(el) = w.element(id) else {
        return Ok(());
    };
    let alt = el.attr("alt").unwrap_or("");
    let brackets = opts.link_brackets.clone().unwrap_or_default();
    let src = el
        .attr("src")
        .filter(|s| !s.is_empty())
        .map(|s| brackets.wrap(&resolve_url(opts.base_url.as_deref(), s)));
    let text = match src {
        None => alt.to_string(),
        Some(src) if alt.is_empty() => src,
        Some(src) => format!("{alt} {src}"),
    };
    w.builder().add_inline(&text, true);
    Ok(())
}

fn format_list(
    w: &mut Walker<'_>,
    id: NodeId,
    opts: &FormatOptions,
    next_prefix: &mut dyn FnMut() -> String,
) -> Result<(), BuilderError> {
    let doc = w.document();
    let nested = doc
        .parent(id)
        .and_then(|p| doc.element(p))
        .is_some_and(|p| p.name == "li");

    let mut max_prefix_length = 0;
    let mut items: Vec<(NodeId, String)> = Vec::new();
    for child in doc.children(id) {
        let node = doc.node(child);
        if let Some(text) = node.as_text() {
            if text.chars().all(char::is_whitespace) {
                continue;
            }
            items.push((child, String::new()));
            continue;
        }
        let Some(el) = node.as_element() else {
            continue;
        };
        if el.name != "li" {
            items.push((child, String::new()));
            continue;
        }
        let prefix = next_prefix();
        let prefix = if nested {
            prefix.trim_start().to_string()
        } else {
            prefix
        };
        max_prefix_length = max_prefix_length.max(char_len(&prefix));
        items.push((child, prefix));
    }
    if items.is_empty() {
        return Ok(());
    }

    w.builder().open_list(ListOpen {
        max_prefix_length,
        prefix_align: PrefixAlign::Left,
        inter_row_line_breaks: 1,
        leading_line_breaks: if nested { 1 } else { leading(opts, 2) },
    });
    for (node, prefix) in items {
        w.builder().open_list_item(&prefix)?;
        w.walk(&[node]);
        w.builder().close_list_item()?;
    }
    w.builder()
        .close_list(if nested { 1 } else { trailing(opts, 2) })
}

fn unordered_list(w: &mut Walker<'_>, id: NodeId, opts: &FormatOptions) -> Result<(), BuilderError> {
    let prefix = opts.item_prefix.clone().unwrap_or_else(|| " * ".to_string());
    format_list(w, id, opts, &mut || prefix.clone())
}

fn ordered_list(w: &mut Walker<'_>, id: NodeId, opts: &FormatOptions) -> Result<(), BuilderError> {
    let el = w.element(id);
    let mut index = el
        .and_then(|e| e.attr("start"))
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(1);
    let kind = el.and_then(|e| e.attr("type")).unwrap_or("1").to_string();
    format_list(w, id, opts, &mut || {
        let label = list_label(index, &kind);
        index += 1;
        format!(" {label}. ")
    })
}

/// Marker text for list item `n` under an `<ol type=..>`. Letters and roman
/// numerals need a positive index; other indices fall back to decimal.
pub fn list_label(n: i64, kind: &str) -> String {
    let positive = u64::try_from(n).ok().filter(|&n| n > 0);
    match (kind, positive) {
        ("a", Some(n)) => letter_sequence(n, b'a'),
        ("A", Some(n)) => letter_sequence(n, b'A'),
        ("i", Some(n)) => roman(n).to_lowercase(),
        ("I", Some(n)) => roman(n),
        _ => n.to_string(),
    }
}

// 1 -> a, 26 -> z, 27 -> aa.
fn letter_sequence(mut n: u64, base: u8) -> String {
    let mut digits = Vec::new();
    loop {
        n -= 1;
        digits.push(char::from(base + (n % 26) as u8));
        n /= 26;
        if n == 0 {
            break;
        }
    }
    digits.iter().rev().collect()
}

fn roman(mut n: u64) -> String {
    const NUMERALS: [(u64, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}

fn table(w: &mut Walker<'_>, id: NodeId, opts: &FormatOptions) -> Result<(), BuilderError> {
    if w.is_data_table(id) {
        data_table(w, id, opts)
    } else {
        w.walk_children(id);
        Ok(())
    }
}

fn data_table(w: &mut Walker<'_>, id: NodeId, opts: &FormatOptions) -> Result<(), BuilderError> {
    w.builder().open_table();
    table_sections(w, id, opts)?;
    w.builder().close_table(TableClose {
        leading_line_breaks: leading(opts, 2),
        trailing_line_breaks: trailing(opts, 2),
        col_spacing: opts.col_spacing.unwrap_or(3),
        row_spacing: opts.row_spacing.unwrap_or(0),
    })
}

fn table_sections(w: &mut Walker<'_>, id: NodeId, opts: &FormatOptions) -> Result<(), BuilderError> {
    let doc = w.document();
    for child in doc.children(id) {
        let Some(el) = doc.element(child) else {
            continue;
        };
        match el.name.as_str() {
            "thead" | "tbody" | "tfoot" | "center" => table_sections(w, child, opts)?,
            "tr" => table_row(w, child, opts)?,
            _ => {}
        }
    }
    Ok(())
}

fn table_row(w: &mut Walker<'_>, id: NodeId, opts: &FormatOptions) -> Result<(), BuilderError> {
    let doc = w.document();
    w.builder().open_table_row()?;
    for child in doc.children(id) {
        match doc.element(child).map(|el| el.name.as_str()) {
            Some("th") if opts.uppercase_header_cells != Some(false) => {
                w.builder().push_word_transform(|word| word.to_uppercase());
                let result = table_cell(w, child, opts);
                w.builder().pop_word_transform();
                result?;
            }
            Some("th" | "td") => table_cell(w, child, opts)?,
            _ => {}
        }
    }
    w.builder().close_table_row()
}

fn span(w: &Walker<'_>, id: NodeId, name: &str) -> usize {
    w.element(id)
        .and_then(|el| el.attr(name))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(1)
}

fn table_cell(w: &mut Walker<'_>, id: NodeId, opts: &FormatOptions) -> Result<(), BuilderError> {
    let colspan = span(w, id, "colspan");
    let rowspan = span(w, id, "rowspan");
    w.builder().open_table_cell(opts.max_column_width)?;
    w.walk_children(id);
    w.builder().close_table_cell(colspan, rowspan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_list_labels() {
        assert_eq!(list_label(3, "1"), "3");
        assert_eq!(list_label(1, "a"), "a");
        assert_eq!(list_label(28, "A"), "AB");
        assert_eq!(list_label(1994, "I"), "MCMXCIV");
        assert_eq!(list_label(4, "i"), "iv");
        assert_eq!(list_label(0, "a"), "0");
        assert_eq!(list_label(-2, "I"), "-2");
    }

    #[test]
    fn relative_urls_resolve_against_the_base() {
        assert_eq!(
            resolve_url(Some("https://example.org/docs/"), "/a/b"),
            "https://example.org/a/b"
        );
        assert_eq!(
            resolve_url(Some("https://example.org/docs/"), "guide.html"),
            "https://example.org/docs/guide.html"
        );
        assert_eq!(
            resolve_url(Some("https://example.org/"), "mailto:x@y.z"),
            "mailto:x@y.z"
        );
        assert_eq!(resolve_url(None, "/a"), "/a");
        assert_eq!(resolve_url(Some("not a url"), "/a"), "/a");
    }

    #[test]
    fn builtin_registry_has_every_name() {
        let f = Formatters::builtin();
        for name in [
            "inline",
            "block",
            "skip",
            "inlineString",
            "blockString",
            "inlineTag",
            "blockTag",
            "inlineHtml",
            "blockHtml",
            "inlineSurround",
            "lineBreak",
            "wbr",
            "horizontalLine",
            "paragraph",
            "pre",
            "heading",
            "blockquote",
            "anchor",
            "image",
            "unorderedList",
            "orderedList",
            "table",
            "dataTable",
        ] {
            assert!(f.contains(name), "missing {name}");
        }
        assert!(!f.contains("marquee"));
    }
}
