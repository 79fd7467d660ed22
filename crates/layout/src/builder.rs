//! Block text builder.
//!
//! Formatters drive a stack of frames: blocks, lists and list items, tables,
//! rows and cells. Text goes to the frame on top; closing a frame merges its
//! text into the frame below, separated by the larger of the two pending
//! line-break counts.
//!
//! Word transforms (uppercasing, link text capture) live on a separate stack
//! because they cross frame boundaries.

use std::rc::Rc;

use crate::error::BuilderError;
use crate::inline::{InlineTextBuilder, char_len};
use crate::options::{ConvertOptions, LongWordSplit};
use crate::table::{TableCell, table_to_string};
use crate::whitespace::WhitespaceProcessor;

/// Text state shared by every frame that holds text.
#[derive(Debug, Clone)]
pub struct TextFrame {
    inline: InlineTextBuilder,
    raw_text: String,
    leading_line_breaks: usize,
    stashed_line_breaks: usize,
    is_pre: bool,
    is_no_wrap: bool,
}

impl TextFrame {
    fn new(inline: InlineTextBuilder, leading_line_breaks: usize, flags: (bool, bool)) -> Self {
        Self {
            inline,
            raw_text: String::new(),
            leading_line_breaks,
            stashed_line_breaks: 0,
            is_pre: flags.0,
            is_no_wrap: flags.1,
        }
    }

    fn text(&self) -> String {
        if self.inline.is_empty() {
            self.raw_text.clone()
        } else {
            format!("{}{}", self.raw_text, self.inline.text())
        }
    }

    // Everything so far becomes raw text; `text` follows after the line
    // breaks both sides asked for.
    fn add_text(&mut self, text: &str, leading_line_breaks: usize, trailing_line_breaks: usize) {
        let parent_text = self.text();
        let line_breaks = self.stashed_line_breaks.max(leading_line_breaks);
        self.inline.clear();
        if parent_text.is_empty() {
            self.raw_text = text.to_string();
            self.leading_line_breaks = line_breaks;
        } else {
            self.raw_text = parent_text;
            self.raw_text.extend(std::iter::repeat_n('\n', line_breaks));
            self.raw_text.push_str(text);
        }
        self.stashed_line_breaks = trailing_line_breaks;
    }
}

/// Where list item prefixes are padded to the common width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrefixAlign {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct ListFrame {
    text: TextFrame,
    max_prefix_length: usize,
    prefix_align: PrefixAlign,
    inter_row_line_breaks: usize,
}

#[derive(Debug, Clone)]
pub struct ListItemFrame {
    text: TextFrame,
    prefix: String,
}

#[derive(Debug, Clone)]
pub struct TableFrame {
    rows: Vec<Vec<TableCell>>,
    flags: (bool, bool),
}

#[derive(Debug, Clone)]
pub struct TableRowFrame {
    cells: Vec<TableCell>,
    flags: (bool, bool),
}

/// One frame of the builder stack.
#[derive(Debug, Clone)]
pub enum StackItem {
    Block(TextFrame),
    List(ListFrame),
    ListItem(ListItemFrame),
    Table(TableFrame),
    TableRow(TableRowFrame),
    TableCell(TextFrame),
}

impl StackItem {
    pub fn kind(&self) -> &'static str {
        match self {
            StackItem::Block(_) => "block",
            StackItem::List(_) => "list",
            StackItem::ListItem(_) => "list item",
            StackItem::Table(_) => "table",
            StackItem::TableRow(_) => "table row",
            StackItem::TableCell(_) => "table cell",
        }
    }

    fn text_frame(&self) -> Option<&TextFrame> {
        match self {
            StackItem::Block(t) | StackItem::TableCell(t) => Some(t),
            StackItem::List(l) => Some(&l.text),
            StackItem::ListItem(li) => Some(&li.text),
            StackItem::Table(_) | StackItem::TableRow(_) => None,
        }
    }

    fn text_frame_mut(&mut self) -> Option<&mut TextFrame> {
        match self {
            StackItem::Block(t) | StackItem::TableCell(t) => Some(t),
            StackItem::List(l) => Some(&mut l.text),
            StackItem::ListItem(li) => Some(&mut li.text),
            StackItem::Table(_) | StackItem::TableRow(_) => None,
        }
    }

    // (is_pre, is_no_wrap), inherited by frames opened on top.
    fn flags(&self) -> (bool, bool) {
        match self {
            StackItem::Table(t) => t.flags,
            StackItem::TableRow(r) => r.flags,
            _ => self
                .text_frame()
                .map_or((false, false), |t| (t.is_pre, t.is_no_wrap)),
        }
    }
}

enum WordTransform {
    Map(Box<dyn Fn(&str) -> String>),
    Capture(String),
}

// Innermost transform first, then character encoding.
fn transform_word(
    transforms: &mut [WordTransform],
    encode: &[(String, String)],
    word: &str,
) -> String {
    let mut word = word.to_string();
    for transform in transforms.iter_mut().rev() {
        match transform {
            WordTransform::Map(f) => word = f(&word),
            WordTransform::Capture(text) => text.push_str(&word),
        }
    }
    encode_characters(encode, word)
}

fn encode_characters(encode: &[(String, String)], mut word: String) -> String {
    for (from, to) in encode {
        if word.contains(from.as_str()) {
            word = word.replace(from.as_str(), to);
        }
    }
    word
}

#[derive(Debug, Clone, Copy)]
pub struct BlockOpen {
    pub leading_line_breaks: usize,
    /// Characters taken from the parent's line length, e.g. for a quote
    /// prefix.
    pub reserved_line_length: usize,
    pub is_pre: bool,
}

impl Default for BlockOpen {
    fn default() -> Self {
        Self {
            leading_line_breaks: 1,
            reserved_line_length: 0,
            is_pre: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListOpen {
    /// Width every item prefix is padded to.
    pub max_prefix_length: usize,
    pub prefix_align: PrefixAlign,
    pub inter_row_line_breaks: usize,
    pub leading_line_breaks: usize,
}

impl Default for ListOpen {
    fn default() -> Self {
        Self {
            max_prefix_length: 0,
            prefix_align: PrefixAlign::Left,
            inter_row_line_breaks: 1,
            leading_line_breaks: 2,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TableClose {
    pub leading_line_breaks: usize,
    pub trailing_line_breaks: usize,
    pub col_spacing: usize,
    pub row_spacing: usize,
}

impl Default for TableClose {
    fn default() -> Self {
        Self {
            leading_line_breaks: 2,
            trailing_line_breaks: 2,
            col_spacing: 3,
            row_spacing: 0,
        }
    }
}

// Width of a frame nested in one of `parent` characters.
fn nested_width(parent: usize, reserved: usize) -> usize {
    parent.saturating_sub(reserved).max(20.min(parent))
}

pub struct BlockTextBuilder {
    stack: Vec<StackItem>,
    transforms: Vec<WordTransform>,
    whitespace: WhitespaceProcessor,
    split: Rc<LongWordSplit>,
    wordwrap: Option<usize>,
    preserve_newlines: bool,
    encode: Vec<(String, String)>,
}

impl BlockTextBuilder {
    pub fn new(options: &ConvertOptions) -> Self {
        let split = Rc::new(options.long_word_split.clone());
        let root = InlineTextBuilder::new(options.wordwrap, Rc::clone(&split));
        Self {
            stack: vec![StackItem::Block(TextFrame::new(root, 1, (false, false)))],
            transforms: Vec::new(),
            whitespace: WhitespaceProcessor::new(
                &options.whitespace_characters,
                options.preserve_newlines,
            ),
            split,
            wordwrap: options.wordwrap,
            preserve_newlines: options.preserve_newlines,
            encode: options
                .encode_characters
                .iter()
                .filter(|(from, _)| !from.is_empty())
                .map(|(from, to)| (from.clone(), to.clone()))
                .collect(),
        }
    }

    /// Stack depth, the root block included.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn top(&self) -> &StackItem {
        &self.stack[self.stack.len() - 1]
    }

    fn top_mut(&mut self) -> &mut StackItem {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn top_flags(&self) -> (bool, bool) {
        self.top().flags()
    }

    // Line length of the nearest frame holding text.
    fn line_width(&self) -> usize {
        self.stack
            .iter()
            .rev()
            .find_map(StackItem::text_frame)
            .map_or(usize::MAX, |t| t.inline.max_line_length())
    }

    fn inline_builder(&self, width: usize) -> InlineTextBuilder {
        InlineTextBuilder::new(Some(width), Rc::clone(&self.split))
    }

    fn pop(&mut self) -> Result<StackItem, BuilderError> {
        if self.stack.len() <= 1 {
            return Err(BuilderError::CloseRoot);
        }
        self.stack.pop().ok_or(BuilderError::CloseRoot)
    }

    fn pop_expecting(&mut self, expected: &'static str) -> Result<StackItem, BuilderError> {
        let found = self.top().kind();
        if found != expected {
            return Err(BuilderError::CloseMismatch { expected, found });
        }
        self.pop()
    }

    // Merge finished text into the frame now on top.
    fn add_text_to_top(
        &mut self,
        text: &str,
        leading_line_breaks: usize,
        trailing_line_breaks: usize,
    ) -> Result<(), BuilderError> {
        let top = self.top_mut();
        let found = top.kind();
        let frame = top
            .text_frame_mut()
            .ok_or(BuilderError::CloseMismatch {
                expected: "block",
                found,
            })?;
        frame.add_text(text, leading_line_breaks, trailing_line_breaks);
        Ok(())
    }

    /// Apply `f` to every word added until the matching
    /// [`pop_word_transform`](Self::pop_word_transform).
    pub fn push_word_transform(&mut self, f: impl Fn(&str) -> String + 'static) {
        self.transforms.push(WordTransform::Map(Box::new(f)));
    }

    /// Record every word added until the matching
    /// [`pop_word_transform`](Self::pop_word_transform), which returns them
    /// concatenated.
    pub fn push_word_capture(&mut self) {
        self.transforms.push(WordTransform::Capture(String::new()));
    }

    /// Captured text for a capture frame, `None` for a mapping frame.
    pub fn pop_word_transform(&mut self) -> Option<String> {
        match self.transforms.pop()? {
            WordTransform::Map(_) => None,
            WordTransform::Capture(text) => Some(text),
        }
    }

    pub fn start_no_wrap(&mut self) {
        if let Some(frame) = self.top_mut().text_frame_mut() {
            frame.is_no_wrap = true;
        }
    }

    pub fn stop_no_wrap(&mut self) {
        if let Some(frame) = self.top_mut().text_frame_mut() {
            frame.is_no_wrap = false;
        }
    }

    pub fn add_line_break(&mut self) {
        let Some(frame) = self.top_mut().text_frame_mut() else {
            return;
        };
        if frame.is_pre {
            frame.raw_text.push('\n');
        } else {
            frame.inline.start_new_line(1);
        }
    }

    pub fn add_word_break_opportunity(&mut self) {
        if let Some(frame) = self.top_mut().text_frame_mut() {
            frame.inline.word_break_opportunity = true;
        }
    }

    /// Add text with whitespace collapsed and word wrap applied.
    pub fn add_inline(&mut self, text: &str, no_word_transform: bool) {
        let last = self.stack.len() - 1;
        let Some(frame) = self.stack[last].text_frame_mut() else {
            return;
        };
        if frame.is_pre {
            frame.raw_text.push_str(text);
            return;
        }
        if text.is_empty()
            || (frame.stashed_line_breaks > 0 && !self.whitespace.contains_words(text))
        {
            return;
        }
        if self.preserve_newlines {
            let newlines = self.whitespace.count_newlines_no_words(text);
            if newlines > 0 {
                frame.inline.start_new_line(newlines);
                return;
            }
        }
        if frame.stashed_line_breaks > 0 {
            frame.inline.start_new_line(frame.stashed_line_breaks);
        }
        let no_wrap = frame.is_no_wrap;
        let transforms = &mut self.transforms;
        let encode = &self.encode;
        let mut transform = |word: &str| {
            if no_word_transform {
                word.to_string()
            } else {
                transform_word(transforms, encode, word)
            }
        };
        self.whitespace
            .shrink_wrap_add(text, &mut frame.inline, &mut transform, no_wrap);
        frame.stashed_line_breaks = 0;
    }

    /// Add text as is: spaces kept, no word transforms, `\n` breaks lines.
    pub fn add_literal(&mut self, text: &str) {
        let last = self.stack.len() - 1;
        let Some(frame) = self.stack[last].text_frame_mut() else {
            return;
        };
        if text.is_empty() {
            return;
        }
        if frame.is_pre {
            frame.raw_text.push_str(text);
            return;
        }
        if frame.stashed_line_breaks > 0 {
            frame.inline.start_new_line(frame.stashed_line_breaks);
        }
        let no_wrap = frame.is_no_wrap;
        self.whitespace
            .add_literal(text, &mut frame.inline, no_wrap);
        frame.stashed_line_breaks = 0;
    }

    pub fn open_block(&mut self, open: BlockOpen) {
        let width = nested_width(self.line_width(), open.reserved_line_length);
        let (is_pre, is_no_wrap) = self.top_flags();
        let frame = TextFrame::new(
            self.inline_builder(width),
            open.leading_line_breaks,
            (is_pre || open.is_pre, is_no_wrap),
        );
        self.stack.push(StackItem::Block(frame));
    }

    /// Close the current block; `block_transform` rewrites its whole text.
    pub fn close_block(
        &mut self,
        trailing_line_breaks: usize,
        block_transform: Option<&dyn Fn(String) -> String>,
    ) -> Result<(), BuilderError> {
        let StackItem::Block(block) = self.pop_expecting("block")? else {
            return Err(BuilderError::CloseRoot);
        };
        let text = match block_transform {
            Some(f) => f(block.text()),
            None => block.text(),
        };
        self.add_text_to_top(
            &text,
            block.leading_line_breaks,
            block.stashed_line_breaks.max(trailing_line_breaks),
        )
    }

    pub fn open_list(&mut self, open: ListOpen) {
        let width = self.line_width();
        let text = TextFrame::new(
            self.inline_builder(width),
            open.leading_line_breaks,
            self.top_flags(),
        );
        self.stack.push(StackItem::List(ListFrame {
            text,
            max_prefix_length: open.max_prefix_length,
            prefix_align: open.prefix_align,
            inter_row_line_breaks: open.inter_row_line_breaks,
        }));
    }

    pub fn open_list_item(&mut self, prefix: &str) -> Result<(), BuilderError> {
        let StackItem::List(list) = self.top() else {
            return Err(BuilderError::ListItemOutsideList {
                found: self.top().kind(),
            });
        };
        let prefix_length = char_len(prefix).max(list.max_prefix_length);
        let width = nested_width(list.text.inline.max_line_length(), prefix_length);
        let leading = list.inter_row_line_breaks;
        let text = TextFrame::new(self.inline_builder(width), leading, self.top_flags());
        self.stack.push(StackItem::ListItem(ListItemFrame {
            text,
            prefix: prefix.to_string(),
        }));
        Ok(())
    }

    pub fn close_list_item(&mut self) -> Result<(), BuilderError> {
        let StackItem::ListItem(item) = self.pop_expecting("list item")? else {
            return Err(BuilderError::CloseRoot);
        };
        let StackItem::List(list) = self.top_mut() else {
            return Err(BuilderError::CloseMismatch {
                expected: "list",
                found: self.top().kind(),
            });
        };
        let prefix_length = char_len(&item.prefix).max(list.max_prefix_length);
        let pad = prefix_length - char_len(&item.prefix);
        let prefix = match list.prefix_align {
            PrefixAlign::Left => format!("{}{}", item.prefix, " ".repeat(pad)),
            PrefixAlign::Right => format!("{}{}", " ".repeat(pad), item.prefix),
        };
        let spacing = format!("\n{}", " ".repeat(prefix_length));
        let text = format!("{prefix}{}", item.text.text().replace('\n', &spacing));
        let trailing = item.text.stashed_line_breaks.max(list.inter_row_line_breaks);
        list.text
            .add_text(&text, item.text.leading_line_breaks, trailing);
        Ok(())
    }

    pub fn close_list(&mut self, trailing_line_breaks: usize) -> Result<(), BuilderError> {
        let StackItem::List(list) = self.pop_expecting("list")? else {
            return Err(BuilderError::CloseRoot);
        };
        let text = list.text.text();
        if text.is_empty() {
            return Ok(());
        }
        self.add_text_to_top(&text, list.text.leading_line_breaks, trailing_line_breaks)
    }

    pub fn open_table(&mut self) {
        let flags = self.top_flags();
        self.stack.push(StackItem::Table(TableFrame {
            rows: Vec::new(),
            flags,
        }));
    }

    pub fn open_table_row(&mut self) -> Result<(), BuilderError> {
        let StackItem::Table(table) = self.top() else {
            return Err(BuilderError::RowOutsideTable {
                found: self.top().kind(),
            });
        };
        let flags = table.flags;
        self.stack.push(StackItem::TableRow(TableRowFrame {
            cells: Vec::new(),
            flags,
        }));
        Ok(())
    }

    /// Without `max_column_width` the cell wraps at the configured width.
    pub fn open_table_cell(&mut self, max_column_width: Option<usize>) -> Result<(), BuilderError> {
        let StackItem::TableRow(row) = self.top() else {
            return Err(BuilderError::CellOutsideRow {
                found: self.top().kind(),
            });
        };
        let flags = row.flags;
        let inline = InlineTextBuilder::new(
            max_column_width.or(self.wordwrap),
            Rc::clone(&self.split),
        );
        self.stack
            .push(StackItem::TableCell(TextFrame::new(inline, 0, flags)));
        Ok(())
    }

    pub fn close_table_cell(&mut self, colspan: usize, rowspan: usize) -> Result<(), BuilderError> {
        let StackItem::TableCell(cell) = self.pop_expecting("table cell")? else {
            return Err(BuilderError::CloseRoot);
        };
        let text = cell.text().trim_matches('\n').to_string();
        let StackItem::TableRow(row) = self.top_mut() else {
            return Err(BuilderError::CloseMismatch {
                expected: "table row",
                found: self.top().kind(),
            });
        };
        row.cells.push(TableCell::spanning(text, colspan, rowspan));
        Ok(())
    }

    pub fn close_table_row(&mut self) -> Result<(), BuilderError> {
        let StackItem::TableRow(row) = self.pop_expecting("table row")? else {
            return Err(BuilderError::CloseRoot);
        };
        let StackItem::Table(table) = self.top_mut() else {
            return Err(BuilderError::CloseMismatch {
                expected: "table",
                found: self.top().kind(),
            });
        };
        table.rows.push(row.cells);
        Ok(())
    }

    pub fn close_table(&mut self, close: TableClose) -> Result<(), BuilderError> {
        let StackItem::Table(table) = self.pop_expecting("table")? else {
            return Err(BuilderError::CloseRoot);
        };
        let output = table_to_string(&table.rows, close.row_spacing, close.col_spacing);
        if output.is_empty() {
            return Ok(());
        }
        self.add_text_to_top(&output, close.leading_line_breaks, close.trailing_line_breaks)
    }

    /// Text of the root block. Frames still open are ignored.
    pub fn text(&self) -> String {
        self.stack[0].text_frame().map(TextFrame::text).unwrap_or_default()
    }
}
