use std::rc::Rc;

use super::breaker::{char_len, split_long_word};
use crate::options::LongWordSplit;

/// Collects words into lines no longer than `max_line_length` characters.
///
/// Words on a line are joined by one space. A word that does not fit starts
/// a new line; a word longer than a whole line is split (see
/// [`LongWordSplit`]). Words added with `no_wrap` are appended regardless of
/// the remaining width.
#[derive(Debug, Clone)]
pub struct InlineTextBuilder {
    lines: Vec<Vec<String>>,
    next_line_words: Vec<String>,
    max_line_length: usize,
    // Characters used on the current line, separators included.
    used: usize,
    split: Rc<LongWordSplit>,
    /// Whitespace was seen after the last word; the next word must not be
    /// glued to it.
    pub stashed_space: bool,
    /// A `<wbr>` was seen; the next glued word may go to a new line instead.
    pub word_break_opportunity: bool,
}

impl InlineTextBuilder {
    /// `None` means unbounded lines.
    pub fn new(max_line_length: Option<usize>, split: Rc<LongWordSplit>) -> Self {
        Self {
            lines: Vec::new(),
            next_line_words: Vec::new(),
            max_line_length: max_line_length.unwrap_or(usize::MAX).max(1),
            used: 0,
            split,
            stashed_space: false,
            word_break_opportunity: false,
        }
    }

    pub fn max_line_length(&self) -> usize {
        self.max_line_length
    }

    fn available(&self) -> usize {
        self.max_line_length.saturating_sub(self.used)
    }

    pub fn push_word(&mut self, word: String, no_wrap: bool) {
        if self.available() == 0 && !no_wrap {
            self.start_new_line(1);
        }
        let is_line_start = self.next_line_words.is_empty();
        let cost = char_len(&word) + usize::from(!is_line_start);
        if no_wrap || cost <= self.available() {
            self.next_line_words.push(word);
            self.used += cost;
            return;
        }

        let mut parts = split_long_word(&word, self.max_line_length, &self.split).into_iter();
        if !is_line_start {
            self.start_new_line(1);
        }
        if let Some(first) = parts.next() {
            self.used += char_len(&first);
            self.next_line_words.push(first);
        }
        for part in parts {
            self.start_new_line(1);
            self.used += char_len(&part);
            self.next_line_words.push(part);
        }
    }

    fn pop_word(&mut self) -> Option<String> {
        let word = self.next_line_words.pop()?;
        let is_line_start = self.next_line_words.is_empty();
        self.used -= char_len(&word) + usize::from(!is_line_start);
        Some(word)
    }

    /// Append `word` to the last word on the line without a separator.
    pub fn concat_word(&mut self, word: String, no_wrap: bool) {
        if self.word_break_opportunity && char_len(&word) > self.available() {
            self.push_word(word, no_wrap);
            self.word_break_opportunity = false;
        } else {
            match self.pop_word() {
                Some(mut last) => {
                    last.push_str(&word);
                    self.push_word(last, no_wrap);
                }
                None => self.push_word(word, no_wrap),
            }
        }
    }

    /// Finish the current line and add `n - 1` empty ones after it.
    pub fn start_new_line(&mut self, n: usize) {
        self.lines.push(std::mem::take(&mut self.next_line_words));
        for _ in 1..n {
            self.lines.push(Vec::new());
        }
        self.used = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.next_line_words.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.next_line_words.clear();
        self.used = 0;
    }

    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, words) in self.lines.iter().chain([&self.next_line_words]).enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&words.join(" "));
        }
        out
    }
}
