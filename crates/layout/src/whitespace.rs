//! Whitespace collapsing between source text and the inline builder.

use crate::inline::InlineTextBuilder;

enum Segment<'t> {
    Word(&'t str),
    Newline,
}

/// Splits text into words on a configurable whitespace set.
///
/// Without `preserve_newlines`, every whitespace run is one separator. With
/// it, `\n` is removed from the set and each `\n` becomes a line break.
#[derive(Debug, Clone)]
pub struct WhitespaceProcessor {
    whitespace: Vec<char>,
    preserve_newlines: bool,
}

impl WhitespaceProcessor {
    pub fn new(whitespace_characters: &str, preserve_newlines: bool) -> Self {
        let whitespace = whitespace_characters
            .chars()
            .filter(|&c| !(preserve_newlines && c == '\n'))
            .collect();
        Self {
            whitespace,
            preserve_newlines,
        }
    }

    fn is_space(&self, c: char) -> bool {
        self.whitespace.contains(&c)
    }

    fn starts_with_space(&self, text: &str) -> bool {
        text.chars().next().is_some_and(|c| self.is_space(c))
    }

    fn ends_with_space(&self, text: &str) -> bool {
        text.chars().next_back().is_some_and(|c| self.is_space(c))
    }

    pub fn contains_words(&self, text: &str) -> bool {
        text.chars().any(|c| !self.is_space(c))
    }

    /// Number of `\n` in `text` when it holds nothing but whitespace, else 0.
    pub fn count_newlines_no_words(&self, text: &str) -> usize {
        let mut count = 0;
        for c in text.chars() {
            if c == '\n' {
                count += 1;
            } else if !self.is_space(c) {
                return 0;
            }
        }
        count
    }

    fn segments<'t>(&self, text: &'t str) -> Vec<Segment<'t>> {
        let mut out = Vec::new();
        let mut start = None;
        for (i, c) in text.char_indices() {
            let newline = self.preserve_newlines && c == '\n';
            if newline || self.is_space(c) {
                if let Some(s) = start.take() {
                    out.push(Segment::Word(&text[s..i]));
                }
                if newline {
                    out.push(Segment::Newline);
                }
            } else if start.is_none() {
                start = Some(i);
            }
        }
        if let Some(s) = start {
            out.push(Segment::Word(&text[s..]));
        }
        out
    }

    /// Add collapsible text. The first word is glued to the previous one
    /// unless whitespace separates them.
    pub fn shrink_wrap_add(
        &self,
        text: &str,
        inline: &mut InlineTextBuilder,
        transform: &mut dyn FnMut(&str) -> String,
        no_wrap: bool,
    ) {
        if text.is_empty() {
            return;
        }
        let previously_stashed = inline.stashed_space;
        let segments = self.segments(text);
        for (i, segment) in segments.iter().enumerate() {
            match segment {
                Segment::Newline => inline.start_new_line(1),
                Segment::Word(word) if i > 0 || previously_stashed || self.starts_with_space(text) => {
                    inline.push_word(transform(word), no_wrap)
                }
                Segment::Word(word) => inline.concat_word(transform(word), no_wrap),
            }
        }
        inline.stashed_space =
            (previously_stashed && segments.is_empty()) || self.ends_with_space(text);
    }

    /// Add text whose spaces are kept; only `\n` breaks lines.
    pub fn add_literal(&self, text: &str, inline: &mut InlineTextBuilder, no_wrap: bool) {
        if text.is_empty() {
            return;
        }
        let previously_stashed = inline.stashed_space;
        let mut any = false;
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                any = true;
                inline.start_new_line(1);
            }
            if line.is_empty() {
                continue;
            }
            if any || previously_stashed {
                inline.push_word(line.to_string(), no_wrap);
            } else {
                inline.concat_word(line.to_string(), no_wrap);
            }
            any = true;
        }
        inline.stashed_space = previously_stashed && !any;
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::options::LongWordSplit;

    fn inline() -> InlineTextBuilder {
        InlineTextBuilder::new(Some(80), Rc::new(LongWordSplit::default()))
    }

    fn add(p: &WhitespaceProcessor, b: &mut InlineTextBuilder, text: &str) {
        p.shrink_wrap_add(text, b, &mut |w| w.to_string(), false);
    }

    #[test]
    fn runs_collapse_and_adjacent_text_glues() {
        let p = WhitespaceProcessor::new(" \t\r\n", false);
        let mut b = inline();
        add(&p, &mut b, "  Hello \n\t ");
        add(&p, &mut b, "world");
        add(&p, &mut b, ".");
        assert_eq!(b.text(), "Hello world.");
    }

    #[test]
    fn preserved_newlines_break_lines() {
        let p = WhitespaceProcessor::new(" \t\r\n", true);
        let mut b = inline();
        add(&p, &mut b, "a  b\nc\n\nd");
        assert_eq!(b.text(), "a b\nc\n\nd");
        assert_eq!(p.count_newlines_no_words(" \n \n"), 2);
        assert_eq!(p.count_newlines_no_words("\nx\n"), 0);
    }

    #[test]
    fn whitespace_only_text_just_stashes_a_space() {
        let p = WhitespaceProcessor::new(" \n", false);
        let mut b = inline();
        add(&p, &mut b, "a");
        add(&p, &mut b, "   ");
        add(&p, &mut b, "b");
        assert_eq!(b.text(), "a b");
        assert!(!p.contains_words(" \n "));
    }

    #[test]
    fn zero_width_space_is_whitespace_by_default() {
        let p = WhitespaceProcessor::new(" \u{200b}", false);
        let mut b = inline();
        add(&p, &mut b, "a\u{200b}b");
        assert_eq!(b.text(), "a b");
    }

    #[test]
    fn literals_keep_spaces() {
        let p = WhitespaceProcessor::new(" \n", false);
        let mut b = inline();
        add(&p, &mut b, "x");
        p.add_literal("<b  class=\"c\">", &mut b, true);
        p.add_literal("\n  y", &mut b, true);
        assert_eq!(b.text(), "x<b  class=\"c\">\n  y");
    }

    #[test]
    fn transform_applies_per_word() {
        let p = WhitespaceProcessor::new(" ", false);
        let mut b = inline();
        p.shrink_wrap_add("ab cd", &mut b, &mut |w| w.to_uppercase(), false);
        assert_eq!(b.text(), "AB CD");
    }
}
