//! Character reference decoding.
//!
//! [`EntityDecoder`] is a resumable decoder positioned just after an `&`. It
//! consumes numeric (`&#65;`, `&#x41;`) and named (`&amp;`) references and
//! reports how many bytes, counted from the `&`, the reference spans. When the
//! input runs out mid-reference it asks for more and picks up where it left
//! off on the next [`EntityDecoder::write`] call.
//!
//! Named references follow the longest-prefix rule: legacy names (`&amp`,
//! `&not`, ...) match without a semicolon outside [`DecodingMode::Strict`],
//! but a longer semicolon-terminated name always wins when present.

mod data;
mod trie;

use memchr::memchr;

/// Decoding rules for the context the reference appears in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodingMode {
    /// Text content. Legacy names match without `;`.
    Legacy,
    /// Every reference must end in `;`.
    Strict,
    /// Attribute values. Like `Legacy`, but an unterminated name followed by
    /// `=` or an ASCII alphanumeric is left alone.
    Attribute,
}

/// Non-fatal problems found while decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityError {
    MissingSemicolon,
    /// `&#` or `&#x` without digits; `consumed` counts the bytes seen.
    AbsenceOfDigits { consumed: usize },
    /// A numeric reference naming a code point that had to be replaced.
    InvalidCodePoint { code_point: u32 },
}

impl std::fmt::Display for EntityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityError::MissingSemicolon => {
                write!(f, "missing semicolon after character reference")
            }
            EntityError::AbsenceOfDigits { .. } => {
                write!(f, "absence of digits in numeric character reference")
            }
            EntityError::InvalidCodePoint { code_point } => {
                write!(f, "invalid numeric character reference {code_point:#x}")
            }
        }
    }
}

impl std::error::Error for EntityError {}

/// Receives [`EntityError`]s. `()` discards them.
pub trait EntityErrorSink {
    fn report(&mut self, error: EntityError);
}

impl EntityErrorSink for () {
    fn report(&mut self, _error: EntityError) {}
}

impl EntityErrorSink for Vec<EntityError> {
    fn report(&mut self, error: EntityError) {
        self.push(error);
    }
}

/// One or two characters produced by a reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityValue {
    first: char,
    second: Option<char>,
}

impl EntityValue {
    fn one(c: char) -> Self {
        Self {
            first: c,
            second: None,
        }
    }

    pub fn chars(self) -> impl Iterator<Item = char> {
        std::iter::once(self.first).chain(self.second)
    }

    pub fn push_to(&self, out: &mut String) {
        out.push(self.first);
        if let Some(c) = self.second {
            out.push(c);
        }
    }
}

/// Outcome of feeding input to an [`EntityDecoder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeResult {
    /// The input ended inside a possible reference.
    NeedMoreInput,
    /// The `&` does not start a reference; treat it as literal text.
    NotEntity,
    /// A reference spanning `consumed` bytes, counted from the `&`.
    Decoded { consumed: usize, value: EntityValue },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DecoderState {
    EntityStart,
    NumericStart,
    NumericDecimal,
    NumericHex,
    NamedEntity,
}

/// Resumable character reference decoder.
#[derive(Clone, Debug)]
pub struct EntityDecoder {
    tree: &'static [u16],
    state: DecoderState,
    mode: DecodingMode,
    /// Bytes committed to the current match, including the `&`.
    consumed: usize,
    /// Bytes read past the last committed match.
    excess: usize,
    numeric: u32,
    tree_index: usize,
    /// Trie node of the longest unterminated match seen so far.
    last_match: Option<usize>,
}

impl EntityDecoder {
    pub fn html() -> Self {
        Self::with_tree(trie::html_tree())
    }

    pub fn xml() -> Self {
        Self::with_tree(trie::xml_tree())
    }

    fn with_tree(tree: &'static [u16]) -> Self {
        Self {
            tree,
            state: DecoderState::EntityStart,
            mode: DecodingMode::Legacy,
            consumed: 1,
            excess: 1,
            numeric: 0,
            tree_index: 0,
            last_match: None,
        }
    }

    /// Reset for a new reference whose `&` was just seen.
    pub fn start(&mut self, mode: DecodingMode) {
        self.mode = mode;
        self.state = DecoderState::EntityStart;
        self.consumed = 1;
        self.excess = 1;
        self.numeric = 0;
        self.tree_index = 0;
        self.last_match = None;
    }

    /// Feed `input[offset..]`, the bytes following everything fed so far.
    pub fn write<E>(&mut self, input: &[u8], offset: usize, errors: &mut E) -> DecodeResult
    where
        E: EntityErrorSink + ?Sized,
    {
        match self.state {
            DecoderState::EntityStart => {
                let Some(&b) = input.get(offset) else {
                    return DecodeResult::NeedMoreInput;
                };
                if b == b'#' {
                    self.state = DecoderState::NumericStart;
                    self.consumed += 1;
                    return self.numeric_start(input, offset + 1, errors);
                }
                self.state = DecoderState::NamedEntity;
                self.named_entity(input, offset, errors)
            }
            DecoderState::NumericStart => self.numeric_start(input, offset, errors),
            DecoderState::NumericDecimal => self.numeric_digits(input, offset, 10, errors),
            DecoderState::NumericHex => self.numeric_digits(input, offset, 16, errors),
            DecoderState::NamedEntity => self.named_entity(input, offset, errors),
        }
    }

    /// Signal end of input and flush whatever the pending bytes amount to.
    pub fn end<E>(&mut self, errors: &mut E) -> DecodeResult
    where
        E: EntityErrorSink + ?Sized,
    {
        match self.state {
            DecoderState::NamedEntity => match self.last_match {
                Some(index) if self.mode != DecodingMode::Attribute || index == self.tree_index => {
                    self.emit_unterminated(index, errors)
                }
                _ => DecodeResult::NotEntity,
            },
            DecoderState::NumericDecimal => self.emit_numeric(None, 2, errors),
            DecoderState::NumericHex => self.emit_numeric(None, 3, errors),
            DecoderState::NumericStart => {
                errors.report(EntityError::AbsenceOfDigits {
                    consumed: self.consumed,
                });
                DecodeResult::NotEntity
            }
            DecoderState::EntityStart => DecodeResult::NotEntity,
        }
    }

    fn numeric_start<E>(&mut self, input: &[u8], offset: usize, errors: &mut E) -> DecodeResult
    where
        E: EntityErrorSink + ?Sized,
    {
        let Some(&b) = input.get(offset) else {
            return DecodeResult::NeedMoreInput;
        };
        if b | 0x20 == b'x' {
            self.state = DecoderState::NumericHex;
            self.consumed += 1;
            return self.numeric_digits(input, offset + 1, 16, errors);
        }
        self.state = DecoderState::NumericDecimal;
        self.numeric_digits(input, offset, 10, errors)
    }

    fn numeric_digits<E>(
        &mut self,
        input: &[u8],
        offset: usize,
        radix: u32,
        errors: &mut E,
    ) -> DecodeResult
    where
        E: EntityErrorSink + ?Sized,
    {
        for &b in &input[offset.min(input.len())..] {
            let Some(digit) = char::from(b).to_digit(radix) else {
                let expected = if radix == 16 { 3 } else { 2 };
                return self.emit_numeric(Some(b), expected, errors);
            };
            self.numeric = self.numeric.saturating_mul(radix).saturating_add(digit);
            self.consumed += 1;
        }
        DecodeResult::NeedMoreInput
    }

    fn emit_numeric<E>(
        &mut self,
        last: Option<u8>,
        prefix_len: usize,
        errors: &mut E,
    ) -> DecodeResult
    where
        E: EntityErrorSink + ?Sized,
    {
        if self.consumed <= prefix_len {
            errors.report(EntityError::AbsenceOfDigits {
                consumed: self.consumed,
            });
            return DecodeResult::NotEntity;
        }
        let terminated = last == Some(b';');
        if terminated {
            self.consumed += 1;
        } else if self.mode == DecodingMode::Strict {
            return DecodeResult::NotEntity;
        }
        if !terminated {
            errors.report(EntityError::MissingSemicolon);
        }
        let c = replace_code_point(self.numeric);
        if u32::from(c) != self.numeric {
            errors.report(EntityError::InvalidCodePoint {
                code_point: self.numeric,
            });
        }
        DecodeResult::Decoded {
            consumed: self.consumed,
            value: EntityValue::one(c),
        }
    }

    fn named_entity<E>(&mut self, input: &[u8], offset: usize, errors: &mut E) -> DecodeResult
    where
        E: EntityErrorSink + ?Sized,
    {
        let tree = self.tree;
        let mut current = tree[self.tree_index];
        let mut value_len = trie::value_length(current);

        for &c in &input[offset.min(input.len())..] {
            let branch_start = self.tree_index + usize::from(value_len.max(1));
            let Some(next) = trie::determine_branch(tree, current, branch_start, c) else {
                return match self.last_match {
                    Some(index)
                        if self.mode != DecodingMode::Attribute
                            || (value_len != 0 && !is_invalid_attribute_end(c)) =>
                    {
                        self.emit_unterminated(index, errors)
                    }
                    _ => DecodeResult::NotEntity,
                };
            };
            self.tree_index = next;
            current = tree[next];
            value_len = trie::value_length(current);

            if value_len != 0 {
                if c == b';' {
                    return DecodeResult::Decoded {
                        consumed: self.consumed + self.excess,
                        value: named_value(tree, next),
                    };
                }
                if self.mode != DecodingMode::Strict {
                    self.last_match = Some(next);
                    self.consumed += self.excess;
                    self.excess = 0;
                }
            }
            self.excess += 1;
        }
        DecodeResult::NeedMoreInput
    }

    fn emit_unterminated<E>(&mut self, index: usize, errors: &mut E) -> DecodeResult
    where
        E: EntityErrorSink + ?Sized,
    {
        errors.report(EntityError::MissingSemicolon);
        DecodeResult::Decoded {
            consumed: self.consumed,
            value: named_value(self.tree, index),
        }
    }
}

fn named_value(tree: &[u16], index: usize) -> EntityValue {
    let (first, second) = trie::node_value(tree, index);
    EntityValue { first, second }
}

fn is_invalid_attribute_end(c: u8) -> bool {
    c == b'=' || c.is_ascii_alphanumeric()
}

/// Map a numeric reference to the character it produces: surrogates, zero and
/// values past U+10FFFF become U+FFFD, and the C1 range 0x80-0x9F follows the
/// windows-1252 override table.
pub fn replace_code_point(code_point: u32) -> char {
    if code_point == 0 || (0xD800..=0xDFFF).contains(&code_point) || code_point > 0x10FFFF {
        return char::REPLACEMENT_CHARACTER;
    }
    let mapped = match code_point {
        0x80 => 0x20AC,
        0x82 => 0x201A,
        0x83 => 0x0192,
        0x84 => 0x201E,
        0x85 => 0x2026,
        0x86 => 0x2020,
        0x87 => 0x2021,
        0x88 => 0x02C6,
        0x89 => 0x2030,
        0x8A => 0x0160,
        0x8B => 0x2039,
        0x8C => 0x0152,
        0x8E => 0x017D,
        0x91 => 0x2018,
        0x92 => 0x2019,
        0x93 => 0x201C,
        0x94 => 0x201D,
        0x95 => 0x2022,
        0x96 => 0x2013,
        0x97 => 0x2014,
        0x98 => 0x02DC,
        0x99 => 0x2122,
        0x9A => 0x0161,
        0x9B => 0x203A,
        0x9C => 0x0153,
        0x9E => 0x017E,
        0x9F => 0x0178,
        other => other,
    };
    char::from_u32(mapped).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Decode every reference in HTML text content.
pub fn decode_html(input: &str) -> String {
    decode_all(input, EntityDecoder::html(), DecodingMode::Legacy)
}

/// Decode references that end in `;`, leaving legacy forms alone.
pub fn decode_html_strict(input: &str) -> String {
    decode_all(input, EntityDecoder::html(), DecodingMode::Strict)
}

/// Decode an unquoted-context attribute value.
pub fn decode_html_attribute(input: &str) -> String {
    decode_all(input, EntityDecoder::html(), DecodingMode::Attribute)
}

/// Decode the five XML references and numeric references.
pub fn decode_xml(input: &str) -> String {
    decode_all(input, EntityDecoder::xml(), DecodingMode::Strict)
}

/// Escape text content for HTML output.
pub fn escape_text(input: &str) -> String {
    escape_with(input, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '\u{a0}' => Some("&nbsp;"),
        _ => None,
    })
}

/// Escape a double-quoted attribute value.
pub fn escape_attribute(input: &str) -> String {
    escape_with(input, |c| match c {
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\u{a0}' => Some("&nbsp;"),
        _ => None,
    })
}

fn escape_with(input: &str, replace: impl Fn(char) -> Option<&'static str>) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match replace(c) {
            Some(escaped) => out.push_str(escaped),
            None => out.push(c),
        }
    }
    out
}

fn decode_all(input: &str, mut decoder: EntityDecoder, mode: DecodingMode) -> String {
    let bytes = input.as_bytes();
    let Some(mut amp) = memchr(b'&', bytes) else {
        return input.to_owned();
    };
    let mut out = String::with_capacity(input.len());
    let mut copied = 0;
    loop {
        decoder.start(mode);
        let result = match decoder.write(bytes, amp + 1, &mut ()) {
            DecodeResult::NeedMoreInput => decoder.end(&mut ()),
            other => other,
        };
        let search_from = match result {
            DecodeResult::Decoded { consumed, value } => {
                out.push_str(&input[copied..amp]);
                value.push_to(&mut out);
                copied = amp + consumed;
                copied
            }
            _ => amp + 1,
        };
        match memchr(b'&', &bytes[search_from..]) {
            Some(rel) => amp = search_from + rel,
            None => break,
        }
    }
    out.push_str(&input[copied..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_references_decode_and_remap() {
        assert_eq!(decode_html("&#65;&#x42;&#X43;"), "ABC");
        assert_eq!(decode_html("&#128;"), "\u{20AC}");
        assert_eq!(decode_html("&#x9F;"), "\u{178}");
        assert_eq!(decode_html("&#xD800;"), "\u{FFFD}");
        assert_eq!(decode_html("&#0;"), "\u{FFFD}");
        assert_eq!(decode_html("&#x110000;"), "\u{FFFD}");
        assert_eq!(decode_html("&#99999999999999;"), "\u{FFFD}");
    }

    #[test]
    fn numeric_without_semicolon_depends_on_mode() {
        assert_eq!(decode_html("&#65x"), "Ax");
        assert_eq!(decode_html_strict("&#65x"), "&#65x");
        assert_eq!(decode_html("&#;"), "&#;");
        assert_eq!(decode_html("&#x;"), "&#x;");
        assert_eq!(decode_html("&#"), "&#");
    }

    #[test]
    fn legacy_names_follow_longest_prefix() {
        assert_eq!(decode_html("&amp;&ampx"), "&&x");
        assert_eq!(decode_html("&notit;"), "\u{AC}it;");
        assert_eq!(decode_html("&notin;"), "\u{2209}");
        assert_eq!(decode_html("&alpha"), "&alpha");
        assert_eq!(decode_html_strict("&amp &amp;"), "&amp &");
    }

    #[test]
    fn attribute_mode_protects_query_strings() {
        assert_eq!(decode_html_attribute("?a=1&copy=2"), "?a=1&copy=2");
        assert_eq!(decode_html_attribute("&copyx"), "&copyx");
        assert_eq!(decode_html_attribute("&copy;x"), "\u{A9}x");
        assert_eq!(decode_html_attribute("&copy x"), "\u{A9} x");
        assert_eq!(decode_html_attribute("&notit"), "&notit");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(decode_html("no references here"), "no references here");
        assert_eq!(decode_html("a & b"), "a & b");
        assert_eq!(decode_html("&unknown;"), "&unknown;");
    }

    #[test]
    fn xml_mode_only_knows_predefined_names() {
        assert_eq!(decode_xml("&apos;&amp;&nbsp;&amp"), "'&&nbsp;&amp");
    }

    #[test]
    fn decoder_resumes_across_chunks() {
        let mut decoder = EntityDecoder::html();
        decoder.start(DecodingMode::Legacy);
        assert_eq!(decoder.write(b"no", 0, &mut ()), DecodeResult::NeedMoreInput);
        let result = decoder.write(b"tin; rest", 0, &mut ());
        assert!(
            matches!(result, DecodeResult::Decoded { consumed: 7, value } if value.first == '\u{2209}'),
            "unexpected {result:?}"
        );

        decoder.start(DecodingMode::Legacy);
        assert_eq!(decoder.write(b"#x4", 0, &mut ()), DecodeResult::NeedMoreInput);
        assert_eq!(decoder.write(b"1", 0, &mut ()), DecodeResult::NeedMoreInput);
        let result = decoder.end(&mut ());
        assert!(
            matches!(result, DecodeResult::Decoded { consumed: 5, value } if value.first == 'A'),
            "unexpected {result:?}"
        );
    }

    #[test]
    fn errors_reach_the_sink() {
        let mut errors = Vec::new();
        let mut decoder = EntityDecoder::html();
        decoder.start(DecodingMode::Legacy);
        decoder.write(b"#128 ", 0, &mut errors);
        assert_eq!(
            errors,
            vec![
                EntityError::MissingSemicolon,
                EntityError::InvalidCodePoint { code_point: 128 }
            ]
        );

        errors.clear();
        decoder.start(DecodingMode::Legacy);
        decoder.write(b"#x;", 0, &mut errors);
        assert_eq!(errors, vec![EntityError::AbsenceOfDigits { consumed: 3 }]);
    }

    #[test]
    fn escaping_covers_markup_characters() {
        assert_eq!(escape_text("a < b & c\u{a0}"), "a &lt; b &amp; c&nbsp;");
        assert_eq!(escape_attribute(r#"say "hi" & <go>"#), "say &quot;hi&quot; &amp; <go>");
        assert_eq!(decode_html(&escape_text("x <&> y")), "x <&> y");
    }

    #[test]
    fn astral_and_double_values() {
        assert_eq!(decode_html("&afr;&nvlt;&fjlig;"), "\u{1D51E}<\u{20D2}fj");
    }
}
