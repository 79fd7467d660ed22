//! Streaming HTML/XML tokenizer.
//!
//! The tokenizer is a byte-level state machine that reports events to a
//! [`TokenSink`]. Input arrives in chunks through [`Tokenizer::write`]; any
//! construct, character reference included, may span a chunk boundary.
//!
//! Invariants:
//! - Chunk-equivalence: the event stream for one chunk or many chunks differs
//!   only in how text and attribute data are split across `on_text` /
//!   `on_attrib_data` calls.
//! - Positions are absolute byte offsets into the concatenated input.
//! - Slices handed to the sink always start and end on `char` boundaries; every
//!   section boundary sits on an ASCII structural byte or a chunk edge.
//!
//! Raw-text elements (`script`, `style`, `title`, `textarea`) suppress tag
//! recognition until their end tag; `title` and `textarea` still decode
//! character references. Void-element and implied-close handling belong to
//! the parser.

mod states;
#[cfg(test)]
mod tests;

use memchr::memchr;

use crate::entities::{
    DecodeResult, DecodingMode, EntityDecoder, EntityError, EntityErrorSink, EntityValue,
};
use states::{Sequence, State, seq};

/// Marks "no open section".
const NO_SECTION: usize = usize::MAX;

/// Configuration for the tokenizer.
#[derive(Clone, Debug)]
pub struct TokenizerConfig {
    /// XML rules: any non-delimiter starts a tag name, no raw-text elements,
    /// strict references resolved against the XML table.
    pub xml_mode: bool,
    /// Decode character references in text and attribute values.
    pub decode_entities: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            xml_mode: false,
            decode_entities: true,
        }
    }
}

/// How an attribute value was delimited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuoteType {
    NoValue,
    Unquoted,
    Single,
    Double,
}

/// Receiver of tokenizer events.
///
/// `start..end` ranges are half-open. A lone `end` names the index of the
/// byte that completed the construct (usually `>`).
pub trait TokenSink {
    fn on_text(&mut self, text: &str, start: usize, end: usize);
    /// A decoded reference in text. `end` is the offset just past it.
    fn on_text_entity(&mut self, value: char, end: usize);
    fn on_open_tag_name(&mut self, name: &str, start: usize, end: usize);
    fn on_open_tag_end(&mut self, end: usize);
    fn on_self_closing_tag(&mut self, end: usize);
    fn on_close_tag(&mut self, name: &str, start: usize, end: usize);
    fn on_attrib_name(&mut self, name: &str, start: usize, end: usize);
    fn on_attrib_data(&mut self, data: &str, start: usize, end: usize);
    fn on_attrib_entity(&mut self, value: char);
    fn on_attrib_end(&mut self, quote: QuoteType, end: usize);
    fn on_comment(&mut self, text: &str, end: usize);
    fn on_cdata(&mut self, text: &str, end: usize);
    fn on_declaration(&mut self, text: &str, end: usize);
    fn on_processing_instruction(&mut self, text: &str, end: usize);
    /// A malformed character reference starting at `position`.
    fn on_entity_error(&mut self, error: EntityError, position: usize) {
        log::trace!(target: "html.tokenizer", "character reference at {position}: {error}");
    }
    fn on_end(&mut self);
}

struct ForwardErrors<'a, S: ?Sized> {
    sink: &'a mut S,
    position: usize,
}

impl<S: TokenSink + ?Sized> EntityErrorSink for ForwardErrors<'_, S> {
    fn report(&mut self, error: EntityError) {
        self.sink.on_entity_error(error, self.position);
    }
}

fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\n' | b'\t' | b'\x0c' | b'\r')
}

fn is_end_of_tag_section(c: u8) -> bool {
    c == b'/' || c == b'>' || is_whitespace(c)
}

/// Resumable tokenizer state.
pub struct Tokenizer {
    config: TokenizerConfig,
    state: State,
    /// State to return to once a character reference completes.
    base_state: State,
    /// Unconsumed input. `buffer[0]` sits at absolute offset `offset`.
    buffer: String,
    offset: usize,
    index: usize,
    section_start: usize,
    entity_start: usize,
    /// Set while the open tag is a raw-text element.
    is_special: bool,
    sequence: Sequence,
    sequence_index: usize,
    decoder: EntityDecoder,
    ended: bool,
}

impl Tokenizer {
    pub fn new(config: TokenizerConfig) -> Self {
        let decoder = if config.xml_mode {
            EntityDecoder::xml()
        } else {
            EntityDecoder::html()
        };
        Self {
            config,
            state: State::Text,
            base_state: State::Text,
            buffer: String::new(),
            offset: 0,
            index: 0,
            section_start: 0,
            entity_start: 0,
            is_special: false,
            sequence: Sequence::CommentEnd,
            sequence_index: 0,
            decoder,
            ended: false,
        }
    }

    /// Feed the next chunk of input.
    pub fn write<S: TokenSink + ?Sized>(&mut self, chunk: &str, sink: &mut S) {
        if self.ended {
            log::warn!(target: "html.tokenizer", "write after end ignored ({} bytes)", chunk.len());
            return;
        }
        self.compact();
        self.buffer.push_str(chunk);
        log::trace!(
            target: "html.tokenizer",
            "write {} bytes at {} (state {:?}, retained {})",
            chunk.len(),
            self.index,
            self.state,
            self.buffer.len() - chunk.len()
        );
        self.parse(sink);
    }

    /// Signal end of input: flush pending data and emit `on_end`.
    pub fn end<S: TokenSink + ?Sized>(&mut self, sink: &mut S) {
        if self.ended {
            return;
        }
        self.ended = true;
        if self.state == State::InEntity {
            let mut errors = ForwardErrors {
                sink: &mut *sink,
                position: self.entity_start,
            };
            let result = self.decoder.end(&mut errors);
            self.state = self.base_state;
            if let DecodeResult::Decoded { consumed, value } = result {
                self.emit_entity(consumed, value, sink);
            }
        }
        self.handle_trailing_data(sink);
        sink.on_end();
    }

    /// Drop the already-reported prefix of the buffer.
    fn compact(&mut self) {
        let mut keep = self.index;
        if self.section_start != NO_SECTION {
            keep = keep.min(self.section_start);
        }
        if self.state == State::InEntity {
            keep = keep.min(self.entity_start);
        }
        if keep > self.offset {
            let cut = keep - self.offset;
            debug_assert!(self.buffer.is_char_boundary(cut));
            self.buffer.drain(..cut);
            self.offset = keep;
        }
    }

    fn end_index(&self) -> usize {
        self.offset + self.buffer.len()
    }

    fn byte_at(&self, index: usize) -> u8 {
        self.buffer.as_bytes()[index - self.offset]
    }

    fn slice(&self, start: usize, end: usize) -> &str {
        let (start, end) = (start - self.offset, end - self.offset);
        debug_assert!(self.buffer.is_char_boundary(start) && self.buffer.is_char_boundary(end));
        &self.buffer[start..end]
    }

    fn parse<S: TokenSink + ?Sized>(&mut self, sink: &mut S) {
        while self.index < self.end_index() {
            let c = self.byte_at(self.index);
            match self.state {
                State::Text => self.state_text(c, sink),
                State::SpecialStartSequence => self.state_special_start_sequence(c, sink),
                State::InSpecialTag => self.state_in_special_tag(c, sink),
                State::CDataSequence => self.state_cdata_sequence(c, sink),
                State::InAttributeValueDq => self.handle_in_attribute_value(c, b'"', sink),
                State::InAttributeName => self.state_in_attribute_name(c, sink),
                State::InCommentLike => self.state_in_comment_like(c, sink),
                State::InSpecialComment => self.state_in_special_comment(c, sink),
                State::BeforeAttributeName => self.state_before_attribute_name(c, sink),
                State::InTagName => self.state_in_tag_name(c, sink),
                State::InClosingTagName => self.state_in_closing_tag_name(c, sink),
                State::BeforeTagName => self.state_before_tag_name(c, sink),
                State::AfterAttributeName => self.state_after_attribute_name(c, sink),
                State::InAttributeValueSq => self.handle_in_attribute_value(c, b'\'', sink),
                State::BeforeAttributeValue => self.state_before_attribute_value(c, sink),
                State::BeforeClosingTagName => self.state_before_closing_tag_name(c),
                State::AfterClosingTagName => self.state_after_closing_tag_name(c),
                State::BeforeSpecialS => self.state_before_special_s(c, sink),
                State::BeforeSpecialT => self.state_before_special_t(c, sink),
                State::InAttributeValueNq => self.state_in_attribute_value_nq(c, sink),
                State::InSelfClosingTag => self.state_in_self_closing_tag(c, sink),
                State::InDeclaration => self.state_in_declaration(c, sink),
                State::BeforeDeclaration => self.state_before_declaration(c, sink),
                State::BeforeComment => self.state_before_comment(c),
                State::InProcessingInstruction => self.state_in_processing_instruction(c, sink),
                State::InEntity => self.state_in_entity(sink),
            }
            self.index += 1;
        }
        self.cleanup(sink);
    }

    /// Report text or attribute data gathered so far so the buffer can shrink.
    fn cleanup<S: TokenSink + ?Sized>(&mut self, sink: &mut S) {
        if self.section_start == NO_SECTION || self.section_start >= self.index {
            return;
        }
        let (start, end) = (self.section_start, self.index);
        if self.state == State::Text
            || (self.state == State::InSpecialTag && self.sequence_index == 0)
        {
            sink.on_text(self.slice(start, end), start, end);
            self.section_start = end;
        } else if self.state.is_attribute_value() {
            sink.on_attrib_data(self.slice(start, end), start, end);
            self.section_start = end;
        }
    }

    fn handle_trailing_data<S: TokenSink + ?Sized>(&mut self, sink: &mut S) {
        let end = self.end_index();
        if self.section_start == NO_SECTION || self.section_start >= end {
            return;
        }
        let start = self.section_start;
        if self.state == State::InCommentLike {
            if self.sequence == Sequence::CDataEnd {
                sink.on_cdata(self.slice(start, end), end - 1);
            } else {
                sink.on_comment(self.slice(start, end), end - 1);
            }
        } else if self.state.is_inside_tag() {
            // An unfinished tag is dropped.
        } else {
            sink.on_text(self.slice(start, end), start, end);
        }
    }

    /// Advance `index` to the next `c`. On a miss, park on the last byte so the
    /// loop increment ends this write.
    fn fast_forward_to(&mut self, c: u8) -> bool {
        let from = self.index + 1 - self.offset;
        match memchr(c, &self.buffer.as_bytes()[from..]) {
            Some(rel) => {
                self.index += 1 + rel;
                true
            }
            None => {
                self.index = self.end_index() - 1;
                false
            }
        }
    }

    fn is_tag_start_char(&self, c: u8) -> bool {
        if self.config.xml_mode {
            !is_end_of_tag_section(c)
        } else {
            c.is_ascii_alphabetic()
        }
    }

    fn state_text<S: TokenSink + ?Sized>(&mut self, c: u8, sink: &mut S) {
        if c == b'<' || (!self.config.decode_entities && self.fast_forward_to(b'<')) {
            if self.index > self.section_start {
                let (start, end) = (self.section_start, self.index);
                sink.on_text(self.slice(start, end), start, end);
            }
            self.state = State::BeforeTagName;
            self.section_start = self.index;
        } else if self.config.decode_entities && c == b'&' {
            self.start_entity();
        }
    }

    fn state_special_start_sequence<S: TokenSink + ?Sized>(&mut self, c: u8, sink: &mut S) {
        let bytes = self.sequence.bytes();
        let is_end = self.sequence_index == bytes.len();
        let is_match = if is_end {
            is_end_of_tag_section(c)
        } else {
            c | 0x20 == bytes[self.sequence_index]
        };

        if !is_match {
            self.is_special = false;
        } else if !is_end {
            self.sequence_index += 1;
            return;
        }
        self.sequence_index = 0;
        self.state = State::InTagName;
        self.state_in_tag_name(c, sink);
    }

    /// Scan raw text for the closing tag of the current special element.
    fn state_in_special_tag<S: TokenSink + ?Sized>(&mut self, c: u8, sink: &mut S) {
        let bytes = self.sequence.bytes();
        if self.sequence_index == bytes.len() {
            if c == b'>' || is_whitespace(c) {
                let end_of_text = self.index - bytes.len();
                if self.section_start < end_of_text {
                    let start = self.section_start;
                    sink.on_text(self.slice(start, end_of_text), start, end_of_text);
                }
                self.is_special = false;
                // Skip the `</`.
                self.section_start = end_of_text + 2;
                self.state_in_closing_tag_name(c, sink);
                return;
            }
            self.sequence_index = 0;
        }

        if c | 0x20 == bytes[self.sequence_index] {
            self.sequence_index += 1;
        } else if self.sequence_index == 0 {
            if self.sequence.decodes_entities() {
                if self.config.decode_entities && c == b'&' {
                    self.start_entity();
                }
            } else if self.fast_forward_to(b'<') {
                self.sequence_index = 1;
            }
        } else {
            // `<</script>` restarts the match at the second `<`.
            self.sequence_index = usize::from(c == b'<');
        }
    }

    fn state_cdata_sequence<S: TokenSink + ?Sized>(&mut self, c: u8, sink: &mut S) {
        if c == seq::CDATA[self.sequence_index] {
            self.sequence_index += 1;
            if self.sequence_index == seq::CDATA.len() {
                self.state = State::InCommentLike;
                self.sequence = Sequence::CDataEnd;
                self.sequence_index = 0;
                self.section_start = self.index + 1;
            }
        } else {
            self.sequence_index = 0;
            self.state = State::InDeclaration;
            self.state_in_declaration(c, sink);
        }
    }

    fn state_in_comment_like<S: TokenSink + ?Sized>(&mut self, c: u8, sink: &mut S) {
        let bytes = self.sequence.bytes();
        if c == bytes[self.sequence_index] {
            self.sequence_index += 1;
            if self.sequence_index == bytes.len() {
                let start = self.section_start;
                // The terminator's first two bytes are not content. `<!-->`
                // ends before its section even starts.
                let text_end = (self.index - 2).max(start);
                let text = self.slice(start, text_end);
                if self.sequence == Sequence::CDataEnd {
                    sink.on_cdata(text, self.index);
                } else {
                    sink.on_comment(text, self.index);
                }
                self.sequence_index = 0;
                self.section_start = self.index + 1;
                self.state = State::Text;
            }
        } else if self.sequence_index == 0 {
            if self.fast_forward_to(bytes[0]) {
                self.sequence_index = 1;
            }
        } else if c != bytes[self.sequence_index - 1] {
            // `--->` and `]]]>` keep the partial match alive.
            self.sequence_index = 0;
        }
    }

    fn start_special(&mut self, sequence: Sequence, matched: usize) {
        self.is_special = true;
        self.sequence = sequence;
        self.sequence_index = matched;
        self.state = State::SpecialStartSequence;
    }

    fn state_before_tag_name<S: TokenSink + ?Sized>(&mut self, c: u8, sink: &mut S) {
        if c == b'!' {
            self.state = State::BeforeDeclaration;
            self.section_start = self.index + 1;
        } else if c == b'?' {
            self.state = State::InProcessingInstruction;
            self.section_start = self.index + 1;
        } else if self.is_tag_start_char(c) {
            let lower = c | 0x20;
            self.section_start = self.index;
            self.state = if self.config.xml_mode {
                State::InTagName
            } else if lower == seq::SCRIPT_END[2] {
                State::BeforeSpecialS
            } else if lower == seq::TITLE_END[2] {
                State::BeforeSpecialT
            } else {
                State::InTagName
            };
        } else if c == b'/' {
            self.state = State::BeforeClosingTagName;
        } else {
            self.state = State::Text;
            self.state_text(c, sink);
        }
    }

    fn state_in_tag_name<S: TokenSink + ?Sized>(&mut self, c: u8, sink: &mut S) {
        if is_end_of_tag_section(c) {
            let (start, end) = (self.section_start, self.index);
            sink.on_open_tag_name(self.slice(start, end), start, end);
            self.section_start = NO_SECTION;
            self.state = State::BeforeAttributeName;
            self.state_before_attribute_name(c, sink);
        }
    }

    fn state_before_closing_tag_name(&mut self, c: u8) {
        if is_whitespace(c) {
            // Ignore.
        } else if c == b'>' {
            self.state = State::Text;
        } else {
            self.state = if self.is_tag_start_char(c) {
                State::InClosingTagName
            } else {
                State::InSpecialComment
            };
            self.section_start = self.index;
        }
    }

    fn state_in_closing_tag_name<S: TokenSink + ?Sized>(&mut self, c: u8, sink: &mut S) {
        if c == b'>' || is_whitespace(c) {
            let (start, end) = (self.section_start, self.index);
            sink.on_close_tag(self.slice(start, end), start, end);
            self.section_start = NO_SECTION;
            self.state = State::AfterClosingTagName;
            self.state_after_closing_tag_name(c);
        }
    }

    fn state_after_closing_tag_name(&mut self, c: u8) {
        if c == b'>' || self.fast_forward_to(b'>') {
            self.state = State::Text;
            self.section_start = self.index + 1;
        }
    }

    fn state_before_attribute_name<S: TokenSink + ?Sized>(&mut self, c: u8, sink: &mut S) {
        if c == b'>' {
            sink.on_open_tag_end(self.index);
            if self.is_special {
                self.state = State::InSpecialTag;
                self.sequence_index = 0;
            } else {
                self.state = State::Text;
            }
            self.section_start = self.index + 1;
        } else if c == b'/' {
            self.state = State::InSelfClosingTag;
        } else if !is_whitespace(c) {
            self.state = State::InAttributeName;
            self.section_start = self.index;
        }
    }

    fn state_in_self_closing_tag<S: TokenSink + ?Sized>(&mut self, c: u8, sink: &mut S) {
        if c == b'>' {
            sink.on_self_closing_tag(self.index);
            self.state = State::Text;
            self.section_start = self.index + 1;
            // `<script/>` has no raw-text body.
            self.is_special = false;
        } else if !is_whitespace(c) {
            self.state = State::BeforeAttributeName;
            self.state_before_attribute_name(c, sink);
        }
    }

    fn state_in_attribute_name<S: TokenSink + ?Sized>(&mut self, c: u8, sink: &mut S) {
        if c == b'=' || is_end_of_tag_section(c) {
            let (start, end) = (self.section_start, self.index);
            sink.on_attrib_name(self.slice(start, end), start, end);
            self.section_start = self.index;
            self.state = State::AfterAttributeName;
            self.state_after_attribute_name(c, sink);
        }
    }

    fn state_after_attribute_name<S: TokenSink + ?Sized>(&mut self, c: u8, sink: &mut S) {
        if c == b'=' {
            self.state = State::BeforeAttributeValue;
        } else if c == b'/' || c == b'>' {
            sink.on_attrib_end(QuoteType::NoValue, self.section_start);
            self.section_start = NO_SECTION;
            self.state = State::BeforeAttributeName;
            self.state_before_attribute_name(c, sink);
        } else if !is_whitespace(c) {
            sink.on_attrib_end(QuoteType::NoValue, self.section_start);
            self.state = State::InAttributeName;
            self.section_start = self.index;
        }
    }

    fn state_before_attribute_value<S: TokenSink + ?Sized>(&mut self, c: u8, sink: &mut S) {
        if c == b'"' {
            self.state = State::InAttributeValueDq;
            self.section_start = self.index + 1;
        } else if c == b'\'' {
            self.state = State::InAttributeValueSq;
            self.section_start = self.index + 1;
        } else if !is_whitespace(c) {
            self.section_start = self.index;
            self.state = State::InAttributeValueNq;
            self.state_in_attribute_value_nq(c, sink);
        }
    }

    fn handle_in_attribute_value<S: TokenSink + ?Sized>(&mut self, c: u8, quote: u8, sink: &mut S) {
        if c == quote || (!self.config.decode_entities && self.fast_forward_to(quote)) {
            let (start, end) = (self.section_start, self.index);
            sink.on_attrib_data(self.slice(start, end), start, end);
            self.section_start = NO_SECTION;
            let quote = if quote == b'"' {
                QuoteType::Double
            } else {
                QuoteType::Single
            };
            sink.on_attrib_end(quote, self.index + 1);
            self.state = State::BeforeAttributeName;
        } else if self.config.decode_entities && c == b'&' {
            self.start_entity();
        }
    }

    fn state_in_attribute_value_nq<S: TokenSink + ?Sized>(&mut self, c: u8, sink: &mut S) {
        if is_whitespace(c) || c == b'>' {
            let (start, end) = (self.section_start, self.index);
            sink.on_attrib_data(self.slice(start, end), start, end);
            self.section_start = NO_SECTION;
            sink.on_attrib_end(QuoteType::Unquoted, self.index);
            self.state = State::BeforeAttributeName;
            self.state_before_attribute_name(c, sink);
        } else if self.config.decode_entities && c == b'&' {
            self.start_entity();
        }
    }

    fn state_before_declaration<S: TokenSink + ?Sized>(&mut self, c: u8, sink: &mut S) {
        if c == b'[' {
            self.state = State::CDataSequence;
            self.sequence_index = 0;
        } else if c == b'-' {
            self.state = State::BeforeComment;
        } else {
            self.state = State::InDeclaration;
            self.state_in_declaration(c, sink);
        }
    }

    fn state_in_declaration<S: TokenSink + ?Sized>(&mut self, c: u8, sink: &mut S) {
        if c == b'>' || self.fast_forward_to(b'>') {
            let start = self.section_start;
            sink.on_declaration(self.slice(start, self.index), self.index);
            self.state = State::Text;
            self.section_start = self.index + 1;
        }
    }

    fn state_in_processing_instruction<S: TokenSink + ?Sized>(&mut self, c: u8, sink: &mut S) {
        if c == b'>' || self.fast_forward_to(b'>') {
            let start = self.section_start;
            sink.on_processing_instruction(self.slice(start, self.index), self.index);
            self.state = State::Text;
            self.section_start = self.index + 1;
        }
    }

    fn state_before_comment(&mut self, c: u8) {
        if c == b'-' {
            self.state = State::InCommentLike;
            self.sequence = Sequence::CommentEnd;
            // `<!--` already supplied the terminator's leading dashes, so
            // `<!-->` is an empty comment.
            self.sequence_index = 2;
            self.section_start = self.index + 1;
        } else {
            self.state = State::InDeclaration;
        }
    }

    fn state_in_special_comment<S: TokenSink + ?Sized>(&mut self, c: u8, sink: &mut S) {
        if c == b'>' || self.fast_forward_to(b'>') {
            let start = self.section_start;
            sink.on_comment(self.slice(start, self.index), self.index);
            self.state = State::Text;
            self.section_start = self.index + 1;
        }
    }

    fn state_before_special_s<S: TokenSink + ?Sized>(&mut self, c: u8, sink: &mut S) {
        let lower = c | 0x20;
        if lower == seq::SCRIPT_END[3] {
            self.start_special(Sequence::ScriptEnd, 4);
        } else if lower == seq::STYLE_END[3] {
            self.start_special(Sequence::StyleEnd, 4);
        } else {
            self.state = State::InTagName;
            self.state_in_tag_name(c, sink);
        }
    }

    fn state_before_special_t<S: TokenSink + ?Sized>(&mut self, c: u8, sink: &mut S) {
        let lower = c | 0x20;
        if lower == seq::TITLE_END[3] {
            self.start_special(Sequence::TitleEnd, 4);
        } else if lower == seq::TEXTAREA_END[3] {
            self.start_special(Sequence::TextareaEnd, 4);
        } else {
            self.state = State::InTagName;
            self.state_in_tag_name(c, sink);
        }
    }

    fn start_entity(&mut self) {
        self.base_state = self.state;
        self.state = State::InEntity;
        self.entity_start = self.index;
        let mode = if self.config.xml_mode {
            DecodingMode::Strict
        } else if matches!(self.base_state, State::Text | State::InSpecialTag) {
            DecodingMode::Legacy
        } else {
            DecodingMode::Attribute
        };
        self.decoder.start(mode);
    }

    fn state_in_entity<S: TokenSink + ?Sized>(&mut self, sink: &mut S) {
        let mut errors = ForwardErrors {
            sink: &mut *sink,
            position: self.entity_start,
        };
        let offset = self.index - self.offset;
        let result = self.decoder.write(self.buffer.as_bytes(), offset, &mut errors);
        match result {
            DecodeResult::NeedMoreInput => {
                self.index = self.end_index() - 1;
            }
            DecodeResult::NotEntity => {
                self.state = self.base_state;
                self.index = self.entity_start;
            }
            DecodeResult::Decoded { consumed, value } => {
                self.state = self.base_state;
                self.emit_entity(consumed, value, sink);
            }
        }
    }

    fn emit_entity<S: TokenSink + ?Sized>(
        &mut self,
        consumed: usize,
        value: EntityValue,
        sink: &mut S,
    ) {
        let in_text = matches!(self.base_state, State::Text | State::InSpecialTag);
        if self.section_start < self.entity_start {
            let (start, end) = (self.section_start, self.entity_start);
            if in_text {
                sink.on_text(self.slice(start, end), start, end);
            } else {
                sink.on_attrib_data(self.slice(start, end), start, end);
            }
        }
        self.section_start = self.entity_start + consumed;
        self.index = self.section_start - 1;
        for c in value.chars() {
            if in_text {
                sink.on_text_entity(c, self.section_start);
            } else {
                sink.on_attrib_entity(c);
            }
        }
    }
}

/// Tokenize a complete input in one call.
pub fn tokenize<S: TokenSink + ?Sized>(input: &str, config: TokenizerConfig, sink: &mut S) {
    let mut tokenizer = Tokenizer::new(config);
    tokenizer.write(input, sink);
    tokenizer.end(sink);
}
