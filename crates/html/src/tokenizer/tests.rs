use super::{QuoteType, TokenSink, Tokenizer, TokenizerConfig, tokenize};
use crate::entities::EntityError;

#[derive(Debug, PartialEq, Eq)]
enum Event {
    Text(String),
    OpenTag(String),
    OpenTagEnd,
    SelfClosing,
    CloseTag(String),
    AttribName(String),
    AttribValue(String),
    AttribEnd(QuoteType),
    Comment(String),
    CData(String),
    Declaration(String),
    ProcessingInstruction(String),
    End,
}

/// Records events, merging adjacent text and attribute data so chunked and
/// unchunked runs compare equal.
#[derive(Default)]
struct Recorder {
    events: Vec<Event>,
    errors: Vec<EntityError>,
}

impl Recorder {
    fn push_text(&mut self, text: &str) {
        if let Some(Event::Text(prev)) = self.events.last_mut() {
            prev.push_str(text);
        } else {
            self.events.push(Event::Text(text.to_string()));
        }
    }

    fn push_attrib(&mut self, data: &str) {
        if let Some(Event::AttribValue(prev)) = self.events.last_mut() {
            prev.push_str(data);
        } else {
            self.events.push(Event::AttribValue(data.to_string()));
        }
    }
}

impl TokenSink for Recorder {
    fn on_text(&mut self, text: &str, start: usize, end: usize) {
        assert_eq!(end - start, text.len());
        self.push_text(text);
    }
    fn on_text_entity(&mut self, value: char, _end: usize) {
        self.push_text(value.encode_utf8(&mut [0; 4]));
    }
    fn on_open_tag_name(&mut self, name: &str, _start: usize, _end: usize) {
        self.events.push(Event::OpenTag(name.to_string()));
    }
    fn on_open_tag_end(&mut self, _end: usize) {
        self.events.push(Event::OpenTagEnd);
    }
    fn on_self_closing_tag(&mut self, _end: usize) {
        self.events.push(Event::SelfClosing);
    }
    fn on_close_tag(&mut self, name: &str, _start: usize, _end: usize) {
        self.events.push(Event::CloseTag(name.to_string()));
    }
    fn on_attrib_name(&mut self, name: &str, _start: usize, _end: usize) {
        self.events.push(Event::AttribName(name.to_string()));
    }
    fn on_attrib_data(&mut self, data: &str, _start: usize, _end: usize) {
        self.push_attrib(data);
    }
    fn on_attrib_entity(&mut self, value: char) {
        self.push_attrib(value.encode_utf8(&mut [0; 4]));
    }
    fn on_attrib_end(&mut self, quote: QuoteType, _end: usize) {
        self.events.push(Event::AttribEnd(quote));
    }
    fn on_comment(&mut self, text: &str, _end: usize) {
        self.events.push(Event::Comment(text.to_string()));
    }
    fn on_cdata(&mut self, text: &str, _end: usize) {
        self.events.push(Event::CData(text.to_string()));
    }
    fn on_declaration(&mut self, text: &str, _end: usize) {
        self.events.push(Event::Declaration(text.to_string()));
    }
    fn on_processing_instruction(&mut self, text: &str, _end: usize) {
        self.events.push(Event::ProcessingInstruction(text.to_string()));
    }
    fn on_entity_error(&mut self, error: EntityError, _position: usize) {
        self.errors.push(error);
    }
    fn on_end(&mut self) {
        self.events.push(Event::End);
    }
}

fn run(input: &str) -> Vec<Event> {
    let mut recorder = Recorder::default();
    tokenize(input, TokenizerConfig::default(), &mut recorder);
    recorder.events
}

fn run_chunked(input: &str, sizes: impl Iterator<Item = usize>) -> Vec<Event> {
    let mut recorder = Recorder::default();
    let mut tokenizer = Tokenizer::new(TokenizerConfig::default());
    let mut rest = input;
    for size in sizes {
        if rest.is_empty() {
            break;
        }
        let mut cut = size.clamp(1, rest.len());
        while !rest.is_char_boundary(cut) {
            cut += 1;
        }
        let (head, tail) = rest.split_at(cut);
        tokenizer.write(head, &mut recorder);
        rest = tail;
    }
    tokenizer.write(rest, &mut recorder);
    tokenizer.end(&mut recorder);
    recorder.events
}

fn text(s: &str) -> Event {
    Event::Text(s.to_string())
}

fn open(s: &str) -> Event {
    Event::OpenTag(s.to_string())
}

fn close(s: &str) -> Event {
    Event::CloseTag(s.to_string())
}

#[test]
fn tags_attributes_and_text() {
    let events = run(r#"<a href="x&amp;y" id=z hidden>hi</a>"#);
    assert_eq!(
        events,
        vec![
            open("a"),
            Event::AttribName("href".into()),
            Event::AttribValue("x&y".into()),
            Event::AttribEnd(QuoteType::Double),
            Event::AttribName("id".into()),
            Event::AttribValue("z".into()),
            Event::AttribEnd(QuoteType::Unquoted),
            Event::AttribName("hidden".into()),
            Event::AttribEnd(QuoteType::NoValue),
            Event::OpenTagEnd,
            text("hi"),
            close("a"),
            Event::End,
        ]
    );
}

#[test]
fn self_closing_is_reported() {
    let events = run("<br/><img src='a'/>");
    assert!(
        matches!(
            events.as_slice(),
            [Event::OpenTag(_), Event::SelfClosing, Event::OpenTag(_), ..]
        ),
        "unexpected {events:?}"
    );
    assert_eq!(events[events.len() - 2], Event::SelfClosing);
}

#[test]
fn script_content_is_raw() {
    let events = run("<script>if (a < b) { x = '</div>'; }</script>after");
    assert_eq!(
        events,
        vec![
            open("script"),
            Event::OpenTagEnd,
            text("if (a < b) { x = '</div>'; }"),
            close("script"),
            text("after"),
            Event::End,
        ]
    );
}

#[test]
fn raw_text_end_tag_tolerates_repeated_angle() {
    let events = run("<style>a<</style>");
    assert_eq!(events[2], text("a<"));
    assert_eq!(events[3], close("style"));
}

#[test]
fn title_decodes_references_but_script_does_not() {
    let events = run("<title>a &amp; <b></title><script>&amp;</script>");
    assert_eq!(events[2], text("a & <b>"));
    assert_eq!(events[6], text("&amp;"));
}

#[test]
fn comments_cdata_and_declarations() {
    let events = run("<!DOCTYPE html><!-- c --><!----><![CDATA[x]]><?xml v?></!x>");
    assert_eq!(
        events,
        vec![
            Event::Declaration("DOCTYPE html".into()),
            Event::Comment(" c ".into()),
            Event::Comment("".into()),
            Event::CData("x".into()),
            Event::ProcessingInstruction("xml v?".into()),
            Event::Comment("!x".into()),
            Event::End,
        ]
    );
}

#[test]
fn long_comment_terminators() {
    let events = run("<!-- a --->b");
    assert_eq!(events[0], Event::Comment(" a -".into()));
    assert_eq!(events[1], text("b"));
}

#[test]
fn stray_angle_bracket_is_text() {
    let events = run("1 < 2 <> 3");
    assert_eq!(events, vec![text("1 < 2 <> 3"), Event::End]);
}

#[test]
fn trailing_data_rules() {
    assert_eq!(
        run("a<!-- open"),
        vec![text("a"), Event::Comment(" open".into()), Event::End]
    );
    assert_eq!(
        run("a<div class='x"),
        vec![
            text("a"),
            open("div"),
            Event::AttribName("class".into()),
            Event::AttribValue("x".into()),
            Event::End
        ]
    );
    assert_eq!(run("a &amp"), vec![text("a &"), Event::End]);
}

#[test]
fn entity_errors_are_forwarded() {
    let mut recorder = Recorder::default();
    tokenize("&#65 &#;", TokenizerConfig::default(), &mut recorder);
    assert_eq!(
        recorder.errors,
        vec![
            EntityError::MissingSemicolon,
            EntityError::AbsenceOfDigits { consumed: 2 }
        ]
    );
}

#[test]
fn disabled_decoding_fast_forwards() {
    let mut recorder = Recorder::default();
    let config = TokenizerConfig {
        decode_entities: false,
        ..TokenizerConfig::default()
    };
    tokenize("x &amp; y<p a='&lt;'>", config, &mut recorder);
    assert_eq!(recorder.events[0], text("x &amp; y"));
    assert_eq!(recorder.events[3], Event::AttribValue("&lt;".into()));
}

#[test]
fn xml_mode_has_no_raw_text() {
    let mut recorder = Recorder::default();
    let config = TokenizerConfig {
        xml_mode: true,
        ..TokenizerConfig::default()
    };
    tokenize("<script><x:y/>&nbsp;&apos;</script>", config, &mut recorder);
    assert_eq!(
        recorder.events,
        vec![
            open("script"),
            Event::OpenTagEnd,
            open("x:y"),
            Event::SelfClosing,
            text("&nbsp;'"),
            close("script"),
            Event::End,
        ]
    );
}

const CHUNK_SAMPLE: &str = "<!doctype html><html><head><title>T &amp; U</title>\
<style>p > a { color: red }</style></head><body class=\"main\" data-x='1&lt;2'>\
<p>Caf\u{e9} &eacute;l&egrave;ve &notin; &not &#x1F600; &#128;</p><!-- note -->\
<script>if (a</b) {}</script><![CDATA[raw]]><br/>tail &am";

#[test]
fn chunking_does_not_change_events() {
    let whole = run(CHUNK_SAMPLE);
    for size in 1..12 {
        let chunked = run_chunked(CHUNK_SAMPLE, std::iter::repeat(size));
        assert_eq!(whole, chunked, "chunk size {size}");
    }
    let uneven = run_chunked(CHUNK_SAMPLE, [3, 1, 7, 2, 13, 5, 1, 1, 40].into_iter().cycle());
    assert_eq!(whole, uneven);
}

/// Keeps text only and leaves entity errors to the default handler.
#[derive(Default)]
struct TextOnly {
    text: String,
}

impl TokenSink for TextOnly {
    fn on_text(&mut self, text: &str, _start: usize, _end: usize) {
        self.text.push_str(text);
    }
    fn on_text_entity(&mut self, value: char, _end: usize) {
        self.text.push(value);
    }
    fn on_open_tag_name(&mut self, _: &str, _: usize, _: usize) {}
    fn on_open_tag_end(&mut self, _: usize) {}
    fn on_self_closing_tag(&mut self, _: usize) {}
    fn on_close_tag(&mut self, _: &str, _: usize, _: usize) {}
    fn on_attrib_name(&mut self, _: &str, _: usize, _: usize) {}
    fn on_attrib_data(&mut self, _: &str, _: usize, _: usize) {}
    fn on_attrib_entity(&mut self, _: char) {}
    fn on_attrib_end(&mut self, _: QuoteType, _: usize) {}
    fn on_comment(&mut self, _: &str, _: usize) {}
    fn on_cdata(&mut self, _: &str, _: usize) {}
    fn on_declaration(&mut self, _: &str, _: usize) {}
    fn on_processing_instruction(&mut self, _: &str, _: usize) {}
    fn on_end(&mut self) {}
}

#[test]
fn default_entity_error_handler_keeps_going() {
    let mut sink = TextOnly::default();
    tokenize("a &#65 b &#; c", TokenizerConfig::default(), &mut sink);
    assert_eq!(sink.text, "a A b &#; c");
}
