use std::rc::Rc;

use super::InlineTextBuilder;
use crate::options::LongWordSplit;

fn builder(width: usize) -> InlineTextBuilder {
    InlineTextBuilder::new(Some(width), Rc::new(LongWordSplit::default()))
}

fn split_builder(width: usize, chars: &[char], force: bool) -> InlineTextBuilder {
    InlineTextBuilder::new(
        Some(width),
        Rc::new(LongWordSplit {
            wrap_characters: chars.to_vec(),
            force_wrap_on_limit: force,
        }),
    )
}

fn push_all(b: &mut InlineTextBuilder, words: &[&str]) {
    for w in words {
        b.push_word(w.to_string(), false);
    }
}

#[test]
fn words_wrap_at_width() {
    let mut b = builder(6);
    push_all(&mut b, &["aaaa", "bbbb"]);
    assert_eq!(b.text(), "aaaa\nbbbb");

    let mut b = builder(9);
    push_all(&mut b, &["aaaa", "bbbb", "cc"]);
    assert_eq!(b.text(), "aaaa bbbb\ncc");
}

#[test]
fn no_wrap_words_overflow() {
    let mut b = builder(4);
    b.push_word("abc".into(), false);
    b.push_word("defgh".into(), true);
    assert_eq!(b.text(), "abc defgh");
    b.push_word("x".into(), false);
    assert_eq!(b.text(), "abc defgh\nx");
}

#[test]
fn concat_glues_to_the_previous_word() {
    let mut b = builder(20);
    push_all(&mut b, &["Hello", "world"]);
    b.concat_word(".".into(), false);
    assert_eq!(b.text(), "Hello world.");

    let mut b = builder(8);
    push_all(&mut b, &["abc", "def"]);
    b.concat_word("gh".into(), false);
    assert_eq!(b.text(), "abc\ndefgh");
}

#[test]
fn word_break_opportunity_moves_the_rest_down() {
    let mut b = builder(8);
    b.push_word("abcdef".into(), false);
    b.word_break_opportunity = true;
    b.concat_word("ghij".into(), false);
    assert_eq!(b.text(), "abcdef\nghij");
    assert!(!b.word_break_opportunity);
}

#[test]
fn long_words_split_on_wrap_characters() {
    let mut b = split_builder(8, &['/'], false);
    b.push_word("aaa/bbb/ccc/ddd".into(), false);
    assert_eq!(b.text(), "aaa/bbb/\nccc/ddd");

    // A wrap character that fails once is not tried again.
    let mut b = split_builder(5, &['/', '-'], false);
    b.push_word("ab-cdefghijkl".into(), false);
    assert_eq!(b.text(), "ab-\ncdefghijkl");

    let mut b = split_builder(5, &['-'], false);
    b.push_word("abcdefghij".into(), false);
    assert_eq!(b.text(), "abcdefghij");

    let mut b = split_builder(4, &[], true);
    b.push_word("abcdefghij".into(), false);
    assert_eq!(b.text(), "abcd\nefgh\nij");
}

#[test]
fn lines_never_exceed_width_except_unsplittable_words() {
    let mut b = builder(7);
    push_all(&mut b, &["a", "bb", "ccc", "dddd", "eeeeeeeeee", "f", "gg"]);
    for line in b.text().lines() {
        assert!(line.chars().count() <= 7 || !line.contains(' '), "{line:?}");
    }
}

#[test]
fn start_new_line_adds_blank_lines() {
    let mut b = builder(80);
    b.push_word("a".into(), false);
    b.start_new_line(3);
    b.push_word("b".into(), false);
    assert_eq!(b.text(), "a\n\n\nb");
    b.clear();
    assert!(b.is_empty());
    assert_eq!(b.text(), "");
}
