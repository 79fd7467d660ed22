use crate::options::LongWordSplit;

/// Length in characters, the unit line widths are measured in.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

// Byte offset of the `n`th character, or the end of `text`.
fn char_boundary(text: &str, n: usize) -> usize {
    text.char_indices().nth(n).map_or(text.len(), |(i, _)| i)
}

/// Break `word` into pieces of at most `max` characters.
///
/// Wrap characters are tried in order: the first one found in the leading
/// `max` characters splits after its last occurrence there, and splitting
/// continues with the same character on the remainder. When none is found
/// the word is cut at `max` only if `force_wrap_on_limit` is set; otherwise
/// the rest is returned as one overlong piece.
pub(super) fn split_long_word(word: &str, max: usize, split: &LongWordSplit) -> Vec<String> {
    debug_assert!(max > 0);
    let mut parts = Vec::new();
    let mut word = word.to_string();
    let mut idx = 0;
    while char_len(&word) > max {
        let cut = char_boundary(&word, max);
        let (first_line, rest) = word.split_at(cut);
        let found = split
            .wrap_characters
            .get(idx)
            .and_then(|&c| first_line.rfind(c).map(|pos| pos + c.len_utf8()));
        match found {
            Some(end) => {
                parts.push(first_line[..end].to_string());
                word = format!("{}{}", &first_line[end..], rest);
            }
            None => {
                idx += 1;
                if idx < split.wrap_characters.len() {
                    continue;
                }
                if split.force_wrap_on_limit {
                    parts.push(first_line.to_string());
                    word = rest.to_string();
                    if char_len(&word) > max {
                        continue;
                    }
                }
                break;
            }
        }
    }
    parts.push(word);
    parts
}
