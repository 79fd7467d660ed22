#![no_main]

use html::{Parser, ParserOptions, SerializeOptions, outer_html, parse_document};
use libfuzzer_sys::fuzz_target;

// First byte picks the chunk size; the rest is the document.
fuzz_target!(|data: &[u8]| {
    let Some((&size, rest)) = data.split_first() else {
        return;
    };
    let Ok(input) = std::str::from_utf8(rest) else {
        return;
    };
    let size = usize::from(size % 16) + 1;

    let options = ParserOptions::default();
    let whole = parse_document(input, &options);

    let mut parser = Parser::new(options);
    let mut offset = 0;
    while offset < input.len() {
        let mut end = (offset + size).min(input.len());
        while !input.is_char_boundary(end) {
            end += 1;
        }
        parser.write(&input[offset..end]);
        offset = end;
    }
    let chunked = parser.end();

    let serialize = SerializeOptions::default();
    assert_eq!(
        outer_html(&whole, whole.root(), &serialize),
        outer_html(&chunked, chunked.root(), &serialize)
    );
});
