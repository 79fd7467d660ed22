#![no_main]

use std::sync::LazyLock;

use layout::{ConvertOptions, DataTables, HtmlToText};
use libfuzzer_sys::fuzz_target;

static CONVERTER: LazyLock<Option<HtmlToText>> = LazyLock::new(|| {
    HtmlToText::new(ConvertOptions {
        wordwrap: Some(20),
        tables: DataTables::All(true),
        ..ConvertOptions::default()
    })
    .ok()
});

fuzz_target!(|input: &str| {
    if let Some(converter) = CONVERTER.as_ref() {
        let _ = converter.convert(input);
    }
});
