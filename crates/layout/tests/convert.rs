use layout::{
    ConvertOptions, DataTables, FormatOptions, HtmlToText, SelectorDefinition, html_to_text,
};
use proptest::prelude::*;

fn convert(options: ConvertOptions, html: &str) -> String {
    HtmlToText::new(options).expect("compiles").convert(html)
}

fn with_selectors(selectors: Vec<SelectorDefinition>) -> ConvertOptions {
    ConvertOptions {
        selectors,
        ..ConvertOptions::default()
    }
}

fn width(n: usize) -> ConvertOptions {
    ConvertOptions {
        wordwrap: Some(n),
        ..ConvertOptions::default()
    }
}

fn data_tables() -> ConvertOptions {
    ConvertOptions {
        tables: DataTables::All(true),
        ..ConvertOptions::default()
    }
}

#[test]
fn heading_paragraph_and_list() {
    let html = "<h1>Title</h1><p>Hello <b>world</b>.</p><ul><li>one</li><li>two</li></ul>";
    assert_eq!(
        html_to_text(html),
        "TITLE\n\nHello world.\n\n * one\n * two"
    );
}

#[test]
fn paragraph_wraps_at_the_configured_width() {
    assert_eq!(convert(width(6), "<p>aaaa bbbb</p>"), "aaaa\nbbbb");
}

#[test]
fn body_is_the_default_base_element() {
    let html = "<html><head><title>ignored</title></head><body><p>shown</p></body></html>";
    assert_eq!(html_to_text(html), "shown");
}

#[test]
fn scripts_and_styles_are_skipped() {
    assert_eq!(
        html_to_text("<style>p { color: red }</style><p>x</p><script>let a = 1;</script>"),
        "x"
    );
}

#[test]
fn entities_are_decoded() {
    assert_eq!(
        html_to_text("<p>fish &amp; chips&nbsp;&#33;</p>"),
        "fish & chips\u{a0}!"
    );
}

#[test]
fn preserved_newlines_break_lines() {
    let options = ConvertOptions {
        preserve_newlines: true,
        ..ConvertOptions::default()
    };
    assert_eq!(convert(options, "<p>a\nb   c</p>"), "a\nb c");
}

#[test]
fn data_table_colspan() {
    let html = r#"<table><tr><td>A</td><td>B</td></tr><tr><td colspan="2">CCCC</td></tr></table>"#;
    assert_eq!(convert(data_tables(), html), "A   B\nCCCC");
}

#[test]
fn header_cells_are_uppercased_in_matching_tables() {
    let options = ConvertOptions {
        tables: DataTables::Matching(vec![".data".into()]),
        ..ConvertOptions::default()
    };
    let html = concat!(
        r#"<table class="data"><thead><tr><th>name</th><th>qty</th></tr></thead>"#,
        "<tbody><tr><td>apple</td><td>3</td></tr></tbody></table>",
        "<table><tr><td>plain</td> <td>cells</td></tr></table>",
    );
    assert_eq!(
        convert(options, html),
        "NAME    QTY\napple   3\n\nplain cells"
    );
}

#[test]
fn anchors_show_their_target() {
    assert_eq!(
        html_to_text(r#"<a href="https://x.org">site</a>"#),
        "site [https://x.org]"
    );
    assert_eq!(html_to_text(r##"<a href="#top">up</a>"##), "up");
    assert_eq!(
        html_to_text(r#"<a href="mailto:me@x.org">write</a>"#),
        "write [me@x.org]"
    );
}

#[test]
fn anchor_options() {
    let options = with_selectors(vec![SelectorDefinition {
        selector: "a".into(),
        format: None,
        options: FormatOptions {
            base_url: Some("https://x.org/docs/".into()),
            hide_link_href_if_same_as_text: Some(true),
            ..FormatOptions::default()
        },
    }]);
    let html = r#"<p><a href="https://x.org/">https://x.org/</a> <a href="guide">guide</a> <a href="/img"></a></p>"#;
    assert_eq!(
        convert(options, html),
        "https://x.org/ guide [https://x.org/docs/guide] https://x.org/img"
    );
}

#[test]
fn images_show_alt_and_source() {
    assert_eq!(
        html_to_text(r#"<img src="/logo.png" alt="Logo">"#),
        "Logo [/logo.png]"
    );
    assert_eq!(html_to_text(r#"<img alt="only alt">"#), "only alt");
}

#[test]
fn ordered_lists_number_their_items() {
    assert_eq!(
        html_to_text(r#"<ol start="9"><li>a</li><li>b</li></ol>"#),
        " 9.  a\n 10. b"
    );
    assert_eq!(
        html_to_text(r#"<ol type="a"><li>x</li><li>y</li></ol>"#),
        " a. x\n b. y"
    );
    assert_eq!(
        html_to_text(r#"<ol type="I" start="4"><li>iv</li></ol>"#),
        " IV. iv"
    );
}

#[test]
fn nested_lists_indent_under_the_item() {
    assert_eq!(
        html_to_text("<ul><li>a<ul><li>b</li></ul></li></ul>"),
        " * a\n   * b"
    );
}

#[test]
fn blockquotes_are_prefixed() {
    assert_eq!(
        html_to_text("<blockquote><p>quoted</p></blockquote>"),
        "> quoted"
    );
}

#[test]
fn pre_keeps_whitespace() {
    assert_eq!(html_to_text("<pre>  a\n   b</pre>"), "  a\n   b");
}

#[test]
fn horizontal_line_spans_the_width() {
    assert_eq!(
        convert(width(10), "<p>a</p><hr><p>b</p>"),
        "a\n\n----------\n\nb"
    );
}

#[test]
fn custom_selectors_pick_other_formatters() {
    let options = with_selectors(vec![
        SelectorDefinition::new("em", "inlineSurround").with_options(FormatOptions {
            prefix: Some("_".into()),
            suffix: Some("_".into()),
            ..FormatOptions::default()
        }),
        SelectorDefinition::new("code", "inlineTag"),
        SelectorDefinition::new("p.skip", "skip"),
    ]);
    let html = r#"<p>an <em>emphasised</em> word</p><p class="skip">gone</p><p>use <code class="x">f()</code></p>"#;
    assert_eq!(
        convert(options, html),
        "an _emphasised_ word\n\nuse <code class=\"x\">f()</code>"
    );
}

#[test]
fn toml_configuration() {
    let options = ConvertOptions::from_toml_str(
        r#"
        wordwrap = false

        [[selectors]]
        selector = "h1"
        [selectors.options]
        uppercase = false
        "#,
    )
    .expect("valid config");
    let long = "word ".repeat(30);
    let text = convert(options, &format!("<h1>Title</h1><p>{long}</p>"));
    assert_eq!(text, format!("Title\n\n{}", long.trim_end()));
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn wrapped_lines_fit_the_width(
        words in prop::collection::vec("[a-z]{1,8}", 1..60),
        wrap in 10usize..40,
    ) {
        let html = format!("<p>{}</p>", words.join(" "));
        let text = convert(width(wrap), &html);
        for line in text.lines() {
            prop_assert!(line.chars().count() <= wrap, "{line:?} exceeds {wrap}");
        }
        let rejoined: Vec<&str> = text.split_whitespace().collect();
        prop_assert_eq!(rejoined, words.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
