use criterion::{Criterion, black_box, criterion_group, criterion_main};
use layout::{ConvertOptions, DataTables, HtmlToText};

const ARTICLE_SECTIONS: usize = 2_000;
const TABLE_ROWS: usize = 2_000;

fn make_article(sections: usize) -> String {
    let mut out = String::with_capacity(sections * 256);
    out.push_str("<html><body>");
    for i in 0..sections {
        out.push_str("<h2>Section ");
        out.push_str(&i.to_string());
        out.push_str("</h2><p>Some <b>bold</b> text with a <a href=\"/page\">link</a> and ");
        out.push_str("enough words to wrap across several lines &amp; entities.</p>");
        out.push_str("<ul><li>first</li><li>second <em>item</em></li></ul>");
    }
    out.push_str("</body></html>");
    out
}

fn make_table(rows: usize) -> String {
    let mut out = String::from("<table><tr><th>id</th><th>name</th><th>notes</th></tr>");
    for i in 0..rows {
        out.push_str("<tr><td>");
        out.push_str(&i.to_string());
        out.push_str("</td><td>row name</td><td colspan=\"1\">a longer note cell</td></tr>");
    }
    out.push_str("</table>");
    out
}

fn bench_compile(c: &mut Criterion) {
    c.bench_function("bench_compile_default", |b| {
        b.iter(|| black_box(HtmlToText::new(ConvertOptions::default()).is_ok()));
    });
}

fn bench_convert_article(c: &mut Criterion) {
    let input = make_article(ARTICLE_SECTIONS);
    let Ok(converter) = HtmlToText::new(ConvertOptions::default()) else {
        return;
    };
    c.bench_function("bench_convert_article", |b| {
        b.iter(|| black_box(converter.convert(black_box(&input)).len()));
    });
}

fn bench_convert_table(c: &mut Criterion) {
    let input = make_table(TABLE_ROWS);
    let options = ConvertOptions {
        tables: DataTables::All(true),
        ..ConvertOptions::default()
    };
    let Ok(converter) = HtmlToText::new(options) else {
        return;
    };
    c.bench_function("bench_convert_table", |b| {
        b.iter(|| black_box(converter.convert(black_box(&input)).len()));
    });
}

criterion_group!(
    benches,
    bench_compile,
    bench_convert_article,
    bench_convert_table
);
criterion_main!(benches);
