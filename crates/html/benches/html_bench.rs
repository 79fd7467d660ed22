use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use html::{Parser, ParserOptions, TokenSink, TokenizerConfig, parse_document, tokenize};

const SMALL_BLOCKS: usize = 64;
const LARGE_BLOCKS: usize = 20_000;

fn make_blocks(blocks: usize) -> String {
    let mut out = String::with_capacity(blocks * 64);
    for i in 0..blocks {
        out.push_str("<div class=box><span>hello &amp; ");
        out.push_str(&i.to_string());
        out.push_str("</span><img src=x><p>para<li>item</div>");
    }
    out
}

fn make_rawtext_adversarial(bytes: usize) -> String {
    let mut body = String::with_capacity(bytes + 32);
    body.push_str("<script>");
    while body.len() < bytes {
        body.push_str("</scri");
        body.push('<');
        body.push_str("pt");
    }
    body.push_str("</script>");
    body
}

#[derive(Default)]
struct CountingSink {
    events: usize,
}

impl TokenSink for CountingSink {
    fn on_text(&mut self, _: &str, _: usize, _: usize) {
        self.events += 1;
    }
    fn on_text_entity(&mut self, _: char, _: usize) {
        self.events += 1;
    }
    fn on_open_tag_name(&mut self, _: &str, _: usize, _: usize) {
        self.events += 1;
    }
    fn on_open_tag_end(&mut self, _: usize) {}
    fn on_self_closing_tag(&mut self, _: usize) {}
    fn on_close_tag(&mut self, _: &str, _: usize, _: usize) {
        self.events += 1;
    }
    fn on_attrib_name(&mut self, _: &str, _: usize, _: usize) {}
    fn on_attrib_data(&mut self, _: &str, _: usize, _: usize) {}
    fn on_attrib_entity(&mut self, _: char) {}
    fn on_attrib_end(&mut self, _: html::QuoteType, _: usize) {}
    fn on_comment(&mut self, _: &str, _: usize) {}
    fn on_cdata(&mut self, _: &str, _: usize) {}
    fn on_declaration(&mut self, _: &str, _: usize) {}
    fn on_processing_instruction(&mut self, _: &str, _: usize) {}
    fn on_end(&mut self) {}
}

fn bench_tokenize_small(c: &mut Criterion) {
    let input = make_blocks(SMALL_BLOCKS);
    c.bench_function("bench_tokenize_small", |b| {
        b.iter(|| {
            let mut sink = CountingSink::default();
            tokenize(black_box(&input), TokenizerConfig::default(), &mut sink);
            black_box(sink.events);
        });
    });
}

fn bench_tokenize_large(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    c.bench_function("bench_tokenize_large", |b| {
        b.iter(|| {
            let mut sink = CountingSink::default();
            tokenize(black_box(&input), TokenizerConfig::default(), &mut sink);
            black_box(sink.events);
        });
    });
}

fn bench_parse_large(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    let options = ParserOptions::default();
    c.bench_function("bench_parse_large", |b| {
        b.iter(|| {
            let doc = parse_document(black_box(&input), &options);
            black_box(doc.len());
        });
    });
}

fn bench_streaming_chunked(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    let chunk_sizes = [1usize, 2, 3, 7, 64, 128, 256, 1024];
    c.bench_function("bench_streaming_chunked", |b| {
        b.iter_batched(
            || Parser::new(ParserOptions::default()),
            |mut parser| {
                let mut offset = 0usize;
                let mut size_idx = 0usize;
                while offset < input.len() {
                    let mut end = (offset + chunk_sizes[size_idx % chunk_sizes.len()]).min(input.len());
                    while !input.is_char_boundary(end) {
                        end += 1;
                    }
                    parser.write(&input[offset..end]);
                    offset = end;
                    size_idx += 1;
                }
                black_box(parser.end().len());
            },
            BatchSize::LargeInput,
        );
    });
}

fn bench_tokenize_rawtext_adversarial(c: &mut Criterion) {
    let input = make_rawtext_adversarial(512 * 1024);
    c.bench_function("bench_tokenize_rawtext_adversarial", |b| {
        b.iter(|| {
            let mut sink = CountingSink::default();
            tokenize(black_box(&input), TokenizerConfig::default(), &mut sink);
            black_box(sink.events);
        });
    });
}

criterion_group!(
    benches,
    bench_tokenize_small,
    bench_tokenize_large,
    bench_parse_large,
    bench_streaming_chunked,
    bench_tokenize_rawtext_adversarial
);
criterion_main!(benches);
