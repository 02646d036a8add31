//! Footnote plugin overhead benchmark
//!
//! Compares parsing with and without the footnote rules, on documents
//! with no footnotes (pure rule overhead) and footnote-heavy documents.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use markdown_it::MarkdownIt;

const TEST_DOCS: &[(&str, &str)] = &[
    (
        "plain",
        r#"# Plain Document
Just paragraphs, a [link](x), *emphasis* and `code`.

- one list
- two items
"#,
    ),
    (
        "light",
        r#"# Light Use
One reference[^a] in a paragraph.

[^a]: With a short note.
"#,
    ),
    (
        "heavy",
        r#"# Heavy Use
First[^1] second[^2] third[^3] repeat[^1] repeat[^2].

Inline^[one] and inline^[two] and inline^[three].

[^1]: Note one, with *markup*.

[^2]: Note two.

    Spanning two paragraphs.

[^3]: Note three, with a [link](https://example.com).
"#,
    ),
];

fn cmark_parser() -> MarkdownIt {
    let mut md = MarkdownIt::new();
    markdown_it::plugins::cmark::add(&mut md);
    md
}

fn footnote_parser() -> MarkdownIt {
    let mut md = cmark_parser();
    markdown_it_footnote::add(&mut md);
    md
}

fn benchmark_without_plugin(c: &mut Criterion) {
    let parser = cmark_parser();
    let mut group = c.benchmark_group("cmark_only");
    for (name, content) in TEST_DOCS {
        group.bench_with_input(BenchmarkId::new("parse", name), content, |b, content| {
            b.iter(|| parser.parse(black_box(content)).render());
        });
    }
    group.finish();
}

fn benchmark_with_plugin(c: &mut Criterion) {
    let parser = footnote_parser();
    let mut group = c.benchmark_group("with_footnotes");
    for (name, content) in TEST_DOCS {
        group.bench_with_input(BenchmarkId::new("parse", name), content, |b, content| {
            b.iter(|| parser.parse(black_box(content)).render());
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_without_plugin, benchmark_with_plugin);
criterion_main!(benches);
