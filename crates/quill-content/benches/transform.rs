//! Benchmarks for the content pipeline.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use quill_content::{
    AmmoniaSanitizer, ContentPipeline, SanitizeOptions, parse_fragment, render_html, transform,
};

/// Generate post HTML with the given number of sections.
fn generate_post(sections: usize) -> String {
    let mut html = String::with_capacity(sections * 600);
    for i in 0..sections {
        html.push_str(&format!("<h2>Section {i}: Overview</h2>"));
        html.push_str(&format!(
            "<p>Paragraph {i} with <a href=\"https://example.com/{i}\">a link</a> and <a href=\"/posts/{i}\">another</a>.</p>"
        ));
        html.push_str(&format!(
            "<pre><code class=\"language-rust\">fn section_{i}() -&gt; usize {{ {i} }}</code></pre>"
        ));
        html.push_str(&format!("<img src=\"/img/{i}.png\" alt=\"Figure {i}\">"));
        html.push_str("<table><thead><tr><th>k</th><th>v</th></tr></thead><tbody>");
        for row in 0..5 {
            html.push_str(&format!("<tr><td>{row}</td><td>{}</td></tr>", row * i));
        }
        html.push_str("</tbody></table>");
    }
    html
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    for sections in [1, 10, 50] {
        let parsed = parse_fragment(&generate_post(sections));
        group.bench_with_input(BenchmarkId::from_parameter(sections), &parsed, |b, parsed| {
            b.iter(|| transform(parsed));
        });
    }
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    for sections in [1, 10, 50] {
        let html = generate_post(sections);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(sections), &html, |b, html| {
            b.iter(|| {
                // Fresh pipeline per iteration so sanitization is not cached.
                let mut pipeline = ContentPipeline::new(
                    Box::new(AmmoniaSanitizer::new()),
                    SanitizeOptions::default(),
                );
                render_html(&pipeline.render(html))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_transform, bench_pipeline);
criterion_main!(benches);
