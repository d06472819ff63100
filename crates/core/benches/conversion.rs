use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use telegraph_core::{html_to_nodes, json_to_nodes, nodes_to_json, prepare_html};

fn bench_convert(c: &mut Criterion) {
    let small = std::fs::read_to_string("../../tests/fixtures/article_crlf.html").unwrap();
    let large = small.repeat(200);

    let mut group = c.benchmark_group("html_to_nodes");

    group.bench_with_input(BenchmarkId::new("small", "1KB"), &small, |b, html| {
        b.iter(|| html_to_nodes(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("large", "200KB"), &large, |b, html| {
        b.iter(|| html_to_nodes(black_box(html)))
    });

    group.finish();
}

fn bench_prepare(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/article_crlf.html").unwrap().repeat(200);

    c.bench_function("prepare_html", |b| b.iter(|| prepare_html(black_box(&html))));
}

fn bench_serialize(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/article_crlf.html").unwrap().repeat(200);
    let nodes = html_to_nodes(&html).unwrap();
    let json = nodes_to_json(&nodes).unwrap();

    c.bench_function("nodes_to_json", |b| b.iter(|| nodes_to_json(black_box(&nodes))));
    c.bench_function("json_to_nodes", |b| b.iter(|| json_to_nodes(black_box(&json))));
}

criterion_group!(benches, bench_convert, bench_prepare, bench_serialize);
criterion_main!(benches);
