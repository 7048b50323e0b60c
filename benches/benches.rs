use criterion::{black_box, criterion_group, criterion_main, Criterion};
use unjson::{cli::cli::SAMPLE_DOCUMENT, JsonParser};

fn wide_document(members: usize) -> String {
    let body = (0..members)
        .map(|i| format!(r#""key{}": [{}, {}.5, "value {}", true, null]"#, i, i, i, i))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{}}}", body)
}

// Benchmarks
fn benchmark_decode_sample(c: &mut Criterion) {
    let parser = JsonParser::new().unwrap();
    c.bench_function("decode_sample", |b| {
        b.iter(|| parser.parse(black_box(SAMPLE_DOCUMENT)).unwrap())
    });
}

fn benchmark_decode_wide_document(c: &mut Criterion) {
    let parser = JsonParser::new().unwrap();
    let document = wide_document(500);
    c.bench_function("decode_wide_document", |b| {
        b.iter(|| parser.parse(black_box(&document)).unwrap())
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = benchmark_decode_sample, benchmark_decode_wide_document
}
criterion_main!(benches);
