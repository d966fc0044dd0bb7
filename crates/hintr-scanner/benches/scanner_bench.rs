use criterion::{Criterion, black_box, criterion_group, criterion_main};
use hintr_scanner::tokenize;

fn sample_source(functions: usize) -> String {
    let mut source = String::from("'use strict';\n");
    for i in 0..functions {
        source.push_str(&format!(
            "function f{i}(a, b) {{\n  // add things\n  var re = /x+[/]y/g;\n  \
             return `${{a}} + ${{b}}` + (a / b) + 0x{i:x} + 'caf\\u00e9';\n}}\n"
        ));
    }
    source
}

fn bench_tokenize(c: &mut Criterion) {
    let small = sample_source(10);
    let large = sample_source(1_000);

    c.bench_function("tokenize_small", |b| {
        b.iter(|| tokenize(black_box(&small)).map(|tokens| tokens.len()))
    });
    c.bench_function("tokenize_large", |b| {
        b.iter(|| tokenize(black_box(&large)).map(|tokens| tokens.len()))
    });
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
