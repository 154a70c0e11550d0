//! Tokenizer throughput benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use javelin_lex::tokenize;

/// Builds a synthetic but representative Java source of `classes` classes.
fn sample_source(classes: usize) -> String {
    let mut out = String::from("package bench.sample;\n\nimport java.util.List;\nimport java.util.Map;\n\n");
    for i in 0..classes {
        out.push_str(&format!(
            "/** Class number {i}. */\n\
             class Sample{i} {{\n\
                 private static final int LIMIT_{i} = 0xCAFE_{i:04X};\n\
                 private Map<String, List<Integer>> cache;\n\
                 \n\
                 int compute(int n) {{\n\
                     int total = 0;\n\
                     for (int j = 0; j < n; j++) {{\n\
                         total += (j * 31) ^ (j >>> 2);\n\
                     }}\n\
                     return total > LIMIT_{i} ? LIMIT_{i} : total;\n\
                 }}\n\
             }}\n\n"
        ));
    }
    out
}

fn bench_tokenize(c: &mut Criterion) {
    let small = sample_source(5);
    let large = sample_source(200);

    c.bench_function("tokenize_small", |b| {
        b.iter(|| tokenize(black_box(&small)).unwrap())
    });
    c.bench_function("tokenize_large", |b| {
        b.iter(|| tokenize(black_box(&large)).unwrap())
    });
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
