//! Parser throughput benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use javelin_par::{parse, parse_expression};

/// A representative source with generics, lambdas, and control flow.
fn sample_source(classes: usize) -> String {
    let mut out = String::from(
        "package bench.sample;\n\nimport java.util.List;\nimport java.util.Map;\nimport java.util.function.Function;\n\n",
    );
    for i in 0..classes {
        out.push_str(&format!(
            "class Sample{i} {{\n\
                 private Map<String, List<Integer>> cache;\n\
                 \n\
                 List<Integer> resolve(String key, Function<String, List<Integer>> loader) {{\n\
                     List<Integer> hit = cache.get(key);\n\
                     if (hit != null) {{\n\
                         return hit;\n\
                     }}\n\
                     List<Integer> fresh = loader.apply(key);\n\
                     cache.put(key, fresh);\n\
                     for (int j = 0; j < fresh.size(); j++) {{\n\
                         process(fresh.get(j), x -> x * 31 + {i});\n\
                     }}\n\
                     return fresh;\n\
                 }}\n\
                 \n\
                 int process(Integer value, Function<Integer, Integer> f) {{\n\
                     try {{\n\
                         return f.apply((int) value.longValue());\n\
                     }} catch (RuntimeException | Error e) {{\n\
                         return value >>> 2;\n\
                     }}\n\
                 }}\n\
             }}\n\n"
        ));
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let small = sample_source(5);
    let large = sample_source(100);

    c.bench_function("parse_small", |b| {
        b.iter(|| parse(black_box(&small)).unwrap())
    });
    c.bench_function("parse_large", |b| {
        b.iter(|| parse(black_box(&large)).unwrap())
    });
    c.bench_function("parse_expression_generics", |b| {
        b.iter(|| {
            parse_expression(black_box(
                "f.apply((List<Map<String, Integer>>) xs, y -> y.get(0))",
            ))
            .unwrap()
        })
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
