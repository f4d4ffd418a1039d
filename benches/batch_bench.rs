//! Batch converter benchmarks.
//!
//! Measures fan-out and gather overhead for in-memory batches of varying
//! size, so the per-file task cost is visible apart from disk I/O.
//!
//! ```sh
//! cargo bench --bench batch_bench
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use xmljson_core::{convert_batch, ConvertOptions};
use xmljson_sources::MemoryFile;

const DOC: &str = r#"<order id="42"><line sku="a">1</line><line sku="b">2</line><note>rush</note></order>"#;

fn batch(n: usize) -> Vec<MemoryFile> {
    (0..n)
        .map(|i| {
            // Every tenth file is malformed.
            let body = if i % 10 == 9 { "<order>" } else { DOC };
            MemoryFile::new(format!("file-{i}.xml"), body)
        })
        .collect()
}

fn batch_bench(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let mut group = c.benchmark_group("convert_batch");

    for n in [1usize, 16, 256] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("memory", n), &n, |b, &n| {
            b.to_async(&runtime).iter(|| async move {
                black_box(convert_batch(batch(n), ConvertOptions::default()).await)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, batch_bench);
criterion_main!(benches);
