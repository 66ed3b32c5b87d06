use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use snapdash::dashboard::{RenderContext, Template};
use snapdash::dashboard::template::placeholder;
use snapdash::system::process::{ProcessRecord, top_by_cpu};
use std::hint::black_box;

fn make_context(n: usize) -> RenderContext {
    let mut ctx = RenderContext::new();
    for i in 0..n {
        ctx.insert(format!("key_{i}"), format!("value {i}"));
    }
    ctx
}

fn make_template(n: usize, repeats: usize) -> Template {
    let mut source = String::from("<html><body>\n");
    for _ in 0..repeats {
        for i in 0..n {
            source.push_str(&format!("<p>{}</p>\n", placeholder(&format!("key_{i}"))));
        }
    }
    source.push_str("</body></html>\n");
    Template::new(source)
}

fn make_processes(n: usize) -> Vec<ProcessRecord> {
    (0..n)
        .map(|i| ProcessRecord {
            pid: i as u32 + 1,
            name: format!("proc_{i}"),
            cpu_percent: ((i * 37) % 100) as f32,
            memory_percent: (i % 10) as f32,
        })
        .collect()
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("template_render_30_keys");
    for repeats in [1usize, 10, 100] {
        let ctx = make_context(30);
        let template = make_template(30, repeats);
        group.bench_with_input(BenchmarkId::from_parameter(repeats), &repeats, |b, _| {
            b.iter(|| black_box(template.render(black_box(&ctx))));
        });
    }
    group.finish();
}

fn bench_top_by_cpu(c: &mut Criterion) {
    let mut group = c.benchmark_group("top_by_cpu_500_1000_2000");
    for n in [500usize, 1000, 2000] {
        let processes = make_processes(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(top_by_cpu(black_box(&processes), 3)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render, bench_top_by_cpu);
criterion_main!(benches);
