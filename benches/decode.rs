use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_php::{decode, render, RenderMode, RenderOptions};

fn serialize_users(count: usize) -> String {
    let mut out = format!("a:{count}:{{");
    for idx in 0..count {
        let name = format!("user-{idx}");
        out.push_str(&format!("i:{idx};O:4:\"User\":3:{{"));
        out.push_str(&format!("s:4:\"name\";s:{}:\"{name}\";", name.len()));
        out.push_str("s:7:\"\0*\0tags\";a:2:{i:0;s:5:\"admin\";i:1;s:4:\"ops \";}");
        out.push_str(&format!("s:10:\"\0User\0last\";d:{idx}.5;"));
        out.push('}');
    }
    out.push('}');
    out
}

fn serialize_shared(count: usize) -> String {
    // Every element after the first points back at slot 2.
    let mut out = format!("a:{count}:{{i:0;a:1:{{i:0;s:3:\"abc\";}}");
    for idx in 1..count {
        out.push_str(&format!("i:{idx};r:2;"));
    }
    out.push('}');
    out
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    group.measurement_time(Duration::from_secs(5));
    for count in [10usize, 1_000] {
        let users = serialize_users(count);
        group.bench_with_input(BenchmarkId::new("objects", count), &users, |b, input| {
            b.iter(|| decode(black_box(input)).expect("decode"));
        });
        let shared = serialize_shared(count);
        group.bench_with_input(BenchmarkId::new("backrefs", count), &shared, |b, input| {
            b.iter(|| decode(black_box(input)).expect("decode"));
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let value = decode(&serialize_users(1_000)).expect("decode");
    let mut group = c.benchmark_group("render");
    for mode in [RenderMode::Json, RenderMode::VarExport] {
        let options = RenderOptions::new().with_mode(mode);
        group.bench_function(format!("{mode:?}"), |b| {
            b.iter(|| render(black_box(&value), &options));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decode, bench_render);
criterion_main!(benches);
