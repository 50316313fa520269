use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kicadquery::prelude::*;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn bench_parse_schematic(c: &mut Criterion) {
    let content = std::fs::read_to_string(fixture_path("simple.kicad_sch")).unwrap();

    c.bench_function("parse_schematic_str", |b| {
        b.iter(|| parse_schematic_str(black_box(&content), "simple.kicad_sch"));
    });
}

fn bench_queries(c: &mut Criterion) {
    let schematic = parse_schematic(&fixture_path("simple.kicad_sch")).unwrap();
    let query = SchematicQuery::new(&schematic);

    c.bench_function("list_components", |b| {
        b.iter(|| query.list_components(black_box(Some("R"))));
    });
    c.bench_function("find_power_nets", |b| {
        b.iter(|| query.find_power_nets());
    });
}

criterion_group!(benches, bench_parse_schematic, bench_queries);
criterion_main!(benches);
